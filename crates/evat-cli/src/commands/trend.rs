use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use evat_algo::{market_summary, trend_series};
use evat_core::{MarketSummary, TrendPoint};
use serde::Serialize;
use tabwriter::TabWriter;

use crate::commands::telemetry::record_run_timed;
use crate::commands::util::{load_filtered, print_json, write_json_out};
use evat_cli::{OutputFormat, TrendArgs};

#[derive(Serialize)]
struct TrendReport {
    scope: String,
    points: Vec<TrendPoint>,
    summary: Option<MarketSummary>,
}

pub fn handle(args: &TrendArgs) -> Result<()> {
    let start = Instant::now();
    let res = run(args);
    if let Some(out) = &args.out {
        let csv = args.csv.display().to_string();
        let scope = args.state.as_deref().unwrap_or("national");
        let segments = args.segments.join(",");
        record_run_timed(
            out,
            "trend",
            &[("csv", &csv), ("scope", scope), ("segments", &segments)],
            start,
            &res,
        );
    }
    res
}

fn run(args: &TrendArgs) -> Result<()> {
    let records = load_filtered(&args.csv, args.state.as_ref(), &args.segments)?;
    let points = trend_series(&records);
    if points.is_empty() {
        println!("No registration data for the selected view");
        return Ok(());
    }
    let summary = market_summary(&points);
    let report = TrendReport {
        scope: args.state.clone().unwrap_or_else(|| "national".into()),
        points,
        summary,
    };

    match args.format {
        OutputFormat::Table => print_table(&report)?,
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => print_csv(&report)?,
    }
    if let Some(out) = &args.out {
        write_json_out(out, &report)?;
    }
    Ok(())
}

fn print_table(report: &TrendReport) -> Result<()> {
    println!("EV share trend — {}", report.scope);
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "YEAR\tEV UNITS\tICE UNITS\tEV SHARE (%)")?;
    for point in &report.points {
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.2}",
            point.year, point.ev_units, point.ice_units, point.ev_share
        )?;
    }
    writer.flush()?;
    if let Some(summary) = &report.summary {
        println!(
            "Latest ({}): {:.2}% EV share, {} EV, {} ICE",
            summary.year, summary.ev_share, summary.ev_units, summary.ice_units
        );
    }
    Ok(())
}

fn print_csv(report: &TrendReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for point in &report.points {
        writer.serialize(point)?;
    }
    writer.flush()?;
    Ok(())
}
