use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use evat_algo::{market_drivers, policy_comparison, DriverRow, PolicyComparison};
use evat_io::load_policy_csv;
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::warn;

use crate::commands::telemetry::record_run_timed;
use crate::commands::util::{load_filtered, print_json, write_json_out};
use evat_cli::{DriversArgs, OutputFormat};

#[derive(Serialize)]
struct DriversReport {
    drivers: Vec<DriverRow>,
    policy_comparison: Option<Vec<PolicyComparison>>,
}

pub fn handle(args: &DriversArgs) -> Result<()> {
    let start = Instant::now();
    let res = run(args);
    if let Some(out) = &args.out {
        let csv = args.csv.display().to_string();
        let segments = args.segments.join(",");
        record_run_timed(
            out,
            "drivers",
            &[("csv", &csv), ("segments", &segments)],
            start,
            &res,
        );
    }
    res
}

fn run(args: &DriversArgs) -> Result<()> {
    let records = load_filtered(&args.csv, None, &args.segments)?;
    let drivers = market_drivers(&records);
    if drivers.is_empty() {
        println!("No registration data for the selected view");
        return Ok(());
    }

    let comparison = match &args.policy_csv {
        Some(path) => match load_policy_csv(path)? {
            Some(policy) => Some(policy_comparison(&drivers, &policy)),
            None => {
                warn!(
                    "{} has no incentive column; skipping the policy comparison",
                    path.display()
                );
                None
            }
        },
        None => None,
    };

    let report = DriversReport {
        drivers,
        policy_comparison: comparison,
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

fn print_table(report: &DriversReport) -> Result<()> {
    println!("EV penetration vs market size");
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "STATE\tTOTAL MARKET\tEV UNITS\tPENETRATION (%)")?;
    for row in &report.drivers {
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.2}",
            row.state, row.total_market, row.ev_units, row.penetration
        )?;
    }
    writer.flush()?;

    if let Some(comparison) = &report.policy_comparison {
        println!("\nPolicy support vs adoption (normalized)");
        let mut writer = TabWriter::new(io::stdout());
        writeln!(writer, "STATE\tADOPTION\tPOLICY SUPPORT")?;
        for row in comparison {
            writeln!(
                writer,
                "{}\t{:.3}\t{:.3}",
                row.state, row.adoption_norm, row.policy_norm
            )?;
        }
        writer.flush()?;
    }
    Ok(())
}

fn print_csv(report: &DriversReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for row in &report.drivers {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
