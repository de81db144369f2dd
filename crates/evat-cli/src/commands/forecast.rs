use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use evat_algo::{forecast_horizon, share_observations, trend_series};
use evat_core::{EvatError, Scope};
use serde::Serialize;
use tabwriter::TabWriter;

use crate::commands::telemetry::record_run_timed;
use crate::commands::util::{load_filtered, print_json, write_json_out};
use evat_cli::{ForecastArgs, OutputFormat};

#[derive(Serialize)]
struct ForecastReport {
    scope: String,
    slope: f64,
    intercept: f64,
    r_squared: f64,
    predictions: Vec<Prediction>,
}

#[derive(Serialize)]
struct Prediction {
    year: i32,
    predicted_share: f64,
}

pub fn handle(args: &ForecastArgs) -> Result<()> {
    let start = Instant::now();
    let res = run(args);
    if let Some(out) = &args.out {
        let csv = args.csv.display().to_string();
        let scope = args.state.as_deref().unwrap_or("national");
        let year = args.year.to_string();
        let horizon = args.horizon.to_string();
        record_run_timed(
            out,
            "forecast",
            &[
                ("csv", &csv),
                ("scope", scope),
                ("year", &year),
                ("horizon", &horizon),
            ],
            start,
            &res,
        );
    }
    res
}

fn run(args: &ForecastArgs) -> Result<()> {
    let records = load_filtered(&args.csv, args.state.as_ref(), &args.segments)?;
    let observations = share_observations(&trend_series(&records));
    let scope = args
        .state
        .clone()
        .map(Scope::State)
        .unwrap_or(Scope::National);
    let end_year = args.year + args.horizon as i32;

    let results = match forecast_horizon(&observations, scope.clone(), args.year, end_year) {
        Ok(results) => results,
        // Both conditions are recoverable: explain, do not crash
        Err(EvatError::InsufficientData(msg)) => {
            println!("Not enough data to forecast: {msg}");
            return Ok(());
        }
        Err(EvatError::DegenerateFit(msg)) => {
            println!("Cannot fit a trend: {msg}");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let first = &results[0];
    let report = ForecastReport {
        scope: scope.to_string(),
        slope: first.slope,
        intercept: first.intercept,
        r_squared: first.r_squared,
        predictions: results
            .iter()
            .map(|r| Prediction {
                year: r.predicted_year,
                predicted_share: r.predicted_share,
            })
            .collect(),
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

fn print_table(report: &ForecastReport) -> Result<()> {
    println!(
        "EV share projection — {} (share = {:.4} * year + {:.2}, r_squared = {:.3})",
        report.scope, report.slope, report.intercept, report.r_squared
    );
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "YEAR\tPREDICTED EV SHARE (%)")?;
    for prediction in &report.predictions {
        writeln!(
            writer,
            "{}\t{:.2}",
            prediction.year, prediction.predicted_share
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn print_csv(report: &ForecastReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for prediction in &report.predictions {
        writer.serialize(prediction)?;
    }
    writer.flush()?;
    Ok(())
}
