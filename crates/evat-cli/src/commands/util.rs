use std::{fs, io, path::Path};

use anyhow::{anyhow, Result};
use evat_algo::{filter_records, ViewFilter};
use evat_core::{ScoreWeights, VehicleRecord};
use evat_io::load_adoption_csv;
use serde::Serialize;
use tracing::info;

/// Load the registration CSV and apply the view filter from the CLI flags.
pub fn load_filtered(
    csv: &Path,
    state: Option<&String>,
    segments: &[String],
) -> Result<Vec<VehicleRecord>> {
    let load = load_adoption_csv(csv)?;
    info!(
        "Loaded {} rows from {} ({} skipped, {} zero-total)",
        load.diagnostics.rows_read,
        csv.display(),
        load.diagnostics.rows_skipped,
        load.diagnostics.zero_total_rows
    );
    let mut filter = ViewFilter::default().with_segments(segments.iter().cloned());
    filter.state = state.cloned();
    Ok(filter_records(&load.records, &filter))
}

/// Parse `pen,mom` or `pen,mom,policy` into validated score weights.
pub fn parse_weights(spec: &str) -> Result<ScoreWeights> {
    let parts = spec
        .split(',')
        .map(|s| s.trim().parse::<f64>())
        .collect::<Result<Vec<f64>, _>>()
        .map_err(|_| anyhow!("weights must be numeric, got '{spec}'"))?;
    let weights = match parts.as_slice() {
        [pen, mom] => ScoreWeights::new(*pen, *mom)?,
        [pen, mom, policy] => ScoreWeights::with_policy(*pen, *mom, *policy)?,
        _ => {
            return Err(anyhow!(
                "weights must be `penetration,momentum` or `penetration,momentum,policy`"
            ))
        }
    };
    Ok(weights)
}

pub fn print_json(value: &impl Serialize) -> Result<()> {
    serde_json::to_writer_pretty(io::stdout(), value)?;
    println!();
    Ok(())
}

/// Write a report as pretty JSON to the requested output file.
pub fn write_json_out(out: &Path, value: &impl Serialize) -> Result<()> {
    if let Some(dir) = out.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    fs::write(out, serde_json::to_string_pretty(value)?)?;
    info!("Wrote {}", out.display());
    Ok(())
}
