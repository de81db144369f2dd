use std::{fs::File, path::Path};

use anyhow::{anyhow, Context, Result};
use evat_core::{PolicyRecord, VehicleRecord};
use polars::prelude::*;

/// Counters describing what the loader dropped or flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadDiagnostics {
    /// Data rows present in the file.
    pub rows_read: usize,
    /// Rows skipped for a missing/blank state, missing year, or negative count.
    pub rows_skipped: usize,
    /// Rows kept whose ev + ice total is zero. Aggregation excludes these
    /// from share computation.
    pub zero_total_rows: usize,
}

/// A loaded adoption dataset: the usable records plus load diagnostics.
#[derive(Debug, Clone)]
pub struct AdoptionLoad {
    pub records: Vec<VehicleRecord>,
    pub diagnostics: LoadDiagnostics,
}

/// Load the EV/ICE registration dataset from a CSV file.
///
/// Headers are lowercased and trimmed, then the ev, ice, year, and segment
/// columns are located by keyword match (`ev`, `ice`, `year`,
/// `segment`/`vehicle`). A `state` column must be present by name. A
/// missing required column is an error naming the column; malformed rows
/// are skipped and counted in the diagnostics.
pub fn load_adoption_csv(path: &Path) -> Result<AdoptionLoad> {
    let mut df = read_csv_frame(path)?;
    normalize_headers(&mut df)?;

    let ev_col = find_column(&df, &["ev"])
        .ok_or_else(|| anyhow!("no EV count column found in {}", path.display()))?;
    let ice_col = find_column(&df, &["ice"])
        .ok_or_else(|| anyhow!("no ICE count column found in {}", path.display()))?;
    let year_col = find_column(&df, &["year"])
        .ok_or_else(|| anyhow!("no year column found in {}", path.display()))?;
    let segment_col = find_column(&df, &["segment", "vehicle"])
        .ok_or_else(|| anyhow!("no vehicle segment column found in {}", path.display()))?;
    if !has_column(&df, "state") {
        return Err(anyhow!("no state column found in {}", path.display()));
    }

    let states = df
        .column("state")?
        .utf8()
        .context("state column must be text")?;
    let segments = df
        .column(&segment_col)?
        .cast(&DataType::Utf8)
        .context("casting segment column to text")?;
    let segments = segments.utf8()?;
    let years = df
        .column(&year_col)?
        .cast(&DataType::Int64)
        .context("casting year column to Int64")?;
    let years = years.i64()?;
    let ev_counts = df
        .column(&ev_col)?
        .cast(&DataType::Int64)
        .context("casting EV count column to Int64")?;
    let ev_counts = ev_counts.i64()?;
    let ice_counts = df
        .column(&ice_col)?
        .cast(&DataType::Int64)
        .context("casting ICE count column to Int64")?;
    let ice_counts = ice_counts.i64()?;

    let mut records = Vec::with_capacity(df.height());
    let mut diagnostics = LoadDiagnostics {
        rows_read: df.height(),
        ..LoadDiagnostics::default()
    };

    for i in 0..df.height() {
        let state = states.get(i).map(str::trim).unwrap_or("");
        let year = years.get(i);
        let ev = ev_counts.get(i).unwrap_or(0);
        let ice = ice_counts.get(i).unwrap_or(0);

        let (year, state) = match (year, state) {
            (Some(y), s) if !s.is_empty() => (y, s),
            _ => {
                diagnostics.rows_skipped += 1;
                continue;
            }
        };
        if ev < 0 || ice < 0 {
            diagnostics.rows_skipped += 1;
            continue;
        }
        if ev + ice == 0 {
            diagnostics.zero_total_rows += 1;
        }

        records.push(VehicleRecord {
            state: state.to_string(),
            year: year as i32,
            segment: segments.get(i).map(str::trim).unwrap_or("unknown").to_string(),
            ev_count: ev as u64,
            ice_count: ice as u64,
        });
    }

    Ok(AdoptionLoad {
        records,
        diagnostics,
    })
}

/// Load the per-state policy incentive dataset from a CSV file.
///
/// The incentive column is located by keyword match (`incentive`,
/// `subsidy`, `amount`, `fame`). Returns `Ok(None)` when no such column
/// exists so callers can degrade gracefully rather than fail the whole
/// run. One record per data row; averaging per state is the caller's job.
pub fn load_policy_csv(path: &Path) -> Result<Option<Vec<PolicyRecord>>> {
    let mut df = read_csv_frame(path)?;
    normalize_headers(&mut df)?;

    if !has_column(&df, "state") {
        return Err(anyhow!("no state column found in {}", path.display()));
    }
    let Some(incentive_col) = find_column(&df, &["incentive", "subsidy", "amount", "fame"]) else {
        return Ok(None);
    };

    let states = df
        .column("state")?
        .utf8()
        .context("state column must be text")?;
    let incentives = df
        .column(&incentive_col)?
        .cast(&DataType::Float64)
        .context("casting incentive column to Float64")?;
    let incentives = incentives.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let state = states.get(i).map(str::trim).unwrap_or("");
        if state.is_empty() {
            continue;
        }
        if let Some(amount) = incentives.get(i) {
            records.push(PolicyRecord {
                state: state.to_string(),
                incentive_amount: amount,
            });
        }
    }

    Ok(Some(records))
}

fn read_csv_frame(path: &Path) -> Result<DataFrame> {
    let mut file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    CsvReader::new(&mut file)
        .has_header(true)
        .finish()
        .with_context(|| format!("reading CSV file {}", path.display()))
}

/// Lowercase and trim every header, matching how the source exports vary.
fn normalize_headers(df: &mut DataFrame) -> Result<()> {
    let renames: Vec<(String, String)> = df
        .get_column_names()
        .iter()
        .map(|name| (name.to_string(), name.trim().to_lowercase()))
        .filter(|(old, new)| old != new)
        .collect();
    for (old, new) in renames {
        df.rename(&old, &new)
            .with_context(|| format!("normalizing header '{old}'"))?;
    }
    Ok(())
}

/// First column whose (normalized) name contains any of the keywords.
fn find_column(df: &DataFrame, keywords: &[&str]) -> Option<String> {
    df.get_column_names().iter().find_map(|name| {
        keywords
            .iter()
            .any(|k| name.contains(k))
            .then(|| name.to_string())
    })
}

fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| *c == name)
}
