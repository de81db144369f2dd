use std::{path::Path, time::Instant};

use crate::manifest::record_manifest;

/// Record a run manifest beside the output file, tagging the run with its
/// duration and success/failure status. Manifest failures are reported
/// but never fail the command itself.
pub fn record_run_timed(
    out: &Path,
    command: &str,
    params: &[(&str, &str)],
    start: Instant,
    result: &anyhow::Result<()>,
) {
    let duration_ms = start.elapsed().as_millis();
    let status = if result.is_ok() { "success" } else { "failure" };
    if let Err(err) = record_manifest(out, command, params, status, Some(duration_ms)) {
        eprintln!("Failed to record run manifest: {err}");
    }
}
