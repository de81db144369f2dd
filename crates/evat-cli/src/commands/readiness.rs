use std::cmp::Ordering;
use std::io::{self, Write};
use std::time::Instant;

use anyhow::{anyhow, Result};
use evat_algo::{readiness_inputs, score_states, score_states_with_policy, state_year_aggregates};
use evat_core::{PolicyRecord, ReadinessScore, ScoreWeights};
use evat_io::load_policy_csv;
use serde::Serialize;
use tabwriter::TabWriter;
use tracing::warn;

use crate::commands::telemetry::record_run_timed;
use crate::commands::util::{load_filtered, parse_weights, print_json, write_json_out};
use evat_cli::{OutputFormat, ReadinessArgs};

#[derive(Serialize)]
struct ReadinessReport {
    weights: ScoreWeights,
    scores: Vec<ReadinessScore>,
}

pub fn handle(args: &ReadinessArgs) -> Result<()> {
    let start = Instant::now();
    let res = run(args);
    if let Some(out) = &args.out {
        let csv = args.csv.display().to_string();
        let segments = args.segments.join(",");
        let weights = args.weights.as_deref().unwrap_or("default");
        record_run_timed(
            out,
            "readiness",
            &[("csv", &csv), ("segments", &segments), ("weights", weights)],
            start,
            &res,
        );
    }
    res
}

fn run(args: &ReadinessArgs) -> Result<()> {
    let records = load_filtered(&args.csv, None, &args.segments)?;
    let inputs = readiness_inputs(&state_year_aggregates(&records));
    if inputs.is_empty() {
        println!("No states to score");
        return Ok(());
    }

    let policy = load_policy(args)?;
    let weights = match (&args.weights, &policy) {
        (Some(spec), _) => parse_weights(spec)?,
        (None, Some(_)) => ScoreWeights::default_with_policy(),
        (None, None) => ScoreWeights::default(),
    };

    let mut scores = match (&policy, weights.policy != 0.0) {
        (Some(policy), true) => score_states_with_policy(&inputs, policy, &weights)?,
        (None, true) => {
            return Err(anyhow!(
                "a policy weight requires --policy-csv with an incentive column"
            ))
        }
        (Some(_), false) => {
            warn!("policy data loaded but the weights carry no policy term; ignoring it");
            score_states(&inputs, &weights)?
        }
        (None, false) => score_states(&inputs, &weights)?,
    };
    // Stable sort keeps tied states in input (alphabetical) order
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    let report = ReadinessReport { weights, scores };
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

fn load_policy(args: &ReadinessArgs) -> Result<Option<Vec<PolicyRecord>>> {
    let Some(path) = &args.policy_csv else {
        return Ok(None);
    };
    let policy = load_policy_csv(path)?;
    if policy.is_none() {
        warn!(
            "{} has no incentive column; scoring without policy support",
            path.display()
        );
    }
    Ok(policy)
}

fn print_table(report: &ReadinessReport) -> Result<()> {
    println!("EV Readiness Index (0-100)");
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "RANK\tSTATE\tSCORE")?;
    for (rank, score) in report.scores.iter().enumerate() {
        writeln!(writer, "{}\t{}\t{:.1}", rank + 1, score.state, score.score)?;
    }
    writer.flush()?;
    Ok(())
}

fn print_csv(report: &ReadinessReport) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    for score in &report.scores {
        writer.serialize(score)?;
    }
    writer.flush()?;
    Ok(())
}
