//! EV Readiness Index: a composite 0-100 score per state combining
//! current EV penetration with growth momentum, optionally weighted with
//! state policy incentive support.
//!
//! Each term is min-max normalized across the states in the current view,
//! then combined with configured weights and scaled to [0, 100]. Min-max
//! scaling (rather than dividing by the maximum) keeps every score inside
//! [0, 100] even when a state's momentum is negative before clamping.

use std::collections::BTreeMap;

use evat_core::{
    EvatError, EvatResult, PolicyRecord, ReadinessInput, ReadinessScore, ScoreWeights,
    StateYearAggregate,
};

use crate::aggregate::mean_incentive_by_state;

/// Derive per-state scoring inputs from (state, year) share aggregates.
///
/// Penetration is the latest year's EV share. Momentum is the change from
/// the immediately preceding year; a state without data for latest-1 gets
/// momentum 0 and still participates in normalization alongside the rest.
/// Momentum is clamped at zero: a declining state contributes nothing from
/// the momentum term rather than a negative amount.
///
/// Output order follows the aggregates' state order and is stable, so tied
/// scores stay rankable in a deterministic order downstream.
pub fn readiness_inputs(aggregates: &[StateYearAggregate]) -> Vec<ReadinessInput> {
    let mut by_state: BTreeMap<&str, BTreeMap<i32, f64>> = BTreeMap::new();
    for aggregate in aggregates {
        by_state
            .entry(&aggregate.state)
            .or_default()
            .insert(aggregate.year, aggregate.ev_share);
    }

    by_state
        .into_iter()
        .filter_map(|(state, years)| {
            let (&latest_year, &penetration) = years.iter().next_back()?;
            let momentum = years
                .get(&(latest_year - 1))
                .map(|prior| penetration - prior)
                .unwrap_or(0.0);
            Some(ReadinessInput {
                state: state.to_string(),
                penetration: penetration.max(0.0),
                momentum: momentum.max(0.0),
            })
        })
        .collect()
}

/// Score states on penetration and momentum alone.
///
/// Empty input yields an empty result. Every input state receives exactly
/// one score, in input order. Errors only on misconfiguration: weights
/// carrying a policy component belong to [`score_states_with_policy`].
pub fn score_states(
    inputs: &[ReadinessInput],
    weights: &ScoreWeights,
) -> EvatResult<Vec<ReadinessScore>> {
    if weights.policy != 0.0 {
        return Err(EvatError::Config(
            "policy weight requires policy incentive data".into(),
        ));
    }
    Ok(composite_scores(inputs, &[], weights))
}

/// Score states on penetration, momentum, and mean policy incentive.
///
/// States absent from the policy data score 0 on the policy term, matching
/// how the source dashboard fills missing incentives with zero.
pub fn score_states_with_policy(
    inputs: &[ReadinessInput],
    policy: &[PolicyRecord],
    weights: &ScoreWeights,
) -> EvatResult<Vec<ReadinessScore>> {
    if weights.policy == 0.0 {
        return Err(EvatError::Config(
            "three-factor scoring requires a nonzero policy weight".into(),
        ));
    }
    let means = mean_incentive_by_state(policy);
    let incentives: Vec<f64> = inputs
        .iter()
        .map(|input| means.get(&input.state).copied().unwrap_or(0.0))
        .collect();
    Ok(composite_scores(inputs, &incentives, weights))
}

fn composite_scores(
    inputs: &[ReadinessInput],
    incentives: &[f64],
    weights: &ScoreWeights,
) -> Vec<ReadinessScore> {
    let penetration: Vec<f64> = inputs.iter().map(|i| i.penetration).collect();
    let momentum: Vec<f64> = inputs.iter().map(|i| i.momentum).collect();
    let norm_penetration = min_max_norm(&penetration);
    let norm_momentum = min_max_norm(&momentum);
    let norm_policy = min_max_norm(incentives);

    inputs
        .iter()
        .enumerate()
        .map(|(i, input)| {
            let policy_term = norm_policy.get(i).copied().unwrap_or(0.0);
            let score = (weights.penetration * norm_penetration[i]
                + weights.momentum * norm_momentum[i]
                + weights.policy * policy_term)
                * 100.0;
            ReadinessScore {
                state: input.state.clone(),
                score,
            }
        })
        .collect()
}

/// Min-max scaling: (x - min) / (max - min). When all values are equal
/// the spread is zero and every value maps to 0 rather than dividing by
/// zero.
fn min_max_norm(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(max > min) {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| (v - min) / (max - min)).collect()
}
