//! Adoption drivers: market-structure rows (penetration vs total market
//! size) and the normalized policy-support vs adoption comparison.
//!
//! Unlike the readiness index, these comparisons keep the source
//! dashboard's divide-by-maximum normalization: they are display
//! normalizations for side-by-side bars, not a scored ranking.

use std::collections::BTreeMap;

use serde::Serialize;

use evat_core::{PolicyRecord, VehicleRecord};

use crate::aggregate::mean_incentive_by_state;

/// Per-state market structure summed over all years in view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriverRow {
    pub state: String,
    pub total_market: u64,
    pub ev_units: u64,
    /// EV penetration in percent over the whole period.
    pub penetration: f64,
}

/// One state's adoption and policy support, each scaled into [0, 1]
/// against the maximum in view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyComparison {
    pub state: String,
    pub adoption_norm: f64,
    pub policy_norm: f64,
}

/// Market-structure rows per state, states alphabetical. States whose
/// combined total is zero are excluded.
pub fn market_drivers(records: &[VehicleRecord]) -> Vec<DriverRow> {
    let mut by_state: BTreeMap<String, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = by_state.entry(record.state.clone()).or_insert((0, 0));
        entry.0 += record.ev_count;
        entry.1 += record.total();
    }

    by_state
        .into_iter()
        .filter(|(_, (_, total))| *total > 0)
        .map(|(state, (ev, total))| DriverRow {
            state,
            total_market: total,
            ev_units: ev,
            penetration: 100.0 * ev as f64 / total as f64,
        })
        .collect()
}

/// Compare normalized adoption against normalized mean policy incentive.
///
/// States with no policy record count as zero incentive. The incentive
/// normalizer is floored at 1 so an all-zero incentive column yields zeros
/// instead of dividing by zero.
pub fn policy_comparison(drivers: &[DriverRow], policy: &[PolicyRecord]) -> Vec<PolicyComparison> {
    let means = mean_incentive_by_state(policy);
    let max_penetration = drivers
        .iter()
        .map(|d| d.penetration)
        .fold(f64::NEG_INFINITY, f64::max);
    let max_incentive = drivers
        .iter()
        .map(|d| means.get(&d.state).copied().unwrap_or(0.0))
        .fold(0.0_f64, f64::max)
        .max(1.0);

    drivers
        .iter()
        .map(|driver| {
            let incentive = means.get(&driver.state).copied().unwrap_or(0.0);
            PolicyComparison {
                state: driver.state.clone(),
                adoption_norm: if max_penetration > 0.0 {
                    driver.penetration / max_penetration
                } else {
                    0.0
                },
                policy_norm: incentive / max_incentive,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: &str, ev: u64, ice: u64) -> VehicleRecord {
        VehicleRecord {
            state: state.into(),
            year: 2023,
            segment: "2W".into(),
            ev_count: ev,
            ice_count: ice,
        }
    }

    #[test]
    fn drivers_sum_over_years_and_segments() {
        let records = vec![record("Delhi", 10, 90), record("Delhi", 30, 70)];
        let drivers = market_drivers(&records);
        assert_eq!(drivers.len(), 1);
        assert_eq!(drivers[0].total_market, 200);
        assert!((drivers[0].penetration - 20.0).abs() < 1e-12);
    }

    #[test]
    fn comparison_scales_against_maxima() {
        let drivers = market_drivers(&[record("Delhi", 20, 80), record("Goa", 10, 90)]);
        let policy = vec![PolicyRecord {
            state: "Goa".into(),
            incentive_amount: 5_000.0,
        }];
        let comparison = policy_comparison(&drivers, &policy);
        assert!((comparison[0].adoption_norm - 1.0).abs() < 1e-12);
        assert_eq!(comparison[0].policy_norm, 0.0);
        assert!((comparison[1].policy_norm - 1.0).abs() < 1e-12);
    }

    #[test]
    fn all_zero_incentives_do_not_divide_by_zero() {
        let drivers = market_drivers(&[record("Delhi", 20, 80)]);
        let comparison = policy_comparison(&drivers, &[]);
        assert_eq!(comparison[0].policy_norm, 0.0);
    }
}
