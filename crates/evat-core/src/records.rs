//! Domain records for EV adoption analytics.
//!
//! Raw registration rows ([`VehicleRecord`]) flow in from the loader;
//! everything else here is a derived shape produced by the aggregation,
//! scoring, or forecasting layers and consumed by the presentation layer.

use serde::{Deserialize, Serialize};

/// One row of the registration dataset: counts of electric and combustion
/// vehicle registrations for a (state, year, segment) cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub state: String,
    pub year: i32,
    pub segment: String,
    pub ev_count: u64,
    pub ice_count: u64,
}

impl VehicleRecord {
    /// Total registrations in this cell. Rows where this is zero are
    /// excluded from share computation to avoid division by zero.
    pub fn total(&self) -> u64 {
        self.ev_count + self.ice_count
    }
}

/// EV share for one (state, year) group, in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateYearAggregate {
    pub state: String,
    pub year: i32,
    /// 100 * sum(ev) / sum(ev + ice) over the group, in [0, 100].
    pub ev_share: f64,
}

/// Scoring inputs for one state: current penetration plus growth momentum.
///
/// Momentum is the year-over-year change in EV share between the latest
/// year and the year before it; a state with a single year of data has
/// momentum 0. Both fields are clamped at zero by the derivation step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessInput {
    pub state: String,
    /// Latest-year EV share, in [0, 100].
    pub penetration: f64,
    pub momentum: f64,
}

/// Composite readiness score for one state, in [0, 100].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    pub state: String,
    pub score: f64,
}

/// Scope of a trend or forecast: the whole dataset or a single state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scope {
    National,
    State(String),
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Scope::National => write!(f, "national"),
            Scope::State(name) => write!(f, "{name}"),
        }
    }
}

/// A fitted prediction of EV share for one target year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub scope: Scope,
    pub slope: f64,
    pub intercept: f64,
    pub predicted_year: i32,
    /// slope * year + intercept, clamped to [0, 100].
    pub predicted_share: f64,
    /// Fraction of share variance explained by the linear fit, in [0, 1].
    pub r_squared: f64,
}

/// Mean policy incentive for one state, from the policy incentives file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyRecord {
    pub state: String,
    pub incentive_amount: f64,
}

/// Per-year registration totals and EV share for one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub ev_units: u64,
    pub ice_units: u64,
    pub ev_share: f64,
}

/// Latest-year headline numbers for one scope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub year: i32,
    pub ev_share: f64,
    pub ev_units: u64,
    pub ice_units: u64,
}
