//! # evat-algo: EV Adoption Analytics
//!
//! The numeric core of the toolkit: stateless, deterministic transforms
//! over in-memory registration records.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`aggregate`] | View filtering, (state, year) share aggregation, trend series |
//! | [`readiness`] | EV Readiness Index (min-max normalized weighted composite) |
//! | [`forecast`] | Closed-form OLS share trend and clamped predictions |
//! | [`drivers`] | Market-structure and policy-support comparisons |
//!
//! Every function recomputes from the records it is handed; nothing is
//! cached or persisted. Empty input produces empty output rather than an
//! error; the two forecaster preconditions (fewer than two distinct
//! years, zero predictor variance) surface as distinct
//! [`evat_core::EvatError`] variants for the presentation layer to
//! explain.

pub mod aggregate;
pub mod drivers;
pub mod forecast;
pub mod readiness;

pub use aggregate::{
    filter_records, market_summary, mean_incentive_by_state, share_observations,
    state_year_aggregates, trend_series, ViewFilter,
};
pub use drivers::{market_drivers, policy_comparison, DriverRow, PolicyComparison};
pub use forecast::{fit_share_trend, forecast, forecast_horizon, predict, LinearFit};
pub use readiness::{readiness_inputs, score_states, score_states_with_policy};
