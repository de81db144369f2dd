//! Grouping of raw registration rows into the derived tables the scoring
//! and forecasting layers consume.
//!
//! All grouping uses BTreeMaps so output ordering is deterministic
//! (states alphabetical, years ascending) regardless of input row order.

use std::collections::{BTreeMap, BTreeSet};

use evat_core::{MarketSummary, PolicyRecord, StateYearAggregate, TrendPoint, VehicleRecord};

/// View selection applied before any computation: an optional single
/// state and an optional set of vehicle segments.
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    pub state: Option<String>,
    pub segments: Option<BTreeSet<String>>,
}

impl ViewFilter {
    pub fn for_state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            segments: None,
        }
    }

    pub fn with_segments<I, S>(mut self, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = segments.into_iter().map(Into::into).collect();
        if !set.is_empty() {
            self.segments = Some(set);
        }
        self
    }

    pub fn matches(&self, record: &VehicleRecord) -> bool {
        if let Some(state) = &self.state {
            if record.state != *state {
                return false;
            }
        }
        if let Some(segments) = &self.segments {
            if !segments.contains(&record.segment) {
                return false;
            }
        }
        true
    }
}

/// Keep the rows matching the filter, preserving input order.
pub fn filter_records(records: &[VehicleRecord], filter: &ViewFilter) -> Vec<VehicleRecord> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// EV share per (state, year) group. Groups whose combined total is zero
/// are excluded so share computation never divides by zero.
pub fn state_year_aggregates(records: &[VehicleRecord]) -> Vec<StateYearAggregate> {
    let mut groups: BTreeMap<(String, i32), (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry((record.state.clone(), record.year))
            .or_insert((0, 0));
        entry.0 += record.ev_count;
        entry.1 += record.total();
    }

    groups
        .into_iter()
        .filter(|(_, (_, total))| *total > 0)
        .map(|((state, year), (ev, total))| StateYearAggregate {
            state,
            year,
            ev_share: 100.0 * ev as f64 / total as f64,
        })
        .collect()
}

/// Per-year totals and EV share over the given (already filtered) rows,
/// years ascending. Years with a zero combined total are excluded.
pub fn trend_series(records: &[VehicleRecord]) -> Vec<TrendPoint> {
    let mut years: BTreeMap<i32, (u64, u64)> = BTreeMap::new();
    for record in records {
        let entry = years.entry(record.year).or_insert((0, 0));
        entry.0 += record.ev_count;
        entry.1 += record.ice_count;
    }

    years
        .into_iter()
        .filter(|(_, (ev, ice))| ev + ice > 0)
        .map(|(year, (ev, ice))| TrendPoint {
            year,
            ev_units: ev,
            ice_units: ice,
            ev_share: 100.0 * ev as f64 / (ev + ice) as f64,
        })
        .collect()
}

/// Headline numbers for the latest year of a trend, if any.
pub fn market_summary(trend: &[TrendPoint]) -> Option<MarketSummary> {
    trend.last().map(|point| MarketSummary {
        year: point.year,
        ev_share: point.ev_share,
        ev_units: point.ev_units,
        ice_units: point.ice_units,
    })
}

/// (year, ev_share) observations for the forecaster, one per year.
pub fn share_observations(trend: &[TrendPoint]) -> Vec<(i32, f64)> {
    trend.iter().map(|p| (p.year, p.ev_share)).collect()
}

/// Mean incentive amount per state from raw policy rows.
pub fn mean_incentive_by_state(policy: &[PolicyRecord]) -> BTreeMap<String, f64> {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for record in policy {
        let entry = sums.entry(record.state.clone()).or_insert((0.0, 0));
        entry.0 += record.incentive_amount;
        entry.1 += 1;
    }
    sums.into_iter()
        .map(|(state, (sum, count))| (state, sum / count as f64))
        .collect()
}
