//! Adoption forecasting: an ordinary least-squares fit of EV share as a
//! linear function of year, evaluated at a caller-chosen target year.
//!
//! The fit is closed-form (normal equations over a single predictor), so
//! identical observations always produce identical coefficients. A raw
//! linear extrapolation can leave [0, 100]; predicted shares are clamped
//! as a required post-processing step since share is a percentage.

use serde::Serialize;

use evat_core::{EvatError, EvatResult, ForecastResult, Scope};

/// Coefficients and goodness-of-fit for one share trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// 1 - SSE/SST, in [0, 1]. A zero-variance dependent (all shares
    /// equal) fits exactly, so it reports 1.
    pub r_squared: f64,
}

impl LinearFit {
    /// Raw trend value at a year, without clamping.
    pub fn value_at(&self, year: i32) -> f64 {
        self.slope * f64::from(year) + self.intercept
    }
}

/// Fit EV share against year over pre-aggregated observations.
///
/// Expects one share per year; the aggregation layer dedupes, so a
/// duplicate year here is a precondition violation reported as
/// [`EvatError::DegenerateFit`]. Fewer than two observations is
/// [`EvatError::InsufficientData`].
pub fn fit_share_trend(observations: &[(i32, f64)]) -> EvatResult<LinearFit> {
    if observations.len() < 2 {
        return Err(EvatError::InsufficientData(format!(
            "forecasting needs at least 2 years of data, got {}",
            observations.len()
        )));
    }

    let mut years: Vec<i32> = observations.iter().map(|(year, _)| *year).collect();
    years.sort_unstable();
    years.dedup();
    if years.len() == 1 {
        return Err(EvatError::DegenerateFit(format!(
            "all {} observations share year {}",
            observations.len(),
            years[0]
        )));
    }
    if years.len() < observations.len() {
        return Err(EvatError::DegenerateFit(
            "duplicate years in observations; aggregate to one share per year first".into(),
        ));
    }

    let n = observations.len() as f64;
    let mean_x = observations.iter().map(|(x, _)| f64::from(*x)).sum::<f64>() / n;
    let mean_y = observations.iter().map(|(_, y)| *y).sum::<f64>() / n;

    // Centered normal equations: slope = Sxy / Sxx
    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (x, y) in observations {
        let dx = f64::from(*x) - mean_x;
        sxx += dx * dx;
        sxy += dx * (y - mean_y);
    }
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    let mut sse = 0.0;
    let mut sst = 0.0;
    for (x, y) in observations {
        let residual = y - (slope * f64::from(*x) + intercept);
        sse += residual * residual;
        let dy = y - mean_y;
        sst += dy * dy;
    }
    let r_squared = if sst == 0.0 {
        1.0
    } else {
        (1.0 - sse / sst).clamp(0.0, 1.0)
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
    })
}

/// Fit and predict EV share for one target year.
///
/// The target may be inside the observed range (interpolation) or beyond
/// it (extrapolation); the result carries r² so callers can gauge how far
/// to trust it.
pub fn forecast(
    observations: &[(i32, f64)],
    scope: Scope,
    target_year: i32,
) -> EvatResult<ForecastResult> {
    let fit = fit_share_trend(observations)?;
    Ok(predict(&fit, scope, target_year))
}

/// Fit once and predict a contiguous range of years, inclusive.
pub fn forecast_horizon(
    observations: &[(i32, f64)],
    scope: Scope,
    start_year: i32,
    end_year: i32,
) -> EvatResult<Vec<ForecastResult>> {
    if start_year > end_year {
        return Err(EvatError::Config(format!(
            "horizon start {start_year} is after end {end_year}"
        )));
    }
    let fit = fit_share_trend(observations)?;
    Ok((start_year..=end_year)
        .map(|year| predict(&fit, scope.clone(), year))
        .collect())
}

/// Evaluate a fit at one year, clamping the share into [0, 100].
pub fn predict(fit: &LinearFit, scope: Scope, target_year: i32) -> ForecastResult {
    ForecastResult {
        scope,
        slope: fit.slope,
        intercept: fit.intercept,
        predicted_year: target_year,
        predicted_share: fit.value_at(target_year).clamp(0.0, 100.0),
        r_squared: fit.r_squared,
    }
}
