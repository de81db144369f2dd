//! Adoption forecaster properties

use evat_algo::{fit_share_trend, forecast, forecast_horizon, share_observations, trend_series};
use evat_core::{EvatError, Scope, VehicleRecord};

#[test]
fn exact_linear_series_round_trips() {
    // Perfect 2%/year growth: slope 2, r² = 1, 2023 predicts 8.0
    let observations = vec![(2020, 2.0), (2021, 4.0), (2022, 6.0)];
    let fit = fit_share_trend(&observations).unwrap();
    assert!((fit.slope - 2.0).abs() < 1e-9);
    assert!((fit.r_squared - 1.0).abs() < 1e-12);

    let result = forecast(&observations, Scope::National, 2023).unwrap();
    assert!((result.predicted_share - 8.0).abs() < 1e-9);
    assert_eq!(result.predicted_year, 2023);
}

#[test]
fn prediction_is_clamped_at_one_hundred() {
    // 30%/year growth blows past 100% within a few years
    let observations = vec![(2020, 40.0), (2021, 70.0), (2022, 100.0)];
    let result = forecast(&observations, Scope::National, 2030).unwrap();
    assert_eq!(result.predicted_share, 100.0);
    // Raw trend value really is above the cap
    let fit = fit_share_trend(&observations).unwrap();
    assert!(fit.value_at(2030) > 100.0);
}

#[test]
fn single_year_is_insufficient_data() {
    let err = fit_share_trend(&[(2022, 5.0)]).unwrap_err();
    assert!(matches!(err, EvatError::InsufficientData(_)));
}

#[test]
fn empty_input_is_insufficient_data() {
    let err = fit_share_trend(&[]).unwrap_err();
    assert!(matches!(err, EvatError::InsufficientData(_)));
}

#[test]
fn repeated_year_is_degenerate_fit() {
    // Two different shares for one year: zero predictor variance
    let err = fit_share_trend(&[(2022, 5.0), (2022, 7.0)]).unwrap_err();
    assert!(matches!(err, EvatError::DegenerateFit(_)));
}

#[test]
fn duplicate_year_among_others_is_degenerate_fit() {
    // The forecaster assumes pre-aggregated, one-share-per-year input
    let err = fit_share_trend(&[(2021, 3.0), (2022, 5.0), (2022, 7.0)]).unwrap_err();
    assert!(matches!(err, EvatError::DegenerateFit(_)));
}

#[test]
fn forecast_is_deterministic() {
    let observations = vec![(2019, 1.5), (2020, 2.25), (2021, 4.0), (2022, 5.5)];
    let first = forecast(&observations, Scope::National, 2027).unwrap();
    let second = forecast(&observations, Scope::National, 2027).unwrap();
    assert_eq!(first, second);
}

#[test]
fn historical_target_interpolates() {
    let observations = vec![(2020, 2.0), (2022, 6.0)];
    let result = forecast(&observations, Scope::National, 2021).unwrap();
    assert!((result.predicted_share - 4.0).abs() < 1e-9);
}

#[test]
fn horizon_covers_inclusive_range() {
    let observations = vec![(2020, 2.0), (2021, 4.0), (2022, 6.0)];
    let horizon =
        forecast_horizon(&observations, Scope::State("Kerala".into()), 2023, 2025).unwrap();
    let years: Vec<i32> = horizon.iter().map(|r| r.predicted_year).collect();
    assert_eq!(years, vec![2023, 2024, 2025]);
    assert!((horizon[2].predicted_share - 12.0).abs() < 1e-9);
    assert_eq!(horizon[0].scope, Scope::State("Kerala".into()));
}

#[test]
fn aggregation_feeds_one_share_per_year() {
    // Segment rows for the same year collapse before reaching the fit
    let records = vec![
        VehicleRecord {
            state: "Delhi".into(),
            year: 2021,
            segment: "2W".into(),
            ev_count: 10,
            ice_count: 490,
        },
        VehicleRecord {
            state: "Delhi".into(),
            year: 2021,
            segment: "4W".into(),
            ev_count: 10,
            ice_count: 490,
        },
        VehicleRecord {
            state: "Delhi".into(),
            year: 2022,
            segment: "2W".into(),
            ev_count: 40,
            ice_count: 960,
        },
    ];
    let observations = share_observations(&trend_series(&records));
    assert_eq!(observations.len(), 2);
    assert!(fit_share_trend(&observations).is_ok());
}
