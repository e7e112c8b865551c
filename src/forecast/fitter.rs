//! Fitting and extrapolation for a single daily series.
//!
//! Given a daily [`TimeSeries`] we:
//! - choose the model layout from the history span
//! - drop design columns that are constant over the history (they are
//!   indistinguishable from the intercept; daily terms on day-level data are
//!   the common case)
//! - solve the regression and keep the covariance for intervals
//! - predict every historical date plus `horizon` future days
//!
//! The minimum-history guard lives in the caller; this module fits whatever it
//! is given.

use chrono::Duration;
use nalgebra::{DMatrix, DVector};
use tracing::debug;

use crate::domain::{Forecast, ForecastPoint, ForecastSettings, TimeSeries};
use crate::error::PipelineError;
use crate::math::{fit_ols, interval_z};
use crate::models::{AdditiveModel, ModelSpec};

/// Columns whose variance over the history falls below this are dropped.
const CONSTANT_COLUMN_EPS: f64 = 1e-9;

/// Fit the additive model to `series`.
pub fn fit_additive(series: &TimeSeries, daily_seasonality: bool) -> Result<AdditiveModel, PipelineError> {
    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        return Err(PipelineError::runtime("Cannot fit a forecast to an empty series."));
    };

    let spec = ModelSpec::for_history(first, last, daily_seasonality);
    let m = spec.column_count();
    let n = series.len();

    let mut rows: Vec<Vec<f64>> = Vec::with_capacity(n);
    for (date, _) in &series.points {
        let mut row = Vec::with_capacity(m);
        spec.fill_design_row(*date, &mut row);
        rows.push(row);
    }

    let kept_columns = varying_columns(&rows, m);
    let p = kept_columns.len();
    debug!(
        rows = n,
        columns = m,
        kept = p,
        seasonalities = ?spec.seasonalities.iter().map(|s| s.name).collect::<Vec<_>>(),
        "fitting additive model"
    );

    let x = DMatrix::from_fn(n, p, |i, j| rows[i][kept_columns[j]]);
    let y = DVector::from_iterator(n, series.points.iter().map(|(_, v)| *v));

    let fit = fit_ols(&x, &y)
        .ok_or_else(|| PipelineError::runtime("Least squares fit failed: design matrix is ill-conditioned."))?;

    Ok(AdditiveModel {
        spec,
        kept_columns,
        fit,
    })
}

/// The intercept plus every column that varies over the history.
fn varying_columns(rows: &[Vec<f64>], m: usize) -> Vec<usize> {
    let n = rows.len() as f64;
    let mut kept = vec![0];
    for j in 1..m {
        let mean = rows.iter().map(|r| r[j]).sum::<f64>() / n;
        let var = rows.iter().map(|r| (r[j] - mean).powi(2)).sum::<f64>() / n;
        if var > CONSTANT_COLUMN_EPS {
            kept.push(j);
        }
    }
    kept
}

/// Fit `series` and produce history + `settings.horizon` future rows.
pub fn forecast_series(
    label: &str,
    series: &TimeSeries,
    settings: &ForecastSettings,
) -> Result<Forecast, PipelineError> {
    let z = interval_z(settings.interval_width).ok_or_else(|| {
        PipelineError::runtime(format!(
            "Interval width must be between 0 and 1, got {}.",
            settings.interval_width
        ))
    })?;

    let model = fit_additive(series, settings.daily_seasonality)?;

    let mut points = Vec::with_capacity(series.len() + settings.horizon);
    for &(date, actual) in &series.points {
        let (yhat, half) = model.predict_with_interval(date, z);
        points.push(ForecastPoint {
            date,
            yhat,
            yhat_lower: yhat - half,
            yhat_upper: yhat + half,
            actual: Some(actual),
        });
    }

    if let Some(last) = series.last_date() {
        for h in 1..=settings.horizon {
            let date = last + Duration::days(h as i64);
            let (yhat, half) = model.predict_with_interval(date, z);
            points.push(ForecastPoint {
                date,
                yhat,
                yhat_lower: yhat - half,
                yhat_upper: yhat + half,
                actual: None,
            });
        }
    }

    Ok(Forecast {
        label: label.to_string(),
        points,
        history_len: series.len(),
        horizon: settings.horizon,
        sigma: model.fit.sigma(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn settings(horizon: usize) -> ForecastSettings {
        ForecastSettings {
            horizon,
            min_history: 30,
            interval_width: 0.8,
            daily_seasonality: true,
        }
    }

    fn series<F: Fn(i64) -> f64>(days: i64, f: F) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        TimeSeries {
            points: (0..days).map(|d| (start + Duration::days(d), f(d))).collect(),
        }
    }

    #[test]
    fn constant_series_extrapolates_flat() {
        let s = series(40, |_| 100.0);
        let fc = forecast_series("A", &s, &settings(90)).unwrap();

        assert_eq!(fc.points.len(), 130);
        assert_eq!(fc.history().len(), 40);
        assert_eq!(fc.future().len(), 90);
        for p in fc.future() {
            assert!((p.yhat - 100.0).abs() < 1e-6, "yhat {}", p.yhat);
            assert!(p.yhat_lower <= p.yhat && p.yhat <= p.yhat_upper);
        }
        assert!((fc.horizon_sum() - 9000.0).abs() < 1e-3);
    }

    #[test]
    fn linear_trend_is_recovered() {
        let s = series(60, |d| 10.0 + 2.0 * d as f64);
        let fc = forecast_series("trend", &s, &settings(10)).unwrap();
        let first_future = &fc.future()[0];
        assert_eq!(first_future.date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert!((first_future.yhat - 130.0).abs() < 1e-6);
    }

    #[test]
    fn weekly_pattern_is_captured_and_intervals_widen_with_noise() {
        let pattern = [50.0, 60.0, 70.0, 80.0, 90.0, 150.0, 120.0];
        let s = series(84, |d| pattern[(d % 7) as usize]);
        let fc = forecast_series("weekly", &s, &settings(14)).unwrap();
        for (i, p) in fc.future().iter().enumerate() {
            let expected = pattern[(84 + i) % 7];
            assert!((p.yhat - expected).abs() < 1e-6, "day {i}: {} vs {expected}", p.yhat);
        }

        let noisy = series(84, |d| pattern[(d % 7) as usize] + if d % 2 == 0 { 5.0 } else { -5.0 });
        let fc_noisy = forecast_series("noisy", &noisy, &settings(14)).unwrap();
        let p = &fc_noisy.future()[0];
        assert!(p.yhat_upper - p.yhat_lower > 1.0);
        assert!(fc_noisy.sigma > 0.0);
    }

    #[test]
    fn daily_terms_are_dropped_as_constant() {
        let s = series(30, |d| d as f64);
        let model = fit_additive(&s, true).unwrap();
        let names = model.spec.column_names();
        assert!(
            model
                .kept_columns
                .iter()
                .all(|&i| !names[i].starts_with("daily"))
        );
        assert!(model.kept_columns.contains(&0));
    }

    #[test]
    fn invalid_interval_width_is_rejected() {
        let s = series(30, |_| 1.0);
        let mut bad = settings(5);
        bad.interval_width = 1.5;
        assert!(forecast_series("x", &s, &bad).is_err());
    }
}
