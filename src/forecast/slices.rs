//! Per-slice forecasting: the overall series and one series per category.
//!
//! Every slice is independent. A slice with too little history is reported as
//! skipped without ever reaching the fitter, and a slice whose fit fails is
//! reported as failed; neither stops the remaining slices.

use tracing::{info, warn};

use crate::domain::{CategoryRanking, Forecast, ForecastSettings, SalesRecord, TimeSeries};
use crate::error::PipelineError;
use crate::forecast::fitter::forecast_series;
use crate::metrics::{daily_totals, group_sum, value_counts};

/// Which numeric column a daily series sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Revenue,
    Quantity,
}

impl Measure {
    pub fn value(self, r: &SalesRecord) -> f64 {
        match self {
            Measure::Revenue => r.revenue,
            Measure::Quantity => r.quantity,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Measure::Revenue => "revenue",
            Measure::Quantity => "quantity",
        }
    }
}

/// Group `records` by date and sum `measure`: one value per date, ascending.
pub fn daily_series(records: &[SalesRecord], measure: Measure) -> TimeSeries {
    daily_totals(records, |r| measure.value(r))
}

/// Result of forecasting one slice.
#[derive(Debug, Clone, PartialEq)]
pub enum ForecastOutcome {
    Forecast(Forecast),
    /// Fewer distinct dates than the minimum; the model was never fitted.
    Skipped { distinct_dates: usize, required: usize },
    Failed(String),
}

impl ForecastOutcome {
    pub fn forecast(&self) -> Option<&Forecast> {
        match self {
            ForecastOutcome::Forecast(f) => Some(f),
            _ => None,
        }
    }

    /// Convert to a result, for callers that need this slice to exist.
    pub fn into_result(self, slice: &str) -> Result<Forecast, PipelineError> {
        match self {
            ForecastOutcome::Forecast(f) => Ok(f),
            ForecastOutcome::Skipped {
                distinct_dates,
                required,
            } => Err(PipelineError::InsufficientData {
                slice: slice.to_string(),
                distinct_dates,
                required,
            }),
            ForecastOutcome::Failed(message) => Err(PipelineError::Runtime(message)),
        }
    }
}

/// Forecast one slice with the additive model.
pub fn forecast_slice(label: &str, series: &TimeSeries, settings: &ForecastSettings) -> ForecastOutcome {
    forecast_slice_with(label, series, settings, forecast_series)
}

/// Forecast one slice with an explicit fitting function.
pub fn forecast_slice_with<F>(label: &str, series: &TimeSeries, settings: &ForecastSettings, fit: F) -> ForecastOutcome
where
    F: FnOnce(&str, &TimeSeries, &ForecastSettings) -> Result<Forecast, PipelineError>,
{
    let distinct_dates = series.distinct_dates();
    if distinct_dates < settings.min_history {
        info!(
            slice = label,
            distinct_dates,
            required = settings.min_history,
            "skipping forecast: not enough history"
        );
        return ForecastOutcome::Skipped {
            distinct_dates,
            required: settings.min_history,
        };
    }

    match fit(label, series, settings) {
        Ok(forecast) => ForecastOutcome::Forecast(forecast),
        Err(err) => {
            warn!(slice = label, error = %err, "forecast failed");
            ForecastOutcome::Failed(err.to_string())
        }
    }
}

/// One category's forecast outcome.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForecast {
    pub category: String,
    pub measure: Measure,
    pub outcome: ForecastOutcome,
}

/// Categories that get their own forecast, in presentation order.
///
/// `Revenue` and `Rows` take the top `top_n` (ties in natural order); `All`
/// returns every category in natural order.
pub fn select_categories(records: &[SalesRecord], ranking: CategoryRanking, top_n: usize) -> Vec<String> {
    let by = match ranking {
        CategoryRanking::Revenue => group_sum(records, |r| r.category.clone(), |r| r.revenue).top(top_n),
        CategoryRanking::Rows => value_counts(records, |r| r.category.clone()).top(top_n),
        CategoryRanking::All => value_counts(records, |r| r.category.clone()),
    };
    by.keys().map(str::to_string).collect()
}

/// Forecast `measure` independently for each category.
pub fn forecast_by_category(
    records: &[SalesRecord],
    categories: &[String],
    measure: Measure,
    settings: &ForecastSettings,
) -> Vec<CategoryForecast> {
    forecast_by_category_with(records, categories, measure, settings, forecast_series)
}

/// [`forecast_by_category`] with an explicit fitting function.
pub fn forecast_by_category_with<F>(
    records: &[SalesRecord],
    categories: &[String],
    measure: Measure,
    settings: &ForecastSettings,
    fit: F,
) -> Vec<CategoryForecast>
where
    F: Fn(&str, &TimeSeries, &ForecastSettings) -> Result<Forecast, PipelineError>,
{
    categories
        .iter()
        .map(|category| {
            let rows: Vec<SalesRecord> = records
                .iter()
                .filter(|r| r.category.as_deref() == Some(category.as_str()))
                .cloned()
                .collect();
            let series = daily_series(&rows, measure);
            let label = format!("{category} ({})", measure.label());
            CategoryForecast {
                category: category.clone(),
                measure,
                outcome: forecast_slice_with(&label, &series, settings, &fit),
            }
        })
        .collect()
}

/// `(category, round(Σ horizon ŷ))` for each category that produced a forecast.
pub fn horizon_totals(forecasts: &[CategoryForecast]) -> Vec<(String, f64)> {
    forecasts
        .iter()
        .filter_map(|cf| {
            cf.outcome
                .forecast()
                .map(|f| (cf.category.clone(), f.horizon_sum().round()))
        })
        .collect()
}
