//! Shared dashboard pipeline used by the CLI, the advisor and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load + validate -> aggregate -> overall forecast -> category forecasts -> inventory split
//!
//! Front-ends then only decide how to present the returned [`RunOutput`].

use std::path::Path;

use tracing::{debug, info};

use crate::domain::{InventorySplit, RunConfig, SalesTable};
use crate::error::PipelineError;
use crate::forecast::{
    CategoryForecast, ForecastOutcome, Measure, allocate, daily_series, forecast_by_category,
    forecast_slice, horizon_totals, select_categories,
};
use crate::metrics::{DomainInsights, StoreSummary};

/// Label of the whole-dataset revenue slice.
pub const OVERALL_SLICE: &str = "overall revenue";

/// Forecast results of one run.
#[derive(Debug, Clone)]
pub struct ForecastReport {
    pub overall: ForecastOutcome,
    pub overall_horizon: usize,
    pub category_horizon: usize,
    /// Categories chosen for their own forecasts, in presentation order.
    pub categories: Vec<String>,
    pub category_revenue: Vec<CategoryForecast>,
    pub category_quantity: Vec<CategoryForecast>,
    /// `None` when no category produced a forecast.
    pub inventory: Option<InventorySplit>,
}

/// All computed outputs of a single dashboard run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub table: SalesTable,
    pub summary: StoreSummary,
    pub insights: DomainInsights,
    /// `None` when forecasting is disabled for the run.
    pub forecasts: Option<ForecastReport>,
}

/// Load `path` for `config.domain` and run the dashboard on it.
pub fn run_file(path: &Path, config: &RunConfig) -> Result<RunOutput, PipelineError> {
    let table = crate::io::ingest::load_sales_csv(path, config.domain)?;
    run_dashboard(table, config)
}

/// Execute the full dashboard pipeline on an ingested table.
pub fn run_dashboard(table: SalesTable, config: &RunConfig) -> Result<RunOutput, PipelineError> {
    if table.records.is_empty() {
        return Err(PipelineError::runtime("no data rows"));
    }

    // 1) Aggregates.
    let summary = StoreSummary::compute(&table, config.top_n);
    let insights = DomainInsights::compute(&table, config.top_n);
    debug!(rows = table.records.len(), "aggregates computed");

    // 2) Forecasts.
    let forecasts = if config.forecast {
        Some(run_forecasts(&table, config))
    } else {
        None
    };

    Ok(RunOutput {
        table,
        summary,
        insights,
        forecasts,
    })
}

/// Overall revenue forecast, per-category forecasts and the inventory split.
///
/// Slices never fail the run; each outcome is recorded on its own.
pub fn run_forecasts(table: &SalesTable, config: &RunConfig) -> ForecastReport {
    let records = &table.records;

    let overall = forecast_slice(OVERALL_SLICE, &daily_series(records, Measure::Revenue), &config.settings);

    let categories = select_categories(records, config.category_ranking, config.top_n);
    let category_settings = config.category_settings();
    let category_revenue = forecast_by_category(records, &categories, Measure::Revenue, &category_settings);
    let category_quantity = forecast_by_category(records, &categories, Measure::Quantity, &category_settings);

    let inventory = allocate(&horizon_totals(&category_quantity), config.split_decimals);

    info!(
        categories = categories.len(),
        forecast = category_quantity.iter().filter(|c| c.outcome.forecast().is_some()).count(),
        inventory = inventory.is_some(),
        "forecasts complete"
    );

    ForecastReport {
        overall,
        overall_horizon: config.settings.horizon,
        category_horizon: config.category_horizon,
        categories,
        category_revenue,
        category_quantity,
        inventory,
    }
}
