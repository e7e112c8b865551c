//! Downloadable outputs: forecast CSV, inventory CSV, advisory text.
//!
//! The CSV files are meant to be easy to consume in spreadsheets or downstream
//! scripts: one header row, ISO dates, plain numbers.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::domain::{Forecast, InventorySplit};
use crate::error::PipelineError;

#[derive(Debug, Serialize)]
struct ForecastRow {
    date: NaiveDate,
    yhat: f64,
    yhat_lower: f64,
    yhat_upper: f64,
}

/// Write every forecast row (history and horizon) as
/// `date,yhat,yhat_lower,yhat_upper`.
pub fn write_forecast_csv(path: &Path, forecast: &Forecast) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_path(path)?;
    for p in &forecast.points {
        writer.serialize(ForecastRow {
            date: p.date,
            yhat: p.yhat,
            yhat_lower: p.yhat_lower,
            yhat_upper: p.yhat_upper,
        })?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = forecast.points.len(), "wrote forecast CSV");
    Ok(())
}

/// Write the inventory split as `category,forecast_quantity,percent`.
pub fn write_inventory_csv(path: &Path, split: &InventorySplit) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_path(path)?;
    for share in &split.shares {
        writer.serialize(share)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = split.shares.len(), "wrote inventory CSV");
    Ok(())
}

/// Write a plain-text file (advisory output).
pub fn write_text(path: &Path, text: &str) -> Result<(), PipelineError> {
    fs::write(path, text).map_err(|e| {
        PipelineError::runtime(format!("Failed to write '{}': {e}", path.display()))
    })?;
    info!(path = %path.display(), bytes = text.len(), "wrote text file");
    Ok(())
}
