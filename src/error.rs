//! Error types.
//!
//! Two layers:
//!
//! - [`PipelineError`]: typed failures of the core pipeline (schema, insufficient
//!   history, parse, runtime). Front-ends decide how to surface them.
//! - [`AppError`]: what the binary prints, paired with a process exit code.

use thiserror::Error;

/// Failures produced by ingest, aggregation, and forecasting.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Required columns are absent from the CSV header. Processing stops before
    /// any row is parsed.
    #[error("Missing columns: {}. Please upload a CSV file with the required columns.", .missing.join(", "))]
    Schema { missing: Vec<String> },

    /// A series has too few distinct dates to be forecast.
    #[error("Not enough data to forecast {slice}: {distinct_dates} distinct dates, need at least {required}.")]
    InsufficientData {
        slice: String,
        distinct_dates: usize,
        required: usize,
    },

    /// A cell could not be parsed into the type its column requires.
    #[error("line {line}, column `{column}`: {message}")]
    Parse {
        line: usize,
        column: String,
        message: String,
    },

    #[error("{0}")]
    Runtime(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl PipelineError {
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::Runtime(message.into())
    }

    /// Process exit code used when this error ends a CLI run.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Schema { .. } | PipelineError::Parse { .. } | PipelineError::Csv(_) => 2,
            PipelineError::InsufficientData { .. } => 3,
            PipelineError::Runtime(_) | PipelineError::Io(_) => 4,
        }
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        let message = match &err {
            PipelineError::Schema { .. } | PipelineError::InsufficientData { .. } => err.to_string(),
            _ => format!("Error while processing the file: {err}"),
        };
        AppError::new(err.exit_code(), message)
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_missing_columns_in_order() {
        let err = PipelineError::Schema {
            missing: vec!["Price".to_string(), "Quantity".to_string()],
        };
        let app: AppError = err.into();
        assert_eq!(app.exit_code(), 2);
        assert!(app.message().starts_with("Missing columns: Price, Quantity."));
    }

    #[test]
    fn runtime_errors_carry_the_underlying_text() {
        let app: AppError = PipelineError::runtime("boom").into();
        assert_eq!(app.exit_code(), 4);
        assert_eq!(app.to_string(), "Error while processing the file: boom");
    }
}
