//! Forecast orchestration.
//!
//! Responsibilities:
//!
//! - build daily series from sales rows
//! - guard each slice on minimum history, then fit and extrapolate
//! - isolate per-category failures
//! - allocate inventory across forecast categories

pub mod fitter;
pub mod inventory;
pub mod slices;

pub use fitter::*;
pub use inventory::*;
pub use slices::*;
