//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the supported data domains and their static profiles (`DataDomain`, `DomainProfile`)
//! - ingested sales rows and the per-run table (`SalesRecord`, `SalesTable`)
//! - forecast and inventory outputs (`TimeSeries`, `Forecast`, `InventorySplit`)
//! - the run configuration (`RunConfig`, `ForecastSettings`)

pub mod profile;
pub mod types;

pub use profile::*;
pub use types::*;
