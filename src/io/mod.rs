//! Input/output helpers.
//!
//! - schema validation (`schema`)
//! - CSV ingest + typed row parsing (`ingest`)
//! - forecast/inventory/advisory exports (`export`)
//! - synthetic datasets (`sample`)

pub mod export;
pub mod ingest;
pub mod sample;
pub mod schema;

pub use export::*;
pub use ingest::*;
pub use sample::*;
pub use schema::*;
