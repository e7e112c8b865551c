//! Metric aggregation: grouped sums/means/counts and per-domain summaries.

pub mod aggregate;
pub mod summary;

pub use aggregate::*;
pub use summary::*;
