//! Reporting utilities: formatted terminal output for every run result.

pub mod format;

pub use format::*;
