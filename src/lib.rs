//! `sales-dash` library crate.
//!
//! The binary (`salesdash`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the pipeline is shared by the report, the advisor and the TUI
//! - code stays easy to navigate as the project grows

pub mod advisor;
pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod forecast;
pub mod io;
pub mod math;
pub mod metrics;
pub mod models;
pub mod plot;
pub mod report;
pub mod tui;
