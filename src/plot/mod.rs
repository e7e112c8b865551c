//! Plain-terminal charts.

pub mod ascii;

pub use ascii::*;
