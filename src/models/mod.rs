//! The additive decomposition model used for sales forecasts.
//!
//! The model is a small set of pure functions and plain structs so that the
//! forecast pipeline can stay generic over which series it fits.

pub mod model;

pub use model::*;
