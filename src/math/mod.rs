//! Mathematical utilities: least squares, Fourier basis, normal quantile.

pub mod basis;
pub mod ols;
pub mod quantile;

pub use basis::*;
pub use ols::*;
pub use quantile::*;
