//! Ordinary least squares.
//!
//! The forecast model is linear in its coefficients once the trend and
//! seasonal columns are fixed, so each fit is one small regression:
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! Implementation choices:
//! - SVD solve, since the design matrix is tall (one row per historical day)
//!   and seasonal columns can be nearly collinear on short histories.
//! - The pseudo-inverse `X⁺` is returned alongside β; `X⁺ X⁺ᵀ = (XᵀX)⁺` feeds
//!   the prediction interval without forming `XᵀX` explicitly.

use nalgebra::{DMatrix, DVector};

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Coefficients plus the quantities needed for interval estimates.
#[derive(Debug, Clone)]
pub struct OlsFit {
    pub beta: DVector<f64>,
    /// `(XᵀX)⁺`, p × p.
    pub covariance: DMatrix<f64>,
    pub sse: f64,
    /// Residual degrees of freedom, at least 1.
    pub dof: usize,
}

impl OlsFit {
    /// Residual standard error.
    pub fn sigma(&self) -> f64 {
        (self.sse / self.dof as f64).sqrt()
    }

    /// `x₀ᵀ (XᵀX)⁺ x₀` for a new design row.
    pub fn leverage(&self, row: &[f64]) -> f64 {
        let x0 = DVector::from_row_slice(row);
        (x0.transpose() * &self.covariance * &x0)[(0, 0)].max(0.0)
    }
}

/// Fit `y ≈ X β` and keep the unscaled covariance of β.
pub fn fit_ols(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<OlsFit> {
    let beta = solve_least_squares(x, y)?;
    let pinv = x.clone().pseudo_inverse(1e-10).ok()?;
    let covariance = &pinv * pinv.transpose();

    let residuals = y - x * &beta;
    let sse = residuals.norm_squared();
    let dof = x.nrows().saturating_sub(x.ncols()).max(1);

    if !sse.is_finite() || covariance.iter().any(|v| !v.is_finite()) {
        return None;
    }

    Some(OlsFit {
        beta,
        covariance,
        sse,
        dof,
    })
}
