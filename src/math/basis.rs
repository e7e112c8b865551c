//! Fourier basis for periodic components.
//!
//! A seasonality with period `P` days and order `N` contributes `2N` columns:
//!
//! - `sin(2π k t / P)` and `cos(2π k t / P)` for `k = 1..=N`
//!
//! `t` is measured in days from a fixed origin so that history and future rows
//! share the same phase.

use std::f64::consts::TAU;

/// Append the `2 * order` Fourier terms for day offset `t` to `out`.
pub fn push_fourier_terms(t: f64, period: f64, order: usize, out: &mut Vec<f64>) {
    for k in 1..=order {
        let angle = TAU * k as f64 * t / period;
        out.push(angle.sin());
        out.push(angle.cos());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terms_repeat_every_period() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        push_fourier_terms(3.0, 7.0, 3, &mut a);
        push_fourier_terms(10.0, 7.0, 3, &mut b);
        assert_eq!(a.len(), 6);
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn whole_day_offsets_make_daily_terms_constant() {
        let mut first = Vec::new();
        push_fourier_terms(0.0, 1.0, 4, &mut first);
        for day in 1..20 {
            let mut row = Vec::new();
            push_fourier_terms(day as f64, 1.0, 4, &mut row);
            for (x, y) in first.iter().zip(&row) {
                assert!((x - y).abs() < 1e-9);
            }
        }
    }
}
