//! Additive trend + seasonality model.
//!
//! ```text
//! y(d) = β0 + β1 · t(d) + Σ_s Σ_k [a_sk sin(2πk·d/P_s) + b_sk cos(2πk·d/P_s)]
//! ```
//!
//! where `d` is the day offset from the first historical date and
//! `t(d) = d / span` is time scaled so the history covers `[0, 1]`.
//!
//! The fitter relies on two primitive operations implemented here:
//! - build a design row for a date (for OLS)
//! - predict `y` and its interval half-width for a date (for the output table)

use chrono::NaiveDate;

use crate::math::{OlsFit, push_fourier_terms};

/// One periodic component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seasonality {
    pub name: &'static str,
    pub period_days: f64,
    pub order: usize,
}

pub const WEEKLY: Seasonality = Seasonality {
    name: "weekly",
    period_days: 7.0,
    order: 3,
};

pub const YEARLY: Seasonality = Seasonality {
    name: "yearly",
    period_days: 365.25,
    order: 10,
};

pub const DAILY: Seasonality = Seasonality {
    name: "daily",
    period_days: 1.0,
    order: 4,
};

/// History needed before a seasonality is included.
const WEEKLY_MIN_SPAN_DAYS: i64 = 14;
const YEARLY_MIN_SPAN_DAYS: i64 = 730;

/// The column layout of a model, fixed by the history it was fit on.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelSpec {
    /// First historical date; day offset 0.
    pub origin: NaiveDate,
    /// Days between the first and last historical dates (at least 1).
    pub span_days: f64,
    pub seasonalities: Vec<Seasonality>,
}

impl ModelSpec {
    /// Pick the components a history from `first` to `last` can support.
    pub fn for_history(first: NaiveDate, last: NaiveDate, daily_seasonality: bool) -> Self {
        let span = (last - first).num_days();

        let mut seasonalities = Vec::new();
        if span >= YEARLY_MIN_SPAN_DAYS {
            seasonalities.push(YEARLY);
        }
        if span >= WEEKLY_MIN_SPAN_DAYS {
            seasonalities.push(WEEKLY);
        }
        if daily_seasonality {
            seasonalities.push(DAILY);
        }

        Self {
            origin: first,
            span_days: span.max(1) as f64,
            seasonalities,
        }
    }

    /// Intercept, trend, and two columns per Fourier order.
    pub fn column_count(&self) -> usize {
        2 + self.seasonalities.iter().map(|s| 2 * s.order).sum::<usize>()
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec!["intercept".to_string(), "trend".to_string()];
        for s in &self.seasonalities {
            for k in 1..=s.order {
                names.push(format!("{}_sin{k}", s.name));
                names.push(format!("{}_cos{k}", s.name));
            }
        }
        names
    }

    /// Fill the full (unmasked) design row for `date`.
    pub fn fill_design_row(&self, date: NaiveDate, out: &mut Vec<f64>) {
        out.clear();
        let d = (date - self.origin).num_days() as f64;
        out.push(1.0);
        out.push(d / self.span_days);
        for s in &self.seasonalities {
            push_fourier_terms(d, s.period_days, s.order, out);
        }
    }
}

/// A fitted model: layout, the columns kept for the regression, and the OLS fit.
#[derive(Debug, Clone)]
pub struct AdditiveModel {
    pub spec: ModelSpec,
    /// Indices into the full design row that took part in the fit.
    pub kept_columns: Vec<usize>,
    pub fit: OlsFit,
}

impl AdditiveModel {
    /// Masked design row for `date`.
    pub fn design_row(&self, date: NaiveDate) -> Vec<f64> {
        let mut full = Vec::with_capacity(self.spec.column_count());
        self.spec.fill_design_row(date, &mut full);
        self.kept_columns.iter().map(|&i| full[i]).collect()
    }

    pub fn predict(&self, date: NaiveDate) -> f64 {
        self.design_row(date)
            .iter()
            .zip(self.fit.beta.iter())
            .map(|(x, b)| x * b)
            .sum()
    }

    /// Point estimate and symmetric interval half-width `z · σ · sqrt(1 + x₀ᵀ(XᵀX)⁺x₀)`.
    pub fn predict_with_interval(&self, date: NaiveDate, z: f64) -> (f64, f64) {
        let row = self.design_row(date);
        let yhat: f64 = row.iter().zip(self.fit.beta.iter()).map(|(x, b)| x * b).sum();
        let half = z * self.fit.sigma() * (1.0 + self.fit.leverage(&row)).sqrt();
        (yhat, half)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn seasonalities_follow_history_span() {
        let short = ModelSpec::for_history(date(2024, 1, 1), date(2024, 1, 10), false);
        assert!(short.seasonalities.is_empty());
        assert_eq!(short.column_count(), 2);

        let weeks = ModelSpec::for_history(date(2024, 1, 1), date(2024, 3, 1), true);
        let names: Vec<_> = weeks.seasonalities.iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["weekly", "daily"]);
        assert_eq!(weeks.column_count(), 2 + 6 + 8);

        let years = ModelSpec::for_history(date(2021, 1, 1), date(2023, 6, 1), false);
        assert_eq!(years.seasonalities[0], YEARLY);
        assert_eq!(years.column_names().len(), years.column_count());
    }

    #[test]
    fn trend_column_spans_zero_to_one_over_history() {
        let spec = ModelSpec::for_history(date(2024, 1, 1), date(2024, 1, 11), false);
        let mut row = Vec::new();
        spec.fill_design_row(date(2024, 1, 1), &mut row);
        assert_eq!(row, vec![1.0, 0.0]);
        spec.fill_design_row(date(2024, 1, 11), &mut row);
        assert_eq!(row, vec![1.0, 1.0]);
        spec.fill_design_row(date(2024, 1, 21), &mut row);
        assert_eq!(row[1], 2.0);
    }
}
