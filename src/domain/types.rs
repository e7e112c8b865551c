//! Shared domain types.
//!
//! Records are immutable once ingested; derived columns (month, weekday, age
//! group, gross margin) are computed from them on demand.

use chrono::{Datelike, NaiveDate, Weekday};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Supported data domains. Each one selects a [`crate::domain::DomainProfile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DataDomain {
    /// General gift-store sales with customer and shipping attributes.
    Gift,
    /// Clothing sales.
    Clothing,
    /// Clothing sales with customer-segment emphasis.
    Segment,
    /// Home-bakery sales with expiration and wastage fields.
    Bakery,
}

impl DataDomain {
    pub const ALL: [DataDomain; 4] = [
        DataDomain::Gift,
        DataDomain::Clothing,
        DataDomain::Segment,
        DataDomain::Bakery,
    ];

    pub fn display_name(self) -> &'static str {
        self.profile().title
    }
}

/// Where a record's revenue comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevenueSource {
    /// `quantity × price`.
    QuantityTimesPrice,
    /// A precomputed revenue column.
    Column,
}

/// How the categories that get their own forecast are chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryRanking {
    /// Top-N categories by total revenue.
    Revenue,
    /// Top-N categories by number of rows.
    Rows,
    /// Every category present in the data.
    All,
}

/// Fixed customer age buckets.
///
/// Upper edges are inclusive; the first bucket also includes 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    Under18,
    From18To25,
    From26To35,
    From36To50,
    From51To65,
    Over65,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 6] = [
        AgeGroup::Under18,
        AgeGroup::From18To25,
        AgeGroup::From26To35,
        AgeGroup::From36To50,
        AgeGroup::From51To65,
        AgeGroup::Over65,
    ];

    /// Bin edges: 0 / 18 / 25 / 35 / 50 / 65 / 100.
    pub const EDGES: [f64; 7] = [0.0, 18.0, 25.0, 35.0, 50.0, 65.0, 100.0];

    /// Bucket an age. Ages outside `[0, 100]` (or non-finite) have no bucket.
    pub fn from_age(age: f64) -> Option<AgeGroup> {
        if !age.is_finite() || age < Self::EDGES[0] || age > Self::EDGES[6] {
            return None;
        }
        Self::ALL
            .iter()
            .zip(Self::EDGES.iter().skip(1))
            .find(|(_, upper)| age <= **upper)
            .map(|(group, _)| *group)
    }

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Under18 => "<18",
            AgeGroup::From18To25 => "18-25",
            AgeGroup::From26To35 => "26-35",
            AgeGroup::From36To50 => "36-50",
            AgeGroup::From51To65 => "51-65",
            AgeGroup::Over65 => "65+",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Day of week ordered Monday first, displayed with its full English name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DayOfWeek(pub Weekday);

impl DayOfWeek {
    pub fn name(self) -> &'static str {
        match self.0 {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

impl PartialOrd for DayOfWeek {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DayOfWeek {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .num_days_from_monday()
            .cmp(&other.0.num_days_from_monday())
    }
}

impl std::fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One parsed CSV row.
///
/// Fields a domain does not map stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// 1-based CSV line number (header is line 1).
    pub line: usize,
    pub date: NaiveDate,
    pub quantity: f64,
    pub price: Option<f64>,
    pub revenue: f64,

    pub product: Option<String>,
    pub category: Option<String>,
    pub segment: Option<String>,
    pub gender: Option<String>,
    pub payment_method: Option<String>,

    pub age: Option<f64>,
    pub discount: Option<bool>,
    pub rating: Option<f64>,

    pub cost_per_unit: Option<f64>,
    pub wastage: Option<f64>,
}

impl SalesRecord {
    /// A record with only the always-present fields set.
    pub fn new(line: usize, date: NaiveDate, quantity: f64, revenue: f64) -> Self {
        Self {
            line,
            date,
            quantity,
            price: None,
            revenue,
            product: None,
            category: None,
            segment: None,
            gender: None,
            payment_method: None,
            age: None,
            discount: None,
            rating: None,
            cost_per_unit: None,
            wastage: None,
        }
    }

    /// Month bucket, `YYYY-MM`.
    pub fn month(&self) -> String {
        format!("{:04}-{:02}", self.date.year(), self.date.month())
    }

    pub fn weekday(&self) -> DayOfWeek {
        DayOfWeek(self.date.weekday())
    }

    pub fn age_group(&self) -> Option<AgeGroup> {
        self.age.and_then(AgeGroup::from_age)
    }

    /// `quantity × cost_per_unit`, when the cost is known.
    pub fn cost(&self) -> Option<f64> {
        self.cost_per_unit.map(|c| c * self.quantity)
    }

    /// Revenue minus cost; equals revenue when no cost is recorded.
    pub fn gross_margin(&self) -> f64 {
        self.revenue - self.cost().unwrap_or(0.0)
    }
}

/// The in-memory table for one run (the "derived table").
#[derive(Debug, Clone)]
pub struct SalesTable {
    pub domain: DataDomain,
    /// Header names as they appeared in the file (trimmed).
    pub headers: Vec<String>,
    pub records: Vec<SalesRecord>,
}

impl SalesTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    pub fn total_revenue(&self) -> f64 {
        self.records.iter().map(|r| r.revenue).sum()
    }

    pub fn total_quantity(&self) -> f64 {
        self.records.iter().map(|r| r.quantity).sum()
    }

    /// First and last order dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}

/// A daily series: one value per date, dates strictly ascending.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub points: Vec<(NaiveDate, f64)>,
}

impl TimeSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of distinct dates (equal to `len()` by construction).
    pub fn distinct_dates(&self) -> usize {
        self.points.len()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|(d, _)| *d)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|(d, _)| *d)
    }

    pub fn total(&self) -> f64 {
        self.points.iter().map(|(_, v)| v).sum()
    }
}

/// One forecast row.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
    /// Observed value (historical rows only).
    pub actual: Option<f64>,
}

/// Historical fit plus a future horizon for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub label: String,
    /// Historical rows first, then `horizon` future rows.
    pub points: Vec<ForecastPoint>,
    pub history_len: usize,
    pub horizon: usize,
    /// Residual standard error of the fit.
    pub sigma: f64,
}

impl Forecast {
    pub fn history(&self) -> &[ForecastPoint] {
        &self.points[..self.history_len]
    }

    pub fn future(&self) -> &[ForecastPoint] {
        &self.points[self.history_len..]
    }

    /// Sum of the point estimates over the whole horizon.
    pub fn horizon_sum(&self) -> f64 {
        self.future().iter().map(|p| p.yhat).sum()
    }

    /// Sum of the point estimates over the first `days` future dates.
    pub fn next_days_sum(&self, days: usize) -> f64 {
        self.future().iter().take(days).map(|p| p.yhat).sum()
    }
}

/// One category's share of forecast demand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryShare {
    pub category: String,
    /// Forecast units over the horizon, rounded to whole units.
    pub forecast_quantity: f64,
    /// Share of the total, in percent.
    pub percent: f64,
}

/// Percentage split of forecast demand across forecast categories.
#[derive(Debug, Clone, PartialEq)]
pub struct InventorySplit {
    /// Sorted by quantity descending.
    pub shares: Vec<InventoryShare>,
    pub total_quantity: f64,
    pub decimals: u32,
}

/// Knobs for one forecast invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSettings {
    /// Future days to extrapolate.
    pub horizon: usize,
    /// Minimum distinct dates required before fitting.
    pub min_history: usize,
    /// Central coverage of the uncertainty interval (0, 1).
    pub interval_width: f64,
    pub daily_seasonality: bool,
}

impl ForecastSettings {
    pub const DEFAULT_MIN_HISTORY: usize = 30;
    pub const DEFAULT_INTERVAL_WIDTH: f64 = 0.80;

    pub fn with_horizon(&self, horizon: usize) -> Self {
        Self {
            horizon,
            ..self.clone()
        }
    }
}

/// A full run's configuration. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub domain: DataDomain,
    pub top_n: usize,
    pub forecast: bool,
    /// Settings for the overall series (horizon = overall horizon).
    pub settings: ForecastSettings,
    pub category_horizon: usize,
    pub category_ranking: CategoryRanking,
    pub split_decimals: u32,
}

impl RunConfig {
    /// Defaults taken from the domain profile.
    pub fn for_domain(domain: DataDomain) -> Self {
        let profile = domain.profile();
        Self {
            domain,
            top_n: profile.top_n,
            forecast: profile.forecast,
            settings: ForecastSettings {
                horizon: profile.overall_horizon,
                min_history: ForecastSettings::DEFAULT_MIN_HISTORY,
                interval_width: ForecastSettings::DEFAULT_INTERVAL_WIDTH,
                daily_seasonality: true,
            },
            category_horizon: profile.category_horizon,
            category_ranking: profile.category_ranking,
            split_decimals: profile.split_decimals,
        }
    }

    pub fn category_settings(&self) -> ForecastSettings {
        self.settings.with_horizon(self.category_horizon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_buckets_cover_zero_to_hundred_exclusively() {
        assert_eq!(AgeGroup::from_age(0.0), Some(AgeGroup::Under18));
        assert_eq!(AgeGroup::from_age(18.0), Some(AgeGroup::Under18));
        assert_eq!(AgeGroup::from_age(18.5), Some(AgeGroup::From18To25));
        assert_eq!(AgeGroup::from_age(25.0), Some(AgeGroup::From18To25));
        assert_eq!(AgeGroup::from_age(26.0), Some(AgeGroup::From26To35));
        assert_eq!(AgeGroup::from_age(50.0), Some(AgeGroup::From36To50));
        assert_eq!(AgeGroup::from_age(65.0), Some(AgeGroup::From51To65));
        assert_eq!(AgeGroup::from_age(100.0), Some(AgeGroup::Over65));

        for tenth in 0..=1000 {
            let age = tenth as f64 / 10.0;
            let hits = AgeGroup::ALL
                .iter()
                .filter(|g| AgeGroup::from_age(age) == Some(**g))
                .count();
            assert_eq!(hits, 1, "age {age} should land in exactly one bucket");
        }
    }

    #[test]
    fn ages_outside_range_have_no_bucket() {
        assert_eq!(AgeGroup::from_age(-1.0), None);
        assert_eq!(AgeGroup::from_age(100.5), None);
        assert_eq!(AgeGroup::from_age(f64::NAN), None);
    }

    #[test]
    fn derived_columns() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
        let mut r = SalesRecord::new(2, date, 3.0, 30.0);
        r.cost_per_unit = Some(6.0);
        assert_eq!(r.month(), "2024-03");
        assert_eq!(r.weekday().name(), "Monday");
        assert!((r.gross_margin() - 12.0).abs() < 1e-12);
    }

    #[test]
    fn weekdays_order_monday_first() {
        assert!(DayOfWeek(Weekday::Mon) < DayOfWeek(Weekday::Sun));
        assert!(DayOfWeek(Weekday::Sat) > DayOfWeek(Weekday::Fri));
    }
}
