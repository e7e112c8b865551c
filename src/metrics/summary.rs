//! Business summaries computed from a sales table.
//!
//! [`StoreSummary`] is the general store overview (and the input to the
//! advisory prompt). The per-domain insight structs hold the extra headline
//! numbers each dashboard shows.

use crate::domain::{DataDomain, SalesTable, TimeSeries};
use crate::metrics::aggregate::{
    Aggregate, AggregateEntry, AgeBreakdown, age_breakdown, daily_totals, group_sum, mean_of,
    recent_revenue, value_counts,
};

/// Headline metrics and breakdowns for one table.
///
/// Breakdowns over columns the domain does not carry are empty.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSummary {
    pub total_revenue: f64,
    pub total_units: f64,
    pub average_rating: Option<f64>,
    pub row_count: usize,

    /// Top-N products by revenue, descending.
    pub top_products: Aggregate,
    pub category_revenue: Aggregate,
    /// Rows per payment method, descending.
    pub payment_counts: Aggregate,
    pub segment_revenue: Aggregate,
    pub gender_revenue: Aggregate,
    pub discounted_revenue: f64,
    pub full_price_revenue: f64,
    pub age: AgeBreakdown,
    /// Monday→Sunday.
    pub weekday_revenue: Aggregate,
    /// `YYYY-MM` ascending.
    pub monthly_revenue: Aggregate,
    pub average_monthly_revenue: f64,
}

impl StoreSummary {
    pub fn compute(table: &SalesTable, top_n: usize) -> Self {
        let records = &table.records;

        let monthly_revenue = group_sum(records, |r| Some(r.month()), |r| r.revenue);
        let average_monthly_revenue = if monthly_revenue.is_empty() {
            0.0
        } else {
            monthly_revenue.total() / monthly_revenue.len() as f64
        };

        let discount = group_sum(records, |r| r.discount, |r| r.revenue);

        Self {
            total_revenue: table.total_revenue(),
            total_units: table.total_quantity(),
            average_rating: mean_of(records, |r| r.rating),
            row_count: records.len(),
            top_products: group_sum(records, |r| r.product.clone(), |r| r.revenue).top(top_n),
            category_revenue: group_sum(records, |r| r.category.clone(), |r| r.revenue),
            payment_counts: value_counts(records, |r| r.payment_method.clone()).sorted_desc(),
            segment_revenue: group_sum(records, |r| r.segment.clone(), |r| r.revenue),
            gender_revenue: group_sum(records, |r| r.gender.clone(), |r| r.revenue),
            discounted_revenue: discount.get("true").unwrap_or(0.0),
            full_price_revenue: discount.get("false").unwrap_or(0.0),
            age: age_breakdown(records),
            weekday_revenue: group_sum(records, |r| Some(r.weekday()), |r| r.revenue),
            monthly_revenue,
            average_monthly_revenue,
        }
    }

    pub fn top_payment_method(&self) -> Option<&AggregateEntry> {
        // Already sorted descending; the first row is the first maximum.
        self.payment_counts.entries().first()
    }

    pub fn top_segment(&self) -> Option<&AggregateEntry> {
        self.segment_revenue.max_entry()
    }

    pub fn top_gender(&self) -> Option<&AggregateEntry> {
        self.gender_revenue.max_entry()
    }

    pub fn top_age_group(&self) -> Option<&AggregateEntry> {
        self.age.revenue.max_entry()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClothingInsights {
    /// Revenue over the 30 days up to the latest order.
    pub recent_revenue: f64,
    pub top_product: Option<AggregateEntry>,
    pub top_category: Option<AggregateEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentInsights {
    pub top_categories: Aggregate,
    pub top_segment: Option<AggregateEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BakeryInsights {
    pub total_gross_margin: f64,
    /// True when margins are net of `Cost per Unit`.
    pub has_cost: bool,
    pub daily_wastage: TimeSeries,
    pub recommendations: &'static [&'static str],
}

pub const BAKERY_RECOMMENDATIONS: [&str; 3] = [
    "Align production with forecasted category demand to minimize wastage.",
    "Monitor shelf life and expiration dates to reduce spoilage.",
    "Optimize pricing and discounts based on forecast trends.",
];

/// Extra headline numbers, by domain.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainInsights {
    Gift,
    Clothing(ClothingInsights),
    Segment(SegmentInsights),
    Bakery(BakeryInsights),
}

pub const RECENT_WINDOW_DAYS: i64 = 30;

impl DomainInsights {
    pub fn compute(table: &SalesTable, top_n: usize) -> Self {
        let records = &table.records;
        match table.domain {
            DataDomain::Gift => DomainInsights::Gift,
            DataDomain::Clothing => {
                let by_product = group_sum(records, |r| r.product.clone(), |r| r.revenue);
                let by_category = group_sum(records, |r| r.category.clone(), |r| r.revenue);
                DomainInsights::Clothing(ClothingInsights {
                    recent_revenue: recent_revenue(records, RECENT_WINDOW_DAYS),
                    top_product: by_product.max_entry().cloned(),
                    top_category: by_category.max_entry().cloned(),
                })
            }
            DataDomain::Segment => {
                let by_segment = group_sum(records, |r| r.segment.clone(), |r| r.revenue);
                let top_categories =
                    group_sum(records, |r| r.category.clone(), |r| r.revenue).top(top_n);
                DomainInsights::Segment(SegmentInsights {
                    top_categories,
                    top_segment: by_segment.max_entry().cloned(),
                })
            }
            DataDomain::Bakery => DomainInsights::Bakery(BakeryInsights {
                total_gross_margin: records.iter().map(|r| r.gross_margin()).sum(),
                has_cost: records.iter().any(|r| r.cost_per_unit.is_some()),
                daily_wastage: daily_totals(records, |r| r.wastage.unwrap_or(0.0)),
                recommendations: &BAKERY_RECOMMENDATIONS,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SalesRecord;
    use chrono::NaiveDate;

    fn table(domain: DataDomain, rows: Vec<SalesRecord>) -> SalesTable {
        SalesTable {
            domain,
            headers: Vec::new(),
            records: rows,
        }
    }

    fn row(month: u32, day: u32, product: &str, revenue: f64) -> SalesRecord {
        let date = NaiveDate::from_ymd_opt(2024, month, day).unwrap();
        let mut r = SalesRecord::new(2, date, 1.0, revenue);
        r.product = Some(product.to_string());
        r.category = Some(format!("{product}-cat"));
        r
    }

    #[test]
    fn store_summary_totals_and_monthly_average() {
        let mut a = row(1, 10, "Mug", 100.0);
        a.discount = Some(true);
        a.rating = Some(5.0);
        a.payment_method = Some("UPI".into());
        let mut b = row(1, 20, "Card", 50.0);
        b.discount = Some(false);
        b.rating = Some(3.0);
        b.payment_method = Some("Cash".into());
        let mut c = row(2, 5, "Mug", 30.0);
        c.discount = Some(false);
        c.payment_method = Some("UPI".into());

        let s = StoreSummary::compute(&table(DataDomain::Gift, vec![a, b, c]), 10);
        assert_eq!(s.total_revenue, 180.0);
        assert_eq!(s.total_units, 3.0);
        assert_eq!(s.average_rating, Some(4.0));
        assert_eq!(s.discounted_revenue, 100.0);
        assert_eq!(s.full_price_revenue, 80.0);
        assert_eq!(s.average_monthly_revenue, 90.0);
        assert_eq!(s.top_products.entries()[0].key, "Mug");
        assert_eq!(s.top_payment_method().unwrap().key, "UPI");
        assert!((s.category_revenue.total() - s.total_revenue).abs() < 1e-9);
    }

    #[test]
    fn clothing_insights_pick_top_product_and_category() {
        let rows = vec![row(3, 1, "Tee", 40.0), row(3, 2, "Jeans", 90.0), row(3, 3, "Tee", 60.0)];
        let DomainInsights::Clothing(ins) = DomainInsights::compute(&table(DataDomain::Clothing, rows), 5) else {
            panic!("expected clothing insights");
        };
        assert_eq!(ins.top_product.unwrap().key, "Tee");
        assert_eq!(ins.top_category.unwrap().key, "Tee-cat");
        assert_eq!(ins.recent_revenue, 190.0);
    }

    #[test]
    fn bakery_insights_sum_margins_and_wastage() {
        let mut a = row(5, 1, "Cake", 200.0);
        a.quantity = 2.0;
        a.cost_per_unit = Some(60.0);
        a.wastage = Some(1.0);
        let mut b = row(5, 1, "Tart", 90.0);
        b.wastage = Some(2.0);

        let DomainInsights::Bakery(ins) = DomainInsights::compute(&table(DataDomain::Bakery, vec![a, b]), 5) else {
            panic!("expected bakery insights");
        };
        assert_eq!(ins.total_gross_margin, 170.0);
        assert!(ins.has_cost);
        assert_eq!(ins.daily_wastage.points.len(), 1);
        assert_eq!(ins.daily_wastage.points[0].1, 3.0);
        assert_eq!(ins.recommendations.len(), 3);
    }
}
