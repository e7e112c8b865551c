//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the aggregation/forecast code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::{ForecastReport, RunOutput};
use crate::domain::{DomainProfile, InventorySplit, SalesTable};
use crate::forecast::{CategoryForecast, ForecastOutcome};
use crate::metrics::{Aggregate, DomainInsights, StoreSummary};

pub const NO_CATEGORIES_FORECAST: &str = "No categories were forecasted due to insufficient data.";

/// Round to a whole number and group thousands with commas (`1234567.8` → `1,234,568`).
pub fn fmt_thousands(v: f64) -> String {
    let rounded = v.round();
    // -0.4 rounds to -0; print it as 0.
    let negative = rounded < 0.0;
    let digits = format!("{:.0}", rounded.abs());

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if negative {
        out.insert(0, '-');
    }
    out
}

fn money(profile: &DomainProfile, v: f64) -> String {
    format!("{}{}", profile.currency, fmt_thousands(v))
}

/// Format the whole report for one run.
pub fn format_report(run: &RunOutput, profile: &DomainProfile) -> String {
    let mut out = String::new();
    out.push_str(&format_header(&run.table, profile));
    out.push_str(&format_summary(&run.summary, profile));
    out.push_str(&format_insights(&run.insights, profile));
    if let Some(fc) = &run.forecasts {
        out.push_str(&format_forecasts(fc, profile));
    }
    out
}

pub fn format_header(table: &SalesTable, profile: &DomainProfile) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", profile.title));
    out.push_str(&format!("Rows: {}\n", table.records.len()));
    if let Some((first, last)) = table.date_range() {
        out.push_str(&format!("Dates: {first} .. {last}\n"));
    }
    out.push('\n');
    out
}

/// Summary metrics plus every non-empty breakdown.
pub fn format_summary(s: &StoreSummary, profile: &DomainProfile) -> String {
    let mut out = String::new();

    out.push_str("Summary metrics:\n");
    out.push_str(&format!("- Total Revenue: {}\n", money(profile, s.total_revenue)));
    out.push_str(&format!("- Total Units Sold: {}\n", fmt_thousands(s.total_units)));
    if let Some(r) = s.average_rating {
        out.push_str(&format!("- Average Rating: {r:.2}\n"));
    }
    out.push_str(&format!(
        "- Avg Monthly Revenue: {}\n",
        money(profile, s.average_monthly_revenue)
    ));
    out.push('\n');

    let money_fmt = |v: f64| money(profile, v);
    let count_fmt = |v: f64| format!("{v:.0}");

    let sections: [(String, &Aggregate, &dyn Fn(f64) -> String); 8] = [
        (format!("Top {} products by revenue", s.top_products.len()), &s.top_products, &money_fmt),
        ("Revenue by category".to_string(), &s.category_revenue, &money_fmt),
        ("Payment method usage".to_string(), &s.payment_counts, &count_fmt),
        ("Revenue by customer segment".to_string(), &s.segment_revenue, &money_fmt),
        ("Revenue by gender".to_string(), &s.gender_revenue, &money_fmt),
        ("Revenue by age group".to_string(), &s.age.revenue, &money_fmt),
        ("Revenue by weekday".to_string(), &s.weekday_revenue, &money_fmt),
        ("Revenue by month".to_string(), &s.monthly_revenue, &money_fmt),
    ];
    for (title, agg, fmt) in sections {
        if agg.is_empty() {
            continue;
        }
        out.push_str(&format!("{title}:\n"));
        out.push_str(&format_aggregate(agg, fmt));
        out.push('\n');
    }

    if s.discounted_revenue > 0.0 || s.full_price_revenue > 0.0 {
        out.push_str("Revenue with and without discount:\n");
        out.push_str(&format!("  {:<24} {:>16}\n", "discounted", money(profile, s.discounted_revenue)));
        out.push_str(&format!("  {:<24} {:>16}\n", "full price", money(profile, s.full_price_revenue)));
        out.push('\n');
    }

    if s.age.out_of_range > 0 {
        out.push_str(&format!(
            "Note: {} rows had an age outside 0-100 and are not in any age group.\n\n",
            s.age.out_of_range
        ));
    }

    out
}

/// Two-column table of an aggregate, in its current order.
pub fn format_aggregate(agg: &Aggregate, fmt: &dyn Fn(f64) -> String) -> String {
    let mut out = String::new();
    for e in agg.entries() {
        out.push_str(format!("  {:<24} {:>16}", truncate(&e.key, 24), fmt(e.value)).trim_end());
        out.push('\n');
    }
    out
}

pub fn format_insights(insights: &DomainInsights, profile: &DomainProfile) -> String {
    let mut out = String::new();
    match insights {
        DomainInsights::Gift => {}
        DomainInsights::Clothing(c) => {
            out.push_str("Business insights:\n");
            out.push_str(&format!("- Recent Monthly Revenue: {}\n", money(profile, c.recent_revenue)));
            if let Some(p) = &c.top_product {
                out.push_str(&format!("- Top Selling Product: {}\n", p.key));
            }
            if let Some(cat) = &c.top_category {
                out.push_str(&format!("- Most Profitable Category: {}\n", cat.key));
            }
            out.push_str("- Focus more on the top-selling product and category in your promotions!\n\n");
        }
        DomainInsights::Segment(s) => {
            out.push_str(&format!("Top {} categories (revenue):\n", s.top_categories.len()));
            out.push_str(&format_aggregate(&s.top_categories, &|v| money(profile, v)));
            if let Some(seg) = &s.top_segment {
                out.push_str(&format!(
                    "Target your marketing towards the {} segment based on highest revenue contribution.\n",
                    seg.key
                ));
            }
            out.push('\n');
        }
        DomainInsights::Bakery(b) => {
            out.push_str("Bakery insights:\n");
            let label = if b.has_cost { "Total Gross Margin" } else { "Total Gross Margin (no cost data)" };
            out.push_str(&format!("- {label}: {}\n", money(profile, b.total_gross_margin)));
            out.push_str(&format!(
                "- Wastage: {} units over {} days\n",
                fmt_thousands(b.daily_wastage.total()),
                b.daily_wastage.len()
            ));
            out.push_str("\nRecommendations:\n");
            for r in b.recommendations {
                out.push_str(&format!("- {r}\n"));
            }
            out.push('\n');
        }
    }
    out
}

/// Overall forecast summary, per-category forecasts, and the inventory split.
pub fn format_forecasts(fc: &ForecastReport, profile: &DomainProfile) -> String {
    let mut out = String::new();

    out.push_str(&format!("Overall sales forecast (next {} days):\n", fc.overall_horizon));
    match &fc.overall {
        ForecastOutcome::Forecast(f) => {
            out.push_str(&format!(
                "- Predicted revenue, next 30 days: {}\n",
                money(profile, f.next_days_sum(30))
            ));
            out.push_str(&format!(
                "- Predicted revenue, next {} days: {}\n",
                f.horizon,
                money(profile, f.horizon_sum())
            ));
        }
        other => out.push_str(&format!("- {}\n", outcome_note(other))),
    }
    out.push('\n');

    if !fc.category_revenue.is_empty() {
        out.push_str(&format!(
            "Category revenue forecast (next {} days):\n",
            fc.category_horizon
        ));
        out.push_str(&format_category_outcomes(&fc.category_revenue, &|v| money(profile, v)));
        out.push('\n');
    }

    if !fc.category_quantity.is_empty() {
        out.push_str(&format!(
            "Category quantity forecast (next {} days):\n",
            fc.category_horizon
        ));
        out.push_str(&format_category_outcomes(&fc.category_quantity, &fmt_thousands));
        out.push('\n');
    }

    out.push_str(&format!("Inventory recommendation (next {} days):\n", fc.category_horizon));
    out.push_str(&format_inventory(fc.inventory.as_ref()));
    out
}

fn format_category_outcomes(rows: &[CategoryForecast], fmt: &dyn Fn(f64) -> String) -> String {
    let mut out = String::new();
    for cf in rows {
        let value = match &cf.outcome {
            ForecastOutcome::Forecast(f) => fmt(f.horizon_sum().round()),
            other => outcome_note(other),
        };
        out.push_str(format!("  {:<24} {:>16}", truncate(&cf.category, 24), value).trim_end());
        out.push('\n');
    }
    out
}

fn outcome_note(outcome: &ForecastOutcome) -> String {
    match outcome {
        ForecastOutcome::Forecast(f) => format!("{} rows", f.points.len()),
        ForecastOutcome::Skipped {
            distinct_dates,
            required,
        } => format!("Not enough data to forecast ({distinct_dates} dates, need {required})"),
        ForecastOutcome::Failed(message) => format!("Forecast failed: {message}"),
    }
}

pub fn format_inventory(split: Option<&InventorySplit>) -> String {
    let Some(split) = split else {
        return format!("{NO_CATEGORIES_FORECAST}\n");
    };

    let mut out = String::new();
    out.push_str(&format!("  {:<24} {:>12} {:>10}\n", "category", "quantity", "percent"));
    out.push_str(&format!("  {:-<24} {:-<12} {:-<10}\n", "", "", ""));
    let decimals = split.decimals as usize;
    for s in &split.shares {
        out.push_str(&format!(
            "  {:<24} {:>12} {:>9.*}%\n",
            truncate(&s.category, 24),
            fmt_thousands(s.forecast_quantity),
            decimals,
            s.percent
        ));
    }
    out
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::InventoryShare;

    #[test]
    fn thousands_grouping() {
        assert_eq!(fmt_thousands(0.0), "0");
        assert_eq!(fmt_thousands(999.4), "999");
        assert_eq!(fmt_thousands(1000.0), "1,000");
        assert_eq!(fmt_thousands(1_234_567.8), "1,234,568");
        assert_eq!(fmt_thousands(-45_000.0), "-45,000");
        assert_eq!(fmt_thousands(-0.4), "0");
    }

    #[test]
    fn empty_inventory_prints_the_no_data_message() {
        assert_eq!(format_inventory(None), format!("{NO_CATEGORIES_FORECAST}\n"));
    }

    #[test]
    fn inventory_table_uses_split_precision() {
        let split = InventorySplit {
            shares: vec![InventoryShare {
                category: "Cakes".into(),
                forecast_quantity: 1200.0,
                percent: 100.0,
            }],
            total_quantity: 1200.0,
            decimals: 1,
        };
        let text = format_inventory(Some(&split));
        assert!(text.contains("Cakes"));
        assert!(text.contains("1,200"));
        assert!(text.contains("100.0%"));
    }

    #[test]
    fn long_keys_are_truncated() {
        assert_eq!(truncate("abcdef", 4), "abc.");
        assert_eq!(truncate("abc", 4), "abc");
    }

    #[test]
    fn skipped_outcome_note_names_the_counts() {
        let note = outcome_note(&ForecastOutcome::Skipped {
            distinct_dates: 10,
            required: 30,
        });
        assert!(note.contains("10 dates"));
        assert!(note.contains("need 30"));
    }
}
