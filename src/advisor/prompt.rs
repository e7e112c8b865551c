//! Advisory prompt assembly.
//!
//! The prompt has a fixed shape: a three-task instruction block, a performance
//! summary built from [`StoreSummary`], and a per-weekday revenue breakdown in
//! ascending order.

use std::fmt::Write;

use crate::domain::DomainProfile;
use crate::metrics::{AggregateEntry, StoreSummary};
use crate::report::fmt_thousands;

const NOT_AVAILABLE: &str = "n/a";

/// Build the prompt sent to the text generator.
pub fn build_prompt(profile: &DomainProfile, summary: &StoreSummary) -> String {
    let cur = profile.currency;
    let money = |v: f64| format!("{cur}{}", fmt_thousands(v));
    let best = |entry: Option<&AggregateEntry>| match entry {
        Some(e) => format!("{} with {}", e.key, money(e.value)),
        None => NOT_AVAILABLE.to_string(),
    };

    let top3: Vec<&str> = summary.top_products.keys().take(3).collect();
    let top3 = if top3.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        top3.join(", ")
    };
    let rating = summary
        .average_rating
        .map(|r| format!("{r:.2}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let payment = summary
        .top_payment_method()
        .map(|e| e.key.clone())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let mut out = String::new();
    let _ = writeln!(
        out,
        "You are a small business advisor helping a {} owner. Based on the following performance summary, do these 3 things:",
        profile.business
    );
    out.push_str("1. Check if there's any sign of issues, especially a dip in performance.\n");
    out.push_str("2. Give 3 specific tips to help improve. Focus on reviews, loyalty, and sales.\n");
    out.push_str(
        "3. Suggest 2-3 creative, actionable ideas to improve sales on slow days, focusing on cross-selling, bundling, and targeting repeat customers.\n",
    );
    out.push('\n');

    out.push_str("Performance Summary:\n");
    let _ = writeln!(out, "- Total Revenue: {}", money(summary.total_revenue));
    let _ = writeln!(out, "- Total Units Sold: {}", fmt_thousands(summary.total_units));
    let _ = writeln!(out, "- Average Review Rating: {rating}");
    let _ = writeln!(out, "- Top 3 Products: {top3}");
    let _ = writeln!(out, "- Most Used Payment Method: {payment}");
    let _ = writeln!(out, "- Most Profitable Segment: {}", best(summary.top_segment()));
    let _ = writeln!(out, "- Gender with Highest Revenue: {}", best(summary.top_gender()));
    let _ = writeln!(out, "- Revenue from Discounts: {}", money(summary.discounted_revenue));
    let _ = writeln!(out, "- Revenue without Discounts: {}", money(summary.full_price_revenue));
    let _ = writeln!(out, "- Best Performing Age Group: {}", best(summary.top_age_group()));
    let _ = writeln!(out, "- Avg Monthly Revenue: {}", money(summary.average_monthly_revenue));
    out.push('\n');

    out.push_str("Daily Revenue Breakdown:\n");
    for e in summary.weekday_revenue.sorted_asc().entries() {
        let _ = writeln!(out, "{:<10} {}", e.key, money(e.value));
    }

    out
}

/// Suggested file name for the advisory download.
pub fn advisory_file_name(profile: &DomainProfile) -> String {
    format!("{}_AI_Insights.txt", profile.file_stem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DataDomain, SalesRecord, SalesTable};
    use chrono::NaiveDate;

    fn summary() -> StoreSummary {
        let d = |day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let mut rows = Vec::new();
        for (day, product, revenue, segment) in [
            (1, "Mug", 1500.0, "Premium"),
            (2, "Card", 200.0, "Regular"),
            (3, "Candle", 900.0, "Premium"),
            (4, "Frame", 400.0, "Regular"),
        ] {
            let mut r = SalesRecord::new(2, d(day), 1.0, revenue);
            r.product = Some(product.into());
            r.segment = Some(segment.into());
            r.gender = Some("Female".into());
            r.payment_method = Some("UPI".into());
            r.discount = Some(day % 2 == 0);
            r.age = Some(30.0);
            r.rating = Some(4.0);
            rows.push(r);
        }
        let table = SalesTable {
            domain: DataDomain::Gift,
            headers: Vec::new(),
            records: rows,
        };
        StoreSummary::compute(&table, 10)
    }

    #[test]
    fn prompt_carries_every_summary_line() {
        let prompt = build_prompt(DataDomain::Gift.profile(), &summary());
        assert!(prompt.starts_with("You are a small business advisor helping a gift store owner."));
        assert!(prompt.contains("- Total Revenue: ₹3,000\n"));
        assert!(prompt.contains("- Total Units Sold: 4\n"));
        assert!(prompt.contains("- Average Review Rating: 4.00\n"));
        assert!(prompt.contains("- Top 3 Products: Mug, Candle, Frame\n"));
        assert!(prompt.contains("- Most Used Payment Method: UPI\n"));
        assert!(prompt.contains("- Most Profitable Segment: Premium with ₹2,400\n"));
        assert!(prompt.contains("- Revenue from Discounts: ₹600\n"));
        assert!(prompt.contains("- Revenue without Discounts: ₹2,400\n"));
        assert!(prompt.contains("- Best Performing Age Group: 26-35 with ₹3,000\n"));
        assert!(prompt.contains("- Avg Monthly Revenue: ₹3,000\n"));
    }

    #[test]
    fn weekday_breakdown_is_ascending() {
        let prompt = build_prompt(DataDomain::Gift.profile(), &summary());
        let breakdown = prompt.split("Daily Revenue Breakdown:\n").nth(1).unwrap();
        let days: Vec<&str> = breakdown
            .lines()
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        // Jan 1-4 2024: Mon 1500, Tue 200, Wed 900, Thu 400.
        assert_eq!(days, vec!["Tuesday", "Thursday", "Wednesday", "Monday"]);
    }

    #[test]
    fn file_name_follows_domain() {
        assert_eq!(advisory_file_name(DataDomain::Gift.profile()), "Gift_Store_AI_Insights.txt");
    }
}
