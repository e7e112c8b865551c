//! Synthetic sales datasets for every domain.
//!
//! Rows are drawn from a small per-domain catalog so that categories, prices
//! and derived columns (total revenue, cost, expiration) stay consistent with
//! each other. Output is deterministic for a given seed.

use std::path::Path;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;
use tracing::info;

use crate::domain::DataDomain;
use crate::error::PipelineError;

#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub domain: DataDomain,
    pub rows: usize,
    /// Orders are spread over this many days ending at `end_date`.
    pub days: u32,
    pub seed: u64,
    pub end_date: NaiveDate,
}

/// Catalog entry: product, category, price range.
type Item = (&'static str, &'static str, u32, u32);

const GIFT_ITEMS: [Item; 8] = [
    ("Scented Candle", "Home Decor", 300, 900),
    ("Photo Frame", "Home Decor", 250, 800),
    ("Greeting Card", "Stationery", 50, 200),
    ("Gift Hamper", "Hampers", 1200, 3500),
    ("Chocolate Box", "Food", 400, 1200),
    ("Coffee Mug", "Kitchen", 200, 600),
    ("Teddy Bear", "Toys", 350, 1500),
    ("Keychain", "Accessories", 100, 300),
];

const CLOTHING_ITEMS: [Item; 8] = [
    ("T-Shirt", "Tops", 299, 899),
    ("Shirt", "Tops", 599, 1999),
    ("Jeans", "Bottoms", 999, 2999),
    ("Trousers", "Bottoms", 799, 2499),
    ("Kurta", "Ethnic Wear", 699, 2999),
    ("Saree", "Ethnic Wear", 1499, 6999),
    ("Jacket", "Outerwear", 1999, 5999),
    ("Sneakers", "Footwear", 1499, 4999),
];

const BAKERY_ITEMS: [Item; 8] = [
    ("Chocolate Cake", "Cakes", 50, 300),
    ("Vanilla Cupcake", "Cupcakes", 50, 300),
    ("Fruit Tart", "Tarts", 50, 300),
    ("Brownie", "Baked Goods", 50, 300),
    ("Muffin", "Baked Goods", 50, 300),
    ("Croissant", "Pastries", 50, 300),
    ("Cheese Pastry", "Pastries", 50, 300),
    ("Sourdough", "Breads", 50, 300),
];

const STORE_SEGMENTS: [&str; 4] = ["Regular", "Premium", "New", "Loyal"];
const BAKERY_SEGMENTS: [&str; 3] = ["Individual", "Family", "Business"];
const GENDERS: [&str; 3] = ["Male", "Female", "Other"];
const PAYMENT_METHODS: [&str; 4] = ["Credit Card", "Debit Card", "Cash", "UPI"];
const INGREDIENTS: [&str; 7] = ["Flour", "Sugar", "Butter", "Eggs", "Milk", "Baking Powder", "Cocoa"];
const PACKAGING: [&str; 3] = ["Paper Box", "Plastic Wrap", "Cloth Bag"];
const ORDER_TYPES: [&str; 2] = ["Single", "Bulk"];

const BAKERY_COLUMNS: [&str; 20] = [
    "Product Name",
    "Category",
    "Ingredients",
    "Quantity Sold",
    "Price",
    "Cost per Unit",
    "Total Revenue",
    "Discount Applied",
    "Customer Segment",
    "Order Date",
    "Expiration Date",
    "Shelf Life (Days)",
    "Customer Age",
    "Customer Gender",
    "Payment Method",
    "Order Type",
    "Wastage Quantity",
    "Review Rating",
    "Packaging Type",
    "When the Product Was Bought",
];

const SEGMENT_COLUMNS: [&str; 6] = ["Date", "Product", "Category", "Quantity", "Price", "Customer Segment"];

/// Header row written for `domain`.
pub fn sample_columns(domain: DataDomain) -> &'static [&'static str] {
    match domain {
        DataDomain::Gift | DataDomain::Clothing => domain.profile().required_columns,
        DataDomain::Segment => &SEGMENT_COLUMNS,
        DataDomain::Bakery => &BAKERY_COLUMNS,
    }
}

fn catalog(domain: DataDomain) -> &'static [Item] {
    match domain {
        DataDomain::Gift => &GIFT_ITEMS,
        DataDomain::Clothing | DataDomain::Segment => &CLOTHING_ITEMS,
        DataDomain::Bakery => &BAKERY_ITEMS,
    }
}

/// Values shared by every column of one generated row.
struct Draw {
    index: usize,
    date: NaiveDate,
    item: Item,
    quantity: u32,
    price: u32,
    segment: &'static str,
    age: u32,
    shelf_days: i64,
}

/// Generate the dataset in memory: header plus rows sorted by date.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<Vec<String>>, PipelineError> {
    if config.rows == 0 || config.days == 0 {
        return Err(PipelineError::runtime("Sample rows and days must both be greater than zero."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let ages = Normal::new(35.0, 12.0)
        .map_err(|e| PipelineError::runtime(format!("Age distribution error: {e}")))?;

    let columns = sample_columns(config.domain);
    let items = catalog(config.domain);
    let segments: &[&str] = match config.domain {
        DataDomain::Bakery => &BAKERY_SEGMENTS,
        _ => &STORE_SEGMENTS,
    };
    let max_qty = if config.domain == DataDomain::Bakery { 3 } else { 5 };

    let mut draws: Vec<Draw> = (0..config.rows)
        .map(|index| {
            let offset = rng.gen_range(0..config.days);
            let date = config.end_date - Duration::days(offset as i64);
            let item = *items.choose(&mut rng).unwrap_or(&items[0]);
            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
            let quantity = rng.gen_range(1..=max_qty) + u32::from(weekend && rng.gen_bool(0.5));
            let age: f64 = ages.sample(&mut rng);
            Draw {
                index,
                date,
                item,
                quantity,
                price: rng.gen_range(item.2..=item.3),
                segment: segments.choose(&mut rng).copied().unwrap_or(segments[0]),
                age: age.round().clamp(18.0, 70.0) as u32,
                shelf_days: rng.gen_range(3..=6),
            }
        })
        .collect();
    draws.sort_by_key(|d| (d.date, d.index));

    let mut table: Vec<Vec<String>> = Vec::with_capacity(draws.len() + 1);
    table.push(columns.iter().map(|c| c.to_string()).collect());
    for draw in &draws {
        let row = columns
            .iter()
            .map(|column| cell_value(column, draw, config, &mut rng))
            .collect();
        table.push(row);
    }
    Ok(table)
}

fn cell_value(column: &str, d: &Draw, config: &SampleConfig, rng: &mut StdRng) -> String {
    let (product, category, _, _) = d.item;
    match column {
        "Date" | "Order Date" | "When the Product Was Bought" => d.date.to_string(),
        "Product" | "Product Name" => product.to_string(),
        "Category" | "Product Category" => category.to_string(),
        "Quantity" | "Quantity Sold" => d.quantity.to_string(),
        "Price" => d.price.to_string(),
        "Total Revenue" => (d.quantity * d.price).to_string(),
        "Cost per Unit" => format!("{:.2}", d.price as f64 * 0.6),
        "Customer Segment" => d.segment.to_string(),
        "Age" | "Customer Age" => d.age.to_string(),
        "Gender" | "Customer Gender" => pick(&GENDERS, rng),
        "Payment Method" => pick(&PAYMENT_METHODS, rng),
        "Discount Applied" => rng.gen_bool(0.5).to_string(),
        "Review Rating" => format!("{:.1}", rng.gen_range(1.0..=5.0)),
        "Order ID" => format!("ORD-{:05}", d.index + 1),
        "Customer ID" => format!("CUST-{:04}", rng.gen_range(1..=config.rows / 3 + 1)),
        "Shipping Cost" => format!("{:.2}", rng.gen_range(0.0..150.0)),
        "Shipping Time" => rng.gen_range(1..=7).to_string(),
        "Return Rate" => format!("{:.2}", rng.gen_range(0.0..0.2)),
        "CAC" => format!("{:.2}", rng.gen_range(100.0..600.0)),
        "CLTV" => format!("{:.2}", rng.gen_range(1000.0..20000.0)),
        "Repeat Purchase Rate" => format!("{:.2}", rng.gen_range(0.0..1.0)),
        "Ingredients" => INGREDIENTS
            .choose_multiple(rng, 3)
            .copied()
            .collect::<Vec<_>>()
            .join(", "),
        "Expiration Date" => (d.date + Duration::days(d.shelf_days)).to_string(),
        "Shelf Life (Days)" => d.shelf_days.to_string(),
        "Order Type" => pick(&ORDER_TYPES, rng),
        "Wastage Quantity" => rng.gen_range(0..=2).to_string(),
        "Packaging Type" => pick(&PACKAGING, rng),
        _ => String::new(),
    }
}

fn pick(options: &[&str], rng: &mut StdRng) -> String {
    options.choose(rng).copied().unwrap_or_default().to_string()
}

/// Generate and write a sample CSV.
pub fn write_sample_csv(path: &Path, config: &SampleConfig) -> Result<usize, PipelineError> {
    let table = generate_sample(config)?;
    let mut writer = csv::Writer::from_path(path)?;
    for row in &table {
        writer.write_record(row)?;
    }
    writer.flush()?;

    let rows = table.len() - 1;
    info!(path = %path.display(), domain = ?config.domain, rows, "wrote sample CSV");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forecast::{Measure, daily_series};
    use crate::io::ingest::load_sales_csv;

    fn config(domain: DataDomain) -> SampleConfig {
        SampleConfig {
            domain,
            rows: 400,
            days: 60,
            seed: 7,
            end_date: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        }
    }

    #[test]
    fn every_domain_sample_passes_its_own_schema() {
        let dir = tempfile::tempdir().unwrap();
        for domain in DataDomain::ALL {
            let path = dir.path().join(format!("{domain:?}.csv"));
            let written = write_sample_csv(&path, &config(domain)).unwrap();
            assert_eq!(written, 400);

            let table = load_sales_csv(&path, domain).unwrap();
            assert_eq!(table.records.len(), 400);
            let (first, last) = table.date_range().unwrap();
            assert!(last <= config(domain).end_date);
            assert!((last - first).num_days() < 60);
        }
    }

    #[test]
    fn same_seed_same_data() {
        let a = generate_sample(&config(DataDomain::Clothing)).unwrap();
        let b = generate_sample(&config(DataDomain::Clothing)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn bakery_revenue_matches_quantity_times_price() {
        let table = generate_sample(&config(DataDomain::Bakery)).unwrap();
        let header = &table[0];
        let col = |name: &str| header.iter().position(|h| h == name).unwrap();
        let (q, p, t) = (col("Quantity Sold"), col("Price"), col("Total Revenue"));
        for row in &table[1..] {
            let qty: u32 = row[q].parse().unwrap();
            let price: u32 = row[p].parse().unwrap();
            assert_eq!(row[t], (qty * price).to_string());
        }
    }

    #[test]
    fn dense_sample_has_enough_history_to_forecast() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clothing.csv");
        write_sample_csv(&path, &config(DataDomain::Clothing)).unwrap();
        let table = load_sales_csv(&path, DataDomain::Clothing).unwrap();
        assert!(daily_series(&table.records, Measure::Revenue).distinct_dates() >= 30);
    }

    #[test]
    fn zero_rows_is_rejected() {
        let mut c = config(DataDomain::Gift);
        c.rows = 0;
        assert!(generate_sample(&c).is_err());
    }
}
