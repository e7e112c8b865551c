//! CSV ingest and normalization.
//!
//! Turns a sales CSV into a [`SalesTable`] for one data domain.
//!
//! - **Schema first**: the header is checked against the domain's required
//!   columns before any row is read; missing columns halt the run.
//! - **Strict rows**: a cell that cannot be parsed ends the run with its line
//!   and column. Blank optional text cells become `None`.
//! - **No aggregation here**: only per-row derived values (revenue).

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::domain::{ColumnMap, DataDomain, RevenueSource, SalesRecord, SalesTable};
use crate::error::PipelineError;
use crate::io::schema::missing_columns;

/// Open and ingest a CSV file.
pub fn load_sales_csv(path: &Path, domain: DataDomain) -> Result<SalesTable, PipelineError> {
    let file = File::open(path).map_err(|e| {
        PipelineError::runtime(format!("Failed to open CSV '{}': {e}", path.display()))
    })?;
    info!(path = %path.display(), domain = ?domain, "loading sales CSV");
    read_sales_csv(file, domain)
}

/// Ingest CSV content from any reader.
pub fn read_sales_csv<R: Read>(input: R, domain: DataDomain) -> Result<SalesTable, PipelineError> {
    let profile = domain.profile();

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(normalize_header_name)
        .collect();

    let missing = missing_columns(&headers, profile.required_columns);
    if !missing.is_empty() {
        debug!(?missing, "schema check failed");
        return Err(PipelineError::Schema { missing });
    }

    let layout = ColumnLayout::resolve(&profile.columns, profile.revenue_source, &headers)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and CSV lines are 1-based.
        let line = idx + 2;
        let record = result?;
        records.push(parse_record(&record, &layout, line)?);
    }

    if records.is_empty() {
        return Err(PipelineError::runtime("The CSV file has no data rows."));
    }

    info!(rows = records.len(), "ingested sales rows");

    Ok(SalesTable {
        domain,
        headers,
        records,
    })
}

fn normalize_header_name(name: &str) -> String {
    // Excel sometimes writes a BOM before the first header; without stripping it
    // the first required column would be reported as missing.
    name.trim().trim_start_matches('\u{feff}').to_string()
}

/// A mapped column: its header name and position in each record.
#[derive(Debug, Clone, Copy)]
struct Col {
    name: &'static str,
    idx: usize,
}

/// Column positions for every logical field the domain maps and the file carries.
#[derive(Debug, Clone)]
struct ColumnLayout {
    date: Col,
    quantity: Col,
    revenue: RevenueCols,
    price: Option<Col>,
    product: Option<Col>,
    category: Option<Col>,
    segment: Option<Col>,
    gender: Option<Col>,
    payment_method: Option<Col>,
    age: Option<Col>,
    discount: Option<Col>,
    rating: Option<Col>,
    cost_per_unit: Option<Col>,
    wastage: Option<Col>,
}

#[derive(Debug, Clone, Copy)]
enum RevenueCols {
    QuantityTimesPrice { price: Col },
    Column(Col),
}

impl ColumnLayout {
    fn resolve(
        columns: &ColumnMap,
        revenue_source: RevenueSource,
        headers: &[String],
    ) -> Result<Self, PipelineError> {
        let header_map: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();

        let find = |name: Option<&'static str>| -> Option<Col> {
            let name = name?;
            header_map.get(name).map(|&idx| Col { name, idx })
        };

        let mut missing = Vec::new();
        let mut require = |name: Option<&'static str>, field: &str| -> Option<Col> {
            let col = find(name);
            if col.is_none() {
                missing.push(name.unwrap_or(field).to_string());
            }
            col
        };

        let date = require(Some(columns.date), "date");
        let quantity = require(Some(columns.quantity), "quantity");
        let revenue = match revenue_source {
            RevenueSource::QuantityTimesPrice => require(columns.price, "price")
                .map(|price| RevenueCols::QuantityTimesPrice { price }),
            RevenueSource::Column => require(columns.revenue, "revenue").map(RevenueCols::Column),
        };

        let (Some(date), Some(quantity), Some(revenue)) = (date, quantity, revenue) else {
            return Err(PipelineError::Schema { missing });
        };

        Ok(Self {
            date,
            quantity,
            revenue,
            price: find(columns.price),
            product: find(columns.product),
            category: find(columns.category),
            segment: find(columns.segment),
            gender: find(columns.gender),
            payment_method: find(columns.payment_method),
            age: find(columns.age),
            discount: find(columns.discount),
            rating: find(columns.rating),
            cost_per_unit: find(columns.cost_per_unit),
            wastage: find(columns.wastage),
        })
    }
}

fn parse_record(record: &StringRecord, layout: &ColumnLayout, line: usize) -> Result<SalesRecord, PipelineError> {
    let date = parse_date(required_cell(record, layout.date, line)?)
        .map_err(|message| parse_error(line, layout.date, message))?;
    let quantity = required_f64(record, layout.quantity, line)?;
    let price = optional_f64(record, layout.price, line)?;

    let revenue = match layout.revenue {
        RevenueCols::QuantityTimesPrice { price: price_col } => {
            let price = price.ok_or_else(|| parse_error(line, price_col, "missing value".to_string()))?;
            quantity * price
        }
        RevenueCols::Column(col) => required_f64(record, col, line)?,
    };

    let discount = match cell(record, layout.discount) {
        Some((col, raw)) => Some(
            parse_bool(raw).ok_or_else(|| parse_error(line, col, format!("'{raw}' is not a boolean")))?,
        ),
        None => None,
    };

    Ok(SalesRecord {
        line,
        date,
        quantity,
        price,
        revenue,
        product: text(record, layout.product),
        category: text(record, layout.category),
        segment: text(record, layout.segment),
        gender: text(record, layout.gender),
        payment_method: text(record, layout.payment_method),
        age: optional_f64(record, layout.age, line)?,
        discount,
        rating: optional_f64(record, layout.rating, line)?,
        cost_per_unit: optional_f64(record, layout.cost_per_unit, line)?,
        wastage: optional_f64(record, layout.wastage, line)?,
    })
}

fn parse_error(line: usize, col: Col, message: String) -> PipelineError {
    PipelineError::Parse {
        line,
        column: col.name.to_string(),
        message,
    }
}

/// Non-blank cell content for a mapped column.
fn cell(record: &StringRecord, col: Option<Col>) -> Option<(Col, &str)> {
    let col = col?;
    let raw = record.get(col.idx).map(str::trim).filter(|s| !s.is_empty())?;
    Some((col, raw))
}

fn text(record: &StringRecord, col: Option<Col>) -> Option<String> {
    cell(record, col).map(|(_, raw)| raw.to_string())
}

fn required_cell(record: &StringRecord, col: Col, line: usize) -> Result<&str, PipelineError> {
    cell(record, Some(col))
        .map(|(_, raw)| raw)
        .ok_or_else(|| parse_error(line, col, "missing value".to_string()))
}

fn required_f64(record: &StringRecord, col: Col, line: usize) -> Result<f64, PipelineError> {
    let raw = required_cell(record, col, line)?;
    parse_f64(raw).ok_or_else(|| parse_error(line, col, format!("'{raw}' is not a number")))
}

fn optional_f64(record: &StringRecord, col: Option<Col>, line: usize) -> Result<Option<f64>, PipelineError> {
    let Some((col, raw)) = cell(record, col) else {
        return Ok(None);
    };
    parse_f64(raw)
        .map(Some)
        .ok_or_else(|| parse_error(line, col, format!("'{raw}' is not a number")))
}

fn parse_f64(s: &str) -> Option<f64> {
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a calendar date. A trailing time-of-day is accepted and dropped.
///
/// Ambiguous day/month orders read month first; day first is only tried when
/// that fails (`13/01/2024`).
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    const FMTS: [&str; 6] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d/%m/%Y", "%m-%d-%Y", "%d-%m-%Y"];

    let date_part = s.split(['T', ' ']).next().unwrap_or(s);
    for fmt in FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(date_part, fmt) {
            return Ok(d);
        }
    }
    Err(format!(
        "Invalid date '{s}'. Expected one of: YYYY-MM-DD, YYYY/MM/DD, MM/DD/YYYY, DD/MM/YYYY, MM-DD-YYYY, DD-MM-YYYY."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEGMENT_CSV: &str = "\
Date,Product,Category,Quantity,Price,Customer Segment
2024-01-01,Tee,Tops,1,10,Retail
2024-01-02,Tee,Tops,1,20,Retail
2024-01-03,Jeans,Bottoms,1,30,Wholesale
";

    #[test]
    fn revenue_is_quantity_times_price() {
        let table = read_sales_csv(SEGMENT_CSV.as_bytes(), DataDomain::Segment).unwrap();
        let revenue: Vec<f64> = table.records.iter().map(|r| r.revenue).collect();
        assert_eq!(revenue, vec![10.0, 20.0, 30.0]);
        assert_eq!(table.records[2].category.as_deref(), Some("Bottoms"));
        assert_eq!(table.records[0].line, 2);
    }

    #[test]
    fn missing_columns_halt_before_rows_are_parsed() {
        // Row content is garbage on purpose: it must never be looked at.
        let csv = "Date,Category,Quantity\nnot-a-date,X,abc\n";
        let err = read_sales_csv(csv.as_bytes(), DataDomain::Segment).unwrap_err();
        match err {
            PipelineError::Schema { missing } => {
                assert_eq!(missing, vec!["Price", "Customer Segment"]);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn bom_prefixed_header_is_recognized() {
        let csv = format!("\u{feff}{SEGMENT_CSV}");
        let table = read_sales_csv(csv.as_bytes(), DataDomain::Segment).unwrap();
        assert_eq!(table.records.len(), 3);
    }

    #[test]
    fn precomputed_revenue_and_optional_cost() {
        let csv = "\
Order Date,Category,Quantity Sold,Total Revenue,Wastage Quantity,Cost per Unit
2024-05-01,Cakes,2,200,1,60
2024-05-02,Tarts,1,90,0,
";
        let table = read_sales_csv(csv.as_bytes(), DataDomain::Bakery).unwrap();
        assert_eq!(table.records[0].revenue, 200.0);
        assert_eq!(table.records[0].cost_per_unit, Some(60.0));
        assert!((table.records[0].gross_margin() - 80.0).abs() < 1e-12);
        assert_eq!(table.records[1].cost_per_unit, None);
        assert_eq!(table.records[1].gross_margin(), 90.0);
    }

    #[test]
    fn bad_number_reports_line_and_column() {
        let csv = "Date,Category,Quantity,Price,Customer Segment\n2024-01-01,A,1,10,R\n2024-01-02,A,x,10,R\n";
        let err = read_sales_csv(csv.as_bytes(), DataDomain::Segment).unwrap_err();
        match err {
            PipelineError::Parse { line, column, .. } => {
                assert_eq!(line, 3);
                assert_eq!(column, "Quantity");
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn header_only_file_is_a_runtime_error() {
        let csv = "Date,Category,Quantity,Price,Customer Segment\n";
        let err = read_sales_csv(csv.as_bytes(), DataDomain::Segment).unwrap_err();
        assert!(matches!(err, PipelineError::Runtime(_)));
    }

    #[test]
    fn discount_flags_parse_case_insensitively() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("no"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn dates_accept_common_formats_and_timestamps() {
        let want = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        for s in ["2024-02-29", "2024/02/29", "29/02/2024", "29-02-2024", "2024-02-29 13:45:00", "2024-02-29T08:00:00"] {
            assert_eq!(parse_date(s).unwrap(), want, "{s}");
        }
        assert!(parse_date("Feb 29").is_err());
    }

    #[test]
    fn slash_dates_read_month_first() {
        assert_eq!(parse_date("03/04/2024").unwrap(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(parse_date("12/31/2024").unwrap(), NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(parse_date("13/01/2024").unwrap(), NaiveDate::from_ymd_opt(2024, 1, 13).unwrap());

        let csv = "Date,Category,Quantity,Price,Customer Segment\n12/31/2024,Tops,2,5,Retail\n";
        let table = read_sales_csv(csv.as_bytes(), DataDomain::Segment).unwrap();
        assert_eq!(table.records[0].date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
    }
}
