//! Static per-domain configuration.
//!
//! Each supported dataset shape is described by one [`DomainProfile`]: the
//! columns it must carry, which header feeds which record field, and the
//! defaults its dashboard runs with.

use crate::domain::{CategoryRanking, DataDomain, RevenueSource};

/// Header names for each logical record field.
///
/// `date` and `quantity` are always present; everything else is optional per domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub date: &'static str,
    pub quantity: &'static str,
    pub price: Option<&'static str>,
    pub revenue: Option<&'static str>,
    pub product: Option<&'static str>,
    pub category: Option<&'static str>,
    pub segment: Option<&'static str>,
    pub gender: Option<&'static str>,
    pub payment_method: Option<&'static str>,
    pub age: Option<&'static str>,
    pub discount: Option<&'static str>,
    pub rating: Option<&'static str>,
    pub cost_per_unit: Option<&'static str>,
    pub wastage: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainProfile {
    pub domain: DataDomain,
    pub title: &'static str,
    /// How the business is addressed in advisory prompts.
    pub business: &'static str,
    /// Stem for the advisory download file.
    pub file_stem: &'static str,
    pub currency: &'static str,
    /// Ordered list checked by the schema validator.
    pub required_columns: &'static [&'static str],
    pub columns: ColumnMap,
    pub revenue_source: RevenueSource,

    pub forecast: bool,
    pub advisory: bool,
    pub overall_horizon: usize,
    pub category_horizon: usize,
    pub top_n: usize,
    pub category_ranking: CategoryRanking,
    pub split_decimals: u32,
}

impl DataDomain {
    pub fn profile(self) -> &'static DomainProfile {
        match self {
            DataDomain::Gift => &GIFT,
            DataDomain::Clothing => &CLOTHING,
            DataDomain::Segment => &SEGMENT,
            DataDomain::Bakery => &BAKERY,
        }
    }
}

const EMPTY_COLUMNS: ColumnMap = ColumnMap {
    date: "Date",
    quantity: "Quantity",
    price: None,
    revenue: None,
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
};

pub static GIFT: DomainProfile = DomainProfile {
    domain: DataDomain::Gift,
    title: "Gift Sales Dashboard",
    business: "gift store",
    file_stem: "Gift_Store",
    currency: "₹",
    required_columns: &[
        "Order ID",
        "Order Date",
        "Quantity Sold",
        "Product Name",
        "Price",
        "Customer ID",
        "Customer Age",
        "Customer Gender",
        "Customer Segment",
        "Payment Method",
        "Discount Applied",
        "Product Category",
        "Review Rating",
        "Shipping Cost",
        "Shipping Time",
        "Return Rate",
        "CAC",
        "CLTV",
        "Repeat Purchase Rate",
    ],
    columns: ColumnMap {
        date: "Order Date",
        quantity: "Quantity Sold",
        price: Some("Price"),
        product: Some("Product Name"),
        category: Some("Product Category"),
        segment: Some("Customer Segment"),
        gender: Some("Customer Gender"),
        payment_method: Some("Payment Method"),
        age: Some("Customer Age"),
        discount: Some("Discount Applied"),
        rating: Some("Review Rating"),
        ..EMPTY_COLUMNS
    },
    revenue_source: RevenueSource::QuantityTimesPrice,
    forecast: false,
    advisory: true,
    overall_horizon: 180,
    category_horizon: 90,
    top_n: 10,
    category_ranking: CategoryRanking::Revenue,
    split_decimals: 2,
};

pub static CLOTHING: DomainProfile = DomainProfile {
    domain: DataDomain::Clothing,
    title: "Clothing Sales Dashboard",
    business: "clothing store",
    file_stem: "Clothing_Store",
    currency: "₹",
    required_columns: &[
        "Date",
        "Product",
        "Category",
        "Quantity",
        "Price",
        "Review Rating",
        "Payment Method",
        "Age",
        "Gender",
        "Discount Applied",
        "Customer Segment",
    ],
    columns: ColumnMap {
        date: "Date",
        quantity: "Quantity",
        price: Some("Price"),
        product: Some("Product"),
        category: Some("Category"),
        segment: Some("Customer Segment"),
        gender: Some("Gender"),
        payment_method: Some("Payment Method"),
        age: Some("Age"),
        discount: Some("Discount Applied"),
        rating: Some("Review Rating"),
        ..EMPTY_COLUMNS
    },
    revenue_source: RevenueSource::QuantityTimesPrice,
    forecast: true,
    advisory: true,
    overall_horizon: 180,
    category_horizon: 90,
    top_n: 5,
    category_ranking: CategoryRanking::Rows,
    split_decimals: 2,
};

pub static SEGMENT: DomainProfile = DomainProfile {
    domain: DataDomain::Segment,
    title: "Clothing Segment Dashboard",
    business: "clothing store",
    file_stem: "Clothing_Segment",
    currency: "₹",
    required_columns: &["Date", "Category", "Quantity", "Price", "Customer Segment"],
    columns: ColumnMap {
        date: "Date",
        quantity: "Quantity",
        price: Some("Price"),
        product: Some("Product"),
        category: Some("Category"),
        segment: Some("Customer Segment"),
        ..EMPTY_COLUMNS
    },
    revenue_source: RevenueSource::QuantityTimesPrice,
    forecast: true,
    advisory: false,
    overall_horizon: 180,
    category_horizon: 90,
    top_n: 5,
    category_ranking: CategoryRanking::Revenue,
    split_decimals: 2,
};

pub static BAKERY: DomainProfile = DomainProfile {
    domain: DataDomain::Bakery,
    title: "Home Bakery Sales & Inventory Forecast",
    business: "home bakery",
    file_stem: "Home_Bakery",
    currency: "₹",
    required_columns: &[
        "Order Date",
        "Category",
        "Quantity Sold",
        "Total Revenue",
        "Wastage Quantity",
    ],
    columns: ColumnMap {
        date: "Order Date",
        quantity: "Quantity Sold",
        price: Some("Price"),
        revenue: Some("Total Revenue"),
        product: Some("Product Name"),
        category: Some("Category"),
        segment: Some("Customer Segment"),
        gender: Some("Customer Gender"),
        payment_method: Some("Payment Method"),
        age: Some("Customer Age"),
        discount: Some("Discount Applied"),
        rating: Some("Review Rating"),
        cost_per_unit: Some("Cost per Unit"),
        wastage: Some("Wastage Quantity"),
    },
    revenue_source: RevenueSource::Column,
    forecast: true,
    advisory: false,
    overall_horizon: 180,
    category_horizon: 90,
    top_n: 5,
    category_ranking: CategoryRanking::All,
    split_decimals: 1,
};
