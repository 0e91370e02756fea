//! Deals: products whose current price is below their recent maximum

use serde::{Deserialize, Serialize};

/// A product currently priced below its recent maximum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub product_id: i64,
    pub product_name: String,
    pub product_url: String,
    pub website_name: String,
    pub current_price: f64,
    pub max_price_last_days: f64,
    pub current_price_date: String,
    pub is_available: bool,
    pub category_id: Option<i64>,
    pub manufacturer_id: Option<i64>,
}

impl Deal {
    /// Absolute discount against the recent maximum
    pub fn discount(&self) -> f64 {
        self.max_price_last_days - self.current_price
    }

    /// Discount as a percentage of the recent maximum
    pub fn discount_percent(&self) -> f64 {
        if self.max_price_last_days <= 0.0 {
            return 0.0;
        }
        self.discount() / self.max_price_last_days * 100.0
    }
}

/// Ordering of the deals list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DealSort {
    /// Largest absolute discount first
    Value,
    /// Largest relative discount first
    Percentage,
}

impl DealSort {
    /// Query parameter value
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Percentage => "percentage",
        }
    }
}

/// Filters for the deals list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DealFilter {
    /// Look-back window in days
    pub days: Option<u32>,
    pub sort_by: Option<DealSort>,
    pub manufacturer_id: Option<i64>,
    pub category_id: Option<i64>,
}

impl DealFilter {
    /// Query parameters for the set filters
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(days) = self.days {
            pairs.push(("days", days.to_string()));
        }
        if let Some(sort) = self.sort_by {
            pairs.push(("sortby", sort.as_str().to_string()));
        }
        if let Some(id) = self.manufacturer_id {
            pairs.push(("manufacturer_id", id.to_string()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("category_id", id.to_string()));
        }
        pairs
    }
}
