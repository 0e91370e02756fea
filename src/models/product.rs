//! Internal products, their external listings and price history
//!
//! An *internal* product is the tracker's canonical product; each retailer
//! page that sells it is an *external* product (listing) grouped under it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Canonical product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub raw_metadata: HashMap<String, String>,
    #[serde(default)]
    pub parsed_metadata: HashMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

/// Most recent price on one website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastPrice {
    pub price: f64,
    pub created_at: String,
    pub website_id: i64,
}

/// Product with the latest price per website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithLastPrice {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default)]
    pub prices: Vec<LastPrice>,
}

/// Price of a product on one website
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebsitePrice {
    pub website_id: i64,
    pub price: f64,
    pub url: String,
    pub website: String,
    pub created_at: String,
    pub is_available: bool,
}

/// Product with its full price list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithPrice {
    #[serde(flatten)]
    pub product: Product,
    #[serde(default)]
    pub prices: Vec<WebsitePrice>,
}

/// Website a product is listed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWebsite {
    pub website_id: i64,
    pub website_name: String,
    pub product_url: String,
}

/// Listing website with the user's saved price
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWebsiteWithPrice {
    #[serde(flatten)]
    pub website: ProductWebsite,
    pub price: Option<f64>,
    pub is_available: bool,
    pub created_at: Option<String>,
    pub saved_price: Option<f64>,
}

/// Product with the websites it is listed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductWithWebsite {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub websites: Vec<ProductWebsite>,
}

/// Product with listing websites and prices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithWebsitePrice {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub websites: Vec<ProductWebsiteWithPrice>,
}

/// Product the signed-in user is tracking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedProduct {
    pub product_id: i64,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub saved_price: Option<f64>,
}

/// A retailer listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProduct {
    pub id: i64,
    pub internal_product_id: i64,
    pub name: String,
    pub url: String,
    pub website_id: i64,
    pub category_id: Option<i64>,
    #[serde(default)]
    pub manufacturer_id: Option<i64>,
}

/// A listing as seen from its internal product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProductOfInternal {
    pub external_product_id: i64,
    pub name: String,
    pub url: String,
    pub website_id: i64,
    #[serde(default)]
    pub variant_attributes: HashMap<String, Value>,
}

/// Filters for the external listing search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalProductFilter {
    /// Exact retailer page URL
    pub url: Option<String>,
    pub website_id: Option<i64>,
}

impl ExternalProductFilter {
    /// Query parameters for the set filters
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(url) = &self.url {
            pairs.push(("url", url.clone()));
        }
        if let Some(id) = self.website_id {
            pairs.push(("website_id", id.to_string()));
        }
        pairs
    }
}

/// One observed price of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProductPrice {
    #[serde(default)]
    pub external_product_id: Option<i64>,
    pub price: f64,
    pub is_available: bool,
    pub created_at: String,
}

/// One metadata key of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalProductMetadata {
    pub name: String,
    pub value: Value,
}

/// Badge shown on a listing (e.g. "lowest price in 30 days")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBadge {
    pub badge: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Attribute that distinguishes variants of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub name: String,
    #[serde(default)]
    pub values: Vec<Value>,
}

/// Pair of internal products that may be the same product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PotentialProductMatch {
    pub product_id: i64,
    pub product_name: String,
    pub similar_product_id: i64,
    pub similar_product_name: String,
    pub score: f64,
}
