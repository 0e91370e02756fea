//! Catalog lookups: categories, manufacturers, metadata and site stats

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Product manufacturer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: i64,
    pub name: String,
}

/// Site-wide counters shown on the home page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub products: u64,
    pub categories: u64,
    pub websites: u64,
}

/// Metadata of one external listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataDetail {
    pub id: i64,
    pub internal_product_id: i64,
    pub name: String,
    pub category_id: i64,
    pub website_id: i64,
    #[serde(default)]
    pub raw_metadata: HashMap<String, String>,
    pub external_manufacturer_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub parsed_metadata: HashMap<String, Value>,
    #[serde(default)]
    pub manual_metadata: HashMap<String, Value>,
}

/// Specs generated for an external listing by one or more models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSpec {
    pub external_product_id: i64,
    pub name: String,
    #[serde(default)]
    pub metadatas: Vec<GeneratedMetadata>,
}

/// Output of a single generating model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedMetadata {
    pub model: String,
    #[serde(default)]
    pub metadata: HashMap<String, Value>,
}
