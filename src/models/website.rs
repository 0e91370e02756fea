//! Retail websites the tracker scrapes

use serde::{Deserialize, Serialize};

/// Per-website counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteStat {
    pub total_products: u64,
    pub total_categories: u64,
}

/// A tracked retail website
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Website {
    pub id: i64,
    pub name: String,
    pub url: String,
}

/// Website with optional counters filled in by follow-up requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteWithStat {
    #[serde(flatten)]
    pub website: Website,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stat: Option<WebsiteStat>,
    #[serde(
        rename = "newProductsCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub new_products_count: Option<u64>,
}
