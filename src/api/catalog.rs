//! Catalog lookups used by every page

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Category, Manufacturer, Stats};

pub async fn get_categories(client: &ApiClient) -> ApiResult<Vec<Category>> {
    client.get("/api/categories").await
}

pub async fn get_manufacturers(client: &ApiClient) -> ApiResult<Vec<Manufacturer>> {
    client.get("/api/manufacturers").await
}

/// Site-wide product, category and website counts
pub async fn fetch_stats(client: &ApiClient) -> ApiResult<Stats> {
    client.get("/api/stats").await
}
