//! Tracked retail websites

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Website, WebsiteStat};

/// Look-back window for new product counts when none is given
pub const DEFAULT_NEW_PRODUCT_DAYS: u32 = 7;

pub async fn fetch_websites(client: &ApiClient) -> ApiResult<Vec<Website>> {
    client.get("/api/websites").await
}

pub async fn fetch_website_stats(client: &ApiClient, website_id: i64) -> ApiResult<WebsiteStat> {
    client
        .get(&format!("/api/websites/{website_id}/stats"))
        .await
}

/// Products first seen on a website in the last `days` days
pub async fn fetch_website_new_products_count(
    client: &ApiClient,
    website_id: i64,
    days: Option<u32>,
) -> ApiResult<u64> {
    let days = days.unwrap_or(DEFAULT_NEW_PRODUCT_DAYS);
    client
        .get(&format!("/api/websites/{website_id}/new?days={days}"))
        .await
}
