//! Current deals

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Deal, DealFilter};
use crate::pagination::append_query;

/// Deals matching `filter`; an empty filter uses the server's defaults
pub async fn fetch_deals(client: &ApiClient, filter: &DealFilter) -> ApiResult<Vec<Deal>> {
    let url = append_query("/api/deals", filter.query_pairs());
    client.get(&url).await
}
