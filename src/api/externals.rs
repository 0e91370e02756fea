//! Retailer listings (external products)

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{
    ExternalProduct, ExternalProductFilter, ExternalProductMetadata, ExternalProductOfInternal,
    ExternalProductPrice, ProductBadge,
};
use crate::pagination::append_query;

/// Search listings, e.g. by retailer page URL
pub async fn fetch_external_products(
    client: &ApiClient,
    filter: &ExternalProductFilter,
) -> ApiResult<Vec<ExternalProduct>> {
    let url = append_query("/api/externals", filter.query_pairs());
    client.get(&url).await
}

/// Price history of a listing, newest first
pub async fn fetch_external_product_prices(
    client: &ApiClient,
    external_id: i64,
) -> ApiResult<Vec<ExternalProductPrice>> {
    client
        .get(&format!("/api/externals/{external_id}/prices"))
        .await
}

pub async fn fetch_external_product_metadata(
    client: &ApiClient,
    external_id: i64,
) -> ApiResult<Vec<ExternalProductMetadata>> {
    client
        .get(&format!("/api/externals/{external_id}/metadata"))
        .await
}

pub async fn fetch_external_product_badges(
    client: &ApiClient,
    external_id: i64,
) -> ApiResult<Vec<ProductBadge>> {
    client
        .get(&format!("/api/externals/{external_id}/badges"))
        .await
}

/// Listings the server considers the same product as `external_id`
pub async fn fetch_similar_external_products(
    client: &ApiClient,
    external_id: i64,
) -> ApiResult<Vec<ExternalProductOfInternal>> {
    client
        .get(&format!("/api/externals/{external_id}/similar"))
        .await
}
