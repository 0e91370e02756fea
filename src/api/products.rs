//! Internal products, their listings and prices

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{
    ExternalProductOfInternal, ExternalProductPrice, PotentialProductMatch, Product,
    ProductWithLastPrice, ProductWithPrice, ProductWithWebsite, VariantAttribute,
};
use crate::pagination::{append_query, Pager};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Options for the flat product list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductListOptions {
    /// Maximum number of products
    pub limit: Option<u32>,
    /// Include the latest price per website
    pub include_prices: bool,
}

/// Flat product list
pub async fn fetch_products(
    client: &ApiClient,
    options: ProductListOptions,
) -> ApiResult<Vec<ProductWithLastPrice>> {
    let mut pairs = Vec::new();
    if let Some(limit) = options.limit.filter(|l| *l > 0) {
        pairs.push(("limit", limit.to_string()));
    }
    if options.include_prices {
        pairs.push(("include_prices", "true".to_string()));
    }
    client.get(&append_query("/api/products", pairs)).await
}

/// Cursor pager over all products
pub fn products_pager(client: &ApiClient, limit: u32) -> Pager<Vec<Product>> {
    Pager::new(client.clone(), "/api/products").with_limit(limit)
}

pub async fn fetch_product_by_id(client: &ApiClient, id: i64) -> ApiResult<Product> {
    client.get(&format!("/api/products/{id}")).await
}

pub async fn fetch_product_prices_by_id(client: &ApiClient, id: i64) -> ApiResult<ProductWithPrice> {
    client.get(&format!("/api/products/{id}/prices")).await
}

pub async fn fetch_product_websites(client: &ApiClient, id: i64) -> ApiResult<ProductWithWebsite> {
    client.get(&format!("/api/products/{id}/websites")).await
}

/// Listings grouped under an internal product, optionally narrowed to one
/// variant (`variants[key]=value` per attribute)
pub async fn fetch_external_products_by_internal_id(
    client: &ApiClient,
    internal_id: i64,
    variants: &BTreeMap<String, String>,
) -> ApiResult<Vec<ExternalProductOfInternal>> {
    let base = format!("/api/products/{internal_id}/externals");
    let pairs = variants
        .iter()
        .map(|(key, value)| (format!("variants[{key}]"), value.clone()));
    client.get(&append_query(&base, pairs)).await
}

/// Latest prices of every listing of an internal product
pub async fn fetch_external_prices_of_product(
    client: &ApiClient,
    internal_id: i64,
) -> ApiResult<Vec<ExternalProductPrice>> {
    client
        .get(&format!("/api/products/{internal_id}/externals/prices"))
        .await
}

pub async fn fetch_variant_attributes(
    client: &ApiClient,
    internal_id: i64,
) -> ApiResult<Vec<VariantAttribute>> {
    client
        .get(&format!("/api/products/{internal_id}/variantattributes"))
        .await
}

/// Product pairs that may need merging
pub async fn fetch_potentially_similar_products(
    client: &ApiClient,
    min_score: f64,
) -> ApiResult<Vec<PotentialProductMatch>> {
    let url = append_query("/api/potentialsimilar", [("min_score", min_score.to_string())]);
    client.get(&url).await
}

/// Report that a listing does not belong to its internal product
pub async fn flag_incorrect_grouping(
    client: &ApiClient,
    internal_id: i64,
    external_id: i64,
    flag_option_ids: &[i64],
) -> ApiResult<Value> {
    client
        .post(
            &format!("/api/products/{internal_id}/externals/{external_id}/flag"),
            &json!({ "flag_option_ids": flag_option_ids }),
        )
        .await
}
