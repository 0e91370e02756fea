//! Metadata keys and their values across listings

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::MetadataDetail;
use crate::pagination::append_query;
use crate::util::encode_uri_component;

/// Filters for the metadata key list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFilter {
    pub category_id: Option<i64>,
    pub website_id: Option<i64>,
}

/// Distinct metadata keys
pub async fn fetch_metadatas(client: &ApiClient, filter: &MetadataFilter) -> ApiResult<Vec<String>> {
    let mut pairs = Vec::new();
    if let Some(id) = filter.category_id {
        pairs.push(("category_id", id.to_string()));
    }
    if let Some(id) = filter.website_id {
        pairs.push(("website_id", id.to_string()));
    }
    client.get(&append_query("/api/metadatas", pairs)).await
}

/// Listings carrying the metadata key `name`
pub async fn fetch_metadata_detail(
    client: &ApiClient,
    name: &str,
    category_id: Option<i64>,
) -> ApiResult<Vec<MetadataDetail>> {
    let base = format!("/api/metadatas/{}", encode_uri_component(name));
    let pairs = category_id.map(|id| ("category_id", id.to_string()));
    client.get(&append_query(&base, pairs)).await
}
