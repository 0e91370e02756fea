//! Admin moderation: flags, fringe groups, group merges and generated specs

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Flagging, FlaggingOption, FringeGroup, GeneratedSpec};
use crate::pagination::append_query;
use serde_json::{json, Value};

/// Sort direction for fringe groups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

pub async fn get_flagging_options(client: &ApiClient) -> ApiResult<Vec<FlaggingOption>> {
    client.get("/api/flagoptions").await
}

pub async fn fetch_flaggings(client: &ApiClient) -> ApiResult<Vec<Flagging>> {
    client.get("/api/productflags").await
}

pub async fn resolve_flagging(client: &ApiClient, flagging_id: i64) -> ApiResult<Value> {
    client
        .put(
            &format!("/api/admin/flaggings/{flagging_id}/resolve"),
            &json!({}),
        )
        .await
}

/// Listings weakly attached to their group
///
/// A zero threshold is treated as unset.
pub async fn get_fringe_groups(
    client: &ApiClient,
    percent_threshold: Option<f64>,
    sort: Option<SortOrder>,
) -> ApiResult<Vec<FringeGroup>> {
    let mut pairs = Vec::new();
    if let Some(threshold) = percent_threshold.filter(|t| *t != 0.0) {
        pairs.push(("percent_threshold", threshold.to_string()));
    }
    if let Some(sort) = sort {
        pairs.push(("sort", sort.as_str().to_string()));
    }
    client.get(&append_query("/api/fringegroups", pairs)).await
}

/// Remove a listing from a group
pub async fn purge_group(client: &ApiClient, external_id: i64, group_id: i64) -> ApiResult<Value> {
    client
        .delete(&format!("/api/externals/{external_id}/groups/{group_id}"))
        .await
}

pub async fn merge_products_into_group(
    client: &ApiClient,
    group_id: i64,
    external_product_ids: &[i64],
) -> ApiResult<Value> {
    client
        .put(
            &format!("/api/groups/{group_id}/merge"),
            &json!({ "externalProductIdsToMerge": external_product_ids }),
        )
        .await
}

pub async fn delete_group(client: &ApiClient, group_id: i64) -> ApiResult<Value> {
    client.delete(&format!("/api/groups/{group_id}")).await
}

pub async fn fetch_generated_specs(client: &ApiClient) -> ApiResult<Vec<GeneratedSpec>> {
    client.get("/api/generatedspecs").await
}
