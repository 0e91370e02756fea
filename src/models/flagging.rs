//! Moderation: grouping flags and fringe group members

use serde::{Deserialize, Serialize};

/// Reason a user can give when flagging a grouping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggingOption {
    pub id: i64,
    pub description: String,
}

/// Flag tallies for one option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagCount {
    pub flag_option_id: i64,
    pub resolved_count: u64,
    pub pending_count: u64,
}

/// An external listing flagged as wrongly grouped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flagging {
    pub external_product_id: i64,
    pub internal_product_id: i64,
    pub external_product_name: String,
    #[serde(default)]
    pub flags: Vec<FlagCount>,
}

/// Listing whose group membership is weakly supported
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FringeGroup {
    pub group_id: i64,
    pub external_product_id: i64,
    pub internal_product_id: i64,
    pub merged_internal_product_id: Option<i64>,
    pub group_name: String,
    pub external_product_name: String,
    pub count_in_all_groups: String,
    pub count_in_this_group: String,
    pub gp_percent: String,
    pub merged: bool,
}
