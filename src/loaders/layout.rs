//! Data shared by every page

use crate::api::{catalog, deals, users, websites};
use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{Category, Deal, DealFilter, Manufacturer, Website};
use crate::util::array_to_per_id_map;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Cookie set by the server while a session is active
pub const LOGGED_IN_COOKIE: &str = "LoggedInAt";

/// Request context for the layout loader
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutInput {
    /// Value of the `LoggedInAt` cookie, when sent
    pub logged_in_cookie: Option<String>,
}

impl LayoutInput {
    /// Extract the login marker from a raw `Cookie` header
    pub fn from_cookie_header(header: &str) -> Self {
        let logged_in_cookie = header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == LOGGED_IN_COOKIE)
            .map(|(_, value)| value.to_string());

        Self { logged_in_cookie }
    }
}

/// Who is browsing
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum LayoutUser {
    #[default]
    Anonymous,
    Existing {
        email: String,
        #[serde(rename = "isAdmin")]
        is_admin: bool,
    },
}

impl LayoutUser {
    pub fn is_existing(&self) -> bool {
        matches!(self, Self::Existing { .. })
    }
}

/// Lookup tables fetched once per visit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutData {
    pub user: LayoutUser,
    pub categories: Vec<Category>,
    pub manufacturers: Vec<Manufacturer>,
    pub websites: Vec<Website>,
    pub deals: Vec<Deal>,
    pub category_map: HashMap<i64, Category>,
    pub manufacturer_map: HashMap<i64, Manufacturer>,
    pub website_map: HashMap<i64, Website>,
}

/// Load the user and the catalog lookup tables
///
/// The user is resolved through `/api/me` only when the login cookie is
/// present; a failed lookup leaves the visitor anonymous. Each table falls
/// back to empty on its own.
pub async fn load_layout(client: &ApiClient, input: &LayoutInput) -> LayoutData {
    let no_filter = DealFilter::default();
    let (user, categories, manufacturers, site_list, deal_list) = futures::join!(
        resolve_user(client, input),
        catalog::get_categories(client),
        catalog::get_manufacturers(client),
        websites::fetch_websites(client),
        deals::fetch_deals(client, &no_filter),
    );

    let categories = or_empty(categories, "categories");
    let manufacturers = or_empty(manufacturers, "manufacturers");
    let websites = or_empty(site_list, "websites");
    let deals = or_empty(deal_list, "deals");

    debug!(
        "Layout loaded: {} categories, {} manufacturers, {} websites, {} deals",
        categories.len(),
        manufacturers.len(),
        websites.len(),
        deals.len()
    );

    LayoutData {
        user,
        category_map: array_to_per_id_map(&categories),
        manufacturer_map: array_to_per_id_map(&manufacturers),
        website_map: array_to_per_id_map(&websites),
        categories,
        manufacturers,
        websites,
        deals,
    }
}

async fn resolve_user(client: &ApiClient, input: &LayoutInput) -> LayoutUser {
    if input.logged_in_cookie.is_none() {
        return LayoutUser::Anonymous;
    }

    match users::get_my_info(client).await {
        Ok(me) => LayoutUser::Existing {
            email: me.email,
            is_admin: me.is_admin,
        },
        Err(e) => {
            debug!("Session cookie present but /api/me failed: {}", e);
            LayoutUser::Anonymous
        }
    }
}

fn or_empty<T>(result: ApiResult<Vec<T>>, what: &str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!("Failed to load {}: {}", what, e);
        Vec::new()
    })
}
