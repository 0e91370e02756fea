//! Home page and pages that only carry a breadcrumb

use super::Breadcrumb;
use crate::api::catalog;
use crate::http::ApiClient;
use crate::models::Stats;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Data for the home page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomePage {
    pub stats: Stats,
}

/// Load the home page; counters are zero when stats are unavailable
pub async fn load_home(client: &ApiClient) -> HomePage {
    let stats = catalog::fetch_stats(client).await.unwrap_or_else(|e| {
        warn!("Failed to load stats: {}", e);
        Stats::default()
    });
    HomePage { stats }
}

/// Page data that is only a breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticPage {
    pub breadcrumb: Vec<Breadcrumb>,
}

impl StaticPage {
    fn single(label: &str, url: &str) -> Self {
        Self {
            breadcrumb: vec![Breadcrumb::new(label, url)],
        }
    }
}

pub fn load_products_index() -> StaticPage {
    StaticPage::single("All Products", "/products")
}

pub fn load_websites_index() -> StaticPage {
    StaticPage::single("Websites", "/websites")
}

pub fn load_url_index() -> StaticPage {
    StaticPage::single("URL Lookup", "/url")
}

pub fn load_configurator() -> StaticPage {
    StaticPage::single("Configurator", "/configurator")
}
