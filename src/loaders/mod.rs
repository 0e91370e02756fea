//! Page data loaders
//!
//! Each loader composes API calls into the data one page renders. Loaders
//! degrade instead of failing: an unavailable resource becomes an empty
//! list or a default value. Only the URL lookup page can fail outright
//! (missing product), through [`Error::Load`](crate::error::Error::Load).
//!
//! Independent calls inside a loader run concurrently.

mod layout;
mod pages;
mod product;
mod url_lookup;

pub use layout::{load_layout, LayoutData, LayoutInput, LayoutUser, LOGGED_IN_COOKIE};
pub use pages::{
    load_configurator, load_home, load_products_index, load_url_index, load_websites_index,
    HomePage, StaticPage,
};
pub use product::{load_product, ProductPage};
pub use url_lookup::{load_url_lookup, ExternalProductWithDetails, UrlLookupPage};

use serde::{Deserialize, Serialize};

/// One step of a page's breadcrumb trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Display label
    pub path: String,
    /// Site-relative link
    pub url: String,
}

impl Breadcrumb {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }
}
