// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Price Tracker Client
//!
//! Result-typed client for the daam.deals price tracker API, with cursor
//! pagination, page data loaders, observable client state and SEO helpers.
//!
//! ## Features
//!
//! - **Result Contract**: every API call returns `ApiResult<T>`; transport,
//!   HTTP and parse failures are values, never panics
//! - **Cursor Pagination**: `Pager` walks `first`/`next`/`prev`/`last` pages
//! - **Page Loaders**: compose API calls into per-page data with fallbacks
//! - **Observable State**: session, tracked products and toasts
//! - **SEO**: meta tags, JSON-LD builders and a product sitemap
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pricetracker_client::api::products;
//! use pricetracker_client::http::ApiClient;
//!
//! #[tokio::main]
//! async fn main() -> pricetracker_client::Result<()> {
//!     let client = ApiClient::with_base_url("https://daam.deals")?;
//!
//!     let product = products::fetch_product_by_id(&client, 42).await?;
//!     println!("{}", product.name);
//!
//!     let mut pager = products::products_pager(&client, 20);
//!     let page = pager.first().await?;
//!     while pager.has_next() {
//!         let page = pager.next().await?;
//!         // ...
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │          loaders: layout, home, product, url lookup             │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │   api    │  state    │  pagination   │   seo     │  sitemap    │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ products │ session   │ Pager         │ meta tags │ urlset XML  │
//! │ deals    │ tracked   │ first/next    │ JSON-LD   │             │
//! │ auth ... │ toasts    │ prev/last     │           │             │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//!                                │
//!                  http::ApiClient → ApiResult<T>
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: document the model fields before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Result-typed HTTP client
pub mod http;

/// Cursor pagination
pub mod pagination;

/// API resource types
pub mod models;

/// Per-resource API wrappers
pub mod api;

/// Observable values
pub mod store;

/// Session, tracked products and toasts
pub mod state;

/// Page data loaders
pub mod loaders;

/// Meta tags and structured data
pub mod seo;

/// Product sitemap
pub mod sitemap;

/// Formatting helpers
pub mod util;

/// Client configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{ApiError, ApiResult, Error, PagerError, Result};

// Re-export commonly used types
pub use config::{load_config, ClientConfig};
pub use http::{ApiClient, ApiClientConfig};
pub use pagination::{Paginated, Pager};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
