//! HTTP client module
//!
//! Reduces every request to an [`ApiResult`](crate::error::ApiResult).
//!
//! # Features
//!
//! - **Result Contract**: transport, HTTP and parse failures are values
//! - **JSON Bodies**: `post`/`put` send JSON with a default `Content-Type`
//! - **Abort Signals**: callers may cancel in-flight requests
//! - **Base URL Resolution**: injectable per-client URL resolver

mod client;
mod options;
mod resolver;

pub use client::{ApiClient, ApiClientConfig, ApiClientConfigBuilder};
pub use options::{AbortController, AbortSignal, RequestOptions};
pub use resolver::{BaseUrlResolver, RewriteBaseUrl, StaticBaseUrl};

#[cfg(test)]
mod tests;
