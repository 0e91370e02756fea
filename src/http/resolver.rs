//! Base URL resolution
//!
//! The client consults its resolver once per call to turn a request path
//! into the URL that is actually fetched.

use std::fmt::Debug;
use tracing::trace;

/// Turns a request path into a full URL
pub trait BaseUrlResolver: Send + Sync + Debug {
    /// Resolve a path (relative or absolute) to the URL to fetch
    fn resolve(&self, path: &str) -> String;
}

/// Prefix relative paths with a fixed base URL
#[derive(Debug, Clone, Default)]
pub struct StaticBaseUrl {
    base: Option<String>,
}

impl StaticBaseUrl {
    /// Create a resolver with a base URL
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: Some(base.into().trim_end_matches('/').to_string()),
        }
    }

    /// Create a resolver that passes paths through unchanged
    pub fn none() -> Self {
        Self { base: None }
    }

    /// Configured base URL
    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }
}

impl BaseUrlResolver for StaticBaseUrl {
    fn resolve(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.base {
            Some(base) => {
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

/// Rewrite public API URLs to an internal API URL
///
/// Used on the server-side request path, where the publicly reachable API
/// address should be swapped for the address reachable from the server.
#[derive(Debug, Clone)]
pub struct RewriteBaseUrl {
    base: StaticBaseUrl,
    public_url: String,
    internal_url: String,
}

impl RewriteBaseUrl {
    /// Create a rewriting resolver; relative paths are resolved against the
    /// public URL first
    pub fn new(public_url: impl Into<String>, internal_url: impl Into<String>) -> Self {
        let public_url = public_url.into().trim_end_matches('/').to_string();
        let internal_url = internal_url.into().trim_end_matches('/').to_string();
        Self {
            base: StaticBaseUrl::new(public_url.clone()),
            public_url,
            internal_url,
        }
    }
}

impl BaseUrlResolver for RewriteBaseUrl {
    fn resolve(&self, path: &str) -> String {
        let url = self.base.resolve(path);
        match url.strip_prefix(&self.public_url) {
            Some(rest) => {
                let rewritten = format!("{}{}", self.internal_url, rest);
                trace!("Rewriting {} -> {}", url, rewritten);
                rewritten
            }
            None => url,
        }
    }
}
