//! Pagination types
//!
//! Defines the page request variants, the response envelope and the token
//! pair a pager carries between requests.

use serde::{Deserialize, Serialize};

/// Which page to request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOptions {
    /// The first page
    First {
        /// Page size
        limit: Option<u32>,
    },
    /// The last page
    Last {
        /// Page size
        limit: Option<u32>,
    },
    /// The page after the one that issued `next_token`
    Next {
        /// Cursor from a previous response
        next_token: String,
        /// Page size
        limit: Option<u32>,
    },
    /// The page before the one that issued `prev_token`
    Prev {
        /// Cursor from a previous response
        prev_token: String,
        /// Page size
        limit: Option<u32>,
    },
}

impl PageOptions {
    /// Request the first page
    pub fn first(limit: Option<u32>) -> Self {
        Self::First { limit }
    }

    /// Request the last page
    pub fn last(limit: Option<u32>) -> Self {
        Self::Last { limit }
    }

    /// Request the page after a cursor
    pub fn next(next_token: impl Into<String>, limit: Option<u32>) -> Self {
        Self::Next {
            next_token: next_token.into(),
            limit,
        }
    }

    /// Request the page before a cursor
    pub fn prev(prev_token: impl Into<String>, limit: Option<u32>) -> Self {
        Self::Prev {
            prev_token: prev_token.into(),
            limit,
        }
    }

    /// Value of the `page` query parameter
    pub fn page(&self) -> &'static str {
        match self {
            Self::First { .. } => "first",
            Self::Last { .. } => "last",
            Self::Next { .. } => "next",
            Self::Prev { .. } => "prev",
        }
    }

    /// Requested page size
    pub fn limit(&self) -> Option<u32> {
        match self {
            Self::First { limit }
            | Self::Last { limit }
            | Self::Next { limit, .. }
            | Self::Prev { limit, .. } => *limit,
        }
    }

    /// Query parameters in request order: `page`, `limit`, then the token
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page().to_string())];
        if let Some(limit) = self.limit() {
            pairs.push(("limit", limit.to_string()));
        }
        match self {
            Self::Next { next_token, .. } => pairs.push(("next_token", next_token.clone())),
            Self::Prev { prev_token, .. } => pairs.push(("prev_token", prev_token.clone())),
            Self::First { .. } | Self::Last { .. } => {}
        }
        pairs
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Page contents
    pub data: T,
    /// Cursor for the following page; absent on the last page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
    /// Cursor for the preceding page; absent on the first page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev_token: Option<String>,
}

impl<T> Paginated<T> {
    /// Map the page contents, keeping the cursors
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Paginated<U> {
        Paginated {
            data: f(self.data),
            next_token: self.next_token,
            prev_token: self.prev_token,
        }
    }
}

/// Cursors held between pager requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagerState {
    /// Cursor for the page after the last fetched one
    pub next_token: Option<String>,
    /// Cursor for the page before the last fetched one
    pub prev_token: Option<String>,
}

impl PagerState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if a following page can be requested
    pub fn has_next(&self) -> bool {
        self.next_token.is_some()
    }

    /// Check if a preceding page can be requested
    pub fn has_prev(&self) -> bool {
        self.prev_token.is_some()
    }
}

/// Append form-encoded query parameters to a URL
///
/// Uses `&` when the URL already carries a query string, `?` otherwise.
pub fn append_query<K, V>(url: &str, pairs: impl IntoIterator<Item = (K, V)>) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let query = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    if query.is_empty() {
        url.to_string()
    } else if url.contains('?') {
        format!("{url}&{query}")
    } else {
        format!("{url}?{query}")
    }
}
