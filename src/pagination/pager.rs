//! Stateful cursor pager
//!
//! Navigation takes `&mut self`, so a pager can have at most one request in
//! flight; the token pair never races.

use super::types::{append_query, PageOptions, Paginated, PagerState};
use crate::error::{ApiResult, PagerError};
use crate::http::{ApiClient, RequestOptions};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::marker::PhantomData;
use tracing::{debug, warn};

/// Page size used when none is given
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

impl ApiClient {
    /// Fetch one page without any pager state
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        url: &str,
        page: &PageOptions,
        options: &RequestOptions,
    ) -> ApiResult<Paginated<T>> {
        let full_url = append_query(url, page.query_pairs());
        self.get_with(&full_url, options).await
    }
}

/// Directional navigation over a paginated resource
#[derive(Debug)]
pub struct Pager<T> {
    client: ApiClient,
    url: String,
    limit: u32,
    options: RequestOptions,
    state: PagerState,
    _marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> Pager<T> {
    /// Create a pager over a base URL with the default page size
    pub fn new(client: ApiClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            limit: DEFAULT_PAGE_LIMIT,
            options: RequestOptions::default(),
            state: PagerState::default(),
            _marker: PhantomData,
        }
    }

    /// Set the page size
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Set the options sent with every page request
    #[must_use]
    pub fn with_options(mut self, options: RequestOptions) -> Self {
        self.options = options;
        self
    }

    /// Base URL of the resource
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Page size
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Current cursors
    pub fn state(&self) -> &PagerState {
        &self.state
    }

    /// Check if `next()` can be called
    pub fn has_next(&self) -> bool {
        self.state.has_next()
    }

    /// Check if `prev()` can be called
    pub fn has_prev(&self) -> bool {
        self.state.has_prev()
    }

    /// Forget both cursors
    pub fn reset(&mut self) {
        self.state = PagerState::default();
    }

    /// Fetch the first page
    pub async fn first(&mut self) -> Result<Paginated<T>, PagerError> {
        let page = self.fetch(PageOptions::first(Some(self.limit))).await?;
        self.state.next_token = clean_token(page.next_token.as_ref());
        self.state.prev_token = None;
        Ok(page)
    }

    /// Fetch the page after the current one
    pub async fn next(&mut self) -> Result<Paginated<T>, PagerError> {
        let token = self.state.next_token.clone().ok_or(PagerError::NoNextPage)?;
        let page = self.fetch(PageOptions::next(token, Some(self.limit))).await?;
        self.store_both(&page);
        Ok(page)
    }

    /// Fetch the page before the current one
    pub async fn prev(&mut self) -> Result<Paginated<T>, PagerError> {
        let token = self.state.prev_token.clone().ok_or(PagerError::NoPrevPage)?;
        let page = self.fetch(PageOptions::prev(token, Some(self.limit))).await?;
        self.store_both(&page);
        Ok(page)
    }

    /// Fetch the last page
    pub async fn last(&mut self) -> Result<Paginated<T>, PagerError> {
        let page = self.fetch(PageOptions::last(Some(self.limit))).await?;
        self.state.next_token = None;
        self.state.prev_token = clean_token(page.prev_token.as_ref());
        Ok(page)
    }

    /// Fetch an arbitrary page; does not touch the cursors
    pub async fn fetch(&self, page: PageOptions) -> ApiResult<Paginated<T>> {
        debug!("Fetching page={} of {}", page.page(), self.url);
        self.client.get_page(&self.url, &page, &self.options).await
    }

    fn store_both(&mut self, page: &Paginated<T>) {
        self.state.next_token = clean_token(page.next_token.as_ref());
        self.state.prev_token = clean_token(page.prev_token.as_ref());
    }
}

/// Empty cursors mean "no page in that direction"
fn clean_token(token: Option<&String>) -> Option<String> {
    token.filter(|t| !t.is_empty()).cloned()
}

/// Walk every page of a list resource from first to last
///
/// Stops early, with a warning, if the server hands back any cursor it
/// already gave out.
pub async fn fetch_all_pages<I: DeserializeOwned>(
    client: &ApiClient,
    url: &str,
    limit: u32,
) -> Result<Vec<I>, PagerError> {
    let mut pager: Pager<Vec<I>> = Pager::new(client.clone(), url).with_limit(limit);
    let mut items = pager.first().await?.data;
    let mut pages = 1usize;
    let mut seen = HashSet::new();

    while let Some(token) = pager.state().next_token.clone() {
        if !seen.insert(token) {
            warn!("Server repeated a cursor for {}, stopping after {} pages", url, pages);
            break;
        }
        let page = pager.next().await?;
        pages += 1;
        items.extend(page.data);
    }

    debug!("Fetched {} items over {} pages from {}", items.len(), pages, url);
    Ok(items)
}
