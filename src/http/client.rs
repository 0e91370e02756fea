//! Result-typed HTTP client
//!
//! Performs one request per call and reduces it to `ApiResult<T>`:
//! - No response at all (network error, abort) → status 0, "failed to fetch"
//! - Request that cannot be built (body, headers) → status 0, "failed to encode request"
//! - Body that is not valid JSON, including an empty one → response status,
//!   "failed to parse response"
//! - 2xx with a JSON body → `Ok(body)`
//! - Other status with a JSON body → response status, "HTTP error", body attached
//!
//! There are no retries; a failure is surfaced to the caller as-is.

use super::options::{AbortSignal, RequestOptions};
use super::resolver::{BaseUrlResolver, RewriteBaseUrl, StaticBaseUrl};
use crate::error::{ApiError, ApiResult, Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the API client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Base URL prefixed to relative paths
    pub base_url: Option<String>,
    /// Internal API URL that replaces `base_url` on server-side requests
    pub internal_url: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// Keep and send cookies (session authentication)
    pub include_credentials: bool,
    /// User agent string
    pub user_agent: String,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            internal_url: None,
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            include_credentials: true,
            user_agent: format!("pricetracker-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiClientConfig {
    /// Create a new config builder
    pub fn builder() -> ApiClientConfigBuilder {
        ApiClientConfigBuilder::default()
    }

    /// Build the resolver described by this config
    pub fn resolver(&self) -> Arc<dyn BaseUrlResolver> {
        match (&self.base_url, &self.internal_url) {
            (Some(public), Some(internal)) => Arc::new(RewriteBaseUrl::new(public, internal)),
            (Some(base), None) => Arc::new(StaticBaseUrl::new(base)),
            (None, Some(internal)) => Arc::new(StaticBaseUrl::new(internal)),
            (None, None) => Arc::new(StaticBaseUrl::none()),
        }
    }
}

/// Builder for API client config
#[derive(Default)]
pub struct ApiClientConfigBuilder {
    config: ApiClientConfig,
}

impl ApiClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the internal URL public requests are rewritten to
    pub fn internal_url(mut self, url: impl Into<String>) -> Self {
        self.config.internal_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Enable or disable the cookie store
    pub fn include_credentials(mut self, include: bool) -> Self {
        self.config.include_credentials = include;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> ApiClientConfig {
        self.config
    }
}

/// Result-typed JSON API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    resolver: Arc<dyn BaseUrlResolver>,
}

impl ApiClient {
    /// Create a client from configuration
    pub fn new(config: ApiClientConfig) -> Result<Self> {
        let resolver = config.resolver();
        Self::with_resolver(config, resolver)
    }

    /// Create a client with a custom base URL resolver
    pub fn with_resolver(
        config: ApiClientConfig,
        resolver: Arc<dyn BaseUrlResolver>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .cookie_store(config.include_credentials)
            .build()
            .map_err(Error::ClientBuild)?;

        Ok(Self {
            client,
            config,
            resolver,
        })
    }

    /// Create a client against a base URL with default settings
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        Self::new(ApiClientConfig::builder().base_url(base_url).build())
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Get the client configuration
    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    /// Resolve a path to the URL that would be fetched
    pub fn resolve(&self, path: &str) -> String {
        self.resolver.resolve(path)
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get_with(path, &RequestOptions::default()).await
    }

    /// Make a GET request with options
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> ApiResult<T> {
        self.request(Method::GET, path, None, options).await
    }

    /// Make a POST request with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.post_with(path, body, &RequestOptions::default()).await
    }

    /// Make a POST request with a JSON body and options
    pub async fn post_with<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> ApiResult<T> {
        let payload = encode_body(body)?;
        self.request(Method::POST, path, Some(payload), options)
            .await
    }

    /// Make a PUT request with a JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.put_with(path, body, &RequestOptions::default()).await
    }

    /// Make a PUT request with a JSON body and options
    pub async fn put_with<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        options: &RequestOptions,
    ) -> ApiResult<T> {
        let payload = encode_body(body)?;
        self.request(Method::PUT, path, Some(payload), options)
            .await
    }

    /// Make a DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.delete_with(path, &RequestOptions::default()).await
    }

    /// Make a DELETE request with options
    pub async fn delete_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: &RequestOptions,
    ) -> ApiResult<T> {
        self.request(Method::DELETE, path, None, options).await
    }

    /// Make a generic request
    ///
    /// `body` is an already-encoded JSON payload; when present a
    /// `Content-Type: application/json` header is added unless the default
    /// or per-request headers carry one. Per-request headers replace
    /// defaults with the same name.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        options: &RequestOptions,
    ) -> ApiResult<T> {
        let url = self.resolver.resolve(path);
        let client = options.client.as_ref().unwrap_or(&self.client);
        let signal = options.signal.as_ref();

        let mut headers = merge_headers(&self.config.default_headers, &options.headers)?;
        if body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let mut req = client.request(method.clone(), &url).headers(headers);
        if let Some(payload) = body {
            req = req.body(payload);
        }

        debug!("{} {}", method, url);

        let response = match abortable(signal, req.send()).await {
            Some(Ok(response)) => response,
            Some(Err(e)) => {
                warn!("Request failed: {} {}: {}", method, url, e);
                return Err(ApiError::transport());
            }
            None => {
                debug!("Request aborted: {} {}", method, url);
                return Err(ApiError::transport());
            }
        };

        let status = response.status().as_u16();
        let bytes = match abortable(signal, response.bytes()).await {
            Some(Ok(bytes)) => bytes,
            Some(Err(e)) => return Err(ApiError::parse(status, e)),
            None => return Err(ApiError::parse(status, "body read aborted")),
        };

        let parsed: Value = serde_json::from_slice(&bytes).map_err(|e| {
            debug!("Unparseable body from {} {} ({})", method, url, status);
            ApiError::parse(status, e)
        })?;

        if (200..300).contains(&status) {
            debug!("{} {} -> {}", method, url, status);
            serde_json::from_value(parsed).map_err(|e| ApiError::parse(status, e))
        } else {
            debug!("{} {} -> HTTP error {}", method, url, status);
            Err(ApiError::http(status, parsed))
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

/// Run a future unless the signal aborts first
///
/// Returns `None` when aborted, including when the signal was already
/// aborted before the call.
async fn abortable<F: Future>(signal: Option<&AbortSignal>, fut: F) -> Option<F::Output> {
    match signal {
        Some(signal) => {
            tokio::select! {
                biased;
                () = signal.aborted() => None,
                out = fut => Some(out),
            }
        }
        None => Some(fut.await),
    }
}

/// Combine default and per-request headers; per-request values replace
/// defaults of the same name (names compare case-insensitively)
fn merge_headers(
    defaults: &HashMap<String, String>,
    overrides: &HashMap<String, String>,
) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (key, value) in defaults.iter().chain(overrides) {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| ApiError::encode(format!("header name '{key}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| ApiError::encode(format!("header '{key}': {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Serialize a request payload
fn encode_body<B: Serialize + ?Sized>(body: &B) -> ApiResult<Vec<u8>> {
    serde_json::to_vec(body).map_err(ApiError::encode)
}
