//! Error types for the price tracker client
//!
//! Two layers live here:
//!
//! - [`ApiError`] is the failure half of every [`ApiResult`] produced by the
//!   HTTP client. Expected failures (transport, non-2xx, unparseable body) are
//!   values, never panics.
//! - [`Error`] is the crate-wide error used by configuration, persistence,
//!   page loaders and the CLI.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Message used when no response was obtained at all
pub const MSG_FETCH_FAILED: &str = "failed to fetch";

/// Message used when a response body is not valid JSON for the expected type
pub const MSG_PARSE_FAILED: &str = "failed to parse response";

/// Message used when a response has a status outside 200-299
pub const MSG_HTTP_ERROR: &str = "HTTP error";

/// Message used when the request could not be built (body or headers)
pub const MSG_ENCODE_FAILED: &str = "failed to encode request";

// ============================================================================
// API Errors
// ============================================================================

/// Failure of a single API request
///
/// `status == 0` means the request never produced a response: either it
/// was sent and failed (offline, aborted, DNS/TLS failure) or it could not
/// be built locally, told apart by [`is_transport`](Self::is_transport) and
/// [`is_encode`](Self::is_encode). Any other value is the HTTP status of
/// the response that was deemed a failure.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message} (status {status})")]
pub struct ApiError {
    /// Human-readable description
    pub message: String,
    /// HTTP status, or 0 for transport failures
    pub status: u16,
    /// Parsed error body for HTTP failures, parse error text for parse failures
    pub data: Option<Value>,
}

impl ApiError {
    /// Create an API error
    pub fn new(message: impl Into<String>, status: u16, data: Option<Value>) -> Self {
        Self {
            message: message.into(),
            status,
            data,
        }
    }

    /// Request never obtained a response
    pub fn transport() -> Self {
        Self::new(MSG_FETCH_FAILED, 0, None)
    }

    /// Request could not be built; nothing was sent
    pub fn encode(cause: impl std::fmt::Display) -> Self {
        Self::new(
            MSG_ENCODE_FAILED,
            0,
            Some(Value::String(cause.to_string())),
        )
    }

    /// Response body could not be parsed
    pub fn parse(status: u16, cause: impl std::fmt::Display) -> Self {
        Self::new(
            MSG_PARSE_FAILED,
            status,
            Some(Value::String(cause.to_string())),
        )
    }

    /// Response parsed but its status was outside 200-299
    pub fn http(status: u16, body: Value) -> Self {
        Self::new(MSG_HTTP_ERROR, status, Some(body))
    }

    /// Check if this is a transport-level failure
    pub fn is_transport(&self) -> bool {
        self.status == 0 && self.message == MSG_FETCH_FAILED
    }

    /// Check if the request was never sent because it could not be built
    pub fn is_encode(&self) -> bool {
        self.status == 0 && self.message == MSG_ENCODE_FAILED
    }

    /// Check if the body failed to parse
    pub fn is_parse(&self) -> bool {
        self.status != 0 && self.message == MSG_PARSE_FAILED
    }

    /// Check if the server answered with a non-2xx status
    pub fn is_http(&self) -> bool {
        self.status != 0 && self.message == MSG_HTTP_ERROR
    }

    /// Deserialize the attached body into a caller-defined error shape
    pub fn data_as<E: DeserializeOwned>(&self) -> Option<E> {
        self.data
            .as_ref()
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    /// Server-provided `message` field of the error body, if any
    pub fn server_message(&self) -> Option<&str> {
        self.data.as_ref()?.get("message")?.as_str()
    }
}

/// Result of a single API request
pub type ApiResult<T> = std::result::Result<T, ApiError>;

// ============================================================================
// Pager Errors
// ============================================================================

/// Failure of a pager navigation
///
/// The precondition variants are raised locally without any network call and
/// indicate a caller bug; check `has_next()`/`has_prev()` first.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PagerError {
    #[error("No next page available")]
    NoNextPage,

    #[error("No previous page available")]
    NoPrevPage,

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl PagerError {
    /// Check if this error is a local precondition failure
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NoNextPage | Self::NoPrevPage)
    }

    /// The underlying API error, if the failure came from the network
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

// ============================================================================
// Crate Errors
// ============================================================================

/// The main error type for the price tracker client
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    // ============================================================================
    // Request Errors
    // ============================================================================
    #[error("API request failed: {0}")]
    Api(#[from] ApiError),

    #[error("Pagination failed: {0}")]
    Pager(#[from] PagerError),

    /// Page data could not be produced; mirrors an HTTP error page
    #[error("Page load failed ({status}): {message}")]
    Load { status: u16, message: String },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("Session error: {message}")]
    Session { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a page load error
    pub fn load(status: u16, message: impl Into<String>) -> Self {
        Self::Load {
            status,
            message: message.into(),
        }
    }

    /// Create a session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }

    /// HTTP status this error should be reported with
    pub fn status(&self) -> u16 {
        match self {
            Error::Load { status, .. } => *status,
            Error::Api(e) if e.status != 0 => e.status,
            Error::Pager(PagerError::Api(e)) if e.status != 0 => e.status,
            Error::Api(_) | Error::Pager(_) => 502,
            _ => 500,
        }
    }
}

/// Result type alias for the price tracker client
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
