//! Per-request options and abort signals

use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::watch;

/// Handle that cancels every request carrying one of its signals
#[derive(Debug, Clone)]
pub struct AbortController {
    tx: Arc<watch::Sender<bool>>,
}

impl AbortController {
    /// Create a controller in the not-aborted state
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Get a signal to attach to requests
    pub fn signal(&self) -> AbortSignal {
        AbortSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Abort all requests using this controller's signals
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    /// Check if abort has been requested
    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for AbortController {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving side of an [`AbortController`]
#[derive(Debug, Clone)]
pub struct AbortSignal {
    rx: watch::Receiver<bool>,
}

impl AbortSignal {
    /// Check if the controller has aborted
    pub fn is_aborted(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the controller aborts
    ///
    /// Never resolves if the controller is dropped without aborting.
    pub async fn aborted(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|aborted| *aborted).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Options for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra request headers
    pub headers: HashMap<String, String>,
    /// Cancellation signal
    pub signal: Option<AbortSignal>,
    /// Alternate client to send the request with (e.g. one bound to a
    /// server-side cookie jar)
    pub client: Option<Client>,
}

impl RequestOptions {
    /// Create empty request options
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Attach an abort signal
    #[must_use]
    pub fn signal(mut self, signal: AbortSignal) -> Self {
        self.signal = Some(signal);
        self
    }

    /// Send with an alternate client
    #[must_use]
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Check for a header, ignoring ASCII case
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.keys().any(|k| k.eq_ignore_ascii_case(name))
    }
}
