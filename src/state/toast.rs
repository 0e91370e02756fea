//! Transient notifications

use crate::store::Store;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

/// How long a toast stays visible
pub const TOAST_TTL: Duration = Duration::from_secs(3);

/// Toast severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    #[default]
    Info,
}

/// A visible notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: ToastKind,
    pub message: String,
}

/// Observable list of toasts
///
/// Toasts are removed after the TTL when a tokio runtime is available;
/// otherwise they stay until [`remove`](Self::remove) is called.
#[derive(Debug, Clone)]
pub struct ToastStore {
    toasts: Store<Vec<Toast>>,
    next_id: Arc<AtomicU64>,
    ttl: Duration,
}

impl Default for ToastStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ToastStore {
    pub fn new() -> Self {
        Self::with_ttl(TOAST_TTL)
    }

    /// Create a store with a custom display time
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            toasts: Store::default(),
            next_id: Arc::new(AtomicU64::new(0)),
            ttl,
        }
    }

    /// Show a toast; returns its id
    pub fn add(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let toast = Toast {
            id,
            kind,
            message: message.into(),
        };
        self.toasts.update(|list| list.push(toast));

        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let store = self.clone();
            let ttl = self.ttl;
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                store.remove(id);
            });
        }

        id
    }

    pub fn success(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Error)
    }

    pub fn info(&self, message: impl Into<String>) -> u64 {
        self.add(message, ToastKind::Info)
    }

    /// Dismiss a toast; unknown ids are ignored
    pub fn remove(&self, id: u64) {
        self.toasts.update(|list| list.retain(|t| t.id != id));
    }

    /// Currently visible toasts, oldest first
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Toast>> {
        self.toasts.subscribe()
    }
}
