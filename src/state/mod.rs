//! Client-side state
//!
//! Observable holders for what the UI renders outside of page data:
//! - `UserSession` - the signed-in user, optionally persisted to disk
//! - `TrackedProducts` - products the user is tracking
//! - `ToastStore` - transient notifications with auto-dismissal
//!
//! Each wraps a [`Store`](crate::store::Store), so any renderer can
//! subscribe to changes.

mod session;
mod toast;
mod tracked;

pub use session::{PersistedSession, SessionFile, UserSession};
pub use toast::{Toast, ToastKind, ToastStore, TOAST_TTL};
pub use tracked::TrackedProducts;
