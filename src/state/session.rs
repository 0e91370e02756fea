//! Signed-in user state
//!
//! [`SessionFile`] persists the user between runs with atomic writes
//! (temp file + rename), standing in for browser local storage.

use crate::api::auth;
use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::models::LoggedUser;
use super::TrackedProducts;
use crate::store::Store;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tracing::{debug, info};

/// On-disk form of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub email: String,
    pub is_admin: bool,
    pub saved_at: DateTime<Utc>,
}

/// File-backed session persistence
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Persist to `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved session; `None` when nothing was saved
    pub async fn load(&self) -> Result<Option<PersistedSession>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| Error::session(format!("Failed to read session file: {e}")))?;

        let session = serde_json::from_str(&contents)
            .map_err(|e| Error::session(format!("Failed to parse session file: {e}")))?;

        Ok(Some(session))
    }

    /// Save a session
    pub async fn save(&self, user: &LoggedUser) -> Result<()> {
        let session = PersistedSession {
            email: user.email.clone(),
            is_admin: user.is_admin,
            saved_at: Utc::now(),
        };
        let contents = serde_json::to_string_pretty(&session)
            .map_err(|e| Error::session(format!("Failed to serialize session: {e}")))?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        tokio::fs::write(&temp_path, &contents)
            .await
            .map_err(|e| Error::session(format!("Failed to write session file: {e}")))?;

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| Error::session(format!("Failed to rename session file: {e}")))?;

        Ok(())
    }

    /// Remove the saved session
    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::session(format!(
                "Failed to remove session file: {e}"
            ))),
        }
    }
}

/// The signed-in user
#[derive(Debug, Clone, Default)]
pub struct UserSession {
    user: Store<LoggedUser>,
    file: Option<SessionFile>,
}

impl UserSession {
    /// Create an in-memory session
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session persisted to `file`
    pub fn with_file(file: SessionFile) -> Self {
        Self {
            user: Store::default(),
            file: Some(file),
        }
    }

    /// Load a previously saved user; returns whether one was found
    pub async fn restore(&self) -> Result<bool> {
        let Some(file) = &self.file else {
            return Ok(false);
        };

        match file.load().await? {
            Some(saved) if !saved.email.is_empty() => {
                debug!("Restored session for {}", saved.email);
                self.user.set(LoggedUser {
                    email: saved.email,
                    is_admin: saved.is_admin,
                });
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Restore the saved user, then reload their tracked products
    ///
    /// A failed reload leaves `tracked` as it was; the restore still counts.
    pub async fn restore_and_refresh(
        &self,
        client: &ApiClient,
        tracked: &TrackedProducts,
    ) -> Result<bool> {
        if !self.restore().await? {
            return Ok(false);
        }
        if let Ok(count) = tracked.refresh(client).await {
            debug!("Reloaded {} tracked products", count);
        }
        Ok(true)
    }

    /// Current user snapshot
    pub fn user(&self) -> LoggedUser {
        self.user.get()
    }

    pub fn email(&self) -> String {
        self.user.read(|u| u.email.clone())
    }

    pub fn is_admin(&self) -> bool {
        self.user.read(|u| u.is_admin)
    }

    /// Check if someone is signed in
    pub fn is_logged_in(&self) -> bool {
        self.user.read(|u| !u.email.is_empty())
    }

    /// Replace the user
    pub async fn set_user(&self, user: LoggedUser) -> Result<()> {
        self.user.set(user);
        self.persist().await
    }

    pub async fn set_email(&self, email: impl Into<String>) -> Result<()> {
        let email = email.into();
        self.user.update(|u| u.email = email);
        self.persist().await
    }

    pub async fn set_is_admin(&self, is_admin: bool) -> Result<()> {
        self.user.update(|u| u.is_admin = is_admin);
        self.persist().await
    }

    /// Watch the user for changes
    pub fn subscribe(&self) -> watch::Receiver<LoggedUser> {
        self.user.subscribe()
    }

    /// End the session on the server, then forget the user locally
    ///
    /// When the server call fails the user stays signed in.
    pub async fn sign_out(&self, client: &ApiClient) -> Result<()> {
        auth::log_out(client).await?;
        info!("Signed out {}", self.email());
        self.clear_local().await
    }

    /// Forget the user locally without contacting the server
    pub async fn clear_local(&self) -> Result<()> {
        self.user.set(LoggedUser::default());
        match &self.file {
            Some(file) => file.clear().await,
            None => Ok(()),
        }
    }

    async fn persist(&self) -> Result<()> {
        match &self.file {
            Some(file) => file.save(&self.user()).await,
            None => Ok(()),
        }
    }
}
