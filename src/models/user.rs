//! Users and authentication payloads

use serde::{Deserialize, Serialize};

/// The signed-in user as known to the client
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedUser {
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
}

/// Registered user (admin listing)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Reply to a login request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
}

/// Reply to a magic-link token verification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifiedUser {
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: bool,
    #[serde(rename = "redirectTo", default)]
    pub redirect_to: Option<String>,
}

impl From<VerifiedUser> for LoggedUser {
    fn from(user: VerifiedUser) -> Self {
        Self {
            email: user.email,
            is_admin: user.is_admin,
        }
    }
}
