//! Passwordless (magic link) authentication

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{LoginResponse, VerifiedUser};
use serde_json::{json, Value};

/// Request a login link for `email`, returning to `redirect_to` afterwards
pub async fn log_in(client: &ApiClient, email: &str, redirect_to: &str) -> ApiResult<LoginResponse> {
    client
        .post(
            "/api/auth/login",
            &json!({ "email": email, "redirectTo": redirect_to }),
        )
        .await
}

/// End the current session
pub async fn log_out(client: &ApiClient) -> ApiResult<Value> {
    client.post("/api/auth/logout", &json!({})).await
}

/// Exchange a login-link token for a session
pub async fn verify_auth_token(client: &ApiClient, token: &str) -> ApiResult<VerifiedUser> {
    client
        .post("/api/auth/verify", &json!({ "token": token }))
        .await
}
