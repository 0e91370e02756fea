//! Users and the signed-in user's own data

use crate::error::ApiResult;
use crate::http::ApiClient;
use crate::models::{LoggedUser, TrackedProduct, User};

/// All registered users (admin only)
pub async fn fetch_users(client: &ApiClient) -> ApiResult<Vec<User>> {
    client.get("/api/users").await
}

/// The user owning the current session
pub async fn get_my_info(client: &ApiClient) -> ApiResult<LoggedUser> {
    client.get("/api/me").await
}

pub async fn get_my_tracked_products(client: &ApiClient) -> ApiResult<Vec<TrackedProduct>> {
    client.get("/api/me/products").await
}
