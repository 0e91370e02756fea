//! Typed wrappers for the price tracker API
//!
//! One function per endpoint. Every wrapper takes the [`ApiClient`] to send
//! with, so the same wrapper serves browser-facing and server-side clients,
//! and returns an [`ApiResult`](crate::error::ApiResult).
//!
//! [`ApiClient`]: crate::http::ApiClient

pub mod auth;
pub mod catalog;
pub mod deals;
pub mod externals;
pub mod metadata;
pub mod moderation;
pub mod products;
pub mod users;
pub mod websites;
