//! HTTP server mode: sitemap and page data over HTTP

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::ApiClient;
use crate::loaders::{self, LayoutInput};
use crate::sitemap::{build_sitemap, SITEMAP_CONTENT_TYPE};

const URL_LOOKUP_PREFIX: &str = "/data/url/";

/// Server configuration
#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Settings for the API client used by every handler
    pub client: ClientConfig,
}

/// App state shared across handlers
#[derive(Debug, Clone)]
struct AppState {
    client: ApiClient,
}

/// Response wrapper
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    fn error(msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

/// Build the router serving `config`
pub fn router(config: &ServerConfig) -> Result<Router> {
    let client = ApiClient::new(config.client.server_client())?;
    let state = AppState { client };

    // Allow all origins; the data is public
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/health", get(health))
        .route("/sitemap.xml", get(sitemap))
        .route("/data/layout", get(layout_data))
        .route("/data/home", get(home_data))
        .route("/data/products/:id", get(product_data))
        .route("/data/url/*slug", get(url_lookup_data))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state)))
}

/// Start the HTTP server
pub async fn serve(config: ServerConfig, port: u16) -> Result<()> {
    let app = router(&config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// XML sitemap of every product page
async fn sitemap(State(state): State<Arc<AppState>>) -> Response {
    match build_sitemap(&state.client).await {
        Ok(xml) => ([(header::CONTENT_TYPE, SITEMAP_CONTENT_TYPE)], xml).into_response(),
        Err(e) => {
            tracing::error!("Failed to build sitemap: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ApiResponse::<()>::error(format!("Failed to build sitemap: {e}"))),
            )
                .into_response()
        }
    }
}

/// Shared layout data; the user is resolved from the request cookies
async fn layout_data(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let input = layout_input(&headers);
    let data = loaders::load_layout(&state.client, &input).await;
    Json(ApiResponse::success(data)).into_response()
}

async fn home_data(State(state): State<Arc<AppState>>) -> Response {
    let data = loaders::load_home(&state.client).await;
    Json(ApiResponse::success(data)).into_response()
}

async fn product_data(State(state): State<Arc<AppState>>, Path(id): Path<i64>) -> Response {
    let page = loaders::load_product(&state.client, id).await;
    Json(ApiResponse::success(page)).into_response()
}

/// Retailer URL lookup; the slug is taken undecoded from the request path
async fn url_lookup_data(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> Response {
    let slug = uri
        .path()
        .strip_prefix(URL_LOOKUP_PREFIX)
        .unwrap_or_default();

    let layout = loaders::load_layout(&state.client, &layout_input(&headers)).await;
    match loaders::load_url_lookup(&state.client, slug, &layout).await {
        Ok(page) => Json(ApiResponse::success(page)).into_response(),
        Err(e) => error_response(&e),
    }
}

fn layout_input(headers: &HeaderMap) -> LayoutInput {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(LayoutInput::from_cookie_header)
        .unwrap_or_default()
}

fn error_response(error: &Error) -> Response {
    let status = StatusCode::from_u16(error.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = match error {
        Error::Load { message, .. } => message.clone(),
        other => other.to_string(),
    };
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
