//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: configuration → API client → pagination,
//! page loaders, session state and sitemap output

use pretty_assertions::assert_eq;
use pricetracker_client::api::{auth, products, users};
use pricetracker_client::config::{load_config_from_str, ClientConfig};
use pricetracker_client::http::{ApiClient, RequestOptions};
use pricetracker_client::loaders::{self, LayoutInput};
use pricetracker_client::models::{LoggedUser, Product};
use pricetracker_client::pagination::fetch_all_pages;
use pricetracker_client::state::{SessionFile, ToastStore, TrackedProducts, UserSession};
use pricetracker_client::{sitemap, PagerError};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Configuration → Client
// ============================================================================

#[tokio::test]
async fn test_server_client_rewrites_public_origin() {
    let internal = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "name": "SSD", "category_id": 1
        })))
        .expect(1)
        .mount(&internal)
        .await;

    let yaml = format!(
        "public_api_url: https://daam.deals\napi_url: {}\ntimeout_seconds: 5\n",
        internal.uri()
    );
    let config = load_config_from_str(&yaml).unwrap();
    let client = ApiClient::new(config.server_client()).unwrap();

    let product: Product = client
        .get("https://daam.deals/api/products/3")
        .await
        .unwrap();
    assert_eq!(product.name, "SSD");
}

#[tokio::test]
async fn test_default_headers_from_config() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .and(header("X-Client", "integration"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": 1, "categories": 1, "websites": 1
        })))
        .mount(&server)
        .await;

    let mut config = ClientConfig {
        public_api_url: server.uri(),
        ..Default::default()
    };
    config
        .headers
        .insert("X-Client".to_string(), "integration".to_string());

    let client = ApiClient::new(config.browser_client()).unwrap();
    let home = loaders::load_home(&client).await;
    assert_eq!(home.stats.products, 1);
}

// ============================================================================
// Pagination
// ============================================================================

async fn mount_product_pages(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "first"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
            "next_token": "n2"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "next"))
        .and(query_param("next_token", "n2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 3, "name": "C"}],
            "prev_token": "p1"
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "prev"))
        .and(query_param("prev_token", "p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "name": "A"}, {"id": 2, "name": "B"}],
            "next_token": "n2"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_pager_walks_forward_and_back() {
    let server = MockServer::start().await;
    mount_product_pages(&server).await;

    let client = ApiClient::with_base_url(server.uri()).unwrap();
    let mut pager = products::products_pager(&client, 2);

    let first = pager.first().await.unwrap();
    assert_eq!(first.data.len(), 2);
    assert!(pager.has_next());
    assert!(!pager.has_prev());

    let second = pager.next().await.unwrap();
    assert_eq!(second.data[0].id, 3);
    assert!(!pager.has_next());
    assert!(pager.has_prev());

    let err = pager.next().await.unwrap_err();
    assert!(matches!(err, PagerError::NoNextPage));

    let back = pager.prev().await.unwrap();
    assert_eq!(back.data[1].id, 2);
    assert!(pager.has_next());
}

#[tokio::test]
async fn test_fetch_all_pages_and_sitemap() {
    let server = MockServer::start().await;
    mount_product_pages(&server).await;

    let client = ApiClient::with_base_url(server.uri()).unwrap();
    let all: Vec<Product> = fetch_all_pages(&client, "/api/products", 2).await.unwrap();
    let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let xml = sitemap::render_sitemap(&all, "https://daam.deals", None);
    assert_eq!(xml.matches("<url>").count(), 3);
}

// ============================================================================
// Session Flow
// ============================================================================

#[tokio::test]
async fn test_login_session_flow() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "me@x.com", "redirectTo": "/deals"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/verify"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "session=abc; Path=/")
                .set_body_json(json!({"email": "me@x.com", "isAdmin": false, "redirectTo": "/deals"})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/me/products"))
        .and(header("cookie", "session=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"product_id": 11, "saved_price": 999.0}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let session = UserSession::with_file(SessionFile::new(dir.path().join("session.json")));
    let tracked = TrackedProducts::new();
    let toasts = ToastStore::new();

    let sent = auth::log_in(&client, "me@x.com", "/deals").await.unwrap();
    assert!(sent.success);
    toasts.success("Check your inbox");

    let verified = auth::verify_auth_token(&client, "token-123").await.unwrap();
    assert_eq!(verified.redirect_to.as_deref(), Some("/deals"));
    session.set_user(LoggedUser::from(verified)).await.unwrap();

    assert_eq!(tracked.refresh(&client).await.unwrap(), 1);
    assert!(tracked.is_tracked(11));

    let restored = UserSession::with_file(SessionFile::new(dir.path().join("session.json")));
    assert!(restored.restore().await.unwrap());
    assert_eq!(restored.email(), "me@x.com");

    session.sign_out(&client).await.unwrap();
    tracked.clear();
    assert!(!session.is_logged_in());
    assert_eq!(toasts.toasts().len(), 1);
}

// ============================================================================
// Page Loaders
// ============================================================================

#[tokio::test]
async fn test_layout_then_url_lookup() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/websites"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 9, "name": "Ryans", "url": "https://ryans.com"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/externals"))
        .and(query_param("url", "https://ryans.com/gpu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 50, "internal_product_id": 5, "name": "RTX 4060",
            "url": "https://ryans.com/gpu", "website_id": 9, "category_id": null
        }])))
        .mount(&server)
        .await;

    for (route, body) in [
        ("/api/externals/50/prices", json!([{"price": 42000.0, "is_available": true, "created_at": "2024-06-01"}])),
        ("/api/externals/50/metadata", json!([])),
        ("/api/externals/50/badges", json!([])),
        ("/api/externals/50/similar", json!([])),
        ("/api/products/5/externals", json!([])),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;
    }

    let client = ApiClient::with_base_url(server.uri()).unwrap();
    let layout = loaders::load_layout(&client, &LayoutInput::default()).await;
    assert_eq!(layout.websites.len(), 1);
    assert!(layout.categories.is_empty());

    let page = loaders::load_url_lookup(&client, "https%3A%2F%2Fryans.com%2Fgpu", &layout)
        .await
        .unwrap();

    assert_eq!(page.external_product.id, 50);
    assert_eq!(page.prices[0].price, 42000.0);
    assert_eq!(page.website.map(|w| w.name), Some("Ryans".to_string()));
    assert!(page.category.is_none());
}

#[tokio::test]
async fn test_request_options_alternate_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("x-forwarded-for", "10.1.1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.c"})))
        .mount(&server)
        .await;

    let client = ApiClient::with_base_url(server.uri()).unwrap();
    let options = RequestOptions::default()
        .header("X-Forwarded-For", "10.1.1.1")
        .client(reqwest::Client::new());

    let me: LoggedUser = client.get_with("/api/me", &options).await.unwrap();
    assert_eq!(me.email, "a@b.c");
    assert!(!me.is_admin);

    // Same endpoint through the wrapper, without the header, is unmatched
    let err = users::get_my_info(&client).await.unwrap_err();
    assert_eq!(err.status, 404);
}
