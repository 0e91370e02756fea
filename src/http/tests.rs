//! Tests for the HTTP client module

use super::*;
use crate::error::{ApiError, ApiResult};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(server.uri()).unwrap()
}

/// Address with nothing listening on it
fn dead_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[test]
fn test_api_client_config_default() {
    let config = ApiClientConfig::default();
    assert_eq!(config.timeout, Duration::from_secs(30));
    assert!(config.base_url.is_none());
    assert!(config.internal_url.is_none());
    assert!(config.include_credentials);
}

#[test]
fn test_api_client_config_builder() {
    let config = ApiClientConfig::builder()
        .base_url("https://daam.deals")
        .internal_url("http://backend:8080")
        .timeout(Duration::from_secs(5))
        .header("X-Custom", "value")
        .include_credentials(false)
        .user_agent("test-agent/1.0")
        .build();

    assert_eq!(config.base_url, Some("https://daam.deals".to_string()));
    assert_eq!(config.internal_url, Some("http://backend:8080".to_string()));
    assert_eq!(config.timeout, Duration::from_secs(5));
    assert_eq!(
        config.default_headers.get("X-Custom"),
        Some(&"value".to_string())
    );
    assert!(!config.include_credentials);
    assert_eq!(config.user_agent, "test-agent/1.0");
    assert_eq!(
        config.resolver().resolve("/api/stats"),
        "http://backend:8080/api/stats"
    );
}

#[test]
fn test_request_options_has_header() {
    let options = RequestOptions::new().header("content-type", "text/plain");
    assert!(options.has_header("Content-Type"));
    assert!(!options.has_header("Accept"));
}

#[tokio::test]
async fn test_get_ok() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result: Value = client.get("/api/products?limit=2").await.unwrap();

    assert_eq!(result, json!([{"id": 1}, {"id": 2}]));
}

#[tokio::test]
async fn test_get_typed() {
    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u32,
    }

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}, {"id": 2}])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let items: Vec<Item> = client.get("/api/products").await.unwrap();

    assert_eq!(items, vec![Item { id: 1 }, Item { id: 2 }]);
}

#[tokio::test]
async fn test_post_http_error_keeps_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({"email": "a@b.com"})))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"message": "invalid credentials"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .post::<Value, _>("/api/auth/login", &json!({"email": "a@b.com"}))
        .await
        .unwrap_err();

    assert_eq!(err.status, 401);
    assert!(err.is_http());
    assert_eq!(err.data, Some(json!({"message": "invalid credentials"})));
}

#[tokio::test]
async fn test_post_sets_json_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/items"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 123})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let created: Value = client
        .post("/api/items", &json!({"name": "test"}))
        .await
        .unwrap();

    assert_eq!(created["id"], 123);
}

#[tokio::test]
async fn test_put_keeps_caller_content_type() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/items/1"))
        .and(header("content-type", "application/merge-patch+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = RequestOptions::new().header("Content-Type", "application/merge-patch+json");
    let updated: Value = client
        .put_with("/api/items/1", &json!({"name": "renamed"}), &options)
        .await
        .unwrap();

    assert_eq!(updated["ok"], true);
}

#[tokio::test]
async fn test_delete_null_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/groups/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result: ApiResult<()> = client.delete("/api/groups/7").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_empty_body_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/groups/7"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.delete::<Value>("/api/groups/7").await.unwrap_err();

    assert_eq!(err.status, 204);
    assert!(err.is_parse());
}

#[tokio::test]
async fn test_blank_body_on_error_status_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(500).set_body_string("   "))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get::<Value>("/api/stats").await.unwrap_err();

    assert_eq!(err.status, 500);
    assert!(err.is_parse());
    assert!(!err.is_http());
}

#[tokio::test]
async fn test_request_headers_replace_defaults() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let config = ApiClientConfig::builder()
        .base_url(server.uri())
        .header("X-Client", "default")
        .header("Content-Type", "text/plain")
        .build();
    let client = ApiClient::new(config).unwrap();
    let options = RequestOptions::new().header("x-client", "override");

    let _: Value = client
        .post_with("/api/items", &json!({"name": "test"}), &options)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let headers = &requests[0].headers;
    let content_types: Vec<_> = headers.get_all("content-type").iter().collect();
    let clients: Vec<_> = headers.get_all("x-client").iter().collect();
    assert_eq!(content_types, vec!["text/plain"]);
    assert_eq!(clients, vec!["override"]);
}

#[tokio::test]
async fn test_unserializable_body_is_encode_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    // JSON object keys must be strings
    let mut body = BTreeMap::new();
    body.insert(vec![1u8, 2], "value");

    let client = client_for(&server);
    let err = client
        .post::<Value, _>("/api/items", &body)
        .await
        .unwrap_err();

    assert_eq!(err.status, 0);
    assert!(err.is_encode());
    assert!(!err.is_transport());
}

#[tokio::test]
async fn test_invalid_header_is_encode_error() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    let options = RequestOptions::new().header("X-Bad", "line\nbreak");

    let err = client
        .get_with::<Value>("/api/stats", &options)
        .await
        .unwrap_err();

    assert!(err.is_encode());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_json_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get::<Value>("/api/broken").await.unwrap_err();

    assert_eq!(err.status, 200);
    assert!(err.is_parse());
    assert!(err.data.is_some());
}

#[tokio::test]
async fn test_invalid_json_on_error_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/broken"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get::<Value>("/api/broken").await.unwrap_err();

    assert_eq!(err.status, 502);
    assert!(err.is_parse());
}

#[tokio::test]
async fn test_wrong_shape_is_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": "many"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get::<Vec<u32>>("/api/stats").await.unwrap_err();

    assert_eq!(err.status, 200);
    assert!(err.is_parse());
}

#[tokio::test]
async fn test_transport_failure() {
    let client = ApiClient::with_base_url(dead_address()).unwrap();
    let err = client.get::<Value>("/api/products").await.unwrap_err();

    assert_eq!(err, ApiError::transport());
    assert!(err.is_transport());
}

#[tokio::test]
async fn test_abort_before_send() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let controller = AbortController::new();
    controller.abort();

    let client = client_for(&server);
    let options = RequestOptions::new().signal(controller.signal());
    let err = client
        .get_with::<Value>("/api/products", &options)
        .await
        .unwrap_err();

    assert_eq!(err.status, 0);
}

#[tokio::test]
async fn test_abort_in_flight() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let controller = AbortController::new();
    let client = client_for(&server);
    let options = RequestOptions::new().signal(controller.signal());

    let aborter = controller.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        aborter.abort();
    });

    let err = client
        .get_with::<Value>("/api/slow", &options)
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(controller.is_aborted());
}

#[tokio::test]
async fn test_default_and_request_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/me"))
        .and(header("X-Client", "cli"))
        .and(header("X-Request-Id", "abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"email": "a@b.com"})))
        .mount(&server)
        .await;

    let config = ApiClientConfig::builder()
        .base_url(server.uri())
        .header("X-Client", "cli")
        .build();
    let client = ApiClient::new(config).unwrap();
    let options = RequestOptions::new().header("X-Request-Id", "abc123");

    let me: Value = client.get_with("/api/me", &options).await.unwrap();
    assert_eq!(me["email"], "a@b.com");
}

#[tokio::test]
async fn test_rewrite_resolver_targets_internal_url() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": 3})))
        .mount(&server)
        .await;

    let resolver = Arc::new(RewriteBaseUrl::new("https://daam.deals", server.uri()));
    let client = ApiClient::with_resolver(ApiClientConfig::default(), resolver).unwrap();

    let stats: Value = client
        .get("https://daam.deals/api/stats")
        .await
        .unwrap();
    assert_eq!(stats["products"], 3);
}

#[tokio::test]
async fn test_alternate_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/websites"))
        .and(header("user-agent", "server-side/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let alternate = reqwest::Client::builder()
        .user_agent("server-side/1.0")
        .build()
        .unwrap();
    let client = client_for(&server);
    let options = RequestOptions::new().client(alternate);

    let websites: Vec<Value> = client.get_with("/api/websites", &options).await.unwrap();
    assert!(websites.is_empty());
}
