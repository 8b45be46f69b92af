//! Integration tests for the category feed client

use std::collections::HashSet;

use tapescan::config::CategoryConfig;
use tapescan::services::{CategorySource, MoneycontrolClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::test_utils::category_body;

fn gainers() -> CategoryConfig {
    CategoryConfig::new("Top Gainers", "gainer", 2)
}

#[tokio::test]
async fn fetches_symbols_from_category_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gainer"))
        .and(query_param("responseType", "json"))
        .and(query_param("dur", "1d"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(category_body(&["TCS", "INFY"])),
        )
        .mount(&server)
        .await;

    let client = MoneycontrolClient::new(server.uri());
    let members = client.fetch_members(&gainers()).await;

    let expected: HashSet<String> = ["TCS", "INFY"].iter().map(|s| s.to_string()).collect();
    assert_eq!(members, expected);
}

#[tokio::test]
async fn server_error_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gainer"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = MoneycontrolClient::new(server.uri());
    assert!(client.fetch_members(&gainers()).await.is_empty());
}

#[tokio::test]
async fn malformed_body_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gainer"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let client = MoneycontrolClient::new(server.uri());
    assert!(client.fetch_members(&gainers()).await.is_empty());
}

#[tokio::test]
async fn unexpected_shape_degrades_to_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/gainer"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })),
        )
        .mount(&server)
        .await;

    let client = MoneycontrolClient::new(server.uri());
    assert!(client.fetch_members(&gainers()).await.is_empty());
}

#[tokio::test]
async fn entries_without_symbols_are_dropped() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "data": {
            "list": [
                { "symbol": "TCS" },
                { "price": 123.4 },
                { "symbol": "" },
            ]
        }
    });
    Mock::given(method("GET"))
        .and(path("/gainer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let client = MoneycontrolClient::new(server.uri());
    let members = client.fetch_members(&gainers()).await;

    let expected: HashSet<String> = ["TCS"].iter().map(|s| s.to_string()).collect();
    assert_eq!(members, expected);
}
