//! Adapter and aggregator integration tests against a mock HTTP server.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use substatus_core::{AuthScheme, Credential, PremiumState, ProviderKind, ProviderRequest};
use substatus_fetch::HttpClient;
use substatus_providers::{fetch_status, Aggregator};
use substatus_store::ResultCache;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credential_for(server: &MockServer, secret: &str) -> Credential {
    Credential::new(secret).with_endpoint(format!("{}/user", server.uri()))
}

#[tokio::test]
async fn test_real_debrid_premium_account() {
    let server = MockServer::start().await;
    let until = Utc::now() + chrono::Duration::days(2);

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("authorization", "Bearer rd-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "username": "alice",
            "premium": true,
            "premium_until": until.timestamp(),
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new();
    let credential = credential_for(&server, "rd-secret");
    let status = fetch_status(&client, ProviderKind::RealDebrid, &credential).await;

    assert!(!status.error);
    assert_eq!(status.premium, PremiumState::Active);
    assert_eq!(status.days_remaining, Some(2));
    assert_eq!(status.username.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_query_scheme_sends_secret_as_parameter() {
    let server = MockServer::start().await;
    let until = Utc::now() + chrono::Duration::days(30);

    Mock::given(method("GET"))
        .and(path("/user"))
        .and(query_param("apikey", "pm-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "customer_id": 42,
            "premium_until": until.timestamp(),
        })))
        .mount(&server)
        .await;

    let client = HttpClient::new();
    let credential = credential_for(&server, "pm-secret").with_auth_scheme(AuthScheme::Query);
    let status = fetch_status(&client, ProviderKind::Premiumize, &credential).await;

    assert!(!status.error);
    assert_eq!(status.premium, PremiumState::Active);
    assert_eq!(status.days_remaining, Some(30));
}

#[tokio::test]
async fn test_non_success_status_becomes_error_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = HttpClient::new();
    let credential = credential_for(&server, "bad-secret");
    let status = fetch_status(&client, ProviderKind::AllDebrid, &credential).await;

    assert!(status.error);
    assert_eq!(status.premium, PremiumState::Unknown);
    assert_eq!(status.days_remaining, None);
    assert_eq!(status.note.as_deref(), Some("HTTP 401"));
}

#[tokio::test]
async fn test_malformed_body_becomes_error_entry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!("nope")))
        .mount(&server)
        .await;

    let client = HttpClient::new();
    let credential = credential_for(&server, "rd-secret");
    let status = fetch_status(&client, ProviderKind::RealDebrid, &credential).await;

    assert!(status.error);
    assert_eq!(status.note.as_deref(), Some("bad response"));
}

#[tokio::test]
async fn test_missing_credential_skips_network() {
    // No server at all: a missing secret must short-circuit locally.
    let client = HttpClient::new();
    let status = fetch_status(&client, ProviderKind::TorBox, &Credential::new("  ")).await;

    assert!(status.error);
    assert_eq!(status.premium, PremiumState::Unknown);
    assert_eq!(status.note.as_deref(), Some("missing token"));
}

#[tokio::test]
async fn test_aggregator_isolates_failures_and_preserves_order() {
    let server = MockServer::start().await;
    let until = Utc::now() + chrono::Duration::days(5);

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "user": {
                "username": "bob",
                "isPremium": true,
                "premiumUntil": until.timestamp(),
            }}
        })))
        .mount(&server)
        .await;

    // First request points at a closed port, second at the mock server.
    let requests = vec![
        ProviderRequest::new(
            ProviderKind::RealDebrid,
            Credential::new("rd-secret").with_endpoint("http://127.0.0.1:1/user"),
        ),
        ProviderRequest::new(ProviderKind::AllDebrid, credential_for(&server, "ad-key")),
    ];

    let cache = Arc::new(ResultCache::new());
    let aggregator = Aggregator::new(cache.clone());
    let result = aggregator.fetch(&requests, Duration::from_secs(60)).await;

    assert!(result.error.is_none());
    assert!(result.has_data);
    assert_eq!(result.statuses.len(), 2);

    // Request order survives the fan-out.
    assert_eq!(result.statuses[0].provider, ProviderKind::RealDebrid);
    assert!(result.statuses[0].error);
    assert!(result.statuses[0]
        .note
        .as_deref()
        .is_some_and(|n| n.starts_with("network")));

    assert_eq!(result.statuses[1].provider, ProviderKind::AllDebrid);
    assert!(!result.statuses[1].error);
    assert_eq!(result.statuses[1].days_remaining, Some(5));

    // The merged sequence was memoized, failed entry included.
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn test_aggregator_serves_repeat_request_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "value": { "username": "carol", "premiumLeft": 864_000 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let requests = vec![ProviderRequest::new(
        ProviderKind::DebridLink,
        credential_for(&server, "dl-key"),
    )];

    let aggregator = Aggregator::new(Arc::new(ResultCache::new()));
    let first = aggregator.fetch(&requests, Duration::from_secs(60)).await;
    let second = aggregator.fetch(&requests, Duration::from_secs(60)).await;

    assert_eq!(first.statuses, second.statuses);
    assert_eq!(second.statuses[0].username.as_deref(), Some("carol"));
    assert_eq!(second.statuses[0].days_remaining, Some(10));
    // The mock's expect(1) verifies on drop that only one call went out.
}
