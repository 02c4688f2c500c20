use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use hopyield::api::{create_router, AppState};
use hopyield::{AdvisorConfig, MigrationAdvisor, MockQuoteProvider};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn router(provider: MockQuoteProvider) -> axum::Router {
    let advisor = MigrationAdvisor::new(&AdvisorConfig::default(), Arc::new(provider)).unwrap();
    create_router(AppState::new(advisor))
}

async fn post_analyze(app: axum::Router, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/analyze")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn approx(value: &Value, expected: f64) -> bool {
    value.as_f64().map(|v| (v - expected).abs() < 1e-9).unwrap_or(false)
}

#[tokio::test]
async fn base_position_migrates_to_arbitrum() {
    let body = r#"{"chain":"base","chainId":8453,"amount":1000,"token":"USDC","currentAPY":8}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["action"], "MIGRATE");
    assert_eq!(json["targetPool"]["protocol"], "Uniswap V3");
    assert_eq!(json["targetPool"]["pair"], "USDC/ETH");
    assert_eq!(json["targetPool"]["chain"], "arbitrum");
    assert!(approx(&json["targetPool"]["apy"], 12.0));
    assert!(approx(&json["currentAPY"], 8.0));
    assert!(approx(&json["bestAPY"], 12.0));
    assert!(approx(&json["extraYield"], 40.0));
    assert!(approx(&json["migrationCost"], 2.5));
    assert!(approx(&json["breakeven"], 22.8));
    assert!(json["reasoning"].as_str().unwrap().contains("Migration pays off in 22.8 days"));
}

#[tokio::test]
async fn position_at_best_apy_stays_with_sentinel() {
    let body = r#"{"chain":"arbitrum","chainId":42161,"amount":2500,"token":"USDC","currentAPY":12}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["action"], "STAY");
    assert!(approx(&json["breakeven"], -1.0));
    assert!(json["reasoning"].as_str().unwrap().contains("already optimal"));
}

#[tokio::test]
async fn quote_outage_still_answers() {
    let body = r#"{"chain":"base","chainId":8453,"amount":1000,"token":"USDC","currentAPY":8}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::failing("503")), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["action"], "MIGRATE");
    assert!(approx(&json["migrationCost"], 0.566));
    assert_eq!(json["estimatedTime"], 300);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), "{not json").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn missing_field_is_bad_request() {
    let body = r#"{"chain":"base","chainId":8453,"token":"USDC","currentAPY":8}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("amount"));
}

#[tokio::test]
async fn non_positive_amount_is_bad_request() {
    let body = r#"{"chain":"base","chainId":8453,"amount":0,"token":"USDC","currentAPY":8}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "amount must be positive, got 0");
}

#[tokio::test]
async fn health_reports_ok() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let response = router(MockQuoteProvider::default()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn oversized_amount_is_bad_request() {
    let body = r#"{"chain":"base","chainId":8453,"amount":1e28,"token":"USDC","currentAPY":0}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("must not exceed"));
}

#[tokio::test]
async fn large_amount_within_limit_migrates() {
    let body = r#"{"chain":"base","chainId":8453,"amount":1e18,"token":"USDC","currentAPY":0}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["action"], "MIGRATE");
    assert!(approx(&json["breakeven"], 0.0));
}

#[tokio::test]
async fn dust_amount_near_best_apy_stays() {
    let body = r#"{"chain":"arbitrum","chainId":42161,"amount":1e-19,"token":"USDC","currentAPY":11.9999999}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["action"], "STAY");
    assert!(approx(&json["breakeven"], -1.0));
}

#[tokio::test]
async fn absurd_apy_is_bad_request() {
    let body = r#"{"chain":"base","chainId":8453,"amount":1000,"token":"USDC","currentAPY":1e27}"#;
    let (status, json) = post_analyze(router(MockQuoteProvider::default()), body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("currentAPY must not exceed"));
}
