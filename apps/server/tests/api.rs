use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use pricedrop_market_data::{FetchResponse, Transport, TransportError};
use pricedrop_server::{api::app_router, build_state_with_transport, config::Config};
use serde_json::Value;
use tower::ServiceExt;

/// Serves a fixed price for every listing.
struct FixedPrice(&'static str);

#[async_trait]
impl Transport for FixedPrice {
    async fn fetch(&self, _address: &str) -> Result<FetchResponse, TransportError> {
        Ok(FetchResponse::new(
            200,
            format!(r#"<span class="a-offscreen">${}</span>"#, self.0),
        ))
    }
}

/// Serves a fixed price after a delay.
struct SlowPrice(Duration);

#[async_trait]
impl Transport for SlowPrice {
    async fn fetch(&self, address: &str) -> Result<FetchResponse, TransportError> {
        tokio::time::sleep(self.0).await;
        FixedPrice("15.00").fetch(address).await
    }
}

fn app(vars: &[(&str, &str)]) -> Router {
    app_with_transport(vars, Arc::new(FixedPrice("15.00")))
}

fn app_with_transport(vars: &[(&str, &str)], transport: Arc<dyn Transport>) -> Router {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = Config::from_lookup(|key| vars.get(key).cloned()).unwrap();
    let state = build_state_with_transport(&config, transport).unwrap();
    app_router(state, &config)
}

async fn post_csv(app: Router, uri: &str, csv: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "text/csv")
                .body(Body::from(csv.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

const CSV: &str = "Order Date,Title,ASIN/ISBN,Purchase Price Per Unit\n10/01/22,Widget,X1,$20.99\n";

#[tokio::test]
async fn healthz_works() {
    let response = app(&[])
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn price_check_returns_buckets() {
    let (status, json) = post_csv(app(&[]), "/api/v1/price-check", CSV).await;

    assert_eq!(status, StatusCode::OK);
    let reduced = &json["priceReduced"][0];
    assert_eq!(reduced["name"], "Widget");
    assert_eq!(reduced["asin"], "X1");
    assert_eq!(reduced["dateOrdered"], "10/01/22");
    assert_eq!(reduced["priceDrop"].as_f64(), Some(5.99));
    assert_eq!(json["unavailable"], serde_json::json!([]));
}

#[tokio::test]
async fn root_path_accepts_upload() {
    let (status, json) = post_csv(app(&[]), "/", CSV).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["priceReduced"].as_array().map(|a| a.len()), Some(1));
}

#[tokio::test]
async fn slow_batch_completes_with_every_record() {
    let app = app_with_transport(
        &[("PD_MAX_CONCURRENT_FETCHES", "1")],
        Arc::new(SlowPrice(Duration::from_millis(100))),
    );
    let mut csv = String::from("Order Date,Title,ASIN/ISBN,Purchase Price Per Unit\n");
    for i in 0..5 {
        csv.push_str(&format!("10/01/22,Widget {},X{},$20.99\n", i, i));
    }

    let (status, json) = post_csv(app, "/api/v1/price-check", &csv).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["priceReduced"].as_array().map(|a| a.len()), Some(5));
    assert_eq!(json["unavailable"], serde_json::json!([]));
}

#[tokio::test]
async fn missing_column_is_bad_request() {
    let (status, json) = post_csv(app(&[]), "/api/v1/price-check", "Title\nWidget\n").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], 400);
    let message = json["message"].as_str().unwrap();
    assert!(message.contains("ASIN/ISBN"), "{}", message);
}

#[tokio::test]
async fn non_utf8_body_is_bad_request() {
    let response = app(&[])
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/price-check")
                .body(Body::from(vec![0xff, 0xfe, 0x00]))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn cors_preflight_allows_configured_origin() {
    let response = app(&[("PD_CORS_ALLOW_ORIGINS", "http://localhost:3000")])
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/v1/price-check")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );
}
