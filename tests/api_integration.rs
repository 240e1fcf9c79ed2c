//! Integration tests for the HTTP API
//!
//! Tests endpoints through the router without binding a socket

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use handmorse::core::{create_router, Pipeline};
use handmorse::types::PipelineConfig;
use serde_json::{json, Value};
use tower::ServiceExt;

fn create_test_router() -> axum::Router {
    let mut config = PipelineConfig::default();
    config.lexicon.max_phrase_len = 2;
    create_router(Arc::new(Pipeline::new(config).unwrap()))
}

fn post(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// One stable run per bit, separated by a long dropout
fn samples_for(bits: &str) -> Vec<i8> {
    let mut samples = Vec::new();
    for c in bits.chars() {
        let value = if c == '1' { 1 } else { 0 };
        samples.extend(vec![value; 35]);
        samples.extend(vec![-1; 21]);
    }
    samples
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], handmorse::VERSION);
    // 19 words + 19 * 18 ordered pairs
    assert_eq!(json["lexicon_size"], 361);
    assert_eq!(json["lexicon_fingerprint"].as_str().unwrap().len(), 64);
}

#[tokio::test]
async fn test_lexicon_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(Request::builder().uri("/lexicon").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["size"], 361);
    assert_eq!(json["max_phrase_len"], 2);
    assert_eq!(json["base_words"].as_array().unwrap().len(), 19);
}

#[tokio::test]
async fn test_decode_bit_string() {
    let app = create_test_router();

    let response = app
        .oneshot(post("/decode", json!({ "bits": "0000001000100111" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["phrase"], "HELLO");
    assert_eq!(json["distance"], 0);
    assert_eq!(json["tier"], "EXACT");
    assert_eq!(json["reason"], "R101_EXACT_MATCH");
    assert!(json.get("top").is_none());
}

#[tokio::test]
async fn test_decode_bit_list_with_top() {
    let app = create_test_router();

    let response = app
        .oneshot(post(
            "/decode",
            json!({ "bits": [0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 1, 0, 0, 1, 1, 1], "top": 3 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    let top = json["top"].as_array().unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0]["phrase"], "HELLO");
    assert_eq!(top[0]["distance"], 0);
    assert!(top[1]["distance"].as_u64().unwrap() > 0);
}

#[tokio::test]
async fn test_decode_huge_top_clamped() {
    let app = create_test_router();

    let response = app
        .oneshot(post("/decode", json!({ "bits": "0000001000100111", "top": 18446744073709551615u64 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["top"].as_array().unwrap().len(), 100);
    assert_eq!(json["top"][0]["phrase"], "HELLO");
}

#[tokio::test]
async fn test_decode_invalid_bits() {
    let app = create_test_router();

    let response = app
        .clone()
        .oneshot(post("/decode", json!({ "bits": "0120" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = read_json(response).await;
    assert_eq!(json["code"], "R204_INVALID_BIT");

    let response = app
        .oneshot(post("/decode", json!({ "bits": [0, 2] })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_decode_empty_bits() {
    let app = create_test_router();

    let response = app
        .oneshot(post("/decode", json!({ "bits": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = read_json(response).await;
    assert_eq!(json["code"], "R201_NO_SIGNAL");
    assert_eq!(json["description"], "No signal detected");
}

#[tokio::test]
async fn test_debounce_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(post("/debounce", json!({ "samples": samples_for("10") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["bits"], json!([1, 0]));
    assert_eq!(json["frames_processed"], 112);
    assert_eq!(json["runs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_pipeline_endpoint() {
    let app = create_test_router();

    let response = app
        .oneshot(post("/pipeline", json!({ "samples": samples_for("0000001000110") })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = read_json(response).await;
    assert_eq!(json["decode"]["phrase"], "HELP");
    assert_eq!(json["debounce"]["bits"].as_array().unwrap().len(), 13);
    assert!(json["timestamp"].is_string());
}

#[tokio::test]
async fn test_pipeline_no_signal() {
    let app = create_test_router();

    let response = app
        .oneshot(post("/pipeline", json!({ "samples": [1, 0, -1, 1, 0, -1] })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = read_json(response).await;
    assert_eq!(json["code"], "R201_NO_SIGNAL");
}

#[tokio::test]
async fn test_invalid_sample_rejected() {
    let app = create_test_router();

    let response = app
        .oneshot(post("/debounce", json!({ "samples": [1, 0, 5] })))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
