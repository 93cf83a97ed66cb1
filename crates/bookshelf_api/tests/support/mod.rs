#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

pub async fn send(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap_or_else(|err| panic!("failed to build request: {err}"));

    send_request(router, request).await
}

pub async fn send_raw(
    router: &Router,
    method: &str,
    uri: &str,
    raw_body: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw_body.to_string()))
        .unwrap_or_else(|err| panic!("failed to build request: {err}"));

    send_request(router, request).await
}

async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = match router.clone().oneshot(request).await {
        Ok(response) => response,
        Err(err) => panic!("router request failed: {err}"),
    };
    let status = response.status();
    let bytes = match to_bytes(response.into_body(), 1024 * 1024).await {
        Ok(bytes) => bytes,
        Err(err) => panic!("failed to read response body: {err}"),
    };
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        match serde_json::from_slice(&bytes) {
            Ok(value) => value,
            Err(err) => panic!(
                "response body is not JSON: {err}; body={}",
                String::from_utf8_lossy(&bytes)
            ),
        }
    };
    (status, value)
}
