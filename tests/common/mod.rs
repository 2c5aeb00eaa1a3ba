#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use finance_reports_backend::{
    app,
    db::{InMemoryStore, MonthlyProfitStore, ReportStore},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

/// Router completo em cima de um único store em memória.
pub fn memory_app() -> Router {
    let store = Arc::new(InMemoryStore::new());
    app_with(store.clone(), store)
}

pub fn app_with(reports: Arc<dyn ReportStore>, monthly_profit: Arc<dyn MonthlyProfitStore>) -> Router {
    app(AppState::from_stores(reports, monthly_profit), &["*".to_string()])
}

/// Dispara uma requisição e devolve status + corpo JSON (Null se vazio ou não-JSON).
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

    (status, json)
}

pub async fn send_raw(app: &Router, method: Method, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}
