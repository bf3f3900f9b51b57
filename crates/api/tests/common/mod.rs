#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use helpdesk_api::config::ServerConfig;
use helpdesk_api::router::build_app_router;
use helpdesk_api::state::AppState;
use helpdesk_core::actions::{NoopActions, SimulatedAction};
use helpdesk_core::customer::Customer;
use helpdesk_core::ticket::{Ticket, TicketStatus};
use helpdesk_core::types::Day;
use helpdesk_store::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        store_url: "http://127.0.0.1:0".to_string(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

pub fn customer(id: i64, name: &str, coverage: f64) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        policy_number: format!("POL-{:04}", 1000 + id),
        coverage,
        beneficiary: "Jane Doe".to_string(),
    }
}

pub fn ticket(id: i64, customer_id: i64, status: TicketStatus, notes: &[&str]) -> Ticket {
    Ticket {
        id,
        customer_id,
        status,
        created_at: Day::from_ymd_opt(2024, 8, 1).unwrap(),
        notes: notes.iter().map(|n| n.to_string()).collect(),
        version: 0,
    }
}

/// Two customers and three tickets; ticket 3 points at a customer the store
/// does not have.
pub fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::new()
            .with_customer(customer(1, "John Doe", 500_000.0))
            .with_customer(customer(2, "Alice Smith", 250_000.0))
            .with_ticket(ticket(1, 1, TicketStatus::Open, &["Billing question"]))
            .with_ticket(ticket(2, 2, TicketStatus::InProgress, &["a", "b"]))
            .with_ticket(ticket(3, 9, TicketStatus::Closed, &[])),
    )
}

/// Build the full application router over `store`.
pub fn build_test_app_with(store: Arc<MemoryStore>, actions: Arc<dyn SimulatedAction>) -> Router {
    build_app_router(AppState::new(test_config(), store, actions))
}

pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with(store, Arc::new(NoopActions))
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Sign the agent in on `app`'s session.
pub async fn login(app: &Router) {
    let response = post_json(
        app.clone(),
        "/login",
        json!({ "username": "agent", "password": "password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("redirect must carry a Location header")
        .to_str()
        .unwrap()
}

/// Poll `uri` until its `data` array has at least `len` entries.
///
/// The activity log is filled by a background task, so a write is not
/// visible there the instant its response returns.
pub async fn wait_for_entries(app: &Router, uri: &str, len: usize) -> Vec<Value> {
    for _ in 0..50 {
        let json = body_json(get(app.clone(), uri).await).await;
        let entries = json["data"].as_array().cloned().unwrap_or_default();
        if entries.len() >= len {
            return entries;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("{uri} never reached {len} entries");
}
