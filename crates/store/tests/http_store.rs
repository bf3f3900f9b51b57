//! Integration tests for [`HttpStore`] against a throwaway json-server
//! stand-in bound to an ephemeral local port.

use std::sync::{Arc, Mutex};

use assert_matches::assert_matches;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use helpdesk_core::customer::CustomerPatch;
use helpdesk_core::ticket::{NewTicket, TicketPatch, TicketStatus};
use helpdesk_core::types::Day;
use helpdesk_store::{Collection, HttpStore, RemoteStore, StoreError};

#[derive(Clone, Default)]
struct Db {
    customers: Arc<Mutex<Vec<Value>>>,
    tickets: Arc<Mutex<Vec<Value>>>,
}

impl Db {
    fn collection(&self, name: &str) -> Option<Arc<Mutex<Vec<Value>>>> {
        match name {
            "customers" => Some(Arc::clone(&self.customers)),
            "tickets" => Some(Arc::clone(&self.tickets)),
            _ => None,
        }
    }
}

async fn list(State(db): State<Db>, Path(name): Path<String>) -> impl IntoResponse {
    match db.collection(&name) {
        Some(rows) => Json(Value::Array(rows.lock().unwrap().clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn create(
    State(db): State<Db>,
    Path(name): Path<String>,
    Json(mut body): Json<Value>,
) -> impl IntoResponse {
    let Some(rows) = db.collection(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut rows = rows.lock().unwrap();
    body["id"] = json!(rows.len() as i64 + 1);
    rows.push(body.clone());
    (StatusCode::CREATED, Json(body)).into_response()
}

async fn fetch(State(db): State<Db>, Path((name, id)): Path<(String, i64)>) -> impl IntoResponse {
    let Some(rows) = db.collection(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let rows = rows.lock().unwrap();
    match rows.iter().find(|row| row["id"] == json!(id)) {
        Some(row) => Json(row.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, "{}").into_response(),
    }
}

async fn patch(
    State(db): State<Db>,
    Path((name, id)): Path<(String, i64)>,
    Json(partial): Json<Value>,
) -> impl IntoResponse {
    let Some(rows) = db.collection(&name) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut rows = rows.lock().unwrap();
    let Some(row) = rows.iter_mut().find(|row| row["id"] == json!(id)) else {
        return (StatusCode::NOT_FOUND, "{}").into_response();
    };
    if let (Some(target), Some(fields)) = (row.as_object_mut(), partial.as_object()) {
        for (key, value) in fields {
            target.insert(key.clone(), value.clone());
        }
    }
    Json(row.clone()).into_response()
}

async fn spawn_server(db: Db) -> String {
    let app = Router::new()
        .route("/{name}", get(list).post(create))
        .route("/{name}/{id}", get(fetch).patch(patch))
        .with_state(db);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn seeded() -> Db {
    let db = Db::default();
    db.customers.lock().unwrap().push(json!({
        "id": 1,
        "name": "John Doe",
        "policyNumber": "POL-1001",
        "coverage": 500000,
        "beneficiary": "Jane Doe"
    }));
    db.tickets.lock().unwrap().extend([
        json!({"id": 1, "customerId": 1, "status": "open", "createdAt": "2024-01-10", "notes": ["Billing question"]}),
        json!({"id": 2, "customerId": 1, "status": "pending", "createdAt": "2024-01-11", "notes": ["Bad row"]}),
        json!({"id": 3, "customerId": 2, "status": "in progress", "createdAt": "2024-01-12", "notes": ["Claim filed"]}),
    ]);
    db
}

#[tokio::test]
async fn list_tickets_keeps_order_and_skips_unknown_status() {
    let store = HttpStore::new(spawn_server(seeded()).await);
    let tickets = store.list_tickets().await.unwrap();
    let ids: Vec<i64> = tickets.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 3]);
    assert_eq!(tickets[1].status, TicketStatus::InProgress);
}

#[tokio::test]
async fn get_customer_decodes_camel_case() {
    let store = HttpStore::new(spawn_server(seeded()).await);
    let customer = store.get_customer(1).await.unwrap();
    assert_eq!(customer.policy_number, "POL-1001");
    assert_eq!(customer.coverage, 500_000.0);
}

#[tokio::test]
async fn missing_entity_maps_to_not_found() {
    let store = HttpStore::new(spawn_server(seeded()).await);
    assert_matches!(
        store.get_ticket(42).await,
        Err(StoreError::NotFound { collection: Collection::Tickets, id: 42 })
    );
}

#[tokio::test]
async fn create_returns_server_assigned_id() {
    let base = spawn_server(seeded()).await;
    let store = HttpStore::new(base);
    let today = Day::from_ymd_opt(2024, 2, 1).unwrap();
    let created = store
        .create_ticket(&NewTicket::open(1, "Policy question", today).unwrap())
        .await
        .unwrap();
    assert_eq!(created.id, 4);
    assert_eq!(created.notes, vec!["Policy question".to_string()]);
    assert_eq!(created.created_at, today);
}

#[tokio::test]
async fn patch_merges_partial_fields() {
    let store = HttpStore::new(spawn_server(seeded()).await);
    let updated = store
        .patch_ticket(1, &TicketPatch::status(TicketStatus::Closed))
        .await
        .unwrap();
    assert_eq!(updated.status, TicketStatus::Closed);
    assert_eq!(updated.notes, vec!["Billing question".to_string()]);

    let customer = store
        .patch_customer(
            1,
            &CustomerPatch {
                name: Some("Johnny Doe".into()),
                policy_number: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(customer.name, "Johnny Doe");
    assert_eq!(customer.policy_number, "POL-1001");
}

#[tokio::test]
async fn unreachable_store_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let store = HttpStore::new(format!("http://{addr}"));
    assert_matches!(store.list_tickets().await, Err(StoreError::Network(_)));
}
