//! Handlers for the dashboard: the ticket table and quick ticket creation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use helpdesk_core::types::EntityId;
use helpdesk_core::view::{customer_display_name, TicketRow};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub customer_id: EntityId,
    pub issue_description: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingCallRequest {
    pub customer_id: EntityId,
}

// ---------------------------------------------------------------------------
// GET /dashboard
// ---------------------------------------------------------------------------

/// Every ticket in store order with its customer's name.
pub async fn dashboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tickets = state.tickets.list_all().await?;
    let names = state
        .customers
        .display_names(tickets.iter().map(|t| t.customer_id))
        .await;

    let rows: Vec<TicketRow> = tickets
        .iter()
        .map(|t| {
            let name = names
                .get(&t.customer_id)
                .cloned()
                .unwrap_or_else(|| customer_display_name(t.customer_id, None));
            TicketRow::project(t, name)
        })
        .collect();

    Ok(Json(DataResponse { data: rows }))
}

// ---------------------------------------------------------------------------
// POST /dashboard/tickets
// ---------------------------------------------------------------------------

pub async fn create_ticket(
    State(state): State<AppState>,
    Json(input): Json<CreateTicketRequest>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .tickets
        .create(input.customer_id, &input.issue_description)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

// ---------------------------------------------------------------------------
// POST /dashboard/incoming-call
// ---------------------------------------------------------------------------

/// Open a ticket for a simulated inbound call.
pub async fn incoming_call(
    State(state): State<AppState>,
    Json(input): Json<IncomingCallRequest>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.tickets.record_incoming_call(input.customer_id).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

// ---------------------------------------------------------------------------
// GET /dashboard/activity
// ---------------------------------------------------------------------------

/// Recent confirmed writes, newest first.
pub async fn activity(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: state.activity.recent().await,
    })
}
