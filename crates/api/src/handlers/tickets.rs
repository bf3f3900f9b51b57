//! Handlers for the ticket detail view.
//!
//! Status changes and note appends go through the ticket workflow, so the
//! response is always the store-confirmed ticket.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use helpdesk_core::ticket::{Ticket, TicketStatus};
use helpdesk_core::types::EntityId;
use helpdesk_core::view::{CustomerCard, StatusTone};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDetail {
    pub ticket: Ticket,
    pub tone: StatusTone,
    pub customer: CustomerCard,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct NoteRequest {
    pub note: String,
}

// ---------------------------------------------------------------------------
// GET /ticket/{id}
// ---------------------------------------------------------------------------

pub async fn get_ticket(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.tickets.get(id).await?;
    let customer = state.customers.fetch(ticket.customer_id).await?;

    Ok(Json(DataResponse {
        data: TicketDetail {
            tone: StatusTone::for_status(ticket.status),
            customer: CustomerCard::from(&customer),
            ticket,
        },
    }))
}

// ---------------------------------------------------------------------------
// PUT /ticket/{id}/status
// ---------------------------------------------------------------------------

/// Move a ticket to another status. Unknown status strings are a 400.
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<StatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status: TicketStatus = input.status.parse()?;
    let ticket = state.tickets.update_status(id, status).await?;
    Ok(Json(DataResponse { data: ticket }))
}

// ---------------------------------------------------------------------------
// POST /ticket/{id}/notes
// ---------------------------------------------------------------------------

pub async fn add_note(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<NoteRequest>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.tickets.add_note(id, &input.note).await?;
    Ok(Json(DataResponse { data: ticket }))
}

// ---------------------------------------------------------------------------
// POST /ticket/{id}/call
// ---------------------------------------------------------------------------

pub async fn call_customer(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.tickets.get(id).await?;
    let customer = state.customers.fetch(ticket.customer_id).await?;
    let notice = state.actions.call_customer(&customer).await?;
    Ok(Json(DataResponse { data: notice }))
}

// ---------------------------------------------------------------------------
// POST /ticket/{id}/sync
// ---------------------------------------------------------------------------

pub async fn sync_ticket(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let ticket = state.tickets.get(id).await?;
    let notice = state.actions.sync_ticket(&ticket).await?;
    Ok(Json(DataResponse { data: notice }))
}
