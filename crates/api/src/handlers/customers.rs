//! Handlers for the customer profile view.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use helpdesk_core::customer::CustomerPatch;
use helpdesk_core::types::EntityId;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueRequest {
    pub issue_description: String,
}

// ---------------------------------------------------------------------------
// GET /customer/{id}
// ---------------------------------------------------------------------------

/// Customer card plus ticket history.
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> AppResult<impl IntoResponse> {
    let profile = state.customers.profile(id).await?;
    Ok(Json(DataResponse { data: profile }))
}

// ---------------------------------------------------------------------------
// PATCH /customer/{id}
// ---------------------------------------------------------------------------

pub async fn edit_customer(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(patch): Json<CustomerPatch>,
) -> AppResult<impl IntoResponse> {
    let customer = state.customers.edit(id, &patch).await?;
    Ok(Json(DataResponse { data: customer }))
}

// ---------------------------------------------------------------------------
// POST /customer/{id}/tickets
// ---------------------------------------------------------------------------

pub async fn create_ticket(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Json(input): Json<IssueRequest>,
) -> AppResult<impl IntoResponse> {
    let ticket = state
        .customers
        .create_ticket_for(id, &input.issue_description)
        .await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: ticket })))
}

// ---------------------------------------------------------------------------
// GET /customer/{id}/activity
// ---------------------------------------------------------------------------

pub async fn activity(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> impl IntoResponse {
    Json(DataResponse {
        data: state.activity.for_customer(id).await,
    })
}
