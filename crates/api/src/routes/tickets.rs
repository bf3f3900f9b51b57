//! Route definitions for the ticket detail view.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Ticket routes.
///
/// ```text
/// GET    /ticket/{id}           -> get_ticket
/// PUT    /ticket/{id}/status    -> update_status
/// POST   /ticket/{id}/notes     -> add_note
/// POST   /ticket/{id}/call      -> call_customer
/// POST   /ticket/{id}/sync      -> sync_ticket
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ticket/{id}", get(tickets::get_ticket))
        .route("/ticket/{id}/status", put(tickets::update_status))
        .route("/ticket/{id}/notes", post(tickets::add_note))
        .route("/ticket/{id}/call", post(tickets::call_customer))
        .route("/ticket/{id}/sync", post(tickets::sync_ticket))
}
