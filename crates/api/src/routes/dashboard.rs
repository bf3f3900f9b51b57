//! Route definitions for the dashboard.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard routes.
///
/// ```text
/// GET    /dashboard                 -> dashboard
/// POST   /dashboard/tickets         -> create_ticket
/// POST   /dashboard/incoming-call   -> incoming_call
/// GET    /dashboard/activity        -> activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard::dashboard))
        .route("/dashboard/tickets", post(dashboard::create_ticket))
        .route("/dashboard/incoming-call", post(dashboard::incoming_call))
        .route("/dashboard/activity", get(dashboard::activity))
}
