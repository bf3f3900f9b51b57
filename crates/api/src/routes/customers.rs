//! Route definitions for the customer profile view.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::customers;
use crate::state::AppState;

/// Customer routes.
///
/// ```text
/// GET    /customer/{id}            -> get_profile
/// PATCH  /customer/{id}            -> edit_customer
/// POST   /customer/{id}/tickets    -> create_ticket
/// GET    /customer/{id}/activity   -> activity
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/customer/{id}",
            get(customers::get_profile).patch(customers::edit_customer),
        )
        .route("/customer/{id}/tickets", post(customers::create_ticket))
        .route("/customer/{id}/activity", get(customers::activity))
}
