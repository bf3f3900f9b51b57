//! Route definitions for the login view and session.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::session;
use crate::state::AppState;

/// Session routes.
///
/// ```text
/// GET    /                  -> root
/// GET    /login             -> login_view
/// POST   /login             -> login
/// POST   /logout            -> logout
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(session::root))
        .route("/login", get(session::login_view).post(session::login))
        .route("/logout", post(session::logout))
}
