use axum::routing::get;
use axum::Router;

use crate::handlers::reporting;
use crate::state::AppState;

/// `GET /reporting -> reporting`
pub fn router() -> Router<AppState> {
    Router::new().route("/reporting", get(reporting::reporting))
}
