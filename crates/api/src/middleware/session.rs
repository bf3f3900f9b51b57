//! Session redirect middleware.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use helpdesk_core::navigation::redirect_for;

use crate::state::AppState;

/// Apply the navigation rules to every request under the view tree.
///
/// Anonymous requests to a guarded view get `303 See Other` to `/login`,
/// and an authenticated request to the login view gets `303` to
/// `/dashboard`. Ticket and customer paths with a malformed id are guarded
/// too. Paths outside the view tree (`/health`, `/logout`) pass through
/// untouched.
pub async fn require_session(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(target) = redirect_for(request.uri().path(), state.session.state()) else {
        return next.run(request).await;
    };

    tracing::debug!(
        from = %request.uri().path(),
        to = %target.path(),
        "Session redirect"
    );
    Redirect::to(&target.path()).into_response()
}
