//! Handlers for the login view and the agent session.

use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum::Json;
use serde::Serialize;

use helpdesk_core::error::CoreError;
use helpdesk_core::navigation::View;
use helpdesk_core::session::{Credentials, SessionState};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct SessionView {
    pub state: SessionState,
}

// ---------------------------------------------------------------------------
// GET /
// ---------------------------------------------------------------------------

pub async fn root() -> Redirect {
    Redirect::to(&View::Dashboard.path())
}

// ---------------------------------------------------------------------------
// GET /login
// ---------------------------------------------------------------------------

/// The login view; only reachable while anonymous.
pub async fn login_view(State(state): State<AppState>) -> impl IntoResponse {
    Json(DataResponse {
        data: SessionView {
            state: state.session.state(),
        },
    })
}

// ---------------------------------------------------------------------------
// POST /login
// ---------------------------------------------------------------------------

pub async fn login(
    State(state): State<AppState>,
    Json(credentials): Json<Credentials>,
) -> AppResult<impl IntoResponse> {
    match state.session.login(&credentials) {
        SessionState::Authenticated => Ok(Json(DataResponse {
            data: SessionView {
                state: SessionState::Authenticated,
            },
        })),
        SessionState::Anonymous => Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))),
    }
}

// ---------------------------------------------------------------------------
// POST /logout
// ---------------------------------------------------------------------------

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    let session_state = state.session.logout();
    tracing::info!("Agent logged out");
    Json(DataResponse {
        data: SessionView {
            state: session_state,
        },
    })
}
