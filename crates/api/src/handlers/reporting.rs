//! Handler for the reporting view.

use axum::response::IntoResponse;
use axum::Json;

use helpdesk_core::reporting::daily_ticket_volume;

use crate::response::DataResponse;

// ---------------------------------------------------------------------------
// GET /reporting
// ---------------------------------------------------------------------------

pub async fn reporting() -> impl IntoResponse {
    Json(DataResponse {
        data: daily_ticket_volume(),
    })
}
