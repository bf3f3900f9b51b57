use helpdesk_core::types::EntityId;

use crate::Collection;

/// Errors from the remote store layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The HTTP request itself failed (connect, timeout, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The store answered 404 for an entity lookup.
    #[error("{collection} with id {id} not found")]
    NotFound { collection: Collection, id: EntityId },

    /// The store returned any other non-2xx status.
    #[error("Remote store error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// A 2xx body did not match the expected entity shape.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the store refused a write because the record moved on.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Api { status: 409, .. })
    }
}
