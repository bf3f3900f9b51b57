//! In-process change feed backed by a `tokio::sync::broadcast` channel.
//!
//! [`ChangeFeed`] is shared via `Arc<ChangeFeed>` between the workflow
//! controllers; each publishes after the store has confirmed a write.

use chrono::{DateTime, Utc};
use helpdesk_core::types::EntityId;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// StoreChange
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    TicketCreated,
    TicketStatusChanged,
    TicketNoteAdded,
    CustomerEdited,
}

/// A write the remote store has acknowledged.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreChange {
    pub kind: ChangeKind,

    /// Id of the ticket or customer written.
    pub entity_id: EntityId,

    /// Owning customer, when the entity is a ticket.
    pub customer_id: Option<EntityId>,

    /// When the change was observed (UTC).
    pub timestamp: DateTime<Utc>,
}

impl StoreChange {
    pub fn new(kind: ChangeKind, entity_id: EntityId) -> Self {
        Self {
            kind,
            entity_id,
            customer_id: None,
            timestamp: Utc::now(),
        }
    }

    /// Attach the customer a ticket change belongs to.
    pub fn with_customer(mut self, customer_id: EntityId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Whether this change touches data shown for `customer_id`.
    pub fn concerns_customer(&self, customer_id: EntityId) -> bool {
        match self.kind {
            ChangeKind::CustomerEdited => self.entity_id == customer_id,
            _ => self.customer_id == Some(customer_id),
        }
    }
}

// ---------------------------------------------------------------------------
// ChangeFeed
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Fan-out of [`StoreChange`]s to any number of subscribers.
///
/// ```rust
/// use helpdesk_events::{ChangeFeed, ChangeKind, StoreChange};
///
/// let feed = ChangeFeed::default();
/// let mut rx = feed.subscribe();
///
/// feed.publish(StoreChange::new(ChangeKind::TicketCreated, 1).with_customer(7));
/// ```
#[derive(Debug)]
pub struct ChangeFeed {
    sender: broadcast::Sender<StoreChange>,
}

impl ChangeFeed {
    /// Create a feed with a specific channel capacity.
    ///
    /// Slow receivers that fall more than `capacity` changes behind observe
    /// `RecvError::Lagged` and should re-fetch everything they show.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a change to all current subscribers.
    pub fn publish(&self, change: StoreChange) {
        tracing::debug!(kind = ?change.kind, entity_id = change.entity_id, "Store change");
        // A send error only means nobody is subscribed.
        let _ = self.sender.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.sender.subscribe()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
