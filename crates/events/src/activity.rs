//! Bounded log of recent store changes, fed from the [`ChangeFeed`].
//!
//! [`ChangeFeed`]: crate::feed::ChangeFeed

use std::collections::VecDeque;
use std::sync::Arc;

use helpdesk_core::types::EntityId;
use tokio::sync::{broadcast, RwLock};

use crate::feed::StoreChange;

/// Number of changes kept when no capacity is given.
const DEFAULT_CAPACITY: usize = 50;

#[derive(Debug)]
pub struct ActivityLog {
    entries: RwLock<VecDeque<StoreChange>>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Keep `change`, evicting the oldest entry when full.
    pub async fn record(&self, change: StoreChange) {
        let mut entries = self.entries.write().await;
        if entries.len() == self.capacity {
            entries.pop_back();
        }
        entries.push_front(change);
    }

    /// Recent changes, newest first.
    pub async fn recent(&self) -> Vec<StoreChange> {
        self.entries.read().await.iter().cloned().collect()
    }

    /// Recent changes touching `customer_id` or one of their tickets.
    pub async fn for_customer(&self, customer_id: EntityId) -> Vec<StoreChange> {
        self.entries
            .read()
            .await
            .iter()
            .filter(|c| c.concerns_customer(customer_id))
            .cloned()
            .collect()
    }

    /// Record every change from `receiver` until the feed is dropped.
    pub async fn run(self: Arc<Self>, mut receiver: broadcast::Receiver<StoreChange>) {
        loop {
            match receiver.recv().await {
                Ok(change) => self.record(change).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity log lagged, some changes were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Change feed closed, activity log stopping");
                    break;
                }
            }
        }
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
