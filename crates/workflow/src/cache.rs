//! Shared client-side copy of tickets and customers.
//!
//! One [`Cache`] backs every view so two views never hold diverging lists.
//! Only the workflows write to it, and only with store-confirmed entities.

use std::collections::HashMap;
use std::sync::Arc;

use helpdesk_core::customer::Customer;
use helpdesk_core::ticket::Ticket;
use helpdesk_core::types::EntityId;
use helpdesk_events::{ChangeFeed, StoreChange};
use tokio::sync::{broadcast, RwLock};

#[derive(Debug, Default)]
struct CacheState {
    /// Store order; new tickets are appended.
    tickets: Vec<Ticket>,
    customers: HashMap<EntityId, Customer>,
}

/// Cheaply cloneable handle to the shared cache.
#[derive(Debug, Clone, Default)]
pub struct Cache {
    state: Arc<RwLock<CacheState>>,
    feed: Arc<ChangeFeed>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- tickets ----

    /// Replace the cached ticket list with a fresh listing from the store.
    pub async fn replace_tickets(&self, tickets: Vec<Ticket>) {
        self.state.write().await.tickets = tickets;
    }

    /// Insert a ticket, replacing any cached copy in place.
    pub async fn upsert_ticket(&self, ticket: Ticket) {
        let mut state = self.state.write().await;
        match state.tickets.iter_mut().find(|t| t.id == ticket.id) {
            Some(existing) => *existing = ticket,
            None => state.tickets.push(ticket),
        }
    }

    pub async fn ticket(&self, id: EntityId) -> Option<Ticket> {
        self.state
            .read()
            .await
            .tickets
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    pub async fn tickets(&self) -> Vec<Ticket> {
        self.state.read().await.tickets.clone()
    }

    /// Cached tickets of one customer, in store order.
    pub async fn tickets_for_customer(&self, customer_id: EntityId) -> Vec<Ticket> {
        self.state
            .read()
            .await
            .tickets
            .iter()
            .filter(|t| t.customer_id == customer_id)
            .cloned()
            .collect()
    }

    // ---- customers ----

    pub async fn upsert_customer(&self, customer: Customer) {
        self.state
            .write()
            .await
            .customers
            .insert(customer.id, customer);
    }

    pub async fn customer(&self, id: EntityId) -> Option<Customer> {
        self.state.read().await.customers.get(&id).cloned()
    }

    // ---- change feed ----

    pub fn publish(&self, change: StoreChange) {
        self.feed.publish(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.feed.subscribe()
    }
}
