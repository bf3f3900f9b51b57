//! In-process [`RemoteStore`] with json-server semantics.
//!
//! Ids are assigned sequentially, lists keep insertion order and a patch
//! carrying a `version` must be exactly one ahead of the stored record.
//! Every call is counted so tests can assert that no request was made.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use helpdesk_core::customer::{Customer, CustomerPatch};
use helpdesk_core::ticket::{NewTicket, Ticket, TicketPatch};
use helpdesk_core::types::EntityId;
use tokio::sync::RwLock;

use crate::{Collection, RemoteStore, StoreError};

#[derive(Debug, Default)]
struct MemoryState {
    customers: Vec<Customer>,
    tickets: Vec<Ticket>,
}

impl MemoryState {
    fn next_ticket_id(&self) -> EntityId {
        self.tickets.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    calls: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_customer(mut self, customer: Customer) -> Self {
        self.state.get_mut().customers.push(customer);
        self
    }

    pub fn with_ticket(mut self, ticket: Ticket) -> Self {
        self.state.get_mut().tickets.push(ticket);
        self
    }

    /// Number of store calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Make every subsequent create/patch fail with a 503 until reset.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current stored copy of a ticket, read without counting a call.
    pub async fn stored_ticket(&self, id: EntityId) -> Option<Ticket> {
        self.state
            .read()
            .await
            .tickets
            .iter()
            .find(|t| t.id == id)
            .cloned()
    }

    fn record_call(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Api {
                status: 503,
                body: "store unavailable".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError> {
        self.record_call();
        Ok(self.state.read().await.customers.clone())
    }

    async fn get_customer(&self, id: EntityId) -> Result<Customer, StoreError> {
        self.record_call();
        self.state
            .read()
            .await
            .customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StoreError::NotFound {
                collection: Collection::Customers,
                id,
            })
    }

    async fn patch_customer(
        &self,
        id: EntityId,
        patch: &CustomerPatch,
    ) -> Result<Customer, StoreError> {
        self.record_call();
        self.check_write()?;
        let mut state = self.state.write().await;
        let customer = state
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound {
                collection: Collection::Customers,
                id,
            })?;
        patch.apply(customer);
        Ok(customer.clone())
    }

    async fn list_tickets(&self) -> Result<Vec<Ticket>, StoreError> {
        self.record_call();
        Ok(self.state.read().await.tickets.clone())
    }

    async fn get_ticket(&self, id: EntityId) -> Result<Ticket, StoreError> {
        self.record_call();
        self.stored_ticket(id).await.ok_or(StoreError::NotFound {
            collection: Collection::Tickets,
            id,
        })
    }

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, StoreError> {
        self.record_call();
        self.check_write()?;
        let mut state = self.state.write().await;
        let created = Ticket {
            id: state.next_ticket_id(),
            customer_id: ticket.customer_id,
            status: ticket.status,
            created_at: ticket.created_at,
            notes: ticket.notes.clone(),
            version: ticket.version,
        };
        state.tickets.push(created.clone());
        Ok(created)
    }

    async fn patch_ticket(&self, id: EntityId, patch: &TicketPatch) -> Result<Ticket, StoreError> {
        self.record_call();
        self.check_write()?;
        let mut state = self.state.write().await;
        let ticket = state
            .tickets
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound {
                collection: Collection::Tickets,
                id,
            })?;
        if let Some(version) = patch.version {
            if version != ticket.version + 1 {
                return Err(StoreError::Api {
                    status: 409,
                    body: format!(
                        "version {version} does not follow stored version {}",
                        ticket.version
                    ),
                });
            }
        }
        patch.apply(ticket);
        Ok(ticket.clone())
    }
}
