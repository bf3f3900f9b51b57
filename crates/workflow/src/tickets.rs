//! Ticket workflow: create, status transitions, note appends.
//!
//! The cache is never written ahead of the store. Note appends for one
//! ticket are serialised and applied to the store's current copy, and the
//! write carries the next version so a store that enforces versions rejects
//! a racing append instead of dropping it.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use helpdesk_core::error::CoreError;
use helpdesk_core::ticket::{
    validate_note, validate_transition, NewTicket, Ticket, TicketPatch, TicketStatus,
    INCOMING_CALL_NOTE,
};
use helpdesk_core::types::{Day, EntityId};
use helpdesk_events::{ChangeKind, StoreChange};
use helpdesk_store::RemoteStore;
use tokio::sync::Mutex;

use crate::cache::Cache;
use crate::error::{WorkflowError, WorkflowResult};

type Clock = Arc<dyn Fn() -> Day + Send + Sync>;

#[derive(Clone)]
pub struct TicketWorkflow {
    store: Arc<dyn RemoteStore>,
    cache: Cache,
    note_locks: Arc<Mutex<HashMap<EntityId, Arc<Mutex<()>>>>>,
    today: Clock,
}

impl TicketWorkflow {
    pub fn new(store: Arc<dyn RemoteStore>, cache: Cache) -> Self {
        Self {
            store,
            cache,
            note_locks: Arc::default(),
            today: Arc::new(|| Utc::now().date_naive()),
        }
    }

    /// Replace the source of "today" used for `createdAt`.
    pub fn with_clock(mut self, today: impl Fn() -> Day + Send + Sync + 'static) -> Self {
        self.today = Arc::new(today);
        self
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    /// Every ticket in store order. Refreshes the cache.
    pub async fn list_all(&self) -> WorkflowResult<Vec<Ticket>> {
        let tickets = self
            .store
            .list_tickets()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to list tickets"))?;
        self.cache.replace_tickets(tickets.clone()).await;
        Ok(tickets)
    }

    /// Tickets of one customer, in store order.
    pub async fn list_for_customer(&self, customer_id: EntityId) -> WorkflowResult<Vec<Ticket>> {
        let tickets = self.list_all().await?;
        Ok(tickets
            .into_iter()
            .filter(|t| t.customer_id == customer_id)
            .collect())
    }

    pub async fn get(&self, ticket_id: EntityId) -> WorkflowResult<Ticket> {
        let ticket = self
            .store
            .get_ticket(ticket_id)
            .await
            .inspect_err(|e| tracing::warn!(ticket_id, error = %e, "Failed to fetch ticket"))?;
        self.cache.upsert_ticket(ticket.clone()).await;
        Ok(ticket)
    }

    /// Open a ticket for `customer_id` whose first note is `issue`.
    pub async fn create(&self, customer_id: EntityId, issue: &str) -> WorkflowResult<Ticket> {
        let new_ticket = NewTicket::open(customer_id, issue, (self.today)())?;
        self.ensure_customer(customer_id).await?;

        let created = self
            .store
            .create_ticket(&new_ticket)
            .await
            .inspect_err(|e| tracing::warn!(customer_id, error = %e, "Failed to create ticket"))?;

        self.cache.upsert_ticket(created.clone()).await;
        self.cache.publish(
            StoreChange::new(ChangeKind::TicketCreated, created.id).with_customer(customer_id),
        );
        tracing::info!(ticket_id = created.id, customer_id, "Ticket created");
        Ok(created)
    }

    /// Open a ticket for an inbound call from `customer_id`.
    pub async fn record_incoming_call(&self, customer_id: EntityId) -> WorkflowResult<Ticket> {
        self.create(customer_id, INCOMING_CALL_NOTE).await
    }

    /// Move a ticket to `new_status`.
    ///
    /// The decision is made against the store's current copy. Requesting the
    /// status the store already holds returns that copy without a write.
    pub async fn update_status(
        &self,
        ticket_id: EntityId,
        new_status: TicketStatus,
    ) -> WorkflowResult<Ticket> {
        let current = self.get(ticket_id).await?;
        if current.status == new_status {
            return Ok(current);
        }
        validate_transition(current.status, new_status)?;

        let confirmed = self
            .store
            .patch_ticket(ticket_id, &TicketPatch::status(new_status))
            .await
            .inspect_err(|e| {
                tracing::warn!(ticket_id, status = %new_status, error = %e, "Failed to update status")
            })?;

        self.cache.upsert_ticket(confirmed.clone()).await;
        self.cache.publish(
            StoreChange::new(ChangeKind::TicketStatusChanged, ticket_id)
                .with_customer(confirmed.customer_id),
        );
        tracing::info!(ticket_id, status = %new_status, "Ticket status updated");
        Ok(confirmed)
    }

    /// Append `note` to the end of a ticket's note log.
    pub async fn add_note(&self, ticket_id: EntityId, note: &str) -> WorkflowResult<Ticket> {
        validate_note(note)?;

        let lock = self.note_lock(ticket_id).await;
        let result = {
            let _guard = lock.lock().await;
            self.append_note(ticket_id, note).await
        };
        self.release_note_lock(ticket_id, lock).await;
        result
    }

    // ---- private helpers ----

    /// Apply one append to the store's current copy. Caller holds the note lock.
    async fn append_note(&self, ticket_id: EntityId, note: &str) -> WorkflowResult<Ticket> {
        let current = self
            .store
            .get_ticket(ticket_id)
            .await
            .inspect_err(|e| tracing::warn!(ticket_id, error = %e, "Failed to fetch ticket"))?;

        let mut notes = current.notes;
        notes.push(note.to_string());
        let patch = TicketPatch::notes(notes, current.version + 1);

        let confirmed = self
            .store
            .patch_ticket(ticket_id, &patch)
            .await
            .map_err(|e| {
                tracing::warn!(ticket_id, error = %e, "Failed to add note");
                if e.is_conflict() {
                    WorkflowError::Core(CoreError::Conflict(format!(
                        "Ticket {ticket_id} changed while the note was being added"
                    )))
                } else {
                    e.into()
                }
            })?;

        self.cache.upsert_ticket(confirmed.clone()).await;
        self.cache.publish(
            StoreChange::new(ChangeKind::TicketNoteAdded, ticket_id)
                .with_customer(confirmed.customer_id),
        );
        tracing::info!(ticket_id, notes = confirmed.notes.len(), "Note added");
        Ok(confirmed)
    }

    /// Tickets must reference an existing customer.
    async fn ensure_customer(&self, customer_id: EntityId) -> WorkflowResult<()> {
        if self.cache.customer(customer_id).await.is_some() {
            return Ok(());
        }
        let customer = self
            .store
            .get_customer(customer_id)
            .await
            .inspect_err(|e| tracing::warn!(customer_id, error = %e, "Unknown customer"))?;
        self.cache.upsert_customer(customer).await;
        Ok(())
    }

    async fn note_lock(&self, ticket_id: EntityId) -> Arc<Mutex<()>> {
        let mut locks = self.note_locks.lock().await;
        Arc::clone(locks.entry(ticket_id).or_default())
    }

    /// Drop the ticket's lock entry once no other append holds or awaits it.
    async fn release_note_lock(&self, ticket_id: EntityId, lock: Arc<Mutex<()>>) {
        let mut locks = self.note_locks.lock().await;
        // One reference in the map, one here.
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&ticket_id);
        }
    }
}
