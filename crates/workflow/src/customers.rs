//! Customer workflow: profile fetch, edits, and tickets opened from the
//! profile.
//!
//! Ticket writes go through [`TicketWorkflow`], which shares this
//! controller's cache, so a ticket created here shows up in every view.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use helpdesk_core::customer::{Customer, CustomerPatch};
use helpdesk_core::ticket::Ticket;
use helpdesk_core::types::EntityId;
use helpdesk_core::view::{customer_display_name, CustomerCard, TicketRow};
use helpdesk_events::{ChangeKind, StoreChange};
use helpdesk_store::RemoteStore;
use serde::Serialize;

use crate::cache::Cache;
use crate::error::WorkflowResult;
use crate::tickets::TicketWorkflow;

/// A customer together with their ticket history.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub customer: CustomerCard,
    pub tickets: Vec<TicketRow>,
}

#[derive(Clone)]
pub struct CustomerWorkflow {
    store: Arc<dyn RemoteStore>,
    tickets: TicketWorkflow,
}

impl CustomerWorkflow {
    pub fn new(store: Arc<dyn RemoteStore>, tickets: TicketWorkflow) -> Self {
        Self { store, tickets }
    }

    fn cache(&self) -> &Cache {
        self.tickets.cache()
    }

    pub async fn fetch(&self, customer_id: EntityId) -> WorkflowResult<Customer> {
        let customer = self
            .store
            .get_customer(customer_id)
            .await
            .inspect_err(|e| tracing::warn!(customer_id, error = %e, "Failed to fetch customer"))?;
        self.cache().upsert_customer(customer.clone()).await;
        Ok(customer)
    }

    /// Update the editable display fields of a customer.
    pub async fn edit(
        &self,
        customer_id: EntityId,
        patch: &CustomerPatch,
    ) -> WorkflowResult<Customer> {
        patch.validate()?;

        let updated = self
            .store
            .patch_customer(customer_id, patch)
            .await
            .inspect_err(|e| tracing::warn!(customer_id, error = %e, "Failed to edit customer"))?;

        self.cache().upsert_customer(updated.clone()).await;
        self.cache()
            .publish(StoreChange::new(ChangeKind::CustomerEdited, customer_id));
        tracing::info!(customer_id, "Customer updated");
        Ok(updated)
    }

    pub async fn create_ticket_for(
        &self,
        customer_id: EntityId,
        issue: &str,
    ) -> WorkflowResult<Ticket> {
        self.tickets.create(customer_id, issue).await
    }

    /// Cached ticket history of a customer, without a store call.
    pub async fn tickets(&self, customer_id: EntityId) -> Vec<Ticket> {
        self.cache().tickets_for_customer(customer_id).await
    }

    /// Fresh customer record and ticket history, projected for display.
    pub async fn profile(&self, customer_id: EntityId) -> WorkflowResult<CustomerProfile> {
        let customer = self.fetch(customer_id).await?;
        let tickets = self.tickets.list_for_customer(customer_id).await?;
        let rows = tickets
            .iter()
            .map(|t| TicketRow::project(t, customer.name.clone()))
            .collect();
        Ok(CustomerProfile {
            customer: CustomerCard::from(&customer),
            tickets: rows,
        })
    }

    /// Display names for a set of customer ids.
    ///
    /// One listing call resolves every id; ids the store does not know, or a
    /// failed listing, fall back to `Customer #id`.
    pub async fn display_names(
        &self,
        customer_ids: impl IntoIterator<Item = EntityId>,
    ) -> HashMap<EntityId, String> {
        let wanted: HashSet<EntityId> = customer_ids.into_iter().collect();
        let known: HashMap<EntityId, Customer> = match self.store.list_customers().await {
            Ok(customers) => {
                for customer in &customers {
                    self.cache().upsert_customer(customer.clone()).await;
                }
                customers.into_iter().map(|c| (c.id, c)).collect()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to list customers; using fallback names");
                HashMap::new()
            }
        };

        wanted
            .into_iter()
            .map(|id| (id, customer_display_name(id, known.get(&id))))
            .collect()
    }
}
