//! Client for the REST store that owns customers and tickets.
//!
//! [`RemoteStore`] is the typed contract the workflows depend on.
//! [`HttpStore`] talks to the real service with [`reqwest`];
//! [`MemoryStore`] keeps everything in process for tests and local runs.

pub mod error;
pub mod http;
pub mod memory;

use std::fmt;

use async_trait::async_trait;
use helpdesk_core::customer::{Customer, CustomerPatch};
use helpdesk_core::ticket::{NewTicket, Ticket, TicketPatch};
use helpdesk_core::types::EntityId;

pub use error::StoreError;
pub use http::HttpStore;
pub use memory::MemoryStore;

/// Resource collections exposed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Customers,
    Tickets,
}

impl Collection {
    /// URL path segment, e.g. `tickets`.
    pub fn path(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Tickets => "tickets",
        }
    }

    /// Singular entity name used in error messages.
    pub fn entity(self) -> &'static str {
        match self {
            Self::Customers => "Customer",
            Self::Tickets => "Ticket",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity())
    }
}

/// Every call is a single attempt; callers decide what a failure means.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn list_customers(&self) -> Result<Vec<Customer>, StoreError>;

    async fn get_customer(&self, id: EntityId) -> Result<Customer, StoreError>;

    async fn patch_customer(
        &self,
        id: EntityId,
        patch: &CustomerPatch,
    ) -> Result<Customer, StoreError>;

    /// Tickets in store order.
    async fn list_tickets(&self) -> Result<Vec<Ticket>, StoreError>;

    async fn get_ticket(&self, id: EntityId) -> Result<Ticket, StoreError>;

    async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket, StoreError>;

    async fn patch_ticket(&self, id: EntityId, patch: &TicketPatch) -> Result<Ticket, StoreError>;
}
