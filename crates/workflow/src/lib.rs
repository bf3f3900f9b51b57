//! Ticket and customer workflows over the remote store.
//!
//! Both controllers share one [`Cache`]. Local state is written only after
//! the store confirms a call, and every confirmed write is announced on the
//! cache's [`ChangeFeed`](helpdesk_events::ChangeFeed).

pub mod cache;
pub mod customers;
pub mod error;
pub mod tickets;

pub use cache::Cache;
pub use customers::{CustomerProfile, CustomerWorkflow};
pub use error::{WorkflowError, WorkflowResult};
pub use tickets::TicketWorkflow;
