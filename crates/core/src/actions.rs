//! Outbound actions an agent can trigger from a ticket.
//!
//! Phone calls and the warehouse sync have no real backend yet. They sit
//! behind [`SimulatedAction`] so a real integration can be plugged in while
//! [`NoopActions`] only logs and returns the notice the agent sees.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

use crate::customer::Customer;
use crate::error::CoreError;
use crate::ticket::Ticket;
use crate::types::EntityId;

pub const CALL_NOTICE: &str = "Calling customer...";
pub const SYNC_NOTICE: &str = "Data synced successfully to Snowflake";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    CallCustomer,
    WarehouseSync,
}

/// Result of an action, shown to the agent as a toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionNotice {
    pub kind: ActionKind,
    pub message: String,
}

impl ActionNotice {
    pub fn call() -> Self {
        Self {
            kind: ActionKind::CallCustomer,
            message: CALL_NOTICE.into(),
        }
    }

    pub fn sync() -> Self {
        Self {
            kind: ActionKind::WarehouseSync,
            message: SYNC_NOTICE.into(),
        }
    }
}

#[async_trait]
pub trait SimulatedAction: Send + Sync {
    async fn call_customer(&self, customer: &Customer) -> Result<ActionNotice, CoreError>;

    async fn sync_ticket(&self, ticket: &Ticket) -> Result<ActionNotice, CoreError>;
}

/// Default capability: log and report success.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopActions;

#[async_trait]
impl SimulatedAction for NoopActions {
    async fn call_customer(&self, customer: &Customer) -> Result<ActionNotice, CoreError> {
        tracing::info!(customer_id = customer.id, "Simulated call to customer");
        Ok(ActionNotice::call())
    }

    async fn sync_ticket(&self, ticket: &Ticket) -> Result<ActionNotice, CoreError> {
        tracing::info!(ticket_id = ticket.id, "Simulated warehouse sync");
        Ok(ActionNotice::sync())
    }
}

/// Records every invocation as `(kind, entity id)`; for tests.
#[derive(Debug, Default)]
pub struct RecordingActions {
    calls: Mutex<Vec<(ActionKind, EntityId)>>,
}

impl RecordingActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn invocations(&self) -> Vec<(ActionKind, EntityId)> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn record(&self, kind: ActionKind, id: EntityId) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((kind, id));
        }
    }
}

#[async_trait]
impl SimulatedAction for RecordingActions {
    async fn call_customer(&self, customer: &Customer) -> Result<ActionNotice, CoreError> {
        self.record(ActionKind::CallCustomer, customer.id);
        Ok(ActionNotice::call())
    }

    async fn sync_ticket(&self, ticket: &Ticket) -> Result<ActionNotice, CoreError> {
        self.record(ActionKind::WarehouseSync, ticket.id);
        Ok(ActionNotice::sync())
    }
}
