use std::sync::Arc;

use helpdesk_core::actions::SimulatedAction;
use helpdesk_core::session::SessionGuard;
use helpdesk_events::ActivityLog;
use helpdesk_store::RemoteStore;
use helpdesk_workflow::{Cache, CustomerWorkflow, TicketWorkflow};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The single agent session of this console.
    pub session: Arc<SessionGuard>,
    /// Ticket workflow over the shared cache.
    pub tickets: TicketWorkflow,
    /// Customer workflow over the same cache.
    pub customers: CustomerWorkflow,
    /// Call and warehouse-sync capability.
    pub actions: Arc<dyn SimulatedAction>,
    /// Recent confirmed writes, fed from the cache's change feed.
    pub activity: Arc<ActivityLog>,
}

impl AppState {
    /// Wire both workflows to `store` through one shared cache.
    ///
    /// Spawns the activity log's feed consumer, so this must run inside a
    /// Tokio runtime.
    pub fn new(
        config: ServerConfig,
        store: Arc<dyn RemoteStore>,
        actions: Arc<dyn SimulatedAction>,
    ) -> Self {
        let tickets = TicketWorkflow::new(Arc::clone(&store), Cache::new());
        let customers = CustomerWorkflow::new(store, tickets.clone());

        let activity = Arc::new(ActivityLog::default());
        tokio::spawn(Arc::clone(&activity).run(tickets.cache().subscribe()));

        Self {
            config: Arc::new(config),
            session: Arc::new(SessionGuard::new()),
            tickets,
            customers,
            actions,
            activity,
        }
    }
}
