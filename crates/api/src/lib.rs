//! Helpdesk agent console server library.
//!
//! Exposes config, state, error handling, the session guard middleware and
//! routes so integration tests and the binary entrypoint share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
