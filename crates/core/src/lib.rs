//! Domain types and rules for the helpdesk agent console.
//!
//! Everything here is free of I/O: entity models and their wire shape,
//! the ticket status transition table, the session guard, navigation
//! rules, display projections, and the simulated-action capability.

pub mod actions;
pub mod customer;
pub mod error;
pub mod navigation;
pub mod reporting;
pub mod session;
pub mod ticket;
pub mod types;
pub mod view;
