//! Change feed for confirmed writes to the remote store.
//!
//! - [`ChangeFeed`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`StoreChange`]: what was written, to which entity, and when.
//! - [`ActivityLog`]: subscriber that keeps the most recent changes for the
//!   console's activity views.

pub mod activity;
pub mod feed;

pub use activity::ActivityLog;
pub use feed::{ChangeFeed, ChangeKind, StoreChange};
