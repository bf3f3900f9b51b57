//! Request middleware.
//!
//! - [`session::require_session`] -- Redirects between the login view and
//!   the rest of the console according to the session state.

pub mod session;
