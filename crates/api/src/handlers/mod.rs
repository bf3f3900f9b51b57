pub mod customers;
pub mod dashboard;
pub mod reporting;
pub mod session;
pub mod tickets;
