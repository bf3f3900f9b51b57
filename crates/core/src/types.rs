/// Identifiers are assigned by the remote store and are always integers.
pub type EntityId = i64;

/// Tickets are dated to the day; there is no time component.
pub type Day = chrono::NaiveDate;
