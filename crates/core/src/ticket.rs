//! Ticket model, status transition rules, and note validation.
//!
//! A ticket's status moves through a fixed table of transitions and its
//! notes form an append-only log seeded with the issue description.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Day, EntityId};

/// First note of a ticket opened from a simulated inbound call.
pub const INCOMING_CALL_NOTE: &str = "Incoming call from customer";

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a ticket.
///
/// The in-progress value is stored as `"in progress"`; the hyphenated and
/// snake-case spellings are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    #[serde(rename = "open")]
    Open,
    #[serde(rename = "in progress", alias = "in-progress", alias = "in_progress")]
    InProgress,
    #[serde(rename = "closed")]
    Closed,
}

impl TicketStatus {
    pub const ALL: [TicketStatus; 3] = [Self::Open, Self::InProgress, Self::Closed];

    /// The wire spelling of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in progress",
            Self::Closed => "closed",
        }
    }

    /// Returns the statuses this status may move to.
    ///
    /// Transition rules:
    /// - `open`        -> `in progress`, `closed`
    /// - `in progress` -> `open`, `closed`
    /// - `closed`      -> `open`, `in progress`
    pub fn valid_transitions(self) -> &'static [TicketStatus] {
        match self {
            Self::Open => &[Self::InProgress, Self::Closed],
            Self::InProgress => &[Self::Open, Self::Closed],
            Self::Closed => &[Self::Open, Self::InProgress],
        }
    }

    pub fn can_transition_to(self, next: TicketStatus) -> bool {
        self.valid_transitions().contains(&next)
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = CoreError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "open" => Ok(Self::Open),
            "in progress" | "in-progress" | "in_progress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            other => {
                let known: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                Err(CoreError::Validation(format!(
                    "Invalid ticket status '{other}'. Must be one of: {}",
                    known.join(", ")
                )))
            }
        }
    }
}

/// Validate that a status change from `current` to `next` is allowed.
pub fn validate_transition(current: TicketStatus, next: TicketStatus) -> Result<(), CoreError> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        let allowed: Vec<&str> = current
            .valid_transitions()
            .iter()
            .map(|s| s.as_str())
            .collect();
        Err(CoreError::Validation(format!(
            "Cannot move ticket from '{current}' to '{next}'. Allowed: {}",
            allowed.join(", ")
        )))
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A support ticket as held by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: EntityId,
    pub customer_id: EntityId,
    pub status: TicketStatus,
    pub created_at: Day,
    pub notes: Vec<String>,
    /// Bumped on every notes write. Records written before versioning read as 0.
    #[serde(default)]
    pub version: u64,
}

impl Ticket {
    /// The most recent note, if any.
    pub fn latest_note(&self) -> Option<&str> {
        self.notes.last().map(String::as_str)
    }
}

/// Body of `POST /tickets`. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    pub customer_id: EntityId,
    pub status: TicketStatus,
    pub created_at: Day,
    pub notes: Vec<String>,
    pub version: u64,
}

impl NewTicket {
    /// Build an open ticket whose note log starts with `issue`.
    pub fn open(customer_id: EntityId, issue: &str, today: Day) -> Result<Self, CoreError> {
        validate_note(issue)?;
        Ok(Self {
            customer_id,
            status: TicketStatus::Open,
            created_at: today,
            notes: vec![issue.to_string()],
            version: 0,
        })
    }
}

/// Partial update body for `PATCH /tickets/:id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
}

impl TicketPatch {
    pub fn status(status: TicketStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Replace the note log and stamp the version the write produces.
    pub fn notes(notes: Vec<String>, version: u64) -> Self {
        Self {
            notes: Some(notes),
            version: Some(version),
            ..Self::default()
        }
    }

    /// Apply the patched fields to `ticket`, leaving the rest untouched.
    pub fn apply(&self, ticket: &mut Ticket) {
        if let Some(status) = self.status {
            ticket.status = status;
        }
        if let Some(notes) = &self.notes {
            ticket.notes = notes.clone();
        }
        if let Some(version) = self.version {
            ticket.version = version;
        }
    }
}

/// Reject note or issue text that is empty after trimming.
pub fn validate_note(text: &str) -> Result<(), CoreError> {
    if text.trim().is_empty() {
        return Err(CoreError::Validation("Note text must not be empty".into()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn day() -> Day {
        Day::from_ymd_opt(2024, 3, 18).unwrap()
    }

    #[test]
    fn open_moves_to_in_progress_or_closed() {
        assert!(validate_transition(TicketStatus::Open, TicketStatus::InProgress).is_ok());
        assert!(validate_transition(TicketStatus::Open, TicketStatus::Closed).is_ok());
    }

    #[test]
    fn in_progress_moves_back_to_open_or_closed() {
        assert!(validate_transition(TicketStatus::InProgress, TicketStatus::Open).is_ok());
        assert!(validate_transition(TicketStatus::InProgress, TicketStatus::Closed).is_ok());
    }

    #[test]
    fn closed_reopens_or_resumes() {
        assert!(validate_transition(TicketStatus::Closed, TicketStatus::Open).is_ok());
        assert!(validate_transition(TicketStatus::Closed, TicketStatus::InProgress).is_ok());
    }

    #[test]
    fn staying_put_is_not_a_transition() {
        let err = validate_transition(TicketStatus::Closed, TicketStatus::Closed).unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Allowed: open, in progress"));
    }

    #[test]
    fn no_status_transitions_to_itself() {
        for status in TicketStatus::ALL {
            assert!(!status.can_transition_to(status), "{status} -> {status}");
        }
    }

    #[test]
    fn status_parses_wire_spellings() {
        assert_eq!("open".parse::<TicketStatus>().unwrap(), TicketStatus::Open);
        assert_eq!(
            "in progress".parse::<TicketStatus>().unwrap(),
            TicketStatus::InProgress
        );
        assert_eq!(
            "in-progress".parse::<TicketStatus>().unwrap(),
            TicketStatus::InProgress
        );
        assert_matches!(
            "pending".parse::<TicketStatus>(),
            Err(CoreError::Validation(msg)) if msg.ends_with("open, in progress, closed")
        );
    }

    #[test]
    fn ticket_deserializes_from_store_json() {
        let json = serde_json::json!({
            "id": 3,
            "customerId": 1,
            "status": "in progress",
            "createdAt": "2024-03-18",
            "notes": ["Claim form missing", "Sent reminder"]
        });
        let ticket: Ticket = serde_json::from_value(json).unwrap();
        assert_eq!(ticket.customer_id, 1);
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.created_at, day());
        assert_eq!(ticket.version, 0);
        assert_eq!(ticket.latest_note(), Some("Sent reminder"));
    }

    #[test]
    fn unknown_status_fails_to_deserialize() {
        let json = serde_json::json!({
            "id": 3,
            "customerId": 1,
            "status": "escalated",
            "createdAt": "2024-03-18",
            "notes": ["x"]
        });
        assert!(serde_json::from_value::<Ticket>(json).is_err());
    }

    #[test]
    fn new_ticket_is_open_with_issue_as_only_note() {
        let ticket = NewTicket::open(7, "Policy question", day()).unwrap();
        assert_eq!(ticket.customer_id, 7);
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.notes, vec!["Policy question".to_string()]);

        let body = serde_json::to_value(&ticket).unwrap();
        assert_eq!(body["customerId"], 7);
        assert_eq!(body["status"], "open");
        assert_eq!(body["createdAt"], "2024-03-18");
    }

    #[test]
    fn new_ticket_rejects_blank_issue() {
        assert_matches!(NewTicket::open(7, "   ", day()), Err(CoreError::Validation(_)));
    }

    #[test]
    fn status_patch_serializes_only_status() {
        let body = serde_json::to_value(TicketPatch::status(TicketStatus::InProgress)).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "in progress" }));
    }

    #[test]
    fn patch_apply_keeps_unpatched_fields() {
        let mut ticket = Ticket {
            id: 1,
            customer_id: 2,
            status: TicketStatus::Open,
            created_at: day(),
            notes: vec!["a".into()],
            version: 4,
        };
        TicketPatch::status(TicketStatus::Closed).apply(&mut ticket);
        assert_eq!(ticket.status, TicketStatus::Closed);
        assert_eq!(ticket.notes, vec!["a".to_string()]);
        assert_eq!(ticket.version, 4);
    }

    #[test]
    fn whitespace_note_is_rejected() {
        assert!(validate_note("").is_err());
        assert!(validate_note(" \n\t").is_err());
        assert!(validate_note("called back").is_ok());
    }
}
