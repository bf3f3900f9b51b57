//! Display projections of tickets and customers.
//!
//! Read-only; nothing here is written back to the store.

use serde::Serialize;

use crate::customer::Customer;
use crate::ticket::{Ticket, TicketStatus};
use crate::types::{Day, EntityId};

/// Visual emphasis for a ticket status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Urgent,
    Caution,
    Resolved,
    Neutral,
}

impl StatusTone {
    pub fn for_status(status: TicketStatus) -> Self {
        match status {
            TicketStatus::Open => Self::Urgent,
            TicketStatus::InProgress => Self::Caution,
            TicketStatus::Closed => Self::Resolved,
        }
    }

    /// Tone for a raw status string; anything unrecognised is neutral.
    pub fn for_raw(raw: &str) -> Self {
        raw.parse::<TicketStatus>()
            .map(Self::for_status)
            .unwrap_or(Self::Neutral)
    }
}

/// Name to show for a ticket's customer, falling back to the id.
pub fn customer_display_name(customer_id: EntityId, customer: Option<&Customer>) -> String {
    match customer {
        Some(c) if !c.name.trim().is_empty() => c.name.clone(),
        _ => format!("Customer #{customer_id}"),
    }
}

/// Format a coverage amount as dollars with thousands separators.
///
/// Whole amounts print without cents: `500000.0` -> `$500,000`.
pub fn format_coverage(amount: f64) -> String {
    let cents = (amount * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let (whole, frac) = (cents / 100, cents % 100);

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{frac:02}")
    }
}

/// One row of a ticket table (dashboard or customer history).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRow {
    pub id: EntityId,
    pub customer_id: EntityId,
    pub customer_name: String,
    pub status: TicketStatus,
    pub tone: StatusTone,
    pub created_at: Day,
    pub latest_note: Option<String>,
}

impl TicketRow {
    pub fn project(ticket: &Ticket, customer_name: String) -> Self {
        Self {
            id: ticket.id,
            customer_id: ticket.customer_id,
            customer_name,
            status: ticket.status,
            tone: StatusTone::for_status(ticket.status),
            created_at: ticket.created_at,
            latest_note: ticket.latest_note().map(str::to_string),
        }
    }
}

/// Customer card as shown on the ticket detail and profile views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCard {
    pub id: EntityId,
    pub name: String,
    pub policy_number: String,
    pub coverage: String,
    pub beneficiary: String,
}

impl From<&Customer> for CustomerCard {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name.clone(),
            policy_number: customer.policy_number.clone(),
            coverage: format_coverage(customer.coverage),
            beneficiary: customer.beneficiary.clone(),
        }
    }
}
