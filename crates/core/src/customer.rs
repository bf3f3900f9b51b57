//! Customer (policyholder) model and the editable-field patch.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::EntityId;

/// A policyholder record as held by the remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
    pub policy_number: String,
    /// Coverage amount in dollars.
    pub coverage: f64,
    pub beneficiary: String,
}

/// Partial update for `PATCH /customers/:id`.
///
/// Only the display fields an agent may edit are representable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_number: Option<String>,
}

impl CustomerPatch {
    /// Reject empty patches and fields that are blank after trimming.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.name.is_none() && self.policy_number.is_none() {
            return Err(CoreError::Validation(
                "Customer update must change name or policyNumber".into(),
            ));
        }
        if matches!(&self.name, Some(name) if name.trim().is_empty()) {
            return Err(CoreError::Validation("Customer name must not be empty".into()));
        }
        if matches!(&self.policy_number, Some(number) if number.trim().is_empty()) {
            return Err(CoreError::Validation("Policy number must not be empty".into()));
        }
        Ok(())
    }

    pub fn apply(&self, customer: &mut Customer) {
        if let Some(name) = &self.name {
            customer.name = name.clone();
        }
        if let Some(number) = &self.policy_number {
            customer.policy_number = number.clone();
        }
    }
}
