//! Response record - money received back from a company.

use super::finite_or_zero;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A response (drop) received from a company.
///
/// `linked_letter_id` is a weak reference: it is only ever looked up, and it
/// may point at a letter that has since been deleted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    /// Unique identifier, never reused
    pub id: Uuid,
    /// When the response arrived
    pub date_received: DateTime<Utc>,
    /// Value received
    #[serde(deserialize_with = "super::amount_or_zero")]
    pub amount: f64,
    /// Company that responded
    pub company_name: String,
    /// Letter this response answers, if any
    #[serde(default)]
    pub linked_letter_id: Option<Uuid>,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

impl Response {
    /// Creates a response with a fresh id. A non-finite amount becomes 0.
    #[must_use]
    pub fn new(
        date_received: DateTime<Utc>,
        amount: f64,
        company_name: impl Into<String>,
        linked_letter_id: Option<Uuid>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date_received,
            amount: finite_or_zero(amount),
            company_name: company_name.into(),
            linked_letter_id,
            notes: notes.into(),
        }
    }

    /// Zeroes a non-finite amount. Returns true if it did.
    pub fn normalize(&mut self) -> bool {
        let finite = self.amount.is_finite();
        self.amount = finite_or_zero(self.amount);
        !finite
    }
}
