//! Supply record - stamps, envelopes and other purchases.

use super::finite_or_zero;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A supply purchase. `cost` is the total paid for the purchase.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supply {
    /// Unique identifier, never reused
    pub id: Uuid,
    /// What was bought
    pub name: String,
    /// How many units
    #[serde(
        default = "super::default_quantity",
        deserialize_with = "super::quantity_at_least_one"
    )]
    pub quantity: u32,
    /// Amount paid
    #[serde(deserialize_with = "super::amount_or_zero")]
    pub cost: f64,
    /// When it was bought
    pub date_purchased: DateTime<Utc>,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

impl Supply {
    /// Creates a supply with a fresh id, with the same bounds as [`Supply::normalize`].
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        cost: f64,
        date_purchased: DateTime<Utc>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            quantity: quantity.max(1),
            cost: finite_or_zero(cost),
            date_purchased,
            notes: notes.into(),
        }
    }

    /// Raises a zero quantity to 1 and zeroes a non-finite cost. Returns true
    /// if anything changed.
    pub fn normalize(&mut self) -> bool {
        let before = (self.cost.to_bits(), self.quantity);
        self.cost = finite_or_zero(self.cost);
        self.quantity = self.quantity.max(1);
        before != (self.cost.to_bits(), self.quantity)
    }
}
