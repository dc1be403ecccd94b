//! Letter record - one mailing to a company, possibly several copies.

use super::finite_or_zero;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A batch of identical letters sent to one company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Letter {
    /// Unique identifier, never reused
    pub id: Uuid,
    /// When the letters went out
    pub date_sent: DateTime<Utc>,
    /// Recipient company
    pub company_name: String,
    /// Expected response value per letter
    #[serde(deserialize_with = "super::amount_or_zero")]
    pub expected_response: f64,
    /// Number of copies sent, at least 1
    #[serde(
        default = "super::default_quantity",
        deserialize_with = "super::quantity_at_least_one"
    )]
    pub quantity: u32,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Set once a response has been received for this letter
    #[serde(default)]
    pub is_confirmed: bool,
}

impl Letter {
    /// Creates an unconfirmed letter with a fresh id. A zero quantity is
    /// raised to 1 and a non-finite expected response becomes 0.
    #[must_use]
    pub fn new(
        date_sent: DateTime<Utc>,
        company_name: impl Into<String>,
        expected_response: f64,
        quantity: u32,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date_sent,
            company_name: company_name.into(),
            expected_response: finite_or_zero(expected_response),
            quantity: quantity.max(1),
            notes: notes.into(),
            is_confirmed: false,
        }
    }

    /// Brings a hand-built letter back within storable bounds. Returns true
    /// if anything changed.
    pub fn normalize(&mut self) -> bool {
        let before = (self.expected_response.to_bits(), self.quantity);
        self.expected_response = finite_or_zero(self.expected_response);
        self.quantity = self.quantity.max(1);
        before != (self.expected_response.to_bits(), self.quantity)
    }

    /// Expected return of the whole batch.
    #[must_use]
    pub fn expected_total(&self) -> f64 {
        self.expected_response * f64::from(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_new_letter_defaults() {
        let letter = Letter::new(Utc::now(), "Bellagio", 100.0, 0, "");
        assert_eq!(letter.quantity, 1);
        assert!(!letter.is_confirmed);
        assert_eq!(letter.expected_total(), 100.0);
    }

    #[test]
    fn test_decode_fills_missing_optional_fields() {
        let json = r#"{
            "id": "6f1c1c5e-8f43-4a53-9f43-6a3fe1bdc0d1",
            "dateSent": "2024-03-01T12:00:00Z",
            "companyName": "MGM Grand",
            "expectedResponse": 40.0
        }"#;
        let letter: Letter = serde_json::from_str(json).unwrap();
        assert_eq!(letter.quantity, 1);
        assert!(letter.notes.is_empty());
        assert!(!letter.is_confirmed);
    }

    #[test]
    fn test_decode_raises_zero_quantity() {
        let json = r#"{
            "id": "6f1c1c5e-8f43-4a53-9f43-6a3fe1bdc0d1",
            "dateSent": "2024-03-01T12:00:00Z",
            "companyName": "MGM Grand",
            "expectedResponse": 40.0,
            "quantity": 0
        }"#;
        let letter: Letter = serde_json::from_str(json).unwrap();
        assert_eq!(letter.quantity, 1);
        assert_eq!(letter.expected_total(), 40.0);
    }

    #[test]
    fn test_null_expected_response_reads_as_zero() {
        let json = r#"{
            "id": "6f1c1c5e-8f43-4a53-9f43-6a3fe1bdc0d1",
            "dateSent": "2024-03-01T12:00:00Z",
            "companyName": "MGM Grand",
            "expectedResponse": null
        }"#;
        let letter: Letter = serde_json::from_str(json).unwrap();
        assert_eq!(letter.expected_response, 0.0);
    }

    #[test]
    fn test_non_finite_expected_response_is_zeroed() {
        let letter = Letter::new(Utc::now(), "Bellagio", f64::INFINITY, 1, "");
        assert_eq!(letter.expected_response, 0.0);

        let mut edited = letter.clone();
        edited.expected_response = f64::NAN;
        edited.quantity = 0;
        assert!(edited.normalize());
        assert_eq!(edited.expected_response, 0.0);
        assert_eq!(edited.quantity, 1);
        assert!(!edited.normalize());
    }
}
