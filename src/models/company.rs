//! Company record - reference data about letter targets.

use super::finite_or_zero;
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inclusive range of expected response values.
///
/// Construct with [`ResponseRange::new`] to enforce `min <= max`. Decoding from
/// storage accepts whatever was persisted.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseRange {
    /// Lowest expected response
    #[serde(deserialize_with = "super::amount_or_zero")]
    pub min: f64,
    /// Highest expected response
    #[serde(deserialize_with = "super::amount_or_zero")]
    pub max: f64,
}

impl ResponseRange {
    /// Builds a range, rejecting `min > max` and non-finite bounds.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() {
            return Err(Error::InvalidAmount { amount: min });
        }
        if !max.is_finite() {
            return Err(Error::InvalidAmount { amount: max });
        }
        if min > max {
            return Err(Error::Validation {
                field: "expected_response_range",
                message: format!("minimum {min} is greater than maximum {max}"),
            });
        }
        Ok(Self { min, max })
    }

    /// Midpoint of the range.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Whether `value` falls inside the range.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A company that letters are sent to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique identifier, never reused
    pub id: Uuid,
    /// Display name, matched against letter and response company names
    pub name: String,
    /// Postal address
    pub address: String,
    /// Fraction of letters that get a response, in `[0, 1]`
    #[serde(deserialize_with = "super::amount_or_zero")]
    pub response_rate: f64,
    /// Typical response values
    pub expected_response_range: ResponseRange,
    /// When this entry was last edited
    pub last_updated: DateTime<Utc>,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

impl Company {
    /// Creates a company with a fresh id. The response rate is clamped to
    /// `[0, 1]`, with NaN read as 0.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        response_rate: f64,
        expected_response_range: ResponseRange,
        last_updated: DateTime<Utc>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            response_rate: finite_or_zero(response_rate).clamp(0.0, 1.0),
            expected_response_range,
            last_updated,
            notes: notes.into(),
        }
    }

    /// Zeroes non-finite numbers so the record can be stored. Returns true if
    /// anything changed.
    pub fn normalize(&mut self) -> bool {
        let range = &mut self.expected_response_range;
        let numbers = [&mut self.response_rate, &mut range.min, &mut range.max];
        let mut changed = false;
        for number in numbers {
            if !number.is_finite() {
                *number = 0.0;
                changed = true;
            }
        }
        changed
    }

    /// Response rate as a percentage for display.
    #[must_use]
    pub fn response_rate_percent(&self) -> f64 {
        self.response_rate * 100.0
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_range_rejects_inverted_bounds() {
        let result = ResponseRange::new(200.0, 50.0);
        assert!(matches!(result, Err(Error::Validation { field: "expected_response_range", .. })));
    }

    #[test]
    fn test_range_accepts_equal_bounds() {
        let range = ResponseRange::new(75.0, 75.0).unwrap();
        assert_eq!(range.midpoint(), 75.0);
        assert!(range.contains(75.0));
    }

    #[test]
    fn test_range_rejects_nan() {
        assert!(matches!(
            ResponseRange::new(f64::NAN, 10.0),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_response_rate_clamped() {
        let range = ResponseRange::new(1.0, 2.0).unwrap();
        let company = Company::new("X", "Y", 1.5, range, Utc::now(), "");
        assert_eq!(company.response_rate, 1.0);
        assert_eq!(company.response_rate_percent(), 100.0);
    }

    #[test]
    fn test_normalize_zeroes_non_finite_numbers() {
        let range = ResponseRange::new(10.0, 20.0).unwrap();
        let mut company = Company::new("X", "Y", f64::NAN, range, Utc::now(), "");
        assert_eq!(company.response_rate, 0.0);

        company.expected_response_range.max = f64::INFINITY;
        assert!(company.normalize());
        assert_eq!(company.expected_response_range, ResponseRange { min: 10.0, max: 0.0 });
        assert!(!company.normalize());
    }
}
