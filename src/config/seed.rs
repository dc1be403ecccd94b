//! Seed companies shown to a first-run user.
//!
//! The built-in list is fixed; a `[[companies]]` table in the config file
//! replaces it wholesale.

use crate::errors::Result;
use crate::models::{Company, ResponseRange};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One seed company as written in the config file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct CompanySeed {
    /// Company name
    pub name: String,
    /// Postal address
    pub address: String,
    /// Response rate as a fraction in `[0, 1]`
    pub response_rate: f64,
    /// Lowest typical response
    pub expected_min: f64,
    /// Highest typical response
    pub expected_max: f64,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

impl CompanySeed {
    fn new(
        name: &str,
        address: &str,
        response_rate: f64,
        expected_min: f64,
        expected_max: f64,
        notes: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            address: address.to_string(),
            response_rate,
            expected_min,
            expected_max,
            notes: notes.to_string(),
        }
    }

    /// Turns the seed into a company record with a fresh id.
    pub fn to_company(&self, now: DateTime<Utc>) -> Result<Company> {
        let range = ResponseRange::new(self.expected_min, self.expected_max)?;
        Ok(Company::new(
            self.name.clone(),
            self.address.clone(),
            self.response_rate,
            range,
            now,
            self.notes.clone(),
        ))
    }
}

/// The built-in seed list.
#[must_use]
pub fn default_company_seeds() -> Vec<CompanySeed> {
    vec![
        CompanySeed::new(
            "Bellagio",
            "3600 S Las Vegas Blvd, Las Vegas, NV 89109",
            0.15,
            50.0,
            200.0,
            "High-end property, prefers handwritten letters",
        ),
        CompanySeed::new(
            "Caesars Palace",
            "3570 S Las Vegas Blvd, Las Vegas, NV 89109",
            0.12,
            25.0,
            150.0,
            "Classic Vegas property",
        ),
        CompanySeed::new(
            "MGM Grand",
            "3799 S Las Vegas Blvd, Las Vegas, NV 89109",
            0.18,
            30.0,
            180.0,
            "Good response rate for handwritten",
        ),
        CompanySeed::new(
            "The Venetian",
            "3355 S Las Vegas Blvd, Las Vegas, NV 89109",
            0.10,
            20.0,
            100.0,
            "Luxury property, accepts email",
        ),
    ]
}
