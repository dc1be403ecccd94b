//! Form drafts - raw text input that validates into records.
//!
//! A draft keeps each field as the user typed it. `can_save` mirrors the
//! save button: it only checks that required fields are filled in. `validate`
//! does the parsing and returns the record, or the first field that is wrong.

use crate::errors::{Error, Result};
use crate::models::{CalendarNote, Company, Letter, NoteType, Response, ResponseRange, Supply};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Largest quantity a single letter batch or supply purchase may have.
pub const MAX_QUANTITY: u32 = 1000;

/// A common supply with its usual price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyPreset {
    /// Supply name
    pub name: &'static str,
    /// Usual cost
    pub cost: f64,
}

/// Quick-add buttons on the supply form.
pub const SUPPLY_PRESETS: [SupplyPreset; 4] = [
    SupplyPreset { name: "Stamps", cost: 0.66 },
    SupplyPreset { name: "Envelopes", cost: 0.15 },
    SupplyPreset { name: "Pens", cost: 2.99 },
    SupplyPreset { name: "Paper", cost: 8.99 },
];

fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn required_text(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            field,
            message: "is required".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn parse_number(field: &'static str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            field,
            message: "is required".to_string(),
        });
    }
    trimmed.parse::<f64>().map_err(|_| Error::Validation {
        field,
        message: format!("'{trimmed}' is not a number"),
    })
}

fn parse_amount(field: &'static str, value: &str) -> Result<f64> {
    let amount = parse_number(field, value)?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidAmount { amount });
    }
    Ok(amount)
}

fn check_quantity(field: &'static str, quantity: u32) -> Result<u32> {
    if !(1..=MAX_QUANTITY).contains(&quantity) {
        return Err(Error::Validation {
            field,
            message: format!("must be between 1 and {MAX_QUANTITY}"),
        });
    }
    Ok(quantity)
}

/// Input for a new letter batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterDraft {
    /// Recipient company (required)
    pub company_name: String,
    /// Expected response per letter (required)
    pub expected_response: String,
    /// Copies sent
    pub quantity: u32,
    /// When the batch went out
    pub date_sent: DateTime<Utc>,
    /// Free-form notes
    pub notes: String,
}

impl LetterDraft {
    /// Empty draft dated `now` with one copy.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            company_name: String::new(),
            expected_response: String::new(),
            quantity: 1,
            date_sent: now,
            notes: String::new(),
        }
    }

    /// Whether the save affordance should be enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        is_filled(&self.company_name) && is_filled(&self.expected_response)
    }

    /// Parses the draft into a new letter.
    pub fn validate(&self) -> Result<Letter> {
        let company_name = required_text("company_name", &self.company_name)?;
        let expected_response = parse_amount("expected_response", &self.expected_response)?;
        let quantity = check_quantity("quantity", self.quantity)?;
        Ok(Letter::new(
            self.date_sent,
            company_name,
            expected_response,
            quantity,
            self.notes.clone(),
        ))
    }
}

/// Input for a new response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseDraft {
    /// Company that responded (required)
    pub company_name: String,
    /// Amount received (required)
    pub amount: String,
    /// When it arrived
    pub date_received: DateTime<Utc>,
    /// Letter being answered, picked from the pending letters
    pub linked_letter_id: Option<Uuid>,
    /// Free-form notes
    pub notes: String,
}

impl ResponseDraft {
    /// Empty, unlinked draft dated `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            company_name: String::new(),
            amount: String::new(),
            date_received: now,
            linked_letter_id: None,
            notes: String::new(),
        }
    }

    /// Whether the save affordance should be enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        is_filled(&self.company_name) && is_filled(&self.amount)
    }

    /// Parses the draft into a new response.
    pub fn validate(&self) -> Result<Response> {
        let company_name = required_text("company_name", &self.company_name)?;
        let amount = parse_amount("amount", &self.amount)?;
        Ok(Response::new(
            self.date_received,
            amount,
            company_name,
            self.linked_letter_id,
            self.notes.clone(),
        ))
    }
}

/// Input for a new company. The response rate is entered as a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompanyDraft {
    /// Company name (required)
    pub name: String,
    /// Postal address (required)
    pub address: String,
    /// Response rate in percent, 0 to 100 (required)
    pub response_rate_percent: String,
    /// Lowest typical response (required)
    pub expected_min: String,
    /// Highest typical response (required)
    pub expected_max: String,
    /// Free-form notes
    pub notes: String,
}

impl CompanyDraft {
    /// Whether the save affordance should be enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        [
            self.name.as_str(),
            self.address.as_str(),
            self.response_rate_percent.as_str(),
            self.expected_min.as_str(),
            self.expected_max.as_str(),
        ]
        .into_iter()
        .all(is_filled)
    }

    /// Parses the draft into a new company last updated at `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> Result<Company> {
        let name = required_text("name", &self.name)?;
        let address = required_text("address", &self.address)?;
        let percent = parse_number("response_rate", &self.response_rate_percent)?;
        if !(0.0..=100.0).contains(&percent) {
            return Err(Error::Validation {
                field: "response_rate",
                message: format!("{percent} is not between 0 and 100"),
            });
        }
        let min = parse_amount("expected_min", &self.expected_min)?;
        let max = parse_amount("expected_max", &self.expected_max)?;
        let range = ResponseRange::new(min, max)?;

        Ok(Company::new(
            name,
            address,
            percent / 100.0,
            range,
            now,
            self.notes.clone(),
        ))
    }
}

/// Input for a new supply purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyDraft {
    /// What was bought (required)
    pub name: String,
    /// Units bought
    pub quantity: u32,
    /// Amount paid (required)
    pub cost: String,
    /// When it was bought
    pub date_purchased: DateTime<Utc>,
    /// Free-form notes
    pub notes: String,
}

impl SupplyDraft {
    /// Empty draft dated `now` with one unit.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            name: String::new(),
            quantity: 1,
            cost: String::new(),
            date_purchased: now,
            notes: String::new(),
        }
    }

    /// Fills name and cost from a quick-add preset.
    pub fn apply_preset(&mut self, preset: &SupplyPreset) {
        self.name = preset.name.to_string();
        self.cost = format!("{:.2}", preset.cost);
    }

    /// Whether the save affordance should be enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        is_filled(&self.name) && is_filled(&self.cost)
    }

    /// Parses the draft into a new supply.
    pub fn validate(&self) -> Result<Supply> {
        let name = required_text("name", &self.name)?;
        let quantity = check_quantity("quantity", self.quantity)?;
        let cost = parse_amount("cost", &self.cost)?;
        Ok(Supply::new(
            name,
            quantity,
            cost,
            self.date_purchased,
            self.notes.clone(),
        ))
    }
}

/// Input for a new calendar note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    /// Title (required)
    pub title: String,
    /// Day the note belongs to
    pub date: DateTime<Utc>,
    /// Tag
    pub note_type: NoteType,
    /// Body
    pub notes: String,
}

impl NoteDraft {
    /// Empty general note dated `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            date: now,
            note_type: NoteType::General,
            notes: String::new(),
        }
    }

    /// Whether the save affordance should be enabled.
    #[must_use]
    pub fn can_save(&self) -> bool {
        is_filled(&self.title)
    }

    /// Parses the draft into a new note.
    pub fn validate(&self) -> Result<CalendarNote> {
        let title = required_text("title", &self.title)?;
        Ok(CalendarNote::new(
            self.date,
            title,
            self.notes.clone(),
            self.note_type,
        ))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_letter_draft_validation() {
        let now = Utc::now();
        let mut draft = LetterDraft::new(now);
        assert!(!draft.can_save());
        assert!(matches!(
            draft.validate(),
            Err(Error::Validation { field: "company_name", .. })
        ));

        draft.company_name = "  Bellagio ".to_string();
        draft.expected_response = "abc".to_string();
        assert!(draft.can_save(), "Save is enabled once fields are filled");
        assert!(matches!(
            draft.validate(),
            Err(Error::Validation { field: "expected_response", .. })
        ));

        draft.expected_response = "-5".to_string();
        assert!(matches!(draft.validate(), Err(Error::InvalidAmount { amount }) if amount == -5.0));

        draft.expected_response = "75.5".to_string();
        draft.quantity = 3;
        let letter = draft.validate().unwrap();
        assert_eq!(letter.company_name, "Bellagio");
        assert_eq!(letter.expected_response, 75.5);
        assert_eq!(letter.quantity, 3);
        assert_eq!(letter.date_sent, now);
        assert!(!letter.is_confirmed);
    }

    #[test]
    fn test_quantity_bounds() {
        let mut draft = LetterDraft::new(Utc::now());
        draft.company_name = "X".to_string();
        draft.expected_response = "1".to_string();
        draft.quantity = 0;
        assert!(matches!(draft.validate(), Err(Error::Validation { field: "quantity", .. })));
        draft.quantity = MAX_QUANTITY + 1;
        assert!(draft.validate().is_err());
        draft.quantity = MAX_QUANTITY;
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn test_response_draft_keeps_link() {
        let mut draft = ResponseDraft::new(Utc::now());
        let letter_id = Uuid::new_v4();
        draft.company_name = "MGM Grand".to_string();
        draft.amount = "150".to_string();
        draft.linked_letter_id = Some(letter_id);

        let response = draft.validate().unwrap();
        assert_eq!(response.amount, 150.0);
        assert_eq!(response.linked_letter_id, Some(letter_id));
    }

    #[test]
    fn test_company_draft_percent_and_range() {
        let now = Utc::now();
        let mut draft = CompanyDraft {
            name: "Wynn".to_string(),
            address: "3131 S Las Vegas Blvd".to_string(),
            response_rate_percent: "20".to_string(),
            expected_min: "150".to_string(),
            expected_max: "50".to_string(),
            notes: String::new(),
        };
        assert!(draft.can_save());
        assert!(matches!(
            draft.validate(now),
            Err(Error::Validation { field: "expected_response_range", .. })
        ));

        draft.expected_max = "300".to_string();
        let company = draft.validate(now).unwrap();
        assert_eq!(company.response_rate, 0.2);
        assert_eq!(company.expected_response_range.min, 150.0);
        assert_eq!(company.last_updated, now);

        draft.response_rate_percent = "120".to_string();
        assert!(matches!(
            draft.validate(now),
            Err(Error::Validation { field: "response_rate", .. })
        ));

        draft.address.clear();
        assert!(!draft.can_save());
    }

    #[test]
    fn test_supply_preset_fills_form() {
        let mut draft = SupplyDraft::new(Utc::now());
        draft.apply_preset(&SUPPLY_PRESETS[0]);
        assert_eq!(draft.name, "Stamps");
        assert_eq!(draft.cost, "0.66");
        assert!(draft.can_save());

        let supply = draft.validate().unwrap();
        assert_eq!(supply.cost, 0.66);
        assert_eq!(supply.quantity, 1);
    }

    #[test]
    fn test_note_draft() {
        let mut draft = NoteDraft::new(Utc::now());
        assert!(!draft.can_save());
        draft.title = "Mail batch".to_string();
        draft.note_type = NoteType::Letter;
        let note = draft.validate().unwrap();
        assert_eq!(note.title, "Mail batch");
        assert_eq!(note.note_type, NoteType::Letter);
    }
}
