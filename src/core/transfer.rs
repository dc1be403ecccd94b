//! Export/import bundle - the user-facing backup format.
//!
//! An export is pretty-printed JSON holding all seven collections plus an
//! `exportDate`. Import is all-or-nothing: every field must be present and
//! decode, otherwise nothing is applied and the caller gets an error.

use crate::core::state::TrackerState;
use crate::errors::{Error, Result};
use crate::models::{CalendarNote, Company, Letter, Response, Supply, UserProfile, UserSettings};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serialized backup of the whole tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    /// Letters
    pub letters: Vec<Letter>,
    /// Responses
    pub responses: Vec<Response>,
    /// Companies
    pub companies: Vec<Company>,
    /// Supplies
    pub supplies: Vec<Supply>,
    /// Calendar notes
    pub calendar_notes: Vec<CalendarNote>,
    /// User profile
    pub user_profile: UserProfile,
    /// Settings
    pub settings: UserSettings,
    /// When the export was taken; ignored on import
    pub export_date: DateTime<Utc>,
}

impl ExportBundle {
    /// Snapshot of `state` stamped with `export_date`.
    #[must_use]
    pub fn from_state(state: &TrackerState, export_date: DateTime<Utc>) -> Self {
        Self {
            letters: state.letters.clone(),
            responses: state.responses.clone(),
            companies: state.companies.clone(),
            supplies: state.supplies.clone(),
            calendar_notes: state.calendar_notes.clone(),
            user_profile: state.user_profile.clone(),
            settings: state.settings.clone(),
            export_date,
        }
    }

    /// Drops the export date and returns the state it carries.
    #[must_use]
    pub fn into_state(self) -> TrackerState {
        TrackerState {
            letters: self.letters,
            responses: self.responses,
            companies: self.companies,
            supplies: self.supplies,
            calendar_notes: self.calendar_notes,
            user_profile: self.user_profile,
            settings: self.settings,
        }
    }
}

/// Renders `state` as a pretty-printed export.
pub fn export_text(state: &TrackerState, export_date: DateTime<Utc>) -> Result<String> {
    let bundle = ExportBundle::from_state(state, export_date);
    Ok(serde_json::to_string_pretty(&bundle)?)
}

/// Parses an export. Any structural problem rejects the whole bundle.
pub fn parse_bundle(text: &str) -> Result<ExportBundle> {
    if text.trim().is_empty() {
        return Err(Error::Import {
            message: "nothing to import".to_string(),
        });
    }

    serde_json::from_str(text).map_err(|e| Error::Import {
        message: e.to_string(),
    })
}

/// Record counts of a successful import, for the confirmation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Letters imported
    pub letters: usize,
    /// Responses imported
    pub responses: usize,
    /// Companies imported
    pub companies: usize,
    /// Supplies imported
    pub supplies: usize,
    /// Calendar notes imported
    pub calendar_notes: usize,
}

impl ImportSummary {
    /// Counts the records in `state`.
    #[must_use]
    pub fn of(state: &TrackerState) -> Self {
        Self {
            letters: state.letters.len(),
            responses: state.responses.len(),
            companies: state.companies.len(),
            supplies: state.supplies.len(),
            calendar_notes: state.calendar_notes.len(),
        }
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Data imported successfully! ({} letters, {} responses, {} companies, {} supplies, {} notes)",
            self.letters, self.responses, self.companies, self.supplies, self.calendar_notes
        )
    }
}
