//! The full set of tracked data, as one plain value.

use crate::models::{CalendarNote, Company, Letter, Response, Supply, UserProfile, UserSettings};
use serde::{Deserialize, Serialize};

/// Every collection and singleton record the tracker owns.
///
/// This is a plain value; the [`Tracker`](crate::core::store::Tracker) wraps it
/// with persistence and change notification.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerState {
    /// Letters in insertion order
    pub letters: Vec<Letter>,
    /// Responses in insertion order
    pub responses: Vec<Response>,
    /// Companies in insertion order
    pub companies: Vec<Company>,
    /// Supplies in insertion order
    pub supplies: Vec<Supply>,
    /// Calendar notes in insertion order
    pub calendar_notes: Vec<CalendarNote>,
    /// The user's profile
    pub user_profile: UserProfile,
    /// App preferences
    pub settings: UserSettings,
}

/// The five list-shaped collections, for index-based deletion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    /// [`TrackerState::letters`]
    Letters,
    /// [`TrackerState::responses`]
    Responses,
    /// [`TrackerState::companies`]
    Companies,
    /// [`TrackerState::supplies`]
    Supplies,
    /// [`TrackerState::calendar_notes`]
    CalendarNotes,
}

impl TrackerState {
    /// Number of records in `collection`.
    #[must_use]
    pub fn len_of(&self, collection: Collection) -> usize {
        match collection {
            Collection::Letters => self.letters.len(),
            Collection::Responses => self.responses.len(),
            Collection::Companies => self.companies.len(),
            Collection::Supplies => self.supplies.len(),
            Collection::CalendarNotes => self.calendar_notes.len(),
        }
    }

    /// Empties the five record collections. Profile and settings are kept.
    pub fn clear_records(&mut self) {
        self.letters.clear();
        self.responses.clear();
        self.companies.clear();
        self.supplies.clear();
        self.calendar_notes.clear();
    }
}
