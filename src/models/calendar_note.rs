//! Calendar note record - a dated annotation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What a calendar note is about.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteType {
    /// About a letter
    Letter,
    /// About a response
    Response,
    /// About a supply purchase
    Supply,
    /// Anything else
    #[default]
    General,
}

/// A note pinned to a date on the calendar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarNote {
    /// Unique identifier, never reused
    pub id: Uuid,
    /// Day the note belongs to
    pub date: DateTime<Utc>,
    /// Short title
    pub title: String,
    /// Body text
    #[serde(default)]
    pub notes: String,
    /// Tag
    #[serde(rename = "type", default)]
    pub note_type: NoteType,
}

impl CalendarNote {
    /// Creates a note with a fresh id.
    #[must_use]
    pub fn new(
        date: DateTime<Utc>,
        title: impl Into<String>,
        notes: impl Into<String>,
        note_type: NoteType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            title: title.into(),
            notes: notes.into(),
            note_type,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_note_type_serializes_as_type_field() {
        let note = CalendarNote::new(Utc::now(), "Buy stamps", "", NoteType::Supply);
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["type"], "supply");
        assert!(json.get("noteType").is_none());
    }
}
