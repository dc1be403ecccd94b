//! Key-value persistence for the tracker state.
//!
//! State is stored as seven independent JSON blobs in the `stored_blobs` table.
//! Each blob is read and written on its own: a missing or corrupt blob falls
//! back to its default without affecting the others, and a failed write is
//! recorded without stopping the remaining writes.

use crate::{
    core::state::TrackerState,
    entities::{StoredBlob, stored_blob},
    errors::Result,
};
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use serde::de::DeserializeOwned;
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

/// Stable persistence keys, one per collection or singleton record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlobKey {
    /// Letter collection
    Letters,
    /// Response collection
    Responses,
    /// Company collection
    Companies,
    /// Supply collection
    Supplies,
    /// Calendar note collection
    CalendarNotes,
    /// User profile record
    UserProfile,
    /// Settings record
    Settings,
}

impl BlobKey {
    /// All keys, in load and save order.
    pub const ALL: [Self; 7] = [
        Self::Letters,
        Self::Responses,
        Self::Companies,
        Self::Supplies,
        Self::CalendarNotes,
        Self::UserProfile,
        Self::Settings,
    ];

    /// The string stored in the key column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Letters => "letters",
            Self::Responses => "responses",
            Self::Companies => "companies",
            Self::Supplies => "supplies",
            Self::CalendarNotes => "calendarNotes",
            Self::UserProfile => "userProfile",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for BlobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened while loading. Keys not listed loaded normally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Keys with no stored blob
    pub missing: Vec<BlobKey>,
    /// Keys whose blob could not be read or decoded, with the reason
    pub corrupt: Vec<(BlobKey, String)>,
}

impl LoadReport {
    /// True when every blob was present and decoded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.corrupt.is_empty()
    }
}

/// What happened while saving.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Keys written successfully
    pub written: Vec<BlobKey>,
    /// Keys that failed, with the reason
    pub failed: Vec<(BlobKey, String)>,
}

impl SaveReport {
    /// True when every key was written.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Reads the raw blob stored under `key`.
pub async fn read_blob<C>(db: &C, key: BlobKey) -> Result<Option<String>>
where
    C: ConnectionTrait,
{
    let row = StoredBlob::find()
        .filter(stored_blob::Column::Key.eq(key.as_str()))
        .one(db)
        .await?;
    Ok(row.map(|r| r.value))
}

/// Writes `value` under `key`, inserting or updating the row.
pub async fn write_blob<C>(db: &C, key: BlobKey, value: String) -> Result<()>
where
    C: ConnectionTrait,
{
    let now = Utc::now();

    let existing = StoredBlob::find()
        .filter(stored_blob::Column::Key.eq(key.as_str()))
        .one(db)
        .await?;

    if let Some(row) = existing {
        let mut active_model: stored_blob::ActiveModel = row.into();
        active_model.value = Set(value);
        active_model.updated_at = Set(now);
        active_model.update(db).await?;
    } else {
        let active_model = stored_blob::ActiveModel {
            key: Set(key.as_str().to_string()),
            value: Set(value),
            updated_at: Set(now),
            ..Default::default()
        };
        active_model.insert(db).await?;
    }

    debug!("Wrote blob '{}'", key);
    Ok(())
}

/// Loads one blob, substituting the default on absence or any failure.
async fn load_blob<C, T>(db: &C, key: BlobKey, report: &mut LoadReport) -> T
where
    C: ConnectionTrait,
    T: DeserializeOwned + Default,
{
    let raw = match read_blob(db, key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!("No stored blob for '{}', using default", key);
            report.missing.push(key);
            return T::default();
        }
        Err(e) => {
            warn!("Failed to read blob '{}', using default: {}", key, e);
            report.corrupt.push((key, e.to_string()));
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored blob '{}' is corrupt, using default: {}", key, e);
            report.corrupt.push((key, e.to_string()));
            T::default()
        }
    }
}

/// Loads the whole state, one blob at a time. Never fails.
#[instrument(skip(db))]
pub async fn load_state<C>(db: &C) -> (TrackerState, LoadReport)
where
    C: ConnectionTrait,
{
    let mut report = LoadReport::default();
    let state = TrackerState {
        letters: load_blob(db, BlobKey::Letters, &mut report).await,
        responses: load_blob(db, BlobKey::Responses, &mut report).await,
        companies: load_blob(db, BlobKey::Companies, &mut report).await,
        supplies: load_blob(db, BlobKey::Supplies, &mut report).await,
        calendar_notes: load_blob(db, BlobKey::CalendarNotes, &mut report).await,
        user_profile: load_blob(db, BlobKey::UserProfile, &mut report).await,
        settings: load_blob(db, BlobKey::Settings, &mut report).await,
    };

    info!(
        "Loaded {} letters, {} responses, {} companies, {} supplies, {} notes",
        state.letters.len(),
        state.responses.len(),
        state.companies.len(),
        state.supplies.len(),
        state.calendar_notes.len()
    );
    (state, report)
}

/// Serializes the part of `state` stored under `key`.
fn encode_blob(state: &TrackerState, key: BlobKey) -> serde_json::Result<String> {
    match key {
        BlobKey::Letters => serde_json::to_string(&state.letters),
        BlobKey::Responses => serde_json::to_string(&state.responses),
        BlobKey::Companies => serde_json::to_string(&state.companies),
        BlobKey::Supplies => serde_json::to_string(&state.supplies),
        BlobKey::CalendarNotes => serde_json::to_string(&state.calendar_notes),
        BlobKey::UserProfile => serde_json::to_string(&state.user_profile),
        BlobKey::Settings => serde_json::to_string(&state.settings),
    }
}

/// Writes every blob of `state`. A failure on one key does not stop the rest.
#[instrument(skip(db, state))]
pub async fn save_state<C>(db: &C, state: &TrackerState) -> SaveReport
where
    C: ConnectionTrait,
{
    let mut report = SaveReport::default();

    for key in BlobKey::ALL {
        let outcome = match encode_blob(state, key) {
            Ok(value) => write_blob(db, key, value).await,
            Err(e) => Err(e.into()),
        };

        match outcome {
            Ok(()) => report.written.push(key),
            Err(e) => {
                error!("Failed to save blob '{}': {}", key, e);
                report.failed.push((key, e.to_string()));
            }
        }
    }

    report
}
