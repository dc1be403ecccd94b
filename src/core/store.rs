//! The tracker store - single source of truth for all tracked records.
//!
//! A [`Tracker`] is constructed once at startup with [`Tracker::open`] and
//! handed by reference to whatever needs it. Every mutation updates the
//! in-memory state, writes all blobs through [`persistence`], and then
//! notifies subscribers. Persistence problems are logged and reported but
//! never block a mutation.

use crate::{
    config::CompanySeed,
    core::{
        metrics::DashboardMetrics,
        persistence::{self, BlobKey, LoadReport, SaveReport},
        query,
        state::{Collection, TrackerState},
        transfer::{self, ImportSummary},
    },
    errors::Result,
    models::{
        CalendarNote, Company, Letter, Record, Response, Supply, UserProfile, UserSettings,
    },
};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::collections::BTreeSet;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

const EVENT_CAPACITY: usize = 64;

/// Change notifications sent to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// State was (re)loaded from storage
    Loaded,
    /// One blob's content changed
    Changed(BlobKey),
    /// Everything was cleared and re-seeded
    Reset,
    /// State was replaced by an import
    Imported,
}

/// Observable in-memory store backed by the key-value table.
#[derive(Debug)]
pub struct Tracker {
    db: DatabaseConnection,
    state: TrackerState,
    seeds: Vec<CompanySeed>,
    events: broadcast::Sender<TrackerEvent>,
}

impl Tracker {
    /// Loads state from `db` and seeds companies if there are none.
    #[instrument(skip(db, seeds))]
    pub async fn open(db: DatabaseConnection, seeds: Vec<CompanySeed>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let mut tracker = Self {
            db,
            state: TrackerState::default(),
            seeds,
            events,
        };

        let report = tracker.load().await;
        if !report.corrupt.is_empty() {
            warn!("Started with {} unreadable blobs", report.corrupt.len());
        }

        if tracker.state.companies.is_empty() {
            tracker.seed_defaults().await;
        }

        info!("Tracker ready");
        tracker
    }

    /// Current state, read-only.
    #[must_use]
    pub const fn state(&self) -> &TrackerState {
        &self.state
    }

    /// Letters in insertion order.
    #[must_use]
    pub fn letters(&self) -> &[Letter] {
        &self.state.letters
    }

    /// Responses in insertion order.
    #[must_use]
    pub fn responses(&self) -> &[Response] {
        &self.state.responses
    }

    /// Companies in insertion order.
    #[must_use]
    pub fn companies(&self) -> &[Company] {
        &self.state.companies
    }

    /// Supplies in insertion order.
    #[must_use]
    pub fn supplies(&self) -> &[Supply] {
        &self.state.supplies
    }

    /// Calendar notes in insertion order.
    #[must_use]
    pub fn calendar_notes(&self) -> &[CalendarNote] {
        &self.state.calendar_notes
    }

    /// The user's profile.
    #[must_use]
    pub const fn user_profile(&self) -> &UserProfile {
        &self.state.user_profile
    }

    /// App preferences.
    #[must_use]
    pub const fn settings(&self) -> &UserSettings {
        &self.state.settings
    }

    /// Receives every change made after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: TrackerEvent) {
        // No receivers is fine.
        let _ = self.events.send(event);
    }

    /// Replaces in-memory state with what is stored. Never fails; unreadable
    /// blobs come back as defaults and are listed in the report.
    pub async fn load(&mut self) -> LoadReport {
        let (state, report) = persistence::load_state(&self.db).await;
        self.state = state;
        self.notify(TrackerEvent::Loaded);
        report
    }

    /// Writes every blob. Failures are logged and listed in the report.
    pub async fn save(&self) -> SaveReport {
        let report = persistence::save_state(&self.db, &self.state).await;
        if !report.is_complete() {
            error!("{} of {} blobs failed to save", report.failed.len(), BlobKey::ALL.len());
        }
        report
    }

    async fn commit(&self, key: BlobKey) -> SaveReport {
        let report = self.save().await;
        self.notify(TrackerEvent::Changed(key));
        report
    }

    /// Replaces the company list with the configured seeds and persists.
    pub async fn seed_defaults(&mut self) -> SaveReport {
        let now = Utc::now();
        self.state.companies = self
            .seeds
            .iter()
            .filter_map(|seed| {
                seed.to_company(now)
                    .inspect_err(|e| warn!("Skipping seed company '{}': {}", seed.name, e))
                    .ok()
            })
            .collect();
        info!("Seeded {} companies", self.state.companies.len());
        self.commit(BlobKey::Companies).await
    }

    /// Appends a letter and persists.
    pub async fn add_letter(&mut self, letter: Letter) -> SaveReport {
        let letter = storable(letter, Letter::normalize);
        debug!("Adding letter {} to {}", letter.id, letter.company_name);
        self.state.letters.push(letter);
        self.commit(BlobKey::Letters).await
    }

    /// Appends a response and persists. A linked letter is confirmed in the
    /// same mutation; an unknown link leaves every letter untouched.
    pub async fn add_response(&mut self, response: Response) -> SaveReport {
        let response = storable(response, Response::normalize);
        debug!("Adding response {} from {}", response.id, response.company_name);
        let linked = response.linked_letter_id;
        self.state.responses.push(response);
        let confirmed = linked.is_some_and(|id| self.confirm_in_memory(id));
        let report = self.commit(BlobKey::Responses).await;
        if confirmed {
            self.notify(TrackerEvent::Changed(BlobKey::Letters));
        }
        report
    }

    /// Appends a company and persists.
    pub async fn add_company(&mut self, company: Company) -> SaveReport {
        let company = storable(company, Company::normalize);
        self.state.companies.push(company);
        self.commit(BlobKey::Companies).await
    }

    /// Appends a supply purchase and persists.
    pub async fn add_supply(&mut self, supply: Supply) -> SaveReport {
        let supply = storable(supply, Supply::normalize);
        self.state.supplies.push(supply);
        self.commit(BlobKey::Supplies).await
    }

    /// Appends a calendar note and persists.
    pub async fn add_note(&mut self, note: CalendarNote) -> SaveReport {
        self.state.calendar_notes.push(note);
        self.commit(BlobKey::CalendarNotes).await
    }

    /// Replaces the letter with the same id. Returns false if there is none.
    pub async fn replace_letter(&mut self, letter: Letter) -> bool {
        let letter = storable(letter, Letter::normalize);
        let replaced = replace_record(&mut self.state.letters, letter);
        if replaced {
            self.commit(BlobKey::Letters).await;
        }
        replaced
    }

    /// Replaces the response with the same id, confirming its linked letter.
    pub async fn replace_response(&mut self, response: Response) -> bool {
        let response = storable(response, Response::normalize);
        let linked = response.linked_letter_id;
        let replaced = replace_record(&mut self.state.responses, response);
        if replaced {
            let confirmed = linked.is_some_and(|id| self.confirm_in_memory(id));
            self.commit(BlobKey::Responses).await;
            if confirmed {
                self.notify(TrackerEvent::Changed(BlobKey::Letters));
            }
        }
        replaced
    }

    /// Replaces the company with the same id.
    pub async fn replace_company(&mut self, company: Company) -> bool {
        let company = storable(company, Company::normalize);
        let replaced = replace_record(&mut self.state.companies, company);
        if replaced {
            self.commit(BlobKey::Companies).await;
        }
        replaced
    }

    /// Replaces the supply with the same id.
    pub async fn replace_supply(&mut self, supply: Supply) -> bool {
        let supply = storable(supply, Supply::normalize);
        let replaced = replace_record(&mut self.state.supplies, supply);
        if replaced {
            self.commit(BlobKey::Supplies).await;
        }
        replaced
    }

    /// Replaces the note with the same id.
    pub async fn replace_note(&mut self, note: CalendarNote) -> bool {
        let replaced = replace_record(&mut self.state.calendar_notes, note);
        if replaced {
            self.commit(BlobKey::CalendarNotes).await;
        }
        replaced
    }

    /// Replaces the user profile and persists.
    pub async fn update_profile(&mut self, profile: UserProfile) -> SaveReport {
        self.state.user_profile = profile;
        self.commit(BlobKey::UserProfile).await
    }

    /// Replaces the settings and persists.
    pub async fn update_settings(&mut self, settings: UserSettings) -> SaveReport {
        self.state.settings = settings;
        self.commit(BlobKey::Settings).await
    }

    /// Removes the records at `indices` from `collection`. Out-of-range
    /// indices are ignored. Nothing cascades: responses linked to a deleted
    /// letter keep their dangling link.
    pub async fn delete_at(&mut self, collection: Collection, indices: &BTreeSet<usize>) -> usize {
        let removed = match collection {
            Collection::Letters => remove_indices(&mut self.state.letters, indices),
            Collection::Responses => remove_indices(&mut self.state.responses, indices),
            Collection::Companies => remove_indices(&mut self.state.companies, indices),
            Collection::Supplies => remove_indices(&mut self.state.supplies, indices),
            Collection::CalendarNotes => remove_indices(&mut self.state.calendar_notes, indices),
        };

        debug!("Removed {} records from {:?}", removed, collection);
        if removed > 0 {
            self.commit(blob_key_for(collection)).await;
        }
        removed
    }

    fn confirm_in_memory(&mut self, letter_id: Uuid) -> bool {
        match self.state.letters.iter_mut().find(|l| l.id == letter_id) {
            Some(letter) => {
                letter.is_confirmed = true;
                true
            }
            None => {
                debug!("Link target {} not found, no letter confirmed", letter_id);
                false
            }
        }
    }

    /// Marks a letter as confirmed by hand. Confirming twice is harmless.
    /// Returns false if no letter has this id.
    pub async fn set_confirmed(&mut self, letter_id: Uuid) -> bool {
        let Some(letter) = self.state.letters.iter_mut().find(|l| l.id == letter_id) else {
            debug!("No letter {} to confirm", letter_id);
            return false;
        };

        if !letter.is_confirmed {
            letter.is_confirmed = true;
            self.commit(BlobKey::Letters).await;
        }
        true
    }

    /// Clears all five record collections, re-seeds companies and persists.
    /// Profile and settings are kept.
    pub async fn reset_all(&mut self) -> SaveReport {
        info!("Resetting all tracked data");
        self.state.clear_records();
        let report = self.seed_defaults().await;
        self.notify(TrackerEvent::Reset);
        report
    }

    /// Pretty-printed backup of the current state, stamped with the current time.
    pub fn export_bundle(&self) -> Result<String> {
        transfer::export_text(&self.state, Utc::now())
    }

    /// Replaces all seven collections from a backup and persists.
    ///
    /// # Errors
    /// Returns [`crate::errors::Error::Import`] if the text is not a
    /// complete bundle; the current state is left exactly as it was.
    pub async fn import_bundle(&mut self, text: &str) -> Result<ImportSummary> {
        let bundle = transfer::parse_bundle(text)
            .inspect_err(|e| warn!("Rejected import: {}", e))?;

        self.state = bundle.into_state();
        let summary = ImportSummary::of(&self.state);
        self.save().await;
        self.notify(TrackerEvent::Imported);
        info!("{}", summary);
        Ok(summary)
    }

    /// The letter a response is linked to, if it still exists.
    #[must_use]
    pub fn linked_letter(&self, response: &Response) -> Option<&Letter> {
        query::linked_letter(&self.state.letters, response)
    }

    /// Every derived metric as of `now`.
    #[must_use]
    pub fn dashboard(&self, now: DateTime<Utc>) -> DashboardMetrics {
        DashboardMetrics::compute(&self.state, now)
    }
}

const fn blob_key_for(collection: Collection) -> BlobKey {
    match collection {
        Collection::Letters => BlobKey::Letters,
        Collection::Responses => BlobKey::Responses,
        Collection::Companies => BlobKey::Companies,
        Collection::Supplies => BlobKey::Supplies,
        Collection::CalendarNotes => BlobKey::CalendarNotes,
    }
}

/// Applies `normalize` to a record about to be stored, logging when it had
/// values that cannot be persisted as-is.
fn storable<T: Record>(mut record: T, normalize: fn(&mut T) -> bool) -> T {
    if normalize(&mut record) {
        warn!("Record {} had non-finite or zero values, stored normalized", record.id());
    }
    record
}

fn replace_record<T: Record>(records: &mut [T], record: T) -> bool {
    match records.iter_mut().find(|r| r.id() == record.id()) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

fn remove_indices<T>(records: &mut Vec<T>, indices: &BTreeSet<usize>) -> usize {
    let mut removed = 0;
    for &index in indices.iter().rev() {
        if index < records.len() {
            records.remove(index);
            removed += 1;
        }
    }
    removed
}
