//! Shared test utilities.
//!
//! Helpers for setting up in-memory databases and building records with
//! sensible defaults.

use crate::{
    config::{database::create_tables, default_company_seeds},
    core::{Tracker, TrackerState, persistence::BlobKey},
    errors::Result,
    models::{CalendarNote, Letter, NoteType, Response, Supply, SubscriptionType},
};
use chrono::{Duration, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Routes tracing output to the test harness. Safe to call from every test.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// Opens a tracker on a fresh in-memory database with the built-in seeds.
pub async fn setup_tracker() -> Result<Tracker> {
    let db = setup_test_db().await?;
    Ok(Tracker::open(db, default_company_seeds()).await)
}

/// Makes every write to `key` fail, to exercise partial-save handling.
pub async fn install_failing_write_trigger(db: &DatabaseConnection, key: BlobKey) -> Result<()> {
    for event in ["INSERT", "UPDATE"] {
        let sql = format!(
            "CREATE TRIGGER reject_{event}_{key} BEFORE {event} ON stored_blobs \
             WHEN NEW.key = '{key}' BEGIN SELECT RAISE(ABORT, 'write rejected'); END;",
        );
        db.execute_unprepared(&sql).await?;
    }
    Ok(())
}

/// An unconfirmed letter to "Test Company" sent now.
pub fn letter_with(expected_response: f64, quantity: u32) -> Letter {
    Letter::new(Utc::now(), "Test Company", expected_response, quantity, "")
}

/// A response from "Test Company" received now.
pub fn response_for(linked_letter_id: Option<Uuid>, amount: f64) -> Response {
    Response::new(Utc::now(), amount, "Test Company", linked_letter_id, "")
}

/// Default state with the built-in seed companies.
pub fn sample_state() -> TrackerState {
    let now = Utc::now();
    TrackerState {
        companies: default_company_seeds()
            .iter()
            .filter_map(|seed| seed.to_company(now).ok())
            .collect(),
        ..TrackerState::default()
    }
}

/// A state with something in every collection and non-default singletons.
pub fn populated_state() -> TrackerState {
    let now = Utc::now();
    let mut state = sample_state();

    let mut answered = Letter::new(now - Duration::days(20), "Bellagio", 100.0, 2, "handwritten");
    answered.is_confirmed = true;
    let pending = Letter::new(now - Duration::days(3), "MGM Grand", 35.5, 1, "");
    state.responses.push(Response::new(
        now - Duration::days(2),
        150.0,
        "Bellagio",
        Some(answered.id),
        "dinner comp",
    ));
    state
        .responses
        .push(Response::new(now, 25.0, "Caesars Palace", None, ""));
    state.letters.push(answered);
    state.letters.push(pending);

    state
        .supplies
        .push(Supply::new("Stamps", 20, 13.2, now - Duration::days(30), "forever stamps"));
    state.calendar_notes.push(CalendarNote::new(
        now + Duration::days(1),
        "Mail next batch",
        "Bellagio and Venetian",
        NoteType::Letter,
    ));

    state.user_profile.username = "writer".to_string();
    state.user_profile.email = "writer@example.com".to_string();
    state.user_profile.postal_codes = vec!["89109".to_string(), "10001".to_string()];
    state.user_profile.subscription_type = SubscriptionType::Monthly;
    state.settings.follow_up_reminder_days = 21;
    state.settings.notifications_enabled = false;
    state
}
