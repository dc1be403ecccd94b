//! Core business logic - the tracker store and everything it computes.
//!
//! Framework-agnostic: nothing here knows about the command line.

/// Form drafts and input validation
pub mod forms;
/// Derived metrics over the tracked collections
pub mod metrics;
/// Per-key blob persistence
pub mod persistence;
/// Search, lookup and activity queries
pub mod query;
/// Dashboard text rendering
pub mod report;
/// Tracked state value and collection names
pub mod state;
/// The observable tracker store
pub mod store;
/// Export/import bundle
pub mod transfer;

pub use state::{Collection, TrackerState};
pub use store::{Tracker, TrackerEvent};
