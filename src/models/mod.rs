//! Record types tracked by the store.
//!
//! Every type here serializes to the JSON shape stored under its blob key and
//! carried inside export bundles: camelCase field names, UUID ids, RFC 3339
//! timestamps.

pub mod calendar_note;
pub mod company;
pub mod letter;
pub mod profile;
pub mod response;
pub mod supply;

pub use calendar_note::{CalendarNote, NoteType};
pub use company::{Company, ResponseRange};
pub use letter::Letter;
pub use profile::{SubscriptionType, TRIAL_LENGTH_DAYS, UserProfile, UserSettings};
pub use response::Response;
pub use supply::Supply;

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

/// A record with a stable identity, replaceable by id.
pub trait Record {
    /// The record's immutable id
    fn id(&self) -> Uuid;
}

macro_rules! impl_record {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Record for $ty {
                fn id(&self) -> Uuid {
                    self.id
                }
            }
        )*
    };
}

impl_record!(Letter, Response, Company, Supply, CalendarNote);

pub(crate) const fn default_quantity() -> u32 {
    1
}

/// NaN and infinities have no JSON form; they are stored as zero.
#[must_use]
pub fn finite_or_zero(amount: f64) -> f64 {
    if amount.is_finite() { amount } else { 0.0 }
}

/// Decodes a quantity, raising zero to 1.
pub(crate) fn quantity_at_least_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    u32::deserialize(deserializer).map(|quantity| quantity.max(1))
}

/// Decodes a money value. `null` (how a non-finite value was once written)
/// reads as zero instead of failing the whole collection.
pub(crate) fn amount_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(|amount| amount.map_or(0.0, finite_or_zero))
}
