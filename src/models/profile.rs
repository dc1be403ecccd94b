//! User profile and settings - the two singleton records.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Length of the free trial.
pub const TRIAL_LENGTH_DAYS: i64 = 7;

/// Subscription plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    /// Free trial, expires after [`TRIAL_LENGTH_DAYS`]
    #[default]
    Trial,
    /// Paid monthly
    Monthly,
    /// Paid yearly
    Yearly,
}

/// Who is using the app and on which plan.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Display name
    #[serde(default)]
    pub username: String,
    /// Contact address
    #[serde(default)]
    pub email: String,
    /// Postal codes the user mails from
    #[serde(default)]
    pub postal_codes: Vec<String>,
    /// Current plan
    #[serde(default)]
    pub subscription_type: SubscriptionType,
    /// When the trial started
    pub trial_start_date: DateTime<Utc>,
}

impl UserProfile {
    /// A fresh profile whose trial starts at `now`.
    #[must_use]
    pub fn starting_trial(now: DateTime<Utc>) -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            postal_codes: Vec::new(),
            subscription_type: SubscriptionType::Trial,
            trial_start_date: now,
        }
    }

    /// Instant the trial ends.
    #[must_use]
    pub fn trial_end(&self) -> DateTime<Utc> {
        self.trial_start_date + Duration::days(TRIAL_LENGTH_DAYS)
    }
}

impl Default for UserProfile {
    fn default() -> Self {
        Self::starting_trial(Utc::now())
    }
}

/// App preferences.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserSettings {
    /// ISO currency code used for display
    pub currency: String,
    /// Days after sending before a pending letter needs a follow-up
    pub follow_up_reminder_days: u32,
    /// Whether reminders are delivered
    pub notifications_enabled: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            currency: "USD".to_string(),
            follow_up_reminder_days: 30,
            notifications_enabled: true,
        }
    }
}
