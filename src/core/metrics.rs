//! Derived metrics over the tracked collections.
//!
//! Every function here is pure and recomputed on each call; nothing is cached.
//! Dashboard formatting lives in [`crate::core::report`].

use crate::core::state::TrackerState;
use crate::models::{Letter, Response, SubscriptionType, Supply, UserProfile};
use chrono::{DateTime, Utc};

/// Letters sent, counting every copy in a batch.
#[must_use]
pub fn total_letters_sent(letters: &[Letter]) -> u64 {
    letters.iter().map(|l| u64::from(l.quantity)).sum()
}

/// Number of responses received.
#[must_use]
pub fn total_responses_received(responses: &[Response]) -> usize {
    responses.len()
}

/// Sum of all response amounts.
#[must_use]
pub fn total_amount_received(responses: &[Response]) -> f64 {
    responses.iter().map(|r| r.amount).sum()
}

/// Sum of expected response × quantity over all letters.
#[must_use]
pub fn total_expected_responses(letters: &[Letter]) -> f64 {
    letters.iter().map(Letter::expected_total).sum()
}

/// Return on expectation as a percentage: `(received / expected - 1) * 100`.
///
/// Zero when nothing is expected, regardless of what was received.
#[must_use]
pub fn roi(total_received: f64, total_expected: f64) -> f64 {
    if total_expected == 0.0 {
        return 0.0;
    }

    (total_received / total_expected - 1.0) * 100.0
}

/// Mean response amount, zero when there are no responses.
#[must_use]
pub fn average_response_value(responses: &[Response]) -> f64 {
    if responses.is_empty() {
        return 0.0;
    }

    // Cast safety: response counts stay far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let count = responses.len() as f64;
    total_amount_received(responses) / count
}

/// Letters that have received a response or were confirmed by hand.
#[must_use]
pub fn confirmed_letters(letters: &[Letter]) -> Vec<&Letter> {
    letters.iter().filter(|l| l.is_confirmed).collect()
}

/// Letters still waiting for a response.
#[must_use]
pub fn pending_letters(letters: &[Letter]) -> Vec<&Letter> {
    letters.iter().filter(|l| !l.is_confirmed).collect()
}

/// Sum of supply costs.
#[must_use]
pub fn total_supply_cost(supplies: &[Supply]) -> f64 {
    supplies.iter().map(|s| s.cost).sum()
}

/// True once `now` is past the trial end and the user is still on the trial plan.
#[must_use]
pub fn is_trial_expired(profile: &UserProfile, now: DateTime<Utc>) -> bool {
    profile.subscription_type == SubscriptionType::Trial && now > profile.trial_end()
}

/// Whole days left until the trial ends, never negative.
#[must_use]
pub fn days_left_in_trial(profile: &UserProfile, now: DateTime<Utc>) -> i64 {
    (profile.trial_end() - now).num_days().max(0)
}

/// Snapshot of every derived metric at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardMetrics {
    /// Letters sent, counting copies
    pub total_letters_sent: u64,
    /// Responses received
    pub total_responses_received: usize,
    /// Money received
    pub total_amount_received: f64,
    /// Money expected
    pub total_expected_responses: f64,
    /// Percentage over or under expectation
    pub roi: f64,
    /// Mean response
    pub average_response_value: f64,
    /// Number of confirmed letter records
    pub confirmed_letters: usize,
    /// Number of pending letter records
    pub pending_letters: usize,
    /// Money spent on supplies
    pub total_supply_cost: f64,
    /// Whether the trial has run out
    pub is_trial_expired: bool,
    /// Days left in the trial
    pub days_left_in_trial: i64,
}

impl DashboardMetrics {
    /// Computes every metric over `state` as of `now`.
    #[must_use]
    pub fn compute(state: &TrackerState, now: DateTime<Utc>) -> Self {
        let total_amount_received = total_amount_received(&state.responses);
        let total_expected_responses = total_expected_responses(&state.letters);

        Self {
            total_letters_sent: total_letters_sent(&state.letters),
            total_responses_received: total_responses_received(&state.responses),
            total_amount_received,
            total_expected_responses,
            roi: roi(total_amount_received, total_expected_responses),
            average_response_value: average_response_value(&state.responses),
            confirmed_letters: confirmed_letters(&state.letters).len(),
            pending_letters: pending_letters(&state.letters).len(),
            total_supply_cost: total_supply_cost(&state.supplies),
            is_trial_expired: is_trial_expired(&state.user_profile, now),
            days_left_in_trial: days_left_in_trial(&state.user_profile, now),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{letter_with, response_for};
    use chrono::Duration;

    #[test]
    fn test_letters_sent_counts_quantity_not_records() {
        let letters = vec![letter_with(10.0, 3), letter_with(10.0, 1), letter_with(5.0, 4)];
        assert_eq!(total_letters_sent(&letters), 8);
        assert_ne!(total_letters_sent(&letters), letters.len() as u64);
    }

    #[test]
    fn test_expected_multiplies_by_quantity() {
        let letters = vec![letter_with(100.0, 2), letter_with(25.0, 4)];
        assert_eq!(total_expected_responses(&letters), 300.0);
    }

    #[test]
    fn test_roi_zero_without_expectation() {
        assert_eq!(roi(0.0, 0.0), 0.0);
        assert_eq!(roi(500.0, 0.0), 0.0);
    }

    #[test]
    fn test_roi_sign() {
        assert_eq!(roi(150.0, 200.0), -25.0);
        assert_eq!(roi(300.0, 200.0), 50.0);
        assert_eq!(roi(200.0, 200.0), 0.0);
    }

    #[test]
    fn test_average_response_value() {
        assert_eq!(average_response_value(&[]), 0.0);
        let responses = vec![response_for(None, 30.0), response_for(None, 90.0)];
        assert_eq!(average_response_value(&responses), 60.0);
        assert_eq!(total_responses_received(&responses), 2);
    }

    #[test]
    fn test_confirmed_pending_partition() {
        let mut letters = vec![letter_with(1.0, 1), letter_with(2.0, 1), letter_with(3.0, 1)];
        letters[1].is_confirmed = true;

        let confirmed = confirmed_letters(&letters);
        let pending = pending_letters(&letters);
        assert_eq!(confirmed.len(), 1);
        assert_eq!(confirmed[0].id, letters[1].id);
        assert_eq!(pending.len(), 2);
        assert_eq!(confirmed.len() + pending.len(), letters.len());
    }

    #[test]
    fn test_supply_cost_sums_cost_only() {
        let now = Utc::now();
        let supplies = vec![
            Supply::new("Stamps", 20, 13.20, now, ""),
            Supply::new("Envelopes", 50, 7.50, now, ""),
        ];
        assert!((total_supply_cost(&supplies) - 20.70).abs() < 1e-9);
    }

    #[test]
    fn test_trial_expiry() {
        let now = Utc::now();
        let mut profile = UserProfile::starting_trial(now - Duration::days(8));
        assert!(is_trial_expired(&profile, now));

        profile.subscription_type = SubscriptionType::Yearly;
        assert!(!is_trial_expired(&profile, now));

        let fresh = UserProfile::starting_trial(now - Duration::days(2));
        assert!(!is_trial_expired(&fresh, now));
    }

    #[test]
    fn test_trial_not_expired_exactly_at_end() {
        let now = Utc::now();
        let profile = UserProfile::starting_trial(now - Duration::days(7));
        assert!(!is_trial_expired(&profile, now));
        assert!(is_trial_expired(&profile, now + Duration::seconds(1)));
    }

    #[test]
    fn test_days_left_in_trial_never_negative() {
        let now = Utc::now();
        let ancient = UserProfile::starting_trial(now - Duration::days(4000));
        assert_eq!(days_left_in_trial(&ancient, now), 0);

        let started_today = UserProfile::starting_trial(now);
        assert_eq!(days_left_in_trial(&started_today, now), 7);

        let partway = UserProfile::starting_trial(now - Duration::days(2) - Duration::hours(3));
        assert_eq!(days_left_in_trial(&partway, now), 4);
    }

    #[test]
    fn test_dashboard_example_scenario() {
        let now = Utc::now();
        let mut state = TrackerState::default();
        let mut letter = letter_with(100.0, 2);
        letter.is_confirmed = true;
        state.responses.push(response_for(Some(letter.id), 150.0));
        state.letters.push(letter);

        let metrics = DashboardMetrics::compute(&state, now);
        assert_eq!(metrics.total_expected_responses, 200.0);
        assert_eq!(metrics.total_amount_received, 150.0);
        assert_eq!(metrics.roi, -25.0);
        assert_eq!(metrics.total_letters_sent, 2);
        assert_eq!(metrics.confirmed_letters, 1);
        assert_eq!(metrics.pending_letters, 0);
    }
}
