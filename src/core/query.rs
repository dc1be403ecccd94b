//! Read-side queries used by list and detail screens.
//!
//! Search is a case-insensitive substring match; an empty or whitespace-only
//! query matches everything. Results borrow from the state.

use crate::core::state::TrackerState;
use crate::models::{CalendarNote, Company, Letter, Response, Supply};
use chrono::{DateTime, Duration, NaiveDate, Utc};

fn matches_query(haystacks: &[&str], needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty() || haystacks.iter().any(|h| h.to_lowercase().contains(&needle))
}

/// Letters whose company name or notes contain `query`, newest first.
#[must_use]
pub fn search_letters<'a>(letters: &'a [Letter], query: &str) -> Vec<&'a Letter> {
    let mut found: Vec<&Letter> = letters
        .iter()
        .filter(|l| matches_query(&[l.company_name.as_str(), l.notes.as_str()], query))
        .collect();
    found.sort_by(|a, b| b.date_sent.cmp(&a.date_sent));
    found
}

/// Responses whose company name or notes contain `query`, newest first.
#[must_use]
pub fn search_responses<'a>(responses: &'a [Response], query: &str) -> Vec<&'a Response> {
    let mut found: Vec<&Response> = responses
        .iter()
        .filter(|r| matches_query(&[r.company_name.as_str(), r.notes.as_str()], query))
        .collect();
    found.sort_by(|a, b| b.date_received.cmp(&a.date_received));
    found
}

/// Supplies whose name or notes contain `query`, newest first.
#[must_use]
pub fn search_supplies<'a>(supplies: &'a [Supply], query: &str) -> Vec<&'a Supply> {
    let mut found: Vec<&Supply> = supplies
        .iter()
        .filter(|s| matches_query(&[s.name.as_str(), s.notes.as_str()], query))
        .collect();
    found.sort_by(|a, b| b.date_purchased.cmp(&a.date_purchased));
    found
}

/// Companies whose name or address contain `query`, alphabetical.
#[must_use]
pub fn search_companies<'a>(companies: &'a [Company], query: &str) -> Vec<&'a Company> {
    let mut found: Vec<&Company> = companies
        .iter()
        .filter(|c| matches_query(&[c.name.as_str(), c.address.as_str()], query))
        .collect();
    found.sort_by(|a, b| a.name.cmp(&b.name));
    found
}

/// Resolves a response's weak link. `None` if unlinked or the letter is gone.
#[must_use]
pub fn linked_letter<'a>(letters: &'a [Letter], response: &Response) -> Option<&'a Letter> {
    let id = response.linked_letter_id?;
    letters.iter().find(|l| l.id == id)
}

/// Letters a new response can be linked to: the pending ones.
#[must_use]
pub fn linkable_letters(letters: &[Letter]) -> Vec<&Letter> {
    letters.iter().filter(|l| !l.is_confirmed).collect()
}

/// Letters and responses exchanged with one company.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyActivity<'a> {
    /// Letters sent to the company
    pub letters: Vec<&'a Letter>,
    /// Responses received from the company
    pub responses: Vec<&'a Response>,
}

impl CompanyActivity<'_> {
    /// True when nothing has been exchanged yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty() && self.responses.is_empty()
    }

    /// Money received from the company.
    #[must_use]
    pub fn amount_received(&self) -> f64 {
        self.responses.iter().map(|r| r.amount).sum()
    }
}

/// Activity with the company named `company_name` (exact name match).
#[must_use]
pub fn company_activity<'a>(state: &'a TrackerState, company_name: &str) -> CompanyActivity<'a> {
    CompanyActivity {
        letters: state
            .letters
            .iter()
            .filter(|l| l.company_name == company_name)
            .collect(),
        responses: state
            .responses
            .iter()
            .filter(|r| r.company_name == company_name)
            .collect(),
    }
}

/// The first `limit` letters and first `limit` responses, in insertion order.
#[must_use]
pub fn recent_activity(state: &TrackerState, limit: usize) -> (Vec<&Letter>, Vec<&Response>) {
    (
        state.letters.iter().take(limit).collect(),
        state.responses.iter().take(limit).collect(),
    )
}

/// Calendar notes falling on `day` (UTC).
#[must_use]
pub fn notes_on(notes: &[CalendarNote], day: NaiveDate) -> Vec<&CalendarNote> {
    notes.iter().filter(|n| n.date.date_naive() == day).collect()
}

/// Pending letters sent at least `follow_up_reminder_days` days before `now`.
#[must_use]
pub fn letters_due_for_follow_up(state: &TrackerState, now: DateTime<Utc>) -> Vec<&Letter> {
    let cutoff = now - Duration::days(i64::from(state.settings.follow_up_reminder_days));
    state
        .letters
        .iter()
        .filter(|l| !l.is_confirmed && l.date_sent <= cutoff)
        .collect()
}
