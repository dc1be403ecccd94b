//! Text rendering of the dashboard.
//!
//! Turns [`DashboardMetrics`] into plain lines for the command line. All
//! functions are pure and framework-agnostic.

use crate::core::metrics::DashboardMetrics;
use crate::models::UserSettings;

/// Formats a money amount in the user's currency, e.g. `"$150.00"` or `"150.00 EUR"`.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let abs = amount.abs();
    match currency {
        "USD" | "CAD" | "AUD" => format!("{sign}${abs:.2}"),
        "EUR" => format!("{sign}€{abs:.2}"),
        "GBP" => format!("{sign}£{abs:.2}"),
        other => format!("{sign}{abs:.2} {other}"),
    }
}

/// Formats ROI with an explicit sign, e.g. `"+12.5%"` or `"-25.0%"`.
#[must_use]
pub fn format_roi(roi: f64) -> String {
    if roi >= 0.0 {
        format!("+{roi:.1}%")
    } else {
        format!("{roi:.1}%")
    }
}

/// One-line trial status.
#[must_use]
pub fn format_trial_status(metrics: &DashboardMetrics) -> String {
    if metrics.is_trial_expired {
        "Trial expired".to_string()
    } else if metrics.days_left_in_trial == 1 {
        "1 day left in trial".to_string()
    } else {
        format!("{} days left in trial", metrics.days_left_in_trial)
    }
}

/// Renders the full dashboard as lines of text.
#[must_use]
pub fn render_dashboard(metrics: &DashboardMetrics, settings: &UserSettings) -> String {
    let currency = settings.currency.as_str();
    let lines = [
        format!("Letters sent:        {}", metrics.total_letters_sent),
        format!("Responses received:  {}", metrics.total_responses_received),
        format!(
            "Total received:      {}",
            format_amount(metrics.total_amount_received, currency)
        ),
        format!(
            "Total expected:      {}",
            format_amount(metrics.total_expected_responses, currency)
        ),
        format!("ROI:                 {}", format_roi(metrics.roi)),
        format!(
            "Average response:    {}",
            format_amount(metrics.average_response_value, currency)
        ),
        format!(
            "Letters confirmed:   {} ({} pending)",
            metrics.confirmed_letters, metrics.pending_letters
        ),
        format!(
            "Supply costs:        {}",
            format_amount(metrics.total_supply_cost, currency)
        ),
        format_trial_status(metrics),
    ];
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics() -> DashboardMetrics {
        DashboardMetrics {
            total_letters_sent: 12,
            total_responses_received: 3,
            total_amount_received: 150.0,
            total_expected_responses: 200.0,
            roi: -25.0,
            average_response_value: 50.0,
            confirmed_letters: 2,
            pending_letters: 4,
            total_supply_cost: 20.7,
            is_trial_expired: false,
            days_left_in_trial: 1,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(150.0, "USD"), "$150.00");
        assert_eq!(format_amount(-3.5, "GBP"), "-£3.50");
        assert_eq!(format_amount(10.0, "JPY"), "10.00 JPY");
    }

    #[test]
    fn test_format_roi() {
        assert_eq!(format_roi(-25.0), "-25.0%");
        assert_eq!(format_roi(12.345), "+12.3%");
        assert_eq!(format_roi(0.0), "+0.0%");
    }

    #[test]
    fn test_trial_status() {
        let mut m = metrics();
        assert_eq!(format_trial_status(&m), "1 day left in trial");
        m.days_left_in_trial = 5;
        assert_eq!(format_trial_status(&m), "5 days left in trial");
        m.is_trial_expired = true;
        assert_eq!(format_trial_status(&m), "Trial expired");
    }

    #[test]
    fn test_render_dashboard() {
        let text = render_dashboard(&metrics(), &UserSettings::default());
        assert!(text.contains("Letters sent:        12"));
        assert!(text.contains("ROI:                 -25.0%"));
        assert!(text.contains("Supply costs:        $20.70"));
        assert!(text.contains("2 (4 pending)"));
        assert_eq!(text.lines().count(), 9);
    }
}
