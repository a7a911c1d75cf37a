//! Due-date policy
//!
//! Pure date arithmetic for the fixed 30-day loan period. The reference date
//! is always an explicit parameter; nothing here reads the system clock.
//! Loan dates arrive from the backend as optional `yyyy-MM-dd` strings and
//! may be missing or malformed on legacy records, so every function degrades
//! to a neutral "not overdue" result instead of failing.

use chrono::{Duration, NaiveDate};

/// Fixed loan period applied to every checkout
pub const LOAN_PERIOD_DAYS: i64 = 30;

/// Wire format used by the backend for loan dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a backend date string, `None` on absent or malformed input
pub fn parse_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?, DATE_FORMAT).ok()
}

/// Due date of a loan checked out on the given date
pub fn due_date(checkout: NaiveDate) -> NaiveDate {
    checkout + Duration::days(LOAN_PERIOD_DAYS)
}

/// Whole days between `today` and the due date. Negative means overdue.
/// Missing or malformed checkout dates count as 0 (not overdue).
pub fn days_remaining(checkout: Option<&str>, today: NaiveDate) -> i64 {
    match parse_date(checkout) {
        Some(d) => (due_date(d) - today).num_days(),
        None => 0,
    }
}

/// Whether an active loan has passed its due date
pub fn is_overdue(checkout: Option<&str>, today: NaiveDate) -> bool {
    days_remaining(checkout, today) < 0
}

/// Whether a returned loan came back after its due date
pub fn was_returned_late(checkout: Option<&str>, returned: Option<&str>) -> bool {
    match (parse_date(checkout), parse_date(returned)) {
        (Some(c), Some(r)) => r > due_date(c),
        _ => false,
    }
}

/// Days past the due date at return time, floored at 0.
/// Missing or malformed dates count as 0 (not late).
pub fn days_late(checkout: Option<&str>, returned: Option<&str>) -> i64 {
    match (parse_date(checkout), parse_date(returned)) {
        (Some(c), Some(r)) => (r - due_date(c)).num_days().max(0),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    #[test]
    fn test_due_date_is_thirty_days_out() {
        assert_eq!(due_date(date("2024-01-01")), date("2024-01-31"));
    }

    #[test]
    fn test_days_remaining_before_due() {
        assert_eq!(days_remaining(Some("2024-01-01"), date("2024-01-15")), 16);
    }

    #[test]
    fn test_days_remaining_on_due_date() {
        assert_eq!(days_remaining(Some("2024-01-01"), date("2024-01-31")), 0);
        assert!(!is_overdue(Some("2024-01-01"), date("2024-01-31")));
    }

    #[test]
    fn test_overdue_by_five_days() {
        assert_eq!(days_remaining(Some("2024-01-01"), date("2024-02-05")), -5);
        assert!(is_overdue(Some("2024-01-01"), date("2024-02-05")));
    }

    #[test]
    fn test_overdue_iff_past_due_date() {
        let checkout = "2024-03-10";
        let due = due_date(date(checkout));
        for offset in -3..=3 {
            let t = due + Duration::days(offset);
            assert_eq!(is_overdue(Some(checkout), t), t > due);
        }
    }

    #[test]
    fn test_returned_late() {
        assert!(was_returned_late(Some("2024-01-01"), Some("2024-02-10")));
        assert_eq!(days_late(Some("2024-01-01"), Some("2024-02-10")), 10);
    }

    #[test]
    fn test_returned_on_time() {
        assert!(!was_returned_late(Some("2024-01-01"), Some("2024-01-20")));
        assert_eq!(days_late(Some("2024-01-01"), Some("2024-01-20")), 0);
    }

    #[test]
    fn test_late_iff_days_late_positive() {
        for returned in ["2024-01-20", "2024-01-31", "2024-02-01", "2024-03-15"] {
            let late = was_returned_late(Some("2024-01-01"), Some(returned));
            let days = days_late(Some("2024-01-01"), Some(returned));
            assert_eq!(late, days > 0);
            assert!(days >= 0);
        }
    }

    #[test]
    fn test_missing_checkout_date_is_neutral() {
        assert_eq!(days_remaining(None, date("2024-02-05")), 0);
        assert!(!is_overdue(None, date("2024-02-05")));
        assert!(!was_returned_late(None, Some("2024-02-10")));
        assert_eq!(days_late(None, Some("2024-02-10")), 0);
    }

    #[test]
    fn test_malformed_checkout_date_is_neutral() {
        assert_eq!(days_remaining(Some("01/01/2024"), date("2024-02-05")), 0);
        assert!(!is_overdue(Some("not-a-date"), date("2024-02-05")));
        assert_eq!(days_late(Some("2024-01-01"), Some("garbage")), 0);
    }
}
