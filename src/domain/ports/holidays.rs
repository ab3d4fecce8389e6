//! Holiday calendar port
//!
//! The exemption policy asks an external provider which dates are public
//! holidays. Adapters live in `infrastructure::holidays`.

use std::collections::HashSet;

use chrono::NaiveDate;

// ── HolidayCalendar ────────────────────────────────────────────

/// Jurisdiction-aware source of public holidays.
///
/// Implementations must be cheap to share: the policy holds one behind an
/// `Arc` and queries it from concurrent requests.
pub trait HolidayCalendar: Send + Sync {
    /// All public holidays of `year` in `jurisdiction` (e.g. `"se"`).
    ///
    /// An unknown jurisdiction yields an empty set.
    fn holidays(&self, year: i32, jurisdiction: &str) -> HashSet<NaiveDate>;

    fn is_holiday(&self, date: NaiveDate, jurisdiction: &str) -> bool {
        use chrono::Datelike;
        self.holidays(date.year(), jurisdiction).contains(&date)
    }
}
