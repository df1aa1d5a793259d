//! Reference-month navigation for the reporting views.
//!
//! The paid/unpaid views are always evaluated against a user-navigable
//! focus date. This service owns that date and moves it forward or
//! backward whole calendar months; everything else about the views is
//! recomputed from the latest snapshot by the aggregation engine.

use std::sync::{Arc, Mutex};

use chrono::{Datelike, Months, NaiveDate, Utc};
use log::debug;
use shared::FocusMonth;

/// Holds the focus date the reporting views are evaluated against.
///
/// The date is kept in memory only and is never persisted.
#[derive(Clone)]
pub struct CalendarService {
    focus_date: Arc<Mutex<NaiveDate>>,
}

impl CalendarService {
    /// Create a new service focused on today.
    pub fn new() -> Self {
        Self {
            focus_date: Arc::new(Mutex::new(Utc::now().date_naive())),
        }
    }

    /// The current focus date.
    pub fn focus_date(&self) -> NaiveDate {
        *self.focus_date.lock().unwrap()
    }

    /// The current focus month/year as an inert DTO.
    pub fn focus_month(&self) -> FocusMonth {
        let date = self.focus_date();
        FocusMonth {
            month: date.month(),
            year: date.year(),
        }
    }

    /// Replace the focus date entirely.
    pub fn set_focus_date(&self, date: NaiveDate) {
        *self.focus_date.lock().unwrap() = date;
    }

    /// Move the focus date by `delta` whole calendar months and return the
    /// new date. When the day-of-month does not exist in the target month,
    /// chrono clamps to the last day of that month; that behavior is
    /// accepted as-is rather than contracted.
    pub fn change_month(&self, delta: i32) -> NaiveDate {
        let mut guard = self.focus_date.lock().unwrap();
        let current = *guard;
        let moved = if delta >= 0 {
            current.checked_add_months(Months::new(delta as u32))
        } else {
            current.checked_sub_months(Months::new(delta.unsigned_abs()))
        };
        // Out-of-range dates leave the focus unchanged
        let new_date = moved.unwrap_or(current);
        debug!("Focus date moved {} month(s): {} -> {}", delta, current, new_date);
        *guard = new_date;
        new_date
    }

    /// Navigate to the previous month.
    pub fn navigate_previous_month(&self) -> NaiveDate {
        self.change_month(-1)
    }

    /// Navigate to the next month.
    pub fn navigate_next_month(&self) -> NaiveDate {
        self.change_month(1)
    }
}

impl Default for CalendarService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_at(y: i32, m: u32, d: u32) -> CalendarService {
        let service = CalendarService::new();
        service.set_focus_date(NaiveDate::from_ymd_opt(y, m, d).unwrap());
        service
    }

    #[test]
    fn test_navigate_next_month() {
        let service = service_at(2025, 6, 15);
        let date = service.navigate_next_month();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 7, 15).unwrap());

        // Year rollover
        let service = service_at(2025, 12, 1);
        let date = service.navigate_next_month();
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
    }

    #[test]
    fn test_navigate_previous_month() {
        let service = service_at(2025, 6, 15);
        let date = service.navigate_previous_month();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 5, 15).unwrap());

        // Year rollover
        let service = service_at(2025, 1, 15);
        let date = service.navigate_previous_month();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());
    }

    #[test]
    fn test_change_month_clamps_short_months() {
        // Jan 31 + 1 month lands on the last day of February
        let service = service_at(2025, 1, 31);
        let date = service.change_month(1);
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());

        let service = service_at(2024, 1, 31);
        let date = service.change_month(1);
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn test_change_month_multi_step() {
        let service = service_at(2025, 3, 10);
        let date = service.change_month(-15);
        assert_eq!(date, NaiveDate::from_ymd_opt(2023, 12, 10).unwrap());
        assert_eq!(service.focus_month().month, 12);
        assert_eq!(service.focus_month().year, 2023);
    }
}
