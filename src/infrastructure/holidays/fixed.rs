//! Holiday calendars backed by explicit date lists

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::domain::HolidayCalendar;

/// Serves a fixed set of dates for one jurisdiction.
#[derive(Debug, Clone, Default)]
pub struct FixedHolidayCalendar {
    jurisdiction: String,
    dates: HashSet<NaiveDate>,
}

impl FixedHolidayCalendar {
    pub fn new(jurisdiction: impl Into<String>, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            jurisdiction: jurisdiction.into(),
            dates: dates.into_iter().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl HolidayCalendar for FixedHolidayCalendar {
    fn holidays(&self, year: i32, jurisdiction: &str) -> HashSet<NaiveDate> {
        if !self.jurisdiction.eq_ignore_ascii_case(jurisdiction) {
            return HashSet::new();
        }
        self.dates
            .iter()
            .copied()
            .filter(|date| date.year() == year)
            .collect()
    }
}

/// Union of several calendars.
#[derive(Clone, Default)]
pub struct CompositeHolidayCalendar {
    calendars: Vec<Arc<dyn HolidayCalendar>>,
}

impl CompositeHolidayCalendar {
    pub fn new(calendars: Vec<Arc<dyn HolidayCalendar>>) -> Self {
        Self { calendars }
    }

    pub fn with(mut self, calendar: Arc<dyn HolidayCalendar>) -> Self {
        self.calendars.push(calendar);
        self
    }
}

impl HolidayCalendar for CompositeHolidayCalendar {
    fn holidays(&self, year: i32, jurisdiction: &str) -> HashSet<NaiveDate> {
        self.calendars
            .iter()
            .flat_map(|calendar| calendar.holidays(year, jurisdiction))
            .collect()
    }
}
