//! Computed Swedish public holiday calendar

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::domain::HolidayCalendar;

pub const JURISDICTION: &str = "se";

/// Swedish holidays ("röda dagar" plus the customary eves that are days off),
/// computed per year without any lookup table.
#[derive(Debug, Clone, Copy, Default)]
pub struct SwedishHolidayCalendar;

impl SwedishHolidayCalendar {
    pub fn new() -> Self {
        Self
    }

    pub fn holidays_for_year(year: i32) -> HashSet<NaiveDate> {
        let fixed = [
            (1, 1),   // New Year's Day
            (1, 6),   // Epiphany
            (5, 1),   // May Day
            (6, 6),   // National Day
            (12, 24), // Christmas Eve
            (12, 25), // Christmas Day
            (12, 26), // Boxing Day
            (12, 31), // New Year's Eve
        ];

        let mut dates: HashSet<NaiveDate> = fixed
            .iter()
            .filter_map(|&(month, day)| NaiveDate::from_ymd_opt(year, month, day))
            .collect();

        if let Some(easter) = easter_sunday(year) {
            // Good Friday, Easter Sunday, Easter Monday, Ascension, Whitsun
            for offset in [-2, 0, 1, 39, 49] {
                dates.insert(easter + Duration::days(offset));
            }
        }

        let floating = [
            weekday_between(year, (6, 19), Weekday::Fri), // Midsummer Eve
            weekday_between(year, (6, 20), Weekday::Sat), // Midsummer Day
            weekday_between(year, (10, 31), Weekday::Sat), // All Saints' Day
        ];
        dates.extend(floating.into_iter().flatten());

        dates
    }
}

impl HolidayCalendar for SwedishHolidayCalendar {
    fn holidays(&self, year: i32, jurisdiction: &str) -> HashSet<NaiveDate> {
        if jurisdiction.eq_ignore_ascii_case(JURISDICTION) {
            Self::holidays_for_year(year)
        } else {
            HashSet::new()
        }
    }
}

/// Anonymous Gregorian computus.
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// First `weekday` in the seven days starting at `(month, day)`.
fn weekday_between(year: i32, (month, day): (u32, u32), weekday: Weekday) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, day)?;
    (0..7)
        .map(|offset| first + Duration::days(offset))
        .find(|date| date.weekday() == weekday)
}
