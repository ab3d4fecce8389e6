//! Toll exemption rules

use std::fmt;
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::domain::ports::HolidayCalendar;
use crate::domain::vehicle::Vehicle;

/// Why a calculation was charged nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExemptionReason {
    /// The vehicle type is permanently toll-free.
    VehicleType(String),
    Weekend,
    /// The whole calendar month is toll-free.
    ExemptMonth,
    Holiday,
    DayBeforeHoliday,
}

impl fmt::Display for ExemptionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VehicleType(name) => write!(f, "Vehicle type {} is toll-free", name),
            Self::Weekend => write!(f, "Weekend"),
            Self::ExemptMonth => write!(f, "Toll-free month"),
            Self::Holiday => write!(f, "Public holiday"),
            Self::DayBeforeHoliday => write!(f, "Day before a public holiday"),
        }
    }
}

// ── Vehicle types ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleTypeEntry {
    pub name: String,
    pub is_exempt: bool,
}

impl VehicleTypeEntry {
    pub fn new(name: impl Into<String>, is_exempt: bool) -> Self {
        Self {
            name: name.into(),
            is_exempt,
        }
    }

    fn matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }
}

/// Configured vehicle types. Names compare case-insensitively.
///
/// A table whose configuration failed to load is *unavailable*: it knows no
/// types and exempts nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleTypeTable {
    entries: Option<Vec<VehicleTypeEntry>>,
}

impl VehicleTypeTable {
    pub fn new(entries: Vec<VehicleTypeEntry>) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    pub fn unavailable() -> Self {
        Self { entries: None }
    }

    pub fn is_available(&self) -> bool {
        self.entries.is_some()
    }

    pub fn entries(&self) -> &[VehicleTypeEntry] {
        self.entries.as_deref().unwrap_or(&[])
    }

    pub fn find(&self, name: &str) -> Option<&VehicleTypeEntry> {
        self.entries().iter().find(|entry| entry.matches(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Unknown types are chargeable.
    pub fn is_exempt(&self, name: &str) -> bool {
        self.find(name).map(|entry| entry.is_exempt).unwrap_or(false)
    }

    pub fn names(&self) -> Vec<String> {
        self.entries().iter().map(|entry| entry.name.clone()).collect()
    }
}

// ── Policy ─────────────────────────────────────────────────────

/// Calendar settings for date-based exemptions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRules {
    /// Jurisdiction code passed to the holiday calendar.
    pub jurisdiction: String,
    /// Months (1-12) that are toll-free in their entirety.
    pub exempt_months: Vec<u32>,
}

impl Default for CalendarRules {
    fn default() -> Self {
        Self {
            jurisdiction: "se".to_string(),
            exempt_months: vec![7],
        }
    }
}

/// Decides whether a vehicle is charged at all.
#[derive(Clone)]
pub struct ExemptionPolicy {
    vehicle_types: Arc<VehicleTypeTable>,
    calendar: Arc<dyn HolidayCalendar>,
    rules: CalendarRules,
}

impl ExemptionPolicy {
    pub fn new(
        vehicle_types: Arc<VehicleTypeTable>,
        calendar: Arc<dyn HolidayCalendar>,
        rules: CalendarRules,
    ) -> Self {
        Self {
            vehicle_types,
            calendar,
            rules,
        }
    }

    pub fn vehicle_types(&self) -> &VehicleTypeTable {
        &self.vehicle_types
    }

    pub fn rules(&self) -> &CalendarRules {
        &self.rules
    }

    pub fn vehicle_type_exemption(&self, vehicle_type: &str) -> Option<ExemptionReason> {
        let entry = self.vehicle_types.find(vehicle_type)?;
        entry
            .is_exempt
            .then(|| ExemptionReason::VehicleType(entry.name.clone()))
    }

    pub fn date_exemption(&self, date: NaiveDate) -> Option<ExemptionReason> {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return Some(ExemptionReason::Weekend);
        }
        if self.rules.exempt_months.contains(&date.month()) {
            return Some(ExemptionReason::ExemptMonth);
        }

        let jurisdiction = self.rules.jurisdiction.as_str();
        if self.calendar.is_holiday(date, jurisdiction) {
            return Some(ExemptionReason::Holiday);
        }
        if let Some(next) = date.succ_opt() {
            if self.calendar.is_holiday(next, jurisdiction) {
                return Some(ExemptionReason::DayBeforeHoliday);
            }
        }

        None
    }

    /// The vehicle type is checked first, then every passage date.
    pub fn exemption(&self, vehicle: &Vehicle) -> Option<ExemptionReason> {
        self.vehicle_type_exemption(&vehicle.vehicle_type).or_else(|| {
            vehicle
                .passage_dates()
                .into_iter()
                .find_map(|date| self.date_exemption(date))
        })
    }

    pub fn is_exempt_vehicle_type(&self, vehicle_type: &str) -> bool {
        self.vehicle_type_exemption(vehicle_type).is_some()
    }

    pub fn is_exempt_date(&self, date: NaiveDate) -> bool {
        self.date_exemption(date).is_some()
    }

    pub fn is_exempt(&self, vehicle: &Vehicle) -> bool {
        self.exemption(vehicle).is_some()
    }
}

impl fmt::Debug for ExemptionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExemptionPolicy")
            .field("vehicle_types", &self.vehicle_types)
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}

// ── Tests ──────────────────────────────────────────────────────
