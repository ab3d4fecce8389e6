//! Vehicle and passage types

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// A single crossing of a toll point, expressed in the reference time zone.
pub type Passage = NaiveDateTime;

/// A vehicle and the passages to be charged for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vehicle {
    /// Registration plate. Carried through for reporting only.
    pub plate: String,
    pub vehicle_type: String,
    pub passages: Vec<Passage>,
}

impl Vehicle {
    pub fn new(
        plate: impl Into<String>,
        vehicle_type: impl Into<String>,
        passages: Vec<Passage>,
    ) -> Self {
        Self {
            plate: plate.into(),
            vehicle_type: vehicle_type.into(),
            passages,
        }
    }

    /// Build a vehicle from absolute instants, converting each one to local
    /// time in `zone`.
    pub fn from_instants<Z: TimeZone>(
        plate: impl Into<String>,
        vehicle_type: impl Into<String>,
        instants: &[DateTime<Z>],
        zone: &Tz,
    ) -> Self {
        let passages = instants
            .iter()
            .map(|instant| to_reference_time(instant, zone))
            .collect();
        Self::new(plate, vehicle_type, passages)
    }

    /// Distinct calendar dates of the passages, in first-seen order.
    pub fn passage_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = Vec::new();
        for passage in &self.passages {
            let date = passage.date();
            if !dates.contains(&date) {
                dates.push(date);
            }
        }
        dates
    }
}

/// Wall-clock time of `instant` in the reference zone, daylight saving
/// applied.
pub fn to_reference_time<Z: TimeZone>(instant: &DateTime<Z>, zone: &Tz) -> Passage {
    instant.with_timezone(zone).naive_local()
}
