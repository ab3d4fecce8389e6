//! Toll request validation
//!
//! Rules run in order and the first failure wins:
//! 1. at least one timestamp,
//! 2. every timestamp on the same calendar day (reference time zone),
//! 3. a configured vehicle type.

use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

use crate::domain::{to_reference_time, ValidationError, VehicleTypeTable};

#[derive(Debug, Clone)]
pub struct RequestValidator {
    vehicle_types: Arc<VehicleTypeTable>,
    zone: Tz,
}

impl RequestValidator {
    pub fn new(vehicle_types: Arc<VehicleTypeTable>, zone: Tz) -> Self {
        Self {
            vehicle_types,
            zone,
        }
    }

    pub fn validate<Z: TimeZone>(
        &self,
        vehicle_type: &str,
        timestamps: &[DateTime<Z>],
    ) -> Result<(), ValidationError> {
        self.validate_timestamps(timestamps)?;
        self.validate_vehicle_type(vehicle_type)
    }

    pub fn validate_timestamps<Z: TimeZone>(
        &self,
        timestamps: &[DateTime<Z>],
    ) -> Result<(), ValidationError> {
        let (first, rest) = timestamps
            .split_first()
            .ok_or(ValidationError::NoTimestamps)?;

        let day = to_reference_time(first, &self.zone).date();
        if rest
            .iter()
            .any(|t| to_reference_time(t, &self.zone).date() != day)
        {
            return Err(ValidationError::MixedDays);
        }

        Ok(())
    }

    pub fn validate_vehicle_type(&self, vehicle_type: &str) -> Result<(), ValidationError> {
        if !self.vehicle_types.is_available() {
            return Err(ValidationError::VehicleTypesUnavailable);
        }
        if !self.vehicle_types.contains(vehicle_type) {
            return Err(ValidationError::UnknownVehicleType {
                available: self.vehicle_types.names(),
            });
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VehicleTypeEntry;

    use chrono::FixedOffset;
    use chrono_tz::Europe::Stockholm;

    fn at(d: u32, h: u32, m: u32) -> DateTime<Tz> {
        Stockholm.with_ymd_and_hms(2024, 8, d, h, m, 0).unwrap()
    }

    fn offset(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    fn validator() -> RequestValidator {
        let types = VehicleTypeTable::new(vec![VehicleTypeEntry::new("Car", false)]);
        RequestValidator::new(Arc::new(types), Stockholm)
    }

    #[test]
    fn valid_request_passes() {
        assert_eq!(validator().validate("Car", &[at(26, 0, 0), at(26, 12, 0)]), Ok(()));
    }

    #[test]
    fn vehicle_type_is_case_insensitive() {
        assert_eq!(validator().validate("cAr", &[at(26, 7, 0)]), Ok(()));
    }

    #[test]
    fn empty_timestamps_rejected() {
        let empty: [DateTime<Tz>; 0] = [];
        assert_eq!(
            validator().validate("Car", &empty),
            Err(ValidationError::NoTimestamps)
        );
    }

    #[test]
    fn different_days_rejected_with_exact_message() {
        let err = validator()
            .validate("Car", &[at(26, 0, 0), at(27, 0, 0)])
            .unwrap_err();
        assert_eq!(err, ValidationError::MixedDays);
        assert_eq!(
            err.to_string(),
            "All vehicle date times must be within the same day."
        );
    }

    #[test]
    fn summer_day_spans_local_midnight_to_midnight() {
        let early = offset(2).with_ymd_and_hms(2024, 8, 26, 0, 30, 0).unwrap();
        let late = offset(2).with_ymd_and_hms(2024, 8, 26, 23, 30, 0).unwrap();
        assert_eq!(validator().validate("Car", &[early, late]), Ok(()));
    }

    #[test]
    fn same_day_is_judged_in_reference_zone() {
        // 21:30Z is still 26 Aug in Stockholm (+02:00); 22:30Z is already the 27th.
        let utc = offset(0);
        let late = utc.with_ymd_and_hms(2024, 8, 26, 21, 30, 0).unwrap();
        let morning = utc.with_ymd_and_hms(2024, 8, 26, 4, 0, 0).unwrap();
        assert_eq!(validator().validate("Car", &[morning, late]), Ok(()));

        let next_local_day = utc.with_ymd_and_hms(2024, 8, 26, 22, 30, 0).unwrap();
        assert_eq!(
            validator().validate("Car", &[late, next_local_day]),
            Err(ValidationError::MixedDays)
        );
    }

    #[test]
    fn winter_day_boundary_is_one_hour_after_utc_midnight() {
        let utc = offset(0);
        let evening = utc.with_ymd_and_hms(2024, 1, 15, 22, 30, 0).unwrap();
        let next_local_day = utc.with_ymd_and_hms(2024, 1, 15, 23, 30, 0).unwrap();
        let morning = utc.with_ymd_and_hms(2024, 1, 15, 6, 0, 0).unwrap();
        assert_eq!(validator().validate("Car", &[morning, evening]), Ok(()));
        assert_eq!(
            validator().validate("Car", &[evening, next_local_day]),
            Err(ValidationError::MixedDays)
        );
    }

    #[test]
    fn dst_change_days_keep_their_full_length() {
        // 27 Oct 2024 has 25 local hours: 00:30 +02:00 through 23:30 +01:00.
        let early = offset(2).with_ymd_and_hms(2024, 10, 27, 0, 30, 0).unwrap();
        let late = offset(1).with_ymd_and_hms(2024, 10, 27, 23, 30, 0).unwrap();
        assert_eq!(validator().validate("Car", &[early, late]), Ok(()));

        // 31 Mar 2024 has 23: 00:30 +01:00 through 23:30 +02:00.
        let early = offset(1).with_ymd_and_hms(2024, 3, 31, 0, 30, 0).unwrap();
        let late = offset(2).with_ymd_and_hms(2024, 3, 31, 23, 30, 0).unwrap();
        assert_eq!(validator().validate("Car", &[early, late]), Ok(()));
    }

    #[test]
    fn unknown_vehicle_type_lists_valid_types() {
        let err = validator().validate("Truck", &[at(26, 7, 0)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid vehicle type provided. Available types are: Car."
        );
    }

    #[test]
    fn timestamp_rules_run_before_vehicle_type() {
        assert_eq!(
            validator().validate("Truck", &[at(26, 7, 0), at(27, 7, 0)]),
            Err(ValidationError::MixedDays)
        );
    }

    #[test]
    fn unavailable_vehicle_types_are_reported() {
        let validator = RequestValidator::new(Arc::new(VehicleTypeTable::unavailable()), Stockholm);
        let err = validator.validate("Car", &[at(26, 7, 0)]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Vehicle types configuration could not be loaded."
        );
    }
}
