//! Fee schedule entity

use std::fmt;

use chrono::{NaiveTime, Timelike};
use tracing::warn;

use crate::domain::error::FeeRangeError;

const CLOCK_FORMAT: &str = "%H:%M";

/// A closed time-of-day interval `[start, end]` and the fee charged inside it.
///
/// Fees are whole currency units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeeRange {
    pub fee: u32,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl FeeRange {
    pub fn new(fee: u32, start: NaiveTime, end: NaiveTime) -> Self {
        Self { fee, start, end }
    }

    /// Parse a `"HH:MM-HH:MM"` time point.
    pub fn parse(fee: u32, text: &str) -> Result<Self, FeeRangeError> {
        let parts: Vec<&str> = text.split('-').collect();
        if parts.len() != 2 {
            return Err(FeeRangeError::Format(text.to_string()));
        }

        let start = parse_clock(text, parts[0])?;
        let end = parse_clock(text, parts[1])?;
        if end < start {
            return Err(FeeRangeError::Inverted(text.to_string()));
        }

        Ok(Self { fee, start, end })
    }

    /// Inclusive on both ends.
    pub fn contains(&self, time: NaiveTime) -> bool {
        self.start <= time && time <= self.end
    }
}

impl fmt::Display for FeeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(CLOCK_FORMAT),
            self.end.format(CLOCK_FORMAT)
        )
    }
}

fn parse_clock(range: &str, value: &str) -> Result<NaiveTime, FeeRangeError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, CLOCK_FORMAT).map_err(|_| FeeRangeError::Clock {
            range: range.to_string(),
            value: value.to_string(),
        })
}

/// Time-of-day fee lookup table.
///
/// Ranges keep their configuration order; that order is also the match
/// priority when ranges overlap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeeSchedule {
    ranges: Vec<FeeRange>,
}

impl FeeSchedule {
    pub fn new(ranges: Vec<FeeRange>) -> Self {
        Self { ranges }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a schedule from `(fee, time points)` groups, skipping (and
    /// logging) every time point that fails to parse.
    pub fn from_time_points<'a, I, S>(groups: I) -> Self
    where
        I: IntoIterator<Item = (u32, &'a [S])>,
        S: AsRef<str> + 'a,
    {
        let mut ranges = Vec::new();
        for (fee, points) in groups {
            for point in points {
                match FeeRange::parse(fee, point.as_ref()) {
                    Ok(range) => ranges.push(range),
                    Err(e) => warn!("Skipping fee range: {}", e),
                }
            }
        }
        Self { ranges }
    }

    /// Fee for a passage at `time`, or 0 when no range covers it.
    ///
    /// The lookup works at minute granularity, matching the `HH:MM`
    /// resolution of the configured ranges.
    pub fn fee_for(&self, time: NaiveTime) -> u32 {
        let time = truncate_to_minute(time);
        self.ranges
            .iter()
            .find(|range| range.contains(time))
            .map(|range| range.fee)
            .unwrap_or(0)
    }

    pub fn ranges(&self) -> &[FeeRange] {
        &self.ranges
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(time)
}

// ── Tests ──────────────────────────────────────────────────────
