//! Daily toll aggregation
//!
//! Passages are grouped greedily into one-hour windows anchored at the
//! earliest passage not yet charged. Each window is charged the highest fee
//! among its passages, window fees are summed, and the sum is capped.
//! Windows are never re-centred to find a cheaper or dearer partition.

use std::sync::Arc;

use chrono::Duration;
use tracing::debug;

use crate::domain::{
    DomainError, DomainResult, ExemptionPolicy, ExemptionReason, FeeSchedule, Passage, Vehicle,
};

/// Default ceiling on the total charged for one day.
pub const DEFAULT_DAILY_CAP: u32 = 60;

/// One charged window `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TollWindow {
    pub start: Passage,
    /// Exclusive.
    pub end: Passage,
    /// Highest fee among `passages`.
    pub fee: u32,
    pub passages: Vec<Passage>,
}

/// Result of a calculation with the windows that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TollBreakdown {
    pub windows: Vec<TollWindow>,
    /// Sum of window fees before the daily cap.
    pub raw_total: u32,
    pub total: u32,
    pub exemption: Option<ExemptionReason>,
}

impl TollBreakdown {
    fn exempt(reason: ExemptionReason) -> Self {
        Self {
            exemption: Some(reason),
            ..Self::default()
        }
    }

    pub fn is_capped(&self) -> bool {
        self.raw_total > self.total
    }
}

/// Computes the daily toll for a vehicle.
#[derive(Debug, Clone)]
pub struct TollCalculator {
    fee_schedule: Arc<FeeSchedule>,
    policy: Arc<ExemptionPolicy>,
    daily_cap: u32,
}

impl TollCalculator {
    pub fn new(fee_schedule: Arc<FeeSchedule>, policy: Arc<ExemptionPolicy>) -> Self {
        Self {
            fee_schedule,
            policy,
            daily_cap: DEFAULT_DAILY_CAP,
        }
    }

    pub fn with_daily_cap(mut self, daily_cap: u32) -> Self {
        self.daily_cap = daily_cap;
        self
    }

    pub fn daily_cap(&self) -> u32 {
        self.daily_cap
    }

    pub fn fee_schedule(&self) -> &FeeSchedule {
        &self.fee_schedule
    }

    pub fn policy(&self) -> &ExemptionPolicy {
        &self.policy
    }

    /// Total toll for the vehicle's passages.
    pub fn compute_toll(&self, vehicle: &Vehicle) -> DomainResult<u32> {
        self.breakdown(vehicle).map(|breakdown| breakdown.total)
    }

    /// Calculate the toll and keep the per-window details.
    ///
    /// Exempt vehicles short-circuit to an empty, zero-fee breakdown.
    pub fn breakdown(&self, vehicle: &Vehicle) -> DomainResult<TollBreakdown> {
        if let Some(reason) = self.policy.exemption(vehicle) {
            debug!(plate = %vehicle.plate, %reason, "Vehicle is toll-free");
            return Ok(TollBreakdown::exempt(reason));
        }

        let windows = partition(&self.fee_schedule, &vehicle.passages)?;
        let raw_total = windows.iter().try_fold(0u32, |sum, window| {
            sum.checked_add(window.fee)
                .ok_or_else(|| DomainError::Calculation("toll fee total overflowed".to_string()))
        })?;
        let total = raw_total.min(self.daily_cap);

        debug!(
            plate = %vehicle.plate,
            windows = windows.len(),
            raw_total,
            total,
            "Toll calculated"
        );

        Ok(TollBreakdown {
            windows,
            raw_total,
            total,
            exemption: None,
        })
    }
}

/// Split passages into greedy one-hour windows.
///
/// Passages are sorted (stable) by full date-time. The first unconsumed
/// passage opens a window; every passage before `start + 1h` joins it.
pub fn partition(fee_schedule: &FeeSchedule, passages: &[Passage]) -> DomainResult<Vec<TollWindow>> {
    let mut sorted = passages.to_vec();
    sorted.sort();

    let window_length = Duration::hours(1);
    let mut windows = Vec::new();
    let mut rest = sorted.as_slice();

    while let Some(&start) = rest.first() {
        let end = start.checked_add_signed(window_length).ok_or_else(|| {
            DomainError::Calculation(format!("window starting at {} is out of range", start))
        })?;

        let taken = rest.iter().take_while(|&&t| t < end).count();
        let (inside, remaining) = rest.split_at(taken);

        let fee = inside
            .iter()
            .map(|t| fee_schedule.fee_for(t.time()))
            .max()
            .unwrap_or(0);

        windows.push(TollWindow {
            start,
            end,
            fee,
            passages: inside.to_vec(),
        });
        rest = remaining;
    }

    Ok(windows)
}

// ── Tests ──────────────────────────────────────────────────────
