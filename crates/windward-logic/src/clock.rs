//! The 28-day cycle calendar.
//!
//! A cycle ends in a cataclysm check: either the shrines were stabilized
//! this cycle (the clock resets without escalation) or the cycle failed
//! (the escalation ceiling rises 25%). Intensity is 0 through day 21 and
//! ramps over the final week.

use serde::{Deserialize, Serialize};

use crate::constants::calendar::*;

/// What a clock tick produced, for the owner to turn into events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockReport {
    /// Day boundaries crossed during this tick (usually 0 or 1).
    pub days_advanced: u32,
    /// A cycle wrapped and the cataclysm check fired.
    pub cataclysm_triggered: bool,
    /// The wrap was stabilized (no escalation applied).
    pub stabilized: bool,
}

/// Monotonic day counter with 28-day cycles and a progress fraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleClock {
    /// Total days elapsed since world start (starts at 1).
    pub absolute_day: u32,
    /// Day within the current cycle, 1..=28.
    pub cycle_day: u32,
    /// Which cycle we are in (starts at 1).
    pub cycle_count: u32,
    /// Normalized escalation factor for the final week, 0..=1.
    pub cataclysm_intensity: f32,
    /// Real seconds per in-game day.
    seconds_per_day: f32,
    /// Accumulated seconds toward the next day boundary.
    accumulated: f32,
}

impl CycleClock {
    pub fn new(seconds_per_day: f32) -> Self {
        Self {
            absolute_day: 1,
            cycle_day: 1,
            cycle_count: 1,
            cataclysm_intensity: 0.0,
            seconds_per_day: seconds_per_day
                .clamp(MIN_SECONDS_PER_DAY, MAX_SECONDS_PER_DAY),
            accumulated: 0.0,
        }
    }

    pub fn seconds_per_day(&self) -> f32 {
        self.seconds_per_day
    }

    pub fn set_seconds_per_day(&mut self, seconds: f32) {
        self.seconds_per_day = seconds.clamp(MIN_SECONDS_PER_DAY, MAX_SECONDS_PER_DAY);
        self.accumulated = self.accumulated.min(self.seconds_per_day);
    }

    /// Fraction of the current day elapsed, in `[0, 1)`.
    pub fn day_progress(&self) -> f32 {
        (self.accumulated / self.seconds_per_day).min(0.999_99)
    }

    /// Accumulate elapsed time, advancing days when the budget is exceeded
    /// and carrying over the remainder. `stabilized` is consulted only if a
    /// cycle wraps during this tick.
    pub fn tick(&mut self, dt: f32, stabilized: bool) -> ClockReport {
        let mut report = ClockReport::default();
        self.accumulated += dt.max(0.0);
        while self.accumulated >= self.seconds_per_day {
            self.accumulated -= self.seconds_per_day;
            let wrapped = self.advance_gated(stabilized);
            report.days_advanced += 1;
            if wrapped {
                report.cataclysm_triggered = true;
                report.stabilized = stabilized;
            }
        }
        report
    }

    /// Manual day advance (testing input). Wrapping escalates
    /// unconditionally: day returns to 1, `cycle_count` increments, and the
    /// cataclysm check fires. Returns whether the cycle wrapped.
    pub fn advance(&mut self) -> bool {
        self.advance_gated(false)
    }

    /// Day advance with the cycle-end gate: on a wrap, a stabilized ledger
    /// suppresses the escalation.
    pub fn advance_gated(&mut self, stabilized: bool) -> bool {
        self.absolute_day += 1;
        self.cycle_day += 1;
        let wrapped = self.cycle_day > DAYS_PER_CYCLE;
        if wrapped {
            self.reset_cycle(stabilized);
        }
        self.cataclysm_intensity = cataclysm_intensity(self.cycle_day, self.cycle_count);
        wrapped
    }

    /// Start a fresh cycle. Escalates (increments `cycle_count`) only when
    /// the cycle was not stabilized.
    pub fn reset_cycle(&mut self, stabilized: bool) {
        self.cycle_day = 1;
        if !stabilized {
            self.cycle_count += 1;
        }
        self.cataclysm_intensity = 0.0;
    }
}

impl Default for CycleClock {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDS_PER_DAY)
    }
}

/// Escalation factor for a given day and cycle. Zero through day 21; then
/// a linear ramp over the final week whose ceiling rises 25% per completed
/// cycle, clamped to `[0, 1]`.
pub fn cataclysm_intensity(cycle_day: u32, cycle_count: u32) -> f32 {
    if cycle_day < CATACLYSM_ONSET_DAY {
        return 0.0;
    }
    let ramp = (cycle_day - CATACLYSM_ONSET_DAY) as f32 / CATACLYSM_RAMP_DAYS;
    let ceiling = 1.0 + ESCALATION_PER_CYCLE * (cycle_count - 1) as f32;
    (ramp * ceiling).clamp(0.0, 1.0)
}
