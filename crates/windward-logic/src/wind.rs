//! Wind model: slow directional drift, a gust oscillator, and a storm
//! schedule driven by the calendar.
//!
//! Direction retargets on a randomized schedule; the draws themselves come
//! from the engine (this crate stays RNG-free) and are applied through
//! [`WindState::retarget`]. Between retargets the angle rotates toward its
//! target at a fixed rate along the shortest arc — strength and angle are
//! only ever approached asymptotically, never snapped, except at init.

use serde::{Deserialize, Serialize};

use crate::constants::wind::*;
use crate::geometry::{direction_from_angle, rotate_toward, Vec3};

/// Global wind state. One writer (the weather system), many readers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindState {
    /// Current direction in radians.
    pub angle: f32,
    /// Direction the wind is drifting toward.
    pub target_angle: f32,
    /// Current strength, clamped to `[base·0.3, max·storm_multiplier]`.
    pub strength: f32,
    /// Absolute sim time of the next scheduled direction shift.
    pub next_shift_time: f64,
    /// Weather escalation multiplier (1.0 calm .. 2.0 cataclysm peak).
    pub storm_multiplier: f32,
    /// Divides the retarget interval (shifts come faster in storms).
    pub shift_multiplier: f32,
    gust_phase: f32,
}

impl WindState {
    pub fn new() -> Self {
        Self {
            angle: PREVAILING_ANGLE,
            target_angle: PREVAILING_ANGLE,
            strength: BASE_STRENGTH,
            next_shift_time: 0.0,
            storm_multiplier: 1.0,
            shift_multiplier: 1.0,
            gust_phase: 0.0,
        }
    }

    /// Whether a direction shift is due at `sim_time`.
    pub fn shift_due(&self, sim_time: f64) -> bool {
        sim_time >= self.next_shift_time
    }

    /// Apply a retarget decided by the caller's RNG draws.
    ///
    /// `biased` picks the prevailing-wind lobe (`offset` in ±[`BIASED_SPREAD`]
    /// expected) versus a fully random direction (`offset` in ±PI);
    /// `interval_secs` is the raw draw from 90–240 s, divided here by the
    /// shift-frequency multiplier.
    pub fn retarget(&mut self, biased: bool, offset: f32, interval_secs: f32, sim_time: f64) {
        self.target_angle = if biased {
            crate::geometry::wrap_angle(PREVAILING_ANGLE + offset)
        } else {
            crate::geometry::wrap_angle(offset)
        };
        let divisor = self.shift_multiplier.max(0.1);
        self.next_shift_time = sim_time + (interval_secs / divisor) as f64;
    }

    /// Rotate the current angle toward the target, shortest arc.
    pub fn drift(&mut self, dt: f32) {
        self.angle = rotate_toward(self.angle, self.target_angle, TURN_RATE * dt);
    }

    /// Advance the gust oscillator and recompute strength.
    pub fn gust(&mut self, dt: f32) {
        self.gust_phase += dt * GUST_RATE * self.storm_multiplier;
        let g = gust_value(self.gust_phase);
        self.strength = clamp_strength(
            BASE_STRENGTH + g * GUST_AMPLITUDE * self.storm_multiplier,
            self.storm_multiplier,
        );
    }

    /// Ramp the storm/shift multipliers from the calendar day. Flat through
    /// day 14, mild through 21, escalating toward the peak through 28.
    pub fn set_storm_from_day(&mut self, cycle_day: u32, day_progress: f32) {
        let m = storm_multiplier_for_day(cycle_day, day_progress);
        self.storm_multiplier = m;
        self.shift_multiplier = m;
    }

    /// Direct cataclysm-intensity injection; overrides the day schedule
    /// when it demands more weather than the day alone would.
    pub fn inject_cataclysm_intensity(&mut self, intensity: f32) {
        let injected = 1.0 + (STORM_PEAK_MULTIPLIER - 1.0) * intensity.clamp(0.0, 1.0);
        if injected > self.storm_multiplier {
            self.storm_multiplier = injected;
            self.shift_multiplier = injected;
        }
    }

    /// Unit direction of the global wind.
    pub fn direction(&self) -> Vec3 {
        direction_from_angle(self.angle)
    }

    /// Strength normalized against the calm-weather maximum.
    pub fn normalized_strength(&self) -> f32 {
        (self.strength / MAX_STRENGTH).clamp(0.0, 1.5)
    }

    /// Wind direction at a world position: the global angle perturbed by
    /// three deterministic trig offsets keyed on x/z. Stable directional
    /// lanes with no stored per-zone state.
    pub fn angle_at(&self, x: f32, z: f32) -> f32 {
        crate::geometry::wrap_angle(
            self.angle
                + LANE_AMP_X * (x * LANE_FREQ_X).sin()
                + LANE_AMP_Z * (z * LANE_FREQ_Z).cos()
                + LANE_AMP_DIAG * ((x + z) * LANE_FREQ_DIAG).sin(),
        )
    }

    /// Unit direction at a world position.
    pub fn direction_at(&self, x: f32, z: f32) -> Vec3 {
        direction_from_angle(self.angle_at(x, z))
    }
}

impl Default for WindState {
    fn default() -> Self {
        Self::new()
    }
}

/// Three-term sum-of-sines gust waveform in roughly `[-1, 1]`.
pub fn gust_value(phase: f32) -> f32 {
    0.5 * phase.sin() + 0.3 * (phase * 2.3).sin() + 0.2 * (phase * 4.1).sin()
}

/// Clamp strength into the invariant band `[base·0.3, max·storm_mult]`.
pub fn clamp_strength(raw: f32, storm_multiplier: f32) -> f32 {
    raw.clamp(BASE_STRENGTH * 0.3, MAX_STRENGTH * storm_multiplier)
}

/// Calendar-driven weather multiplier: 1.0 through day 14, a mild linear
/// ramp to 1.25 through day 21, then escalation to 2.0 through day 28.
pub fn storm_multiplier_for_day(cycle_day: u32, day_progress: f32) -> f32 {
    let d = cycle_day as f32 + day_progress.clamp(0.0, 1.0) - 1.0;
    if d < 14.0 {
        1.0
    } else if d < 21.0 {
        let t = (d - 14.0) / 7.0;
        1.0 + (MILD_PEAK_MULTIPLIER - 1.0) * t
    } else {
        let t = ((d - 21.0) / 7.0).min(1.0);
        MILD_PEAK_MULTIPLIER + (STORM_PEAK_MULTIPLIER - MILD_PEAK_MULTIPLIER) * t
    }
}
