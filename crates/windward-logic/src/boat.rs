//! Boat dynamics — an arcade force model with no integration history.
//!
//! Every physics tick recomputes the full force set from current state, in
//! a fixed order: drag, thrust (+ wind bonus), brake, steering torque,
//! angular damping, lateral cancellation, buoyancy. Capsizing is the only
//! failure path and is itself a recovery mechanism (respawn at harbor).

use serde::{Deserialize, Serialize};

use crate::constants::boat::*;
use crate::constants::{waves, world};
use crate::geometry::{direction_from_angle, right_from_angle, Vec3};

/// Helm input for one physics tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelmInput {
    /// Forward/back throttle in [-1, 1].
    pub throttle: f32,
    /// Steering in [-1, 1] (positive turns to starboard).
    pub steering: f32,
    /// Heavy brake engaged.
    pub brake: bool,
}

/// The three-state movement indicator shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveState {
    Idle,
    Sailing,
    Braking,
}

/// Wind as sampled at the boat's position for one tick.
#[derive(Debug, Clone, Copy)]
pub struct WindSample {
    /// Local wind direction (unit, horizontal).
    pub direction: Vec3,
    /// Strength normalized against the calm-weather maximum.
    pub normalized_strength: f32,
}

/// Kinematic state of the hull. Heading is yaw in radians; roll/pitch are
/// small tilt angles integrated with their own rates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoatKinematics {
    pub position: Vec3,
    pub velocity: Vec3,
    pub heading: f32,
    pub yaw_rate: f32,
    pub roll: f32,
    pub roll_rate: f32,
    pub pitch: f32,
    pub pitch_rate: f32,
}

impl BoatKinematics {
    pub fn at_rest(position: Vec3, heading: f32) -> Self {
        Self {
            position,
            velocity: Vec3::ZERO,
            heading,
            yaw_rate: 0.0,
            roll: 0.0,
            roll_rate: 0.0,
            pitch: 0.0,
            pitch_rate: 0.0,
        }
    }

    pub fn forward(&self) -> Vec3 {
        direction_from_angle(self.heading)
    }

    pub fn speed(&self) -> f32 {
        self.velocity.planar_length()
    }

    /// Signed speed along the heading.
    pub fn forward_speed(&self) -> f32 {
        self.velocity.dot(&self.forward())
    }

    /// Tilt of the hull's up-vector from world-up.
    pub fn tilt(&self) -> f32 {
        (self.roll * self.roll + self.pitch * self.pitch).sqrt()
    }

    /// Zero all motion, keeping pose.
    pub fn halt(&mut self) {
        self.velocity = Vec3::ZERO;
        self.yaw_rate = 0.0;
        self.roll_rate = 0.0;
        self.pitch_rate = 0.0;
    }
}

/// Hull status flags and countdowns.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoatStatus {
    pub move_state: MoveState,
    pub sail_open: bool,
    pub is_capsized: bool,
    /// Countdown to respawn while capsized.
    pub capsize_timer: f32,
    /// Countdown suppressing capsize checks after a teleport.
    pub spawn_grace: f32,
}

impl BoatStatus {
    pub fn new() -> Self {
        Self {
            move_state: MoveState::Idle,
            sail_open: true,
            is_capsized: false,
            capsize_timer: 0.0,
            spawn_grace: SPAWN_GRACE_SECS,
        }
    }

    /// Count down the capsize and grace timers. Returns true when the
    /// respawn is due this tick.
    pub fn tick_timers(&mut self, dt: f32) -> bool {
        if self.spawn_grace > 0.0 {
            self.spawn_grace = (self.spawn_grace - dt).max(0.0);
        }
        if self.is_capsized {
            self.capsize_timer -= dt;
            if self.capsize_timer <= 0.0 {
                return true;
            }
        }
        false
    }

    pub fn begin_capsize(&mut self) {
        self.is_capsized = true;
        self.capsize_timer = RESPAWN_DELAY_SECS;
    }

    /// Clear capsize state and restart the teleport grace window.
    pub fn respawned(&mut self) {
        self.is_capsized = false;
        self.capsize_timer = 0.0;
        self.spawn_grace = SPAWN_GRACE_SECS;
    }
}

impl Default for BoatStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Why a capsize triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapsizeReason {
    /// Hull tilted past the threshold.
    Tilted,
    /// Sank below the floor depth.
    Sunk,
    /// Left the world radius/height bounds.
    OutOfBounds,
}

/// Sail efficiency from heading-to-wind alignment.
///
/// Favorable or beam wind (`alignment >= 0`) tapers gently from 1.0 dead
/// astern; upwind takes a penalty clamped to [0.2, 0.5]. A closed sail
/// produces nothing.
pub fn sail_efficiency(alignment: f32, sail_open: bool) -> f32 {
    if !sail_open {
        return 0.0;
    }
    if alignment >= 0.0 {
        1.0 - FAVORABLE_FALLOFF * alignment
    } else {
        (UPWIND_BASE + UPWIND_SLOPE * alignment).clamp(UPWIND_MIN, UPWIND_MAX)
    }
}

/// Ocean surface height at a position and time — three-term sum of sines.
/// Only the buoyancy solver consumes this; rendering is elsewhere.
pub fn wave_height(x: f32, z: f32, time: f64) -> f32 {
    let t = time as f32;
    waves::AMP_A * (x * waves::FREQ_A + t * waves::RATE_A).sin()
        + waves::AMP_B * (z * waves::FREQ_B + t * waves::RATE_B).sin()
        + waves::AMP_C * ((x + z) * waves::FREQ_C + t * waves::RATE_C).sin()
}

/// Classify the HUD movement indicator for this tick.
pub fn classify_move_state(input: &HelmInput, forward_speed: f32, speed: f32) -> MoveState {
    if input.brake && forward_speed > IDLE_SPEED {
        MoveState::Braking
    } else if speed > IDLE_SPEED || input.throttle.abs() > 0.05 {
        MoveState::Sailing
    } else {
        MoveState::Idle
    }
}

/// One fixed-rate dynamics step. Applies the full force order to `kin` and
/// advects by the ocean current. Pure: same inputs, same result.
pub fn step(
    kin: &mut BoatKinematics,
    input: &HelmInput,
    sail_open: bool,
    wind: &WindSample,
    current: Vec3,
    time: f64,
    dt: f32,
) {
    let forward = kin.forward();
    let right = right_from_angle(kin.heading);

    // (a) velocity-proportional drag, coast or heavy brake
    let drag_coeff = if input.brake { BRAKE_DRAG } else { COAST_DRAG };
    kin.velocity = kin.velocity + kin.velocity * (-drag_coeff * dt);

    // (b) throttle thrust plus wind bonus through the sail
    let alignment = forward.dot(&wind.direction);
    let efficiency = sail_efficiency(alignment, sail_open);
    let thrust = if input.throttle >= 0.0 {
        input.throttle * FORWARD_THRUST
    } else {
        input.throttle * REVERSE_THRUST
    };
    let wind_bonus = WIND_BONUS * efficiency * wind.normalized_strength;
    // The sail only helps while underway under throttle
    let bonus = if input.throttle > 0.0 { wind_bonus } else { 0.0 };
    kin.velocity += forward * ((thrust + bonus) * dt);

    // (c) brake force opposing forward motion, only while moving forward
    let forward_speed = kin.velocity.dot(&forward);
    if input.brake && forward_speed > 0.0 {
        let decel = (BRAKE_FORCE * dt).min(forward_speed);
        kin.velocity = kin.velocity + forward * (-decel);
    }

    // (d) steering torque, blended up with speed so a stationary boat
    // still answers the helm a little
    let speed = kin.speed();
    let authority =
        STEER_STATIONARY_BLEND + (1.0 - STEER_STATIONARY_BLEND) * (speed / STEER_FULL_SPEED).min(1.0);
    kin.yaw_rate += input.steering * STEER_TORQUE * authority * dt;

    // (e) angular damping
    kin.yaw_rate *= (1.0 - ANGULAR_DAMPING * dt).max(0.0);
    kin.heading = crate::geometry::wrap_angle(kin.heading + kin.yaw_rate * dt);

    // (f) lateral-velocity cancellation ("no-slip")
    let lateral = kin.velocity.dot(&right);
    kin.velocity = kin.velocity + right * (-lateral * (LATERAL_DRAG * dt).min(1.0));

    // (g) buoyancy: vertical spring-damper toward the wave surface, plus
    // an alignment spring pulling the up-vector back to world-up
    let surface = wave_height(kin.position.x, kin.position.z, time);
    let depth_error = surface - kin.position.y;
    kin.velocity.y += (BUOYANCY_STIFFNESS * depth_error - BUOYANCY_DAMPING * kin.velocity.y) * dt;

    let heel = input.steering * speed * HEEL_FACTOR;
    kin.roll_rate += (heel - UPRIGHT_STIFFNESS * kin.roll - UPRIGHT_DAMPING * kin.roll_rate) * dt;
    kin.pitch_rate += (-UPRIGHT_STIFFNESS * kin.pitch - UPRIGHT_DAMPING * kin.pitch_rate) * dt;
    kin.roll += kin.roll_rate * dt;
    kin.pitch += kin.pitch_rate * dt;

    // Integrate position; the current field advects the hull directly.
    kin.position += (kin.velocity + current) * dt;
}

/// Check the capsize conditions. Callers skip this during spawn grace.
pub fn check_capsize(kin: &BoatKinematics) -> Option<CapsizeReason> {
    if kin.tilt() > CAPSIZE_TILT {
        return Some(CapsizeReason::Tilted);
    }
    if kin.position.y < CAPSIZE_FLOOR {
        return Some(CapsizeReason::Sunk);
    }
    if kin.position.planar_length() > world::BOUNDS_RADIUS
        || kin.position.y.abs() > world::BOUNDS_HEIGHT
    {
        return Some(CapsizeReason::OutOfBounds);
    }
    None
}

/// The fixed pose boats respawn to.
pub fn harbor_pose() -> (Vec3, f32) {
    (
        Vec3::new(world::HARBOR_X, 0.0, world::HARBOR_Z),
        world::HARBOR_HEADING,
    )
}
