//! Tuned simulation constants.
//!
//! Most of these are handling/feel numbers with no derivation — they are
//! configuration data, kept together so the harness and the engine agree.

pub mod calendar {
    /// Days in one cycle, ending in a cataclysm check.
    pub const DAYS_PER_CYCLE: u32 = 28;
    /// First day of the escalation window.
    pub const CATACLYSM_ONSET_DAY: u32 = 22;
    /// Days over which intensity ramps from 0 to the cycle ceiling.
    pub const CATACLYSM_RAMP_DAYS: f32 = 6.0;
    /// Ceiling raise per completed cycle (+25%).
    pub const ESCALATION_PER_CYCLE: f32 = 0.25;
    /// Default real-time pacing. Configurable from ~4.3s (2 min/cycle)
    /// up to 180s (84 min/cycle).
    pub const DEFAULT_SECONDS_PER_DAY: f32 = 60.0;
    pub const MIN_SECONDS_PER_DAY: f32 = 4.3;
    pub const MAX_SECONDS_PER_DAY: f32 = 180.0;
}

pub mod wind {
    /// Prevailing direction retargets bias toward (radians, roughly NE).
    pub const PREVAILING_ANGLE: f32 = 0.7854;
    /// 80% of retarget draws fall within ±108° of prevailing.
    pub const BIASED_SPREAD: f32 = 1.8850;
    /// Probability of a biased (vs fully random) retarget draw.
    pub const BIASED_DRAW_CHANCE: f32 = 0.8;
    /// Seconds between direction shifts, before the frequency multiplier.
    pub const SHIFT_MIN_SECS: f32 = 90.0;
    pub const SHIFT_MAX_SECS: f32 = 240.0;
    /// Angular rate at which the wind rotates toward its target (rad/s).
    pub const TURN_RATE: f32 = 0.12;

    pub const BASE_STRENGTH: f32 = 6.0;
    pub const MAX_STRENGTH: f32 = 14.0;
    pub const GUST_AMPLITUDE: f32 = 3.0;
    /// Base phase advance rate of the gust oscillator (rad/s).
    pub const GUST_RATE: f32 = 0.55;

    // Per-position direction lanes: three trig offsets keyed on world x/z.
    pub const LANE_AMP_X: f32 = 0.30;
    pub const LANE_FREQ_X: f32 = 0.011;
    pub const LANE_AMP_Z: f32 = 0.25;
    pub const LANE_FREQ_Z: f32 = 0.017;
    pub const LANE_AMP_DIAG: f32 = 0.20;
    pub const LANE_FREQ_DIAG: f32 = 0.007;

    /// Storm multiplier at the end of the mild ramp (day 22).
    pub const MILD_PEAK_MULTIPLIER: f32 = 1.25;
    /// Storm multiplier ceiling at the end of the cycle.
    pub const STORM_PEAK_MULTIPLIER: f32 = 2.0;
}

pub mod boat {
    pub const FORWARD_THRUST: f32 = 12.0;
    pub const REVERSE_THRUST: f32 = 5.0;
    /// Max extra thrust from a fully efficient sail in max wind.
    pub const WIND_BONUS: f32 = 6.0;
    /// Sail efficiency falloff for favorable/beam wind (1 − 0.15·alignment).
    pub const FAVORABLE_FALLOFF: f32 = 0.15;
    pub const UPWIND_BASE: f32 = 0.5;
    pub const UPWIND_SLOPE: f32 = 0.3;
    pub const UPWIND_MIN: f32 = 0.2;
    pub const UPWIND_MAX: f32 = 0.5;

    pub const COAST_DRAG: f32 = 0.8;
    pub const BRAKE_DRAG: f32 = 1.8;
    pub const BRAKE_FORCE: f32 = 10.0;
    pub const STEER_TORQUE: f32 = 1.6;
    /// Steering authority when stationary, blending up to 1.0 when moving.
    pub const STEER_STATIONARY_BLEND: f32 = 0.35;
    /// Speed at which steering reaches full authority.
    pub const STEER_FULL_SPEED: f32 = 6.0;
    pub const ANGULAR_DAMPING: f32 = 2.2;
    /// Lateral "no-slip" velocity cancellation.
    pub const LATERAL_DRAG: f32 = 3.0;

    pub const BUOYANCY_STIFFNESS: f32 = 18.0;
    pub const BUOYANCY_DAMPING: f32 = 6.0;
    pub const UPRIGHT_STIFFNESS: f32 = 9.0;
    pub const UPRIGHT_DAMPING: f32 = 4.0;
    /// Heel torque from steering at speed.
    pub const HEEL_FACTOR: f32 = 0.04;

    /// Tilt from vertical that capsizes the hull (~55°).
    pub const CAPSIZE_TILT: f32 = 0.96;
    /// Sinking below this depth capsizes.
    pub const CAPSIZE_FLOOR: f32 = -3.5;
    pub const RESPAWN_DELAY_SECS: f32 = 3.0;
    /// Capsize checks are suppressed for this long after a teleport.
    pub const SPAWN_GRACE_SECS: f32 = 2.0;
    /// Below this speed with no throttle the boat reads as Idle.
    pub const IDLE_SPEED: f32 = 0.15;
}

pub mod waves {
    pub const AMP_A: f32 = 0.45;
    pub const FREQ_A: f32 = 0.08;
    pub const RATE_A: f32 = 0.9;
    pub const AMP_B: f32 = 0.30;
    pub const FREQ_B: f32 = 0.06;
    pub const RATE_B: f32 = 1.3;
    pub const AMP_C: f32 = 0.20;
    pub const FREQ_C: f32 = 0.04;
    pub const RATE_C: f32 = 0.7;
}

pub mod docking {
    /// Nominal approach speed; docking is refused above 2.5× this.
    pub const APPROACH_SPEED: f32 = 3.0;
    pub const MAX_DOCK_SPEED_FACTOR: f32 = 2.5;
    /// Proximity radius of a dock zone.
    pub const DOCK_RANGE: f32 = 9.0;
    pub const APPROACH_DURATION_SECS: f32 = 1.25;
    pub const UNDOCK_DURATION_SECS: f32 = 1.5;
    pub const UNDOCK_IMPULSE: f32 = 6.0;

    /// Nominal anchor-drop speed; anchoring is refused above 2× this.
    pub const ANCHOR_DROP_SPEED: f32 = 2.0;
    pub const MAX_ANCHOR_SPEED_FACTOR: f32 = 2.0;
    /// Anchoring is refused within this distance of an island shore.
    pub const SHORE_BUFFER: f32 = 14.0;
    pub const ANCHOR_DRAG: f32 = 2.4;
    /// Elastic pull back toward the anchor point.
    pub const ANCHOR_STIFFNESS: f32 = 1.8;
    /// Tether length before the elastic pull engages.
    pub const ANCHOR_SLACK: f32 = 5.0;
}

pub mod region {
    /// Inner safe circle around the harbor.
    pub const SAFE_RADIUS: f32 = 260.0;
    /// Beyond this, everything is the edge ring.
    pub const EDGE_RADIUS: f32 = 1000.0;
    /// Per-slice inner radius floors (overlapping the safe circle band).
    pub const SLICE_FLOORS: [f32; 3] = [300.0, 340.0, 320.0];
    /// Blend factor advance per second after a region change.
    pub const BLEND_RATE: f32 = 0.8;
}

pub mod world {
    /// Boats beyond this planar radius capsize (out of bounds).
    pub const BOUNDS_RADIUS: f32 = 1200.0;
    /// Boats above this height capsize (launched out of the world).
    pub const BOUNDS_HEIGHT: f32 = 60.0;
    /// Side of the fixed square world covered by the map overlay.
    pub const MAP_EXTENT: f32 = 2400.0;
    /// Map overlay partition (8×8 cells).
    pub const MAP_GRID: usize = 8;

    pub const HARBOR_X: f32 = 24.0;
    pub const HARBOR_Z: f32 = -18.0;
    pub const HARBOR_HEADING: f32 = 1.5708;
}

pub mod current {
    /// Peak tangential speed of the gyre.
    pub const GYRE_STRENGTH: f32 = 1.6;
    /// Radius of peak gyre flow.
    pub const GYRE_RADIUS: f32 = 520.0;
    pub const NOISE_AMP: f32 = 0.35;
    pub const NOISE_FREQ_X: f32 = 0.013;
    pub const NOISE_FREQ_Z: f32 = 0.009;
}
