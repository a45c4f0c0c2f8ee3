//! Docking and anchoring — a five-state machine with advisory guards.
//!
//! Guard failures are never errors: they produce a different HUD prompt and
//! leave the state unchanged. The dock/anchor payloads live inside the state
//! variants, so at most one of them is ever meaningful.

use serde::{Deserialize, Serialize};

use crate::constants::docking::*;
use crate::geometry::{direction_from_angle, smoothstep, Vec3};

/// A dock berth: where to moor, which way the boat faces, and whose island
/// it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dock {
    pub position: Vec3,
    /// Heading the boat is turned to while docked (radians).
    pub forward: f32,
    pub island: String,
}

/// The docking/anchor state machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DockingState {
    Sailing,
    /// Easing into the dock pose; captures where the approach began.
    DockingApproach {
        dock: Dock,
        start_position: Vec3,
        start_heading: f32,
        elapsed: f32,
    },
    /// Moored; the rigid body is frozen.
    Docked { dock: Dock },
    /// Riding at anchor with a tether back to the drop point.
    Anchored { anchor_position: Vec3 },
    /// Push-off after casting away, timed back to `Sailing`.
    Undocking { away: Vec3, elapsed: f32 },
}

impl DockingState {
    pub fn is_sailing(&self) -> bool {
        matches!(self, DockingState::Sailing)
    }

    /// Whether the rigid body is frozen (docked or mid-approach).
    pub fn body_frozen(&self) -> bool {
        matches!(
            self,
            DockingState::Docked { .. } | DockingState::DockingApproach { .. }
        )
    }

    pub fn active_dock(&self) -> Option<&Dock> {
        match self {
            DockingState::DockingApproach { dock, .. } | DockingState::Docked { dock } => {
                Some(dock)
            }
            _ => None,
        }
    }

    pub fn anchor_position(&self) -> Option<Vec3> {
        match self {
            DockingState::Anchored { anchor_position } => Some(*anchor_position),
            _ => None,
        }
    }
}

impl Default for DockingState {
    fn default() -> Self {
        DockingState::Sailing
    }
}

/// Outcome of an interact press while sailing near a dock.
#[derive(Debug, Clone, PartialEq)]
pub enum DockAttempt {
    /// Approach begins toward this dock.
    Approved(Dock),
    /// "Too fast to dock."
    TooFast,
    /// No dock in range.
    NoDockNearby,
}

/// Outcome of an interact press while sailing in open water.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorAttempt {
    Approved,
    /// "Too fast to drop anchor."
    TooFast,
    /// "Too close to shore."
    TooNearShore,
}

/// Nearest dock within range, ties broken by Euclidean distance.
pub fn nearest_dock<'a>(position: &Vec3, docks: &'a [Dock]) -> Option<&'a Dock> {
    docks
        .iter()
        .map(|d| (d, position.planar_distance(&d.position)))
        .filter(|(_, dist)| *dist <= DOCK_RANGE)
        .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(d, _)| d)
}

/// Guard the Sailing → DockingApproach edge.
pub fn try_dock(position: &Vec3, speed: f32, docks: &[Dock]) -> DockAttempt {
    let Some(dock) = nearest_dock(position, docks) else {
        return DockAttempt::NoDockNearby;
    };
    if speed > APPROACH_SPEED * MAX_DOCK_SPEED_FACTOR {
        return DockAttempt::TooFast;
    }
    DockAttempt::Approved(dock.clone())
}

/// Guard the Sailing → Anchored edge. `shore_distance` is the distance to
/// the nearest island shoreline.
pub fn try_anchor(speed: f32, shore_distance: f32) -> AnchorAttempt {
    if speed > ANCHOR_DROP_SPEED * MAX_ANCHOR_SPEED_FACTOR {
        return AnchorAttempt::TooFast;
    }
    if shore_distance < SHORE_BUFFER {
        return AnchorAttempt::TooNearShore;
    }
    AnchorAttempt::Approved
}

/// Eased pose along the docking approach. `elapsed` in seconds; progress
/// completes at [`APPROACH_DURATION_SECS`]. Returns (position, heading,
/// progress).
pub fn approach_pose(
    start_position: &Vec3,
    start_heading: f32,
    dock: &Dock,
    elapsed: f32,
) -> (Vec3, f32, f32) {
    let progress = (elapsed / APPROACH_DURATION_SECS).clamp(0.0, 1.0);
    let eased = smoothstep(progress);
    let position = start_position.lerp(&dock.position, eased);
    let heading = crate::geometry::wrap_angle(
        start_heading + crate::geometry::angle_delta(start_heading, dock.forward) * eased,
    );
    (position, heading, progress)
}

/// Push-off velocity away from a dock: straight out the back of the berth.
pub fn undock_impulse(dock: &Dock) -> Vec3 {
    direction_from_angle(dock.forward) * -UNDOCK_IMPULSE
}

/// Elastic tether acceleration while anchored. Zero inside the slack
/// radius, spring pull beyond it, on top of heavy drag handled by the
/// caller's coefficients.
pub fn anchor_pull(position: &Vec3, anchor: &Vec3) -> Vec3 {
    let offset = Vec3::new(anchor.x - position.x, 0.0, anchor.z - position.z);
    let stretch = offset.planar_length() - ANCHOR_SLACK;
    if stretch <= 0.0 {
        return Vec3::ZERO;
    }
    offset.normalize() * (stretch * ANCHOR_STIFFNESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dock_at(x: f32, z: f32, island: &str) -> Dock {
        Dock {
            position: Vec3::new(x, 0.0, z),
            forward: 0.0,
            island: island.into(),
        }
    }

    #[test]
    fn nearest_dock_picks_closest_in_range() {
        let docks = vec![dock_at(5.0, 0.0, "ember"), dock_at(2.0, 0.0, "mist")];
        let found = nearest_dock(&Vec3::ZERO, &docks).unwrap();
        assert_eq!(found.island, "mist");
    }

    #[test]
    fn nearest_dock_ignores_out_of_range() {
        let docks = vec![dock_at(DOCK_RANGE + 1.0, 0.0, "far")];
        assert!(nearest_dock(&Vec3::ZERO, &docks).is_none());
    }

    #[test]
    fn docking_refused_above_speed_gate() {
        let docks = vec![dock_at(2.0, 0.0, "mist")];
        let limit = APPROACH_SPEED * MAX_DOCK_SPEED_FACTOR;
        assert_eq!(
            try_dock(&Vec3::ZERO, limit + 0.1, &docks),
            DockAttempt::TooFast
        );
        assert!(matches!(
            try_dock(&Vec3::ZERO, limit - 0.1, &docks),
            DockAttempt::Approved(_)
        ));
    }

    #[test]
    fn docking_without_a_dock_reports_none() {
        assert_eq!(try_dock(&Vec3::ZERO, 0.0, &[]), DockAttempt::NoDockNearby);
    }

    #[test]
    fn anchor_guards() {
        let limit = ANCHOR_DROP_SPEED * MAX_ANCHOR_SPEED_FACTOR;
        assert_eq!(try_anchor(limit + 0.1, 100.0), AnchorAttempt::TooFast);
        assert_eq!(
            try_anchor(1.0, SHORE_BUFFER - 1.0),
            AnchorAttempt::TooNearShore
        );
        assert_eq!(try_anchor(1.0, 100.0), AnchorAttempt::Approved);
    }

    #[test]
    fn approach_pose_completes_at_dock() {
        let dock = dock_at(10.0, 0.0, "mist");
        let start = Vec3::new(0.0, 0.0, 5.0);
        let (pos0, _, p0) = approach_pose(&start, 1.0, &dock, 0.0);
        assert_eq!(pos0, start);
        assert_eq!(p0, 0.0);

        let (pos1, heading1, p1) = approach_pose(&start, 1.0, &dock, APPROACH_DURATION_SECS);
        assert!(pos1.distance(&dock.position) < 1e-4);
        assert!((heading1 - dock.forward).abs() < 1e-4);
        assert_eq!(p1, 1.0);
    }

    #[test]
    fn approach_progress_is_monotonic() {
        let dock = dock_at(10.0, 0.0, "mist");
        let start = Vec3::ZERO;
        let mut last = -1.0;
        for i in 0..=10 {
            let elapsed = APPROACH_DURATION_SECS * i as f32 / 10.0;
            let (_, _, p) = approach_pose(&start, 0.0, &dock, elapsed);
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn undock_pushes_away_from_berth() {
        let dock = dock_at(0.0, 0.0, "mist");
        let v = undock_impulse(&dock);
        // forward = +x, so the push-off is -x
        assert!(v.x < 0.0);
        assert!((v.length() - UNDOCK_IMPULSE).abs() < 1e-4);
    }

    #[test]
    fn anchor_pull_engages_past_slack() {
        let anchor = Vec3::ZERO;
        let near = Vec3::new(ANCHOR_SLACK * 0.5, 0.0, 0.0);
        assert_eq!(anchor_pull(&near, &anchor), Vec3::ZERO);

        let far = Vec3::new(ANCHOR_SLACK + 4.0, 0.0, 0.0);
        let pull = anchor_pull(&far, &anchor);
        assert!(pull.x < 0.0, "pull back toward the anchor");
        assert!((pull.length() - 4.0 * ANCHOR_STIFFNESS).abs() < 1e-3);
    }

    #[test]
    fn state_payloads_are_mutually_exclusive() {
        let dock = dock_at(1.0, 0.0, "mist");
        let docked = DockingState::Docked { dock: dock.clone() };
        assert!(docked.active_dock().is_some());
        assert!(docked.anchor_position().is_none());
        assert!(docked.body_frozen());

        let anchored = DockingState::Anchored {
            anchor_position: Vec3::ZERO,
        };
        assert!(anchored.active_dock().is_none());
        assert!(anchored.anchor_position().is_some());
        assert!(!anchored.body_frozen());
    }
}
