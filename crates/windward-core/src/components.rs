//! ECS components and host input state.
//!
//! The boat entity carries `BoatKinematics`, `BoatStatus`, and
//! `DockingState` straight from `windward-logic`; the types here are the
//! world-side entities and the per-frame input struct.

use serde::{Deserialize, Serialize};
use windward_logic::geometry::Vec3;

/// Marker for the player's boat entity.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PlayerBoat;

/// An island: a named disc in the water. Only the placement data matters
/// here — meshes are presentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Island {
    pub name: String,
    pub position: Vec3,
    /// Shoreline radius, used by the anchoring shore-buffer guard.
    pub radius: f32,
}

impl Island {
    /// Distance from a point to this island's shoreline (negative inside).
    pub fn shore_distance(&self, point: &Vec3) -> f32 {
        point.planar_distance(&self.position) - self.radius
    }
}

/// A shrine placed on an island, activated through the journal ledger.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShrineSite {
    pub id: String,
    pub island: String,
    pub position: Vec3,
}

/// Host input for the boat, set once per frame. `interact` is an edge:
/// true only on the frame the key was pressed. The engine consumes it on
/// the first physics step of the update.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoatControls {
    /// Forward/back throttle in [-1, 1].
    pub throttle: f32,
    /// Steering in [-1, 1].
    pub steering: f32,
    pub brake: bool,
    pub interact: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shore_distance_signed() {
        let island = Island {
            name: "Emberisle".into(),
            position: Vec3::new(100.0, 0.0, 0.0),
            radius: 30.0,
        };
        assert!((island.shore_distance(&Vec3::new(150.0, 0.0, 0.0)) - 20.0).abs() < 1e-4);
        assert!(island.shore_distance(&Vec3::new(110.0, 0.0, 0.0)) < 0.0);
    }
}
