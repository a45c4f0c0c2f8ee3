//! Region system - classifies the boat's position, drives the palette
//! crossfade, and marks map overlay cells as visited.

use hecs::World;
use serde::{Deserialize, Serialize};

use windward_logic::boat::BoatKinematics;
use windward_logic::constants::world as world_consts;
use windward_logic::geometry::Vec3;
use windward_logic::region::{self, RegionTracker};

use crate::components::PlayerBoat;
use crate::events::{EventQueue, SimEvent};

/// The 8x8 fog-of-war map grid over the fixed world square.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapOverlay {
    pub enabled: bool,
    visited: [[bool; world_consts::MAP_GRID]; world_consts::MAP_GRID],
}

impl MapOverlay {
    pub fn new() -> Self {
        Self {
            enabled: false,
            visited: [[false; world_consts::MAP_GRID]; world_consts::MAP_GRID],
        }
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    /// Mark the cell under a world position. Positions outside the mapped
    /// square clamp to the border cells.
    pub fn mark(&mut self, position: &Vec3) {
        let (col, row) = Self::cell_for(position.x, position.z);
        self.visited[row][col] = true;
    }

    pub fn is_visited(&self, col: usize, row: usize) -> bool {
        self.visited[row][col]
    }

    pub fn visited_count(&self) -> usize {
        self.visited
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&v| v)
            .count()
    }

    fn cell_for(x: f32, z: f32) -> (usize, usize) {
        let half = world_consts::MAP_EXTENT / 2.0;
        let grid = world_consts::MAP_GRID as f32;
        let col = (((x + half) / world_consts::MAP_EXTENT * grid) as isize)
            .clamp(0, world_consts::MAP_GRID as isize - 1) as usize;
        let row = (((z + half) / world_consts::MAP_EXTENT * grid) as isize)
            .clamp(0, world_consts::MAP_GRID as isize - 1) as usize;
        (col, row)
    }
}

impl Default for MapOverlay {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify the player hull's region once per frame.
pub fn region_system(
    world: &mut World,
    tracker: &mut RegionTracker,
    overlay: &mut MapOverlay,
    dt: f32,
    events: &mut EventQueue,
) {
    let mut position = None;
    for (_, (kin, _)) in world.query::<(&BoatKinematics, &PlayerBoat)>().iter() {
        position = Some(kin.position);
        break;
    }
    let Some(position) = position else {
        return;
    };

    overlay.mark(&position);

    let here = region::classify(position.x, position.z);
    let before = tracker.current;
    let obs = tracker.observe(here);
    if obs.changed {
        events.push(SimEvent::RegionChanged {
            from: before,
            to: here,
        });
        if obs.first_visit {
            events.push(SimEvent::RegionDiscovered(here));
        }
    }
    tracker.advance_blend(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use windward_logic::boat::BoatStatus;
    use windward_logic::constants::region as region_consts;
    use windward_logic::region::Region;

    fn spawn_boat(world: &mut World, position: Vec3) -> hecs::Entity {
        world.spawn((
            PlayerBoat,
            BoatKinematics::at_rest(position, 0.0),
            BoatStatus::new(),
        ))
    }

    #[test]
    fn test_crossing_a_boundary_emits_change_and_discovery() {
        let mut world = World::new();
        let boat = spawn_boat(&mut world, Vec3::ZERO);
        let mut tracker = RegionTracker::default();
        let mut overlay = MapOverlay::new();
        let mut events = EventQueue::new();

        region_system(&mut world, &mut tracker, &mut overlay, 0.016, &mut events);
        assert!(events.is_empty(), "starting region is not a change");

        {
            let mut kin = world.get::<&mut BoatKinematics>(boat).unwrap();
            kin.position = Vec3::new(region_consts::SLICE_FLOORS[0] + 50.0, 0.0, 1.0);
        }
        region_system(&mut world, &mut tracker, &mut overlay, 0.016, &mut events);
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::RegionChanged {
                to: Region::Emberreach,
                ..
            }
        )));
        assert!(events
            .iter()
            .any(|e| *e == SimEvent::RegionDiscovered(Region::Emberreach)));

        // Returning does not rediscover
        let drained = events.drain();
        assert!(!drained.is_empty());
        {
            let mut kin = world.get::<&mut BoatKinematics>(boat).unwrap();
            kin.position = Vec3::ZERO;
        }
        region_system(&mut world, &mut tracker, &mut overlay, 0.016, &mut events);
        {
            let mut kin = world.get::<&mut BoatKinematics>(boat).unwrap();
            kin.position = Vec3::new(region_consts::SLICE_FLOORS[0] + 50.0, 0.0, 1.0);
        }
        region_system(&mut world, &mut tracker, &mut overlay, 0.016, &mut events);
        assert!(!events
            .iter()
            .any(|e| matches!(e, SimEvent::RegionDiscovered(_))));
    }

    #[test]
    fn test_overlay_marks_cells_and_clamps() {
        let mut overlay = MapOverlay::new();
        assert_eq!(overlay.visited_count(), 0);

        overlay.mark(&Vec3::ZERO);
        assert_eq!(overlay.visited_count(), 1);
        // Center of the square lands in the upper-half cells
        assert!(overlay.is_visited(4, 4));

        // Same cell twice stays one cell
        overlay.mark(&Vec3::new(10.0, 0.0, 10.0));
        assert_eq!(overlay.visited_count(), 1);

        // Way outside the square clamps to a border cell
        overlay.mark(&Vec3::new(99_999.0, 0.0, -99_999.0));
        assert!(overlay.is_visited(7, 0));
    }

    #[test]
    fn test_overlay_toggle() {
        let mut overlay = MapOverlay::new();
        assert!(!overlay.enabled);
        overlay.toggle();
        assert!(overlay.enabled);
        overlay.toggle();
        assert!(!overlay.enabled);
    }
}
