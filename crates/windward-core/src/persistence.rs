//! Save/Load functionality for persisting simulation state
//!
//! Uses bincode for a versioned binary snapshot. The ECS entities are
//! flattened into serializable records and respawned on load.

use hecs::World;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use windward_logic::boat::{BoatKinematics, BoatStatus};
use windward_logic::clock::CycleClock;
use windward_logic::docking::{Dock, DockingState};
use windward_logic::region::RegionTracker;
use windward_logic::shrine::ShrineLedger;
use windward_logic::wind::WindState;

use crate::components::{Island, PlayerBoat, ShrineSite};
use crate::systems::MapOverlay;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the simulation state
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Simulation time in seconds
    pub sim_time: f64,
    pub time_scale: f32,
    pub clock: CycleClock,
    pub wind: WindState,
    pub regions: RegionTracker,
    pub ledger: ShrineLedger,
    pub overlay: MapOverlay,
    /// Dock berths, held by the engine rather than as entities
    pub docks: Vec<Dock>,
    /// All entities with their components
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    pub player_boat: bool,
    pub kinematics: Option<BoatKinematics>,
    pub status: Option<BoatStatus>,
    pub docking: Option<DockingState>,
    pub island: Option<Island>,
    pub shrine_site: Option<ShrineSite>,
}

/// Extract all entities from a world into serializable form
fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    let mut entities = Vec::new();

    for entity in world.iter() {
        let mut se = SerializableEntity::default();

        se.player_boat = entity.get::<&PlayerBoat>().is_some();
        if let Some(c) = entity.get::<&BoatKinematics>() {
            se.kinematics = Some(*c);
        }
        if let Some(c) = entity.get::<&BoatStatus>() {
            se.status = Some(*c);
        }
        if let Some(c) = entity.get::<&DockingState>() {
            se.docking = Some((*c).clone());
        }
        if let Some(c) = entity.get::<&Island>() {
            se.island = Some((*c).clone());
        }
        if let Some(c) = entity.get::<&ShrineSite>() {
            se.shrine_site = Some((*c).clone());
        }

        entities.push(se);
    }

    entities
}

/// Rebuild a world from serialized entities
fn deserialize_entities(world: &mut World, entities: Vec<SerializableEntity>) {
    for se in entities {
        let entity = world.spawn(());
        if se.player_boat {
            let _ = world.insert_one(entity, PlayerBoat);
        }
        if let Some(c) = se.kinematics {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.status {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.docking {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.island {
            let _ = world.insert_one(entity, c);
        }
        if let Some(c) = se.shrine_site {
            let _ = world.insert_one(entity, c);
        }
    }
}

/// Save the complete simulation to a writer
#[allow(clippy::too_many_arguments)]
pub fn save_simulation<W: Write>(
    writer: W,
    world: &World,
    sim_time: f64,
    time_scale: f32,
    clock: &CycleClock,
    wind: &WindState,
    regions: &RegionTracker,
    ledger: &ShrineLedger,
    overlay: &MapOverlay,
    docks: &[Dock],
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        sim_time,
        time_scale,
        clock: clock.clone(),
        wind: wind.clone(),
        regions: regions.clone(),
        ledger: ledger.clone(),
        overlay: overlay.clone(),
        docks: docks.to_vec(),
        entities: serialize_entities(world),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a simulation from a reader
pub fn load_simulation<R: Read>(reader: R) -> Result<LoadedSimulation, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    deserialize_entities(&mut world, save_data.entities);

    Ok(LoadedSimulation {
        world,
        sim_time: save_data.sim_time,
        time_scale: save_data.time_scale,
        clock: save_data.clock,
        wind: save_data.wind,
        regions: save_data.regions,
        ledger: save_data.ledger,
        overlay: save_data.overlay,
        docks: save_data.docks,
    })
}

/// Result of loading a simulation
pub struct LoadedSimulation {
    pub world: World,
    pub sim_time: f64,
    pub time_scale: f32,
    pub clock: CycleClock,
    pub wind: WindState,
    pub regions: RegionTracker,
    pub ledger: ShrineLedger,
    pub overlay: MapOverlay,
    pub docks: Vec<Dock>,
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimulationEngine;
    use crate::generation::WorldConfig;

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = SimulationEngine::new();
        engine.generate(WorldConfig {
            seed: 12,
            ..Default::default()
        });
        engine.ledger_mut().document("emberisle-legend");

        for _ in 0..30 {
            engine.update(1.0 / 60.0);
        }

        let original_time = engine.sim_time;
        let original_day = engine.clock().absolute_day;
        let original_islands = engine.island_count();

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let mut loaded = SimulationEngine::new();
        loaded.load(&save_buffer[..]).expect("Load failed");

        assert!((loaded.sim_time - original_time).abs() < 0.001);
        assert_eq!(loaded.clock().absolute_day, original_day);
        assert_eq!(loaded.island_count(), original_islands);
        assert!(loaded.ledger().is_documented("emberisle-legend"));
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let engine = {
            let mut e = SimulationEngine::new();
            e.generate(WorldConfig::default());
            e
        };
        let mut buffer = Vec::new();
        engine.save(&mut buffer).expect("Save failed");

        // Corrupt the version word at the head of the snapshot
        buffer[0] = 99;
        let result = load_simulation(&buffer[..]);
        assert!(matches!(
            result,
            Err(SaveError::VersionMismatch { found: 99, .. })
        ));
    }
}
