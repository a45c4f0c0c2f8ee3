//! World generation - places the harbor, the island ring, their docks, and
//! the shrine circuit.

use hecs::World;
use rand::Rng;
use serde::Deserialize;

use windward_logic::constants::{region as region_consts, world as world_consts};
use windward_logic::docking::Dock;
use windward_logic::geometry::Vec3;
use windward_logic::geometry::{direction_from_angle, wrap_angle};
use windward_logic::shrine::ShrineLedger;

use crate::components::{Island, ShrineSite};

/// Configuration for world generation
#[derive(Debug, Clone)]
pub struct WorldConfig {
    pub seed: u64,
    /// Islands placed on the outer ring, besides the harbor.
    pub ring_island_count: usize,
    /// Nominal radius of the island ring.
    pub ring_radius: f32,
    /// Radial jitter applied per island.
    pub ring_jitter: f32,
    pub island_radius_min: f32,
    pub island_radius_max: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            ring_island_count: 6,
            ring_radius: 420.0,
            ring_jitter: 90.0,
            island_radius_min: 26.0,
            island_radius_max: 44.0,
        }
    }
}

/// Everything generation placed, for the engine to keep by value.
#[derive(Debug, Clone, Default)]
pub struct WorldLayout {
    pub islands: Vec<Island>,
    pub docks: Vec<Dock>,
    pub shrines: Vec<ShrineSite>,
}

// Ring island names, paired with the journal entries their shrines ask for.
static ISLAND_NAMES: &[&str] = &[
    "Emberisle",
    "Mistholm",
    "Gale Rock",
    "Saltcairn",
    "Duskmoor",
    "Wrecktide",
    "Lantern Key",
    "Brinehenge",
];

/// Generate the archipelago into the ECS world and register the shrine
/// circuit on the ledger. Deterministic for a given config.
pub fn generate_world(
    world: &mut World,
    config: &WorldConfig,
    ledger: &mut ShrineLedger,
    rng: &mut impl Rng,
) -> WorldLayout {
    let mut layout = WorldLayout::default();

    // The harbor island anchors the safe circle and carries the respawn
    // berth at a fixed pose.
    let harbor = Island {
        name: "Harborhold".to_string(),
        position: Vec3::new(
            world_consts::HARBOR_X + 30.0,
            0.0,
            world_consts::HARBOR_Z - 22.0,
        ),
        radius: 34.0,
    };
    let harbor_dock = Dock {
        position: Vec3::new(world_consts::HARBOR_X, 0.0, world_consts::HARBOR_Z),
        forward: world_consts::HARBOR_HEADING,
        island: harbor.name.clone(),
    };
    world.spawn((harbor.clone(),));
    layout.islands.push(harbor);
    layout.docks.push(harbor_dock);

    let count = config.ring_island_count.min(ISLAND_NAMES.len());
    for i in 0..count {
        let name = ISLAND_NAMES[i];
        let base_angle = std::f32::consts::TAU * i as f32 / count as f32;
        let angle = wrap_angle(base_angle + rng.gen_range(-0.18..0.18));
        let radius_from_center = (config.ring_radius
            + rng.gen_range(-config.ring_jitter..config.ring_jitter))
        .clamp(
            region_consts::SAFE_RADIUS + 60.0,
            region_consts::EDGE_RADIUS - 120.0,
        );
        let center = direction_from_angle(angle) * radius_from_center;
        let island_radius = rng.gen_range(config.island_radius_min..config.island_radius_max);

        let island = Island {
            name: name.to_string(),
            position: center,
            radius: island_radius,
        };

        // The berth sits just off the shore on the harbor-facing side,
        // with the boat turned to face the island.
        let toward_center = (Vec3::ZERO - center).normalize();
        let berth = center + toward_center * (island_radius + 6.0);
        let dock = Dock {
            position: Vec3::new(berth.x, 0.0, berth.z),
            forward: wrap_angle((center.z - berth.z).atan2(center.x - berth.x)),
            island: island.name.clone(),
        };

        let shrine = ShrineSite {
            id: format!("shrine-{}", name.to_lowercase().replace(' ', "-")),
            island: island.name.clone(),
            position: center + direction_from_angle(angle) * (island_radius * 0.4),
        };
        ledger.register_shrine(&shrine.id, shrine_entries(name));

        world.spawn((island.clone(),));
        layout.islands.push(island);
        layout.docks.push(dock);
        layout.shrines.push(shrine);
    }

    layout
}

/// Journal entries a shrine demands before it can be activated.
fn shrine_entries(island_name: &str) -> Vec<String> {
    let slug = island_name.to_lowercase().replace(' ', "-");
    vec![format!("{slug}-legend"), format!("{slug}-tide-chart")]
}

/// One island record in the authored world manifest JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct IslandSpec {
    pub name: String,
    pub x: f32,
    pub z: f32,
    pub radius: f32,
    pub dock_x: f32,
    pub dock_z: f32,
    pub dock_heading: f32,
    /// None marks the harbor island, which carries no shrine.
    pub shrine_id: Option<String>,
    pub required_entries: Vec<String>,
}

/// Parse the authored world manifest.
pub fn parse_manifest(json: &str) -> Result<Vec<IslandSpec>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Build the world from authored placement data instead of the seeded ring.
pub fn apply_manifest(
    world: &mut World,
    specs: &[IslandSpec],
    ledger: &mut ShrineLedger,
) -> WorldLayout {
    let mut layout = WorldLayout::default();

    for spec in specs {
        let island = Island {
            name: spec.name.clone(),
            position: Vec3::new(spec.x, 0.0, spec.z),
            radius: spec.radius,
        };
        let dock = Dock {
            position: Vec3::new(spec.dock_x, 0.0, spec.dock_z),
            forward: spec.dock_heading,
            island: island.name.clone(),
        };
        if let Some(id) = &spec.shrine_id {
            let shrine = ShrineSite {
                id: id.clone(),
                island: island.name.clone(),
                position: island.position,
            };
            ledger.register_shrine(id.clone(), spec.required_entries.clone());
            layout.shrines.push(shrine);
        }
        world.spawn((island.clone(),));
        layout.islands.push(island);
        layout.docks.push(dock);
    }

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generation_is_deterministic_for_a_seed() {
        let config = WorldConfig::default();
        let mut a_world = World::new();
        let mut b_world = World::new();
        let mut a_ledger = ShrineLedger::new();
        let mut b_ledger = ShrineLedger::new();
        let a = generate_world(
            &mut a_world,
            &config,
            &mut a_ledger,
            &mut StdRng::seed_from_u64(9),
        );
        let b = generate_world(
            &mut b_world,
            &config,
            &mut b_ledger,
            &mut StdRng::seed_from_u64(9),
        );
        assert_eq!(a.islands.len(), b.islands.len());
        for (x, y) in a.islands.iter().zip(b.islands.iter()) {
            assert_eq!(x.name, y.name);
            assert!(x.position.distance(&y.position) < 1e-6);
        }
    }

    #[test]
    fn test_layout_shape() {
        let config = WorldConfig::default();
        let mut world = World::new();
        let mut ledger = ShrineLedger::new();
        let mut rng = StdRng::seed_from_u64(1);
        let layout = generate_world(&mut world, &config, &mut ledger, &mut rng);

        // Harbor plus the ring
        assert_eq!(layout.islands.len(), config.ring_island_count + 1);
        assert_eq!(layout.docks.len(), config.ring_island_count + 1);
        // One shrine per ring island, none at the harbor
        assert_eq!(layout.shrines.len(), config.ring_island_count);
        assert_eq!(ledger.shrine_count(), config.ring_island_count);
        assert!(!ledger.is_stabilized());

        // Ring islands stay between the safe circle and the edge ring
        for island in &layout.islands[1..] {
            let r = island.position.planar_length();
            assert!(r > region_consts::SAFE_RADIUS, "{} at {r}", island.name);
            assert!(r < region_consts::EDGE_RADIUS, "{} at {r}", island.name);
        }
    }

    #[test]
    fn test_manifest_round_trip_into_world() {
        let json = r#"[
            {
                "name": "Harborhold",
                "x": 54.0, "z": -40.0, "radius": 34.0,
                "dock_x": 24.0, "dock_z": -18.0, "dock_heading": 1.5708,
                "shrine_id": null, "required_entries": []
            },
            {
                "name": "Emberisle",
                "x": 432.0, "z": 0.0, "radius": 38.0,
                "dock_x": 388.0, "dock_z": 0.0, "dock_heading": 0.0,
                "shrine_id": "shrine-emberisle",
                "required_entries": ["emberisle-legend"]
            }
        ]"#;
        let specs = parse_manifest(json).expect("manifest parses");
        assert_eq!(specs.len(), 2);

        let mut world = World::new();
        let mut ledger = ShrineLedger::new();
        let layout = apply_manifest(&mut world, &specs, &mut ledger);
        assert_eq!(layout.islands.len(), 2);
        assert_eq!(layout.docks.len(), 2);
        assert_eq!(layout.shrines.len(), 1, "the harbor carries no shrine");
        assert_eq!(ledger.shrine_count(), 1);
    }

    #[test]
    fn test_docks_sit_off_their_island_shore() {
        let config = WorldConfig::default();
        let mut world = World::new();
        let mut ledger = ShrineLedger::new();
        let mut rng = StdRng::seed_from_u64(3);
        let layout = generate_world(&mut world, &config, &mut ledger, &mut rng);

        for dock in &layout.docks[1..] {
            let island = layout
                .islands
                .iter()
                .find(|i| i.name == dock.island)
                .unwrap();
            let shore = island.shore_distance(&dock.position);
            assert!(shore > 0.0, "berth inside {}", island.name);
            assert!(shore < 12.0, "berth adrift from {}", island.name);
        }
    }
}
