//! Simulation engine - main entry point for running the simulation

use hecs::World;

use windward_logic::boat::{BoatKinematics, BoatStatus, HelmInput};
use windward_logic::clock::CycleClock;
use windward_logic::docking::{Dock, DockingState};
use windward_logic::region::{RegionPalette, RegionTracker};
use windward_logic::shrine::{ActivationResult, ShrineLedger};
use windward_logic::wind::WindState;

use crate::components::{BoatControls, Island, PlayerBoat, ShrineSite};
use crate::events::{EventQueue, SimEvent};
use crate::generation::{generate_world, WorldConfig, WorldLayout};
use crate::systems::{boat_system, docking_system, region_system, weather_system, MapOverlay};

/// Fixed physics step; frame time is accumulated against it.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Main simulation engine
pub struct SimulationEngine {
    /// ECS world containing all entities
    pub world: World,
    /// Simulation time in seconds since world start
    pub sim_time: f64,

    clock: CycleClock,
    wind: WindState,
    regions: RegionTracker,
    ledger: ShrineLedger,
    overlay: MapOverlay,
    events: EventQueue,

    /// Dock berths, by value; placement data rather than entities.
    docks: Vec<Dock>,
    controls: BoatControls,
    boat: Option<hecs::Entity>,

    physics_accumulator: f32,
    time_scale: f32,
}

impl SimulationEngine {
    /// Create a new empty simulation
    pub fn new() -> Self {
        Self {
            world: World::new(),
            sim_time: 0.0,
            clock: CycleClock::default(),
            wind: WindState::new(),
            regions: RegionTracker::default(),
            ledger: ShrineLedger::new(),
            overlay: MapOverlay::new(),
            events: EventQueue::new(),
            docks: Vec::new(),
            controls: BoatControls::default(),
            boat: None,
            physics_accumulator: 0.0,
            time_scale: 1.0,
        }
    }

    /// Generate the archipelago and spawn the player boat at the harbor.
    pub fn generate(&mut self, config: WorldConfig) {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(config.seed);

        let layout: WorldLayout =
            generate_world(&mut self.world, &config, &mut self.ledger, &mut rng);
        self.docks = layout.docks;
        for shrine in layout.shrines {
            self.world.spawn((shrine,));
        }

        self.spawn_player_boat();
    }

    /// Build the world from the authored manifest JSON instead of the
    /// seeded ring.
    pub fn generate_from_manifest(&mut self, json: &str) -> Result<(), serde_json::Error> {
        let specs = crate::generation::parse_manifest(json)?;
        let layout = crate::generation::apply_manifest(&mut self.world, &specs, &mut self.ledger);
        self.docks = layout.docks;
        for shrine in layout.shrines {
            self.world.spawn((shrine,));
        }
        self.spawn_player_boat();
        Ok(())
    }

    fn spawn_player_boat(&mut self) {
        let (position, heading) = windward_logic::boat::harbor_pose();
        let boat = self.world.spawn((
            PlayerBoat,
            BoatKinematics::at_rest(position, heading),
            BoatStatus::new(),
            DockingState::Sailing,
        ));
        self.boat = Some(boat);
    }

    /// Update the simulation by delta_seconds
    pub fn update(&mut self, delta_seconds: f32) {
        let scaled = delta_seconds * self.time_scale;
        self.sim_time += scaled as f64;

        // Calendar first: the wind schedule reads the day it produces
        let report = self.clock.tick(scaled, self.ledger.is_stabilized());
        if report.days_advanced > 0 {
            self.events.push(SimEvent::DayAdvanced {
                absolute_day: self.clock.absolute_day,
                cycle_day: self.clock.cycle_day,
            });
        }
        if report.cataclysm_triggered {
            self.on_cycle_wrap(report.stabilized);
        }

        let mut rng = rand::thread_rng();
        weather_system(&mut self.wind, &self.clock, &mut rng, self.sim_time, scaled);

        region_system(
            &mut self.world,
            &mut self.regions,
            &mut self.overlay,
            scaled,
            &mut self.events,
        );

        // Fixed-step physics. The interact edge is consumed by the first
        // step that actually runs; a frame too short to step leaves it
        // pending for the next frame.
        let helm = HelmInput {
            throttle: self.controls.throttle,
            steering: self.controls.steering,
            brake: self.controls.brake,
        };
        self.physics_accumulator += scaled;
        while self.physics_accumulator >= PHYSICS_DT {
            self.physics_accumulator -= PHYSICS_DT;
            let interact = std::mem::take(&mut self.controls.interact);
            docking_system(
                &mut self.world,
                &helm,
                interact,
                &self.docks,
                PHYSICS_DT,
                &mut self.events,
            );
            boat_system(
                &mut self.world,
                &helm,
                &self.wind,
                self.sim_time,
                PHYSICS_DT,
                &mut self.events,
            );
        }
    }

    fn on_cycle_wrap(&mut self, stabilized: bool) {
        if stabilized {
            self.events.push(SimEvent::CycleStabilized {
                cycle_count: self.clock.cycle_count,
            });
        } else {
            self.events.push(SimEvent::CataclysmTriggered {
                cycle_count: self.clock.cycle_count,
            });
        }
        // Activations are per-cycle; the journal persists
        self.ledger.reset_cycle();
    }

    /// Set the host's input for the coming frames. `interact` is an edge
    /// and is consumed by the next physics step.
    pub fn set_controls(&mut self, controls: BoatControls) {
        let interact = self.controls.interact || controls.interact;
        self.controls = controls;
        self.controls.interact = interact;
    }

    /// Open or furl the sail.
    pub fn set_sail(&mut self, open: bool) {
        if let Some(boat) = self.boat {
            if let Ok(mut status) = self.world.get::<&mut BoatStatus>(boat) {
                status.sail_open = open;
            }
        }
    }

    /// Manually advance one day (testing input). A wrap fires the cycle-end
    /// check exactly as the real-time path does.
    pub fn advance_day(&mut self) {
        let stabilized = self.ledger.is_stabilized();
        let wrapped = self.clock.advance_gated(stabilized);
        self.events.push(SimEvent::DayAdvanced {
            absolute_day: self.clock.absolute_day,
            cycle_day: self.clock.cycle_day,
        });
        if wrapped {
            self.on_cycle_wrap(stabilized);
        }
    }

    /// Teleport the boat back to the harbor berth, clearing its motion.
    pub fn reset_to_harbor(&mut self) {
        if let Some(boat) = self.boat {
            crate::systems::boat::reset_to_harbor(&mut self.world, boat);
        }
    }

    /// Attempt a shrine activation against the journal.
    pub fn try_activate_shrine(&mut self, id: &str) -> ActivationResult {
        let result = self.ledger.try_activate(id);
        if result == ActivationResult::Activated {
            self.events.push(SimEvent::ShrineActivated { id: id.to_string() });
        }
        result
    }

    /// Record a journal entry. Returns true if it was new.
    pub fn document_entry(&mut self, entry: &str) -> bool {
        self.ledger.document(entry)
    }

    pub fn toggle_map(&mut self) {
        self.overlay.toggle();
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Real seconds per in-game day, clamped to the supported pacing range.
    pub fn set_seconds_per_day(&mut self, seconds: f32) {
        self.clock.set_seconds_per_day(seconds);
    }

    /// Take every event accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        self.events.drain()
    }

    pub fn clock(&self) -> &CycleClock {
        &self.clock
    }

    pub fn wind(&self) -> &WindState {
        &self.wind
    }

    pub fn regions(&self) -> &RegionTracker {
        &self.regions
    }

    /// Palette crossfaded across the latest region transition.
    pub fn palette(&self) -> RegionPalette {
        self.regions.blended_palette()
    }

    pub fn ledger(&self) -> &ShrineLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut ShrineLedger {
        &mut self.ledger
    }

    pub fn overlay(&self) -> &MapOverlay {
        &self.overlay
    }

    pub fn docks(&self) -> &[Dock] {
        &self.docks
    }

    pub fn island_count(&self) -> usize {
        self.world.query::<&Island>().iter().count()
    }

    pub fn shrine_site_count(&self) -> usize {
        self.world.query::<&ShrineSite>().iter().count()
    }

    /// Kinematic state of the player boat, if one exists.
    pub fn boat_kinematics(&self) -> Option<BoatKinematics> {
        let boat = self.boat?;
        self.world.get::<&BoatKinematics>(boat).ok().map(|k| *k)
    }

    pub fn boat_status(&self) -> Option<BoatStatus> {
        let boat = self.boat?;
        self.world.get::<&BoatStatus>(boat).ok().map(|s| *s)
    }

    pub fn docking_state(&self) -> Option<DockingState> {
        let boat = self.boat?;
        self.world.get::<&DockingState>(boat).ok().map(|s| (*s).clone())
    }

    /// Save simulation state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), crate::persistence::SaveError> {
        crate::persistence::save_simulation(
            writer,
            &self.world,
            self.sim_time,
            self.time_scale,
            &self.clock,
            &self.wind,
            &self.regions,
            &self.ledger,
            &self.overlay,
            &self.docks,
        )
    }

    /// Load simulation state from a reader
    pub fn load<R: std::io::Read>(
        &mut self,
        reader: R,
    ) -> Result<(), crate::persistence::SaveError> {
        let loaded = crate::persistence::load_simulation(reader)?;

        self.world = loaded.world;
        self.sim_time = loaded.sim_time;
        self.time_scale = loaded.time_scale;
        self.clock = loaded.clock;
        self.wind = loaded.wind;
        self.regions = loaded.regions;
        self.ledger = loaded.ledger;
        self.overlay = loaded.overlay;
        self.docks = loaded.docks;

        // Rebind the player boat handle from the loaded world
        self.boat = self
            .world
            .query::<&PlayerBoat>()
            .iter()
            .map(|(entity, _)| entity)
            .next();
        self.physics_accumulator = 0.0;
        self.controls = BoatControls::default();

        Ok(())
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new()
    }
}
