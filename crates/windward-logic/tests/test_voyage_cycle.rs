//! Integration tests spanning the simulation modules.
//!
//! Exercises: CycleClock → storm schedule → WindState → boat forces, and
//! the docking guards against a small harbor layout. All tests are pure
//! logic — no engine, no RNG.

use windward_logic::boat::{
    self, BoatKinematics, HelmInput, WindSample,
};
use windward_logic::clock::CycleClock;
use windward_logic::constants::{
    docking as dock_consts, region as region_consts, wind as wind_consts,
};
use windward_logic::current;
use windward_logic::docking::{self, Dock, DockAttempt};
use windward_logic::geometry::{direction_from_angle, Vec3};
use windward_logic::region::{self, Region, RegionTracker};
use windward_logic::shrine::ShrineLedger;
use windward_logic::wind::WindState;

// ── Helpers ────────────────────────────────────────────────────────────

fn harbor_docks() -> Vec<Dock> {
    vec![
        Dock {
            position: Vec3::new(24.0, 0.0, -12.0),
            forward: 1.57,
            island: "Harborhold".into(),
        },
        Dock {
            position: Vec3::new(420.0, 0.0, 310.0),
            forward: -0.4,
            island: "Emberisle".into(),
        },
    ]
}

// ── Calendar drives the wind ───────────────────────────────────────────

#[test]
fn storm_multiplier_follows_the_calendar_across_a_cycle() {
    let mut clock = CycleClock::new(10.0);
    let mut wind = WindState::new();
    let mut peak: f32 = 0.0;

    for _ in 0..28 {
        wind.set_storm_from_day(clock.cycle_day, clock.day_progress());
        wind.inject_cataclysm_intensity(clock.cataclysm_intensity);
        peak = peak.max(wind.storm_multiplier);
        // Strength invariant holds at every point in the schedule
        for _ in 0..300 {
            wind.gust(0.033);
            assert!(wind.strength >= wind_consts::BASE_STRENGTH * 0.3 - 1e-4);
            assert!(wind.strength <= wind_consts::MAX_STRENGTH * wind.storm_multiplier + 1e-4);
        }
        clock.advance();
    }

    assert!(peak > 1.8, "cycle end approaches the storm peak, got {peak}");
    // The wrap zeroed intensity and the schedule relaxes on day 1
    wind.set_storm_from_day(clock.cycle_day, 0.0);
    assert_eq!(wind.storm_multiplier, 1.0);
}

// ── A short voyage ─────────────────────────────────────────────────────

#[test]
fn full_throttle_voyage_crosses_regions_and_docks() {
    let wind = WindState::new();
    let mut kin = BoatKinematics::at_rest(Vec3::new(24.0, 0.0, -18.0), 0.0);
    let mut tracker = RegionTracker::new(region::classify(kin.position.x, kin.position.z));
    let input = HelmInput {
        throttle: 1.0,
        ..Default::default()
    };

    let dt = 1.0 / 60.0;
    let mut time = 0.0_f64;
    let mut discovered = 0;
    // Sail east for 60 simulated seconds
    for _ in 0..(60 * 60) {
        let dir = wind.direction_at(kin.position.x, kin.position.z);
        let sample = WindSample {
            direction: dir,
            normalized_strength: wind.normalized_strength(),
        };
        let flow = current::flow_at(kin.position.x, kin.position.z);
        boat::step(&mut kin, &input, true, &sample, flow, time, dt);
        time += dt as f64;

        let obs = tracker.observe(region::classify(kin.position.x, kin.position.z));
        if obs.first_visit {
            discovered += 1;
        }
        tracker.advance_blend(dt);
    }

    assert!(
        kin.position.planar_length() > region_consts::SAFE_RADIUS,
        "boat should have left the safe circle, at {:?}",
        kin.position
    );
    assert!(discovered >= 1, "left Heartsea and discovered a slice");
    assert!(tracker.discovered.contains(&Region::Heartsea));
    assert!(boat::check_capsize(&kin).is_none(), "no capsize on open water");
}

// ── Docking guards against the harbor layout ───────────────────────────

#[test]
fn docking_guard_sweep() {
    let docks = harbor_docks();
    let at_harbor = Vec3::new(24.0, 0.0, -14.0);
    let open_water = Vec3::new(150.0, 0.0, 150.0);
    let gate = dock_consts::APPROACH_SPEED * dock_consts::MAX_DOCK_SPEED_FACTOR;

    // Near a dock, slow: approved, and toward the nearest dock
    match docking::try_dock(&at_harbor, gate * 0.5, &docks) {
        DockAttempt::Approved(dock) => assert_eq!(dock.island, "Harborhold"),
        other => panic!("expected approval, got {other:?}"),
    }
    // Near a dock, fast: refused but state-preserving (advisory only)
    assert_eq!(
        docking::try_dock(&at_harbor, gate * 1.2, &docks),
        DockAttempt::TooFast
    );
    // Open water: no dock nearby at any speed
    assert_eq!(
        docking::try_dock(&open_water, 0.5, &docks),
        DockAttempt::NoDockNearby
    );
}

#[test]
fn approach_then_undock_round_trip() {
    let docks = harbor_docks();
    let start = Vec3::new(28.0, 0.0, -10.0);
    let DockAttempt::Approved(dock) = docking::try_dock(&start, 1.0, &docks) else {
        panic!("approach should be approved");
    };

    // The eased approach ends exactly at the berth pose
    let (pos, heading, progress) =
        docking::approach_pose(&start, 0.3, &dock, dock_consts::APPROACH_DURATION_SECS);
    assert!(progress >= 1.0);
    assert!(pos.distance(&dock.position) < 1e-3);
    assert!((heading - dock.forward).abs() < 1e-3);

    // Undocking pushes straight out the back of the berth
    let push = docking::undock_impulse(&dock);
    let berth_forward = direction_from_angle(dock.forward);
    assert!(push.dot(&berth_forward) < 0.0);
}

// ── Shrine gating feeds the clock ──────────────────────────────────────

#[test]
fn stabilized_ledger_suppresses_escalation_at_the_wrap() {
    let mut ledger = ShrineLedger::new();
    ledger.register_shrine("tide-altar", vec!["kelp-bloom".into()]);
    ledger.document("kelp-bloom");
    ledger.try_activate("tide-altar");
    assert!(ledger.is_stabilized());

    let mut clock = CycleClock::new(10.0);
    for _ in 0..28 {
        clock.advance_gated(ledger.is_stabilized());
    }
    assert_eq!(clock.cycle_day, 1);
    assert_eq!(clock.cycle_count, 1, "stabilized cycle does not escalate");

    // A fresh cycle starts with activations cleared
    ledger.reset_cycle();
    assert!(!ledger.is_stabilized());
    for _ in 0..28 {
        clock.advance_gated(ledger.is_stabilized());
    }
    assert_eq!(clock.cycle_count, 2, "failed cycle escalates");
}
