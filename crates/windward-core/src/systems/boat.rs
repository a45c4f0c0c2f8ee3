//! Boat physics system - one fixed-rate dynamics step for the player hull.

use hecs::World;

use windward_logic::boat::{self, BoatKinematics, BoatStatus, HelmInput, WindSample};
use windward_logic::constants::docking as docking_consts;
use windward_logic::current;
use windward_logic::docking::{anchor_pull, DockingState};
use windward_logic::wind::WindState;

use crate::components::PlayerBoat;
use crate::events::{EventQueue, SimEvent};

/// Step every player hull by `dt`.
///
/// Capsized hulls only tick their respawn timer. Frozen bodies (docked or
/// mid-approach) skip integration entirely — the docking system owns their
/// pose. Anchored hulls integrate with the helm zeroed, extra drag, and
/// the tether pull folded into the current term.
pub fn boat_system(
    world: &mut World,
    controls: &HelmInput,
    wind: &WindState,
    sim_time: f64,
    dt: f32,
    events: &mut EventQueue,
) {
    // Collect updates (can't mutate while iterating)
    let mut updates: Vec<(hecs::Entity, BoatKinematics, BoatStatus)> = Vec::with_capacity(4);

    for (entity, (kin, status, docking, _)) in world
        .query::<(&BoatKinematics, &BoatStatus, &DockingState, &PlayerBoat)>()
        .iter()
    {
        let mut kin = *kin;
        let mut status = *status;

        if status.is_capsized {
            if status.tick_timers(dt) {
                let (position, heading) = boat::harbor_pose();
                kin = BoatKinematics::at_rest(position, heading);
                status.respawned();
                events.push(SimEvent::BoatRespawned);
            }
            updates.push((entity, kin, status));
            continue;
        }
        status.tick_timers(dt);

        if docking.body_frozen() {
            updates.push((entity, kin, status));
            continue;
        }

        let sample = WindSample {
            direction: wind.direction_at(kin.position.x, kin.position.z),
            normalized_strength: wind.normalized_strength(),
        };
        let flow = current::flow_at(kin.position.x, kin.position.z);

        if let Some(anchor) = docking.anchor_position() {
            // At anchor the helm is dead; the tether and heavy drag hold
            // the hull near the drop point while waves still rock it.
            let idle = HelmInput::default();
            let pull = anchor_pull(&kin.position, &anchor);
            kin.velocity = kin.velocity + kin.velocity * (-docking_consts::ANCHOR_DRAG * dt);
            kin.velocity += pull * dt;
            boat::step(&mut kin, &idle, status.sail_open, &sample, flow, sim_time, dt);
            status.move_state = boat::classify_move_state(&idle, kin.forward_speed(), kin.speed());
        } else {
            boat::step(
                &mut kin,
                controls,
                status.sail_open,
                &sample,
                flow,
                sim_time,
                dt,
            );
            status.move_state =
                boat::classify_move_state(controls, kin.forward_speed(), kin.speed());
        }

        if status.spawn_grace <= 0.0 {
            if let Some(reason) = boat::check_capsize(&kin) {
                status.begin_capsize();
                kin.halt();
                events.push(SimEvent::BoatCapsized(reason));
            }
        }

        updates.push((entity, kin, status));
    }

    // Apply updates
    for (entity, new_kin, new_status) in updates {
        if let Ok(mut k) = world.get::<&mut BoatKinematics>(entity) {
            *k = new_kin;
        }
        if let Ok(mut s) = world.get::<&mut BoatStatus>(entity) {
            *s = new_status;
        }
    }
}

/// Teleport a hull back to the harbor pose, clearing motion and restarting
/// the spawn-grace window.
pub fn reset_to_harbor(world: &mut World, boat: hecs::Entity) {
    let (position, heading) = boat::harbor_pose();
    if let Ok(mut kin) = world.get::<&mut BoatKinematics>(boat) {
        *kin = BoatKinematics::at_rest(position, heading);
    }
    if let Ok(mut status) = world.get::<&mut BoatStatus>(boat) {
        status.respawned();
    }
    if let Ok(mut docking) = world.get::<&mut DockingState>(boat) {
        *docking = DockingState::Sailing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windward_logic::constants::boat as boat_consts;
    use windward_logic::geometry::Vec3;

    fn spawn_boat(world: &mut World) -> hecs::Entity {
        let (position, heading) = boat::harbor_pose();
        world.spawn((
            PlayerBoat,
            BoatKinematics::at_rest(position, heading),
            BoatStatus::new(),
            DockingState::Sailing,
        ))
    }

    #[test]
    fn test_throttle_moves_the_hull() {
        let mut world = World::new();
        let boat = spawn_boat(&mut world);
        let wind = WindState::new();
        let mut events = EventQueue::new();
        let input = HelmInput {
            throttle: 1.0,
            ..Default::default()
        };

        let start = world.get::<&BoatKinematics>(boat).unwrap().position;
        for i in 0..180 {
            boat_system(&mut world, &input, &wind, i as f64 / 60.0, 1.0 / 60.0, &mut events);
        }
        let kin = world.get::<&BoatKinematics>(boat).unwrap();
        assert!(kin.position.planar_distance(&start) > 3.0);
    }

    #[test]
    fn test_frozen_body_does_not_integrate() {
        let mut world = World::new();
        let boat = spawn_boat(&mut world);
        {
            let mut docking = world.get::<&mut DockingState>(boat).unwrap();
            *docking = DockingState::Docked {
                dock: windward_logic::docking::Dock {
                    position: Vec3::ZERO,
                    forward: 0.0,
                    island: "Harborhold".into(),
                },
            };
        }
        let wind = WindState::new();
        let mut events = EventQueue::new();
        let input = HelmInput {
            throttle: 1.0,
            ..Default::default()
        };

        let start = world.get::<&BoatKinematics>(boat).unwrap().position;
        for _ in 0..60 {
            boat_system(&mut world, &input, &wind, 0.0, 1.0 / 60.0, &mut events);
        }
        let kin = world.get::<&BoatKinematics>(boat).unwrap();
        assert_eq!(kin.position, start);
    }

    #[test]
    fn test_anchored_hull_holds_near_the_drop_point() {
        let mut world = World::new();
        let boat = spawn_boat(&mut world);
        let anchor = boat::harbor_pose().0;
        {
            let mut docking = world.get::<&mut DockingState>(boat).unwrap();
            *docking = DockingState::Anchored {
                anchor_position: anchor,
            };
        }
        let wind = WindState::new();
        let mut events = EventQueue::new();
        // Full throttle is ignored while anchored
        let input = HelmInput {
            throttle: 1.0,
            ..Default::default()
        };

        for i in 0..1200 {
            boat_system(&mut world, &input, &wind, i as f64 / 60.0, 1.0 / 60.0, &mut events);
        }
        let kin = world.get::<&BoatKinematics>(boat).unwrap();
        let drift = kin.position.planar_distance(&anchor);
        assert!(
            drift < docking_consts::ANCHOR_SLACK + 6.0,
            "drifted {drift} from anchor"
        );
    }

    #[test]
    fn test_capsize_respawns_at_harbor() {
        let mut world = World::new();
        let boat = spawn_boat(&mut world);
        let wind = WindState::new();
        let mut events = EventQueue::new();
        let input = HelmInput::default();

        // Burn through spawn grace, then shove the hull below the floor
        for _ in 0..((boat_consts::SPAWN_GRACE_SECS * 60.0) as u32 + 5) {
            boat_system(&mut world, &input, &wind, 0.0, 1.0 / 60.0, &mut events);
        }
        {
            let mut kin = world.get::<&mut BoatKinematics>(boat).unwrap();
            kin.position.y = boat_consts::CAPSIZE_FLOOR - 2.0;
        }
        boat_system(&mut world, &input, &wind, 0.0, 1.0 / 60.0, &mut events);
        assert!(world.get::<&BoatStatus>(boat).unwrap().is_capsized);
        assert!(events
            .iter()
            .any(|e| matches!(e, SimEvent::BoatCapsized(_))));

        // Wait out the respawn countdown
        for _ in 0..((boat_consts::RESPAWN_DELAY_SECS * 60.0) as u32 + 5) {
            boat_system(&mut world, &input, &wind, 0.0, 1.0 / 60.0, &mut events);
        }
        let status = world.get::<&BoatStatus>(boat).unwrap();
        assert!(!status.is_capsized);
        let kin = world.get::<&BoatKinematics>(boat).unwrap();
        let (harbor, _) = boat::harbor_pose();
        assert!(kin.position.planar_distance(&harbor) < 5.0);
        assert!(events.iter().any(|e| matches!(e, SimEvent::BoatRespawned)));
    }
}
