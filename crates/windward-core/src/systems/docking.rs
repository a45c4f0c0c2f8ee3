//! Docking system - runs the dock/anchor state machine for the player hull.
//!
//! Runs ahead of boat physics in the fixed-step loop, so a freeze decided
//! here suppresses integration in the same step. Interact is an edge, not
//! a level: the engine passes it on the first physics step of a frame only.

use hecs::World;

use windward_logic::boat::{BoatKinematics, BoatStatus, HelmInput};
use windward_logic::constants::docking::*;
use windward_logic::docking::{
    self, approach_pose, undock_impulse, AnchorAttempt, DockAttempt, DockingState,
};
use windward_logic::geometry::Vec3;

use crate::components::{Island, PlayerBoat};
use crate::events::{Advisory, EventQueue, SimEvent};

/// Advance the docking state machine by one physics step.
pub fn docking_system(
    world: &mut World,
    controls: &HelmInput,
    interact: bool,
    docks: &[docking::Dock],
    dt: f32,
    events: &mut EventQueue,
) {
    // Shore distances come from island placement, gathered up front
    let islands: Vec<Island> = world
        .query::<&Island>()
        .iter()
        .map(|(_, island)| island.clone())
        .collect();

    let mut updates: Vec<(hecs::Entity, DockingState, BoatKinematics)> = Vec::with_capacity(4);

    for (entity, (kin, status, state, _)) in world
        .query::<(&BoatKinematics, &BoatStatus, &DockingState, &PlayerBoat)>()
        .iter()
    {
        if status.is_capsized {
            continue;
        }
        let mut kin = *kin;
        let next = match state.clone() {
            DockingState::Sailing => {
                if interact {
                    sailing_interact(&kin, docks, &islands, events)
                } else {
                    DockingState::Sailing
                }
            }
            DockingState::DockingApproach {
                dock,
                start_position,
                start_heading,
                mut elapsed,
            } => {
                // Throttle input cancels the approach mid-flight
                if controls.throttle.abs() > 0.05 {
                    DockingState::Sailing
                } else {
                    elapsed += dt;
                    let (position, heading, progress) =
                        approach_pose(&start_position, start_heading, &dock, elapsed);
                    kin.position = position;
                    kin.heading = heading;
                    // Kill residual motion progressively over the glide
                    kin.velocity = kin.velocity * (1.0 - progress);
                    kin.yaw_rate *= 1.0 - progress;
                    if progress >= 1.0 {
                        kin.halt();
                        events.push(SimEvent::Docked {
                            island: dock.island.clone(),
                        });
                        DockingState::Docked { dock }
                    } else {
                        DockingState::DockingApproach {
                            dock,
                            start_position,
                            start_heading,
                            elapsed,
                        }
                    }
                }
            }
            DockingState::Docked { dock } => {
                if interact {
                    events.push(SimEvent::WentAshore {
                        island: dock.island.clone(),
                    });
                    DockingState::Docked { dock }
                } else if controls.throttle.abs() > 0.05 {
                    // Cast off: the body unfreezes immediately with a
                    // push-off out the back of the berth
                    let away = undock_impulse(&dock);
                    kin.velocity = away;
                    events.push(SimEvent::Undocked);
                    DockingState::Undocking {
                        away,
                        elapsed: 0.0,
                    }
                } else {
                    DockingState::Docked { dock }
                }
            }
            DockingState::Anchored { anchor_position } => {
                if interact {
                    events.push(SimEvent::AnchorRaised);
                    DockingState::Sailing
                } else {
                    DockingState::Anchored { anchor_position }
                }
            }
            DockingState::Undocking { away, mut elapsed } => {
                elapsed += dt;
                if elapsed >= UNDOCK_DURATION_SECS {
                    DockingState::Sailing
                } else {
                    DockingState::Undocking { away, elapsed }
                }
            }
        };
        updates.push((entity, next, kin));
    }

    for (entity, next, new_kin) in updates {
        if let Ok(mut state) = world.get::<&mut DockingState>(entity) {
            *state = next;
        }
        if let Ok(mut kin) = world.get::<&mut BoatKinematics>(entity) {
            *kin = new_kin;
        }
    }
}

/// Interact while sailing: try the dock first, fall back to the anchor.
fn sailing_interact(
    kin: &BoatKinematics,
    docks: &[docking::Dock],
    islands: &[Island],
    events: &mut EventQueue,
) -> DockingState {
    match docking::try_dock(&kin.position, kin.speed(), docks) {
        DockAttempt::Approved(dock) => {
            events.push(SimEvent::DockingStarted {
                island: dock.island.clone(),
            });
            return DockingState::DockingApproach {
                start_position: kin.position,
                start_heading: kin.heading,
                dock,
                elapsed: 0.0,
            };
        }
        DockAttempt::TooFast => {
            events.push(SimEvent::Advisory(Advisory::TooFastToDock));
            return DockingState::Sailing;
        }
        DockAttempt::NoDockNearby => {}
    }

    let shore = nearest_shore_distance(&kin.position, islands);
    match docking::try_anchor(kin.speed(), shore) {
        AnchorAttempt::Approved => {
            events.push(SimEvent::AnchorDropped);
            DockingState::Anchored {
                anchor_position: kin.position,
            }
        }
        AnchorAttempt::TooFast => {
            events.push(SimEvent::Advisory(Advisory::TooFastToAnchor));
            DockingState::Sailing
        }
        AnchorAttempt::TooNearShore => {
            events.push(SimEvent::Advisory(Advisory::TooCloseToShore));
            DockingState::Sailing
        }
    }
}

/// Distance to the nearest island shoreline, or effectively infinite on an
/// empty sea.
pub fn nearest_shore_distance(position: &Vec3, islands: &[Island]) -> f32 {
    islands
        .iter()
        .map(|island| island.shore_distance(position))
        .fold(f32::INFINITY, f32::min)
}
