//! Typed event queue.
//!
//! Systems push events during a tick; the host drains them after
//! `update()` returns. Delivery is at-least-once within the same tick —
//! nothing is dropped, and the queue only clears when drained.

use serde::{Deserialize, Serialize};
use windward_logic::boat::CapsizeReason;
use windward_logic::region::Region;

/// Advisory HUD prompts from guard failures. Never errors — the state
/// machine stays where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advisory {
    TooFastToDock,
    TooFastToAnchor,
    TooCloseToShore,
    NoDockNearby,
}

/// Everything the simulation reports outward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    DayAdvanced {
        absolute_day: u32,
        cycle_day: u32,
    },
    /// A cycle wrapped without stabilization; the ceiling escalated.
    CataclysmTriggered {
        cycle_count: u32,
    },
    /// A cycle wrapped with every shrine active; no escalation.
    CycleStabilized {
        cycle_count: u32,
    },
    RegionChanged {
        from: Region,
        to: Region,
    },
    RegionDiscovered(Region),
    DockingStarted {
        island: String,
    },
    Docked {
        island: String,
    },
    /// Cast off from a dock; push-off in progress.
    Undocked,
    AnchorDropped,
    AnchorRaised,
    /// Interact while docked: hand off to the on-foot collaborator.
    WentAshore {
        island: String,
    },
    BoatCapsized(CapsizeReason),
    BoatRespawned,
    ShrineActivated {
        id: String,
    },
    Advisory(Advisory),
}

/// Collects events during a tick for the host to drain.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Vec<SimEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: SimEvent) {
        self.events.push(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Take everything accumulated so far.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SimEvent> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_accumulates_until_drained() {
        let mut queue = EventQueue::new();
        queue.push(SimEvent::Undocked);
        queue.push(SimEvent::AnchorDropped);
        assert_eq!(queue.len(), 2);

        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert!(queue.is_empty());
        assert_eq!(drained[0], SimEvent::Undocked);
    }
}
