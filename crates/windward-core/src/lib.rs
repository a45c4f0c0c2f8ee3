//! Windward Core - Archipelago Sailing Simulation Engine
//!
//! A single-threaded sailing world: a 28-day calendar drives escalating
//! weather toward a periodic cataclysm, a wind field and ocean currents
//! modulate boat handling, and a docking/anchor state machine governs
//! traversal. Presentation (meshes, shaders, HUD, audio) lives elsewhere
//! and consumes this crate through read-only queries and drained events.
//!
//! # Architecture
//!
//! World data lives in a `hecs` ECS (boat, islands, docks, shrines);
//! the service objects (cycle clock, wind state, region tracker, shrine
//! ledger) are owned fields of [`engine::SimulationEngine`] and are passed
//! to systems explicitly — no global lookups.
//!
//! # Example
//!
//! ```rust,no_run
//! use windward_core::prelude::*;
//!
//! let mut engine = SimulationEngine::new();
//! engine.generate(WorldConfig::default());
//!
//! loop {
//!     engine.set_controls(BoatControls {
//!         throttle: 1.0,
//!         ..Default::default()
//!     });
//!     engine.update(1.0 / 60.0);
//!     for event in engine.drain_events() {
//!         println!("{event:?}");
//!     }
//! }
//! ```

pub mod components;
pub mod engine;
pub mod events;
pub mod generation;
pub mod persistence;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::SimulationEngine;
    pub use crate::events::SimEvent;
    pub use crate::generation::WorldConfig;
}
