//! Simulation systems, run by the engine each tick.
//!
//! Order matters: weather and region run once per frame, docking runs
//! before boat physics inside the fixed-step loop so a freeze decided
//! this step suppresses integration in the same step.

pub mod boat;
pub mod docking;
pub mod region;
pub mod weather;

pub use boat::boat_system;
pub use docking::docking_system;
pub use region::{region_system, MapOverlay};
pub use weather::weather_system;
