//! Pure simulation logic for Windward.
//!
//! This crate contains all sailing-simulation logic that is independent of
//! any engine or runtime. Functions take plain data and return results,
//! making them unit-testable and portable between the headless harness and
//! the ECS engine crate.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`boat`] | Sail efficiency, per-tick force model, buoyancy, capsize checks |
//! | [`clock`] | 28-day cycle calendar and cataclysm intensity |
//! | [`constants`] | Tuned simulation constants (wind lanes, region radii, etc.) |
//! | [`current`] | Stateless ocean-current field (gyre + noise) |
//! | [`docking`] | Dock descriptors, docking/anchor state machine, guards |
//! | [`geometry`] | `Vec3`, angle wrapping, interpolation helpers |
//! | [`region`] | Polar region classification, palettes, blend tracking |
//! | [`shrine`] | Shrine/journal ledger and cycle stabilization |
//! | [`wind`] | Wind direction drift, gust oscillator, storm schedule |

pub mod boat;
pub mod clock;
pub mod constants;
pub mod current;
pub mod docking;
pub mod geometry;
pub mod region;
pub mod shrine;
pub mod wind;
