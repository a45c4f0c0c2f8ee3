//! Region classification and palette blending.
//!
//! The archipelago is bucketed into five zones by polar coordinates from
//! the map center: an inner safe circle, an outer edge ring, and three
//! angular slices between them, each with its own radius floor. The radii
//! are tuned values, not derived.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::constants::region::*;
use crate::geometry::lerp;

/// The five named zones.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Region {
    /// Inner safe circle around the harbor.
    Heartsea,
    /// Eastern slice — warm water and ember light.
    Emberreach,
    /// Northwestern slice — fog banks.
    Mistfen,
    /// Southern slice — standing gales.
    Galecrown,
    /// Outermost edge ring.
    Farbrink,
}

impl Region {
    pub const ALL: [Region; 5] = [
        Region::Heartsea,
        Region::Emberreach,
        Region::Mistfen,
        Region::Galecrown,
        Region::Farbrink,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Region::Heartsea => "Heartsea",
            Region::Emberreach => "Emberreach",
            Region::Mistfen => "Mistfen",
            Region::Galecrown => "Galecrown",
            Region::Farbrink => "Farbrink",
        }
    }
}

/// Classify a planar position. Pure: identical input, identical region.
pub fn classify(x: f32, z: f32) -> Region {
    let r = (x * x + z * z).sqrt();
    if r < SAFE_RADIUS {
        return Region::Heartsea;
    }
    if r >= EDGE_RADIUS {
        return Region::Farbrink;
    }
    // Three 120° slices; each has its own inner floor that overlaps the
    // safe circle, so slice onset varies by approach direction.
    let angle = z.atan2(x).rem_euclid(std::f32::consts::TAU);
    let third = std::f32::consts::TAU / 3.0;
    let (slice, floor) = if angle < third {
        (Region::Emberreach, SLICE_FLOORS[0])
    } else if angle < 2.0 * third {
        (Region::Mistfen, SLICE_FLOORS[1])
    } else {
        (Region::Galecrown, SLICE_FLOORS[2])
    };
    if r < floor {
        Region::Heartsea
    } else {
        slice
    }
}

/// Visual parameters consumers blend across region transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionPalette {
    pub water: [f32; 3],
    pub fog: [f32; 3],
    pub fog_density: f32,
    pub sky: [f32; 3],
}

/// Tuned palette per region.
pub fn palette(region: Region) -> RegionPalette {
    match region {
        Region::Heartsea => RegionPalette {
            water: [0.10, 0.38, 0.48],
            fog: [0.75, 0.82, 0.88],
            fog_density: 0.004,
            sky: [0.52, 0.72, 0.90],
        },
        Region::Emberreach => RegionPalette {
            water: [0.18, 0.32, 0.34],
            fog: [0.88, 0.72, 0.58],
            fog_density: 0.007,
            sky: [0.82, 0.62, 0.46],
        },
        Region::Mistfen => RegionPalette {
            water: [0.16, 0.28, 0.33],
            fog: [0.70, 0.74, 0.76],
            fog_density: 0.016,
            sky: [0.62, 0.66, 0.70],
        },
        Region::Galecrown => RegionPalette {
            water: [0.08, 0.22, 0.30],
            fog: [0.55, 0.62, 0.70],
            fog_density: 0.010,
            sky: [0.40, 0.48, 0.58],
        },
        Region::Farbrink => RegionPalette {
            water: [0.04, 0.10, 0.18],
            fog: [0.35, 0.36, 0.44],
            fog_density: 0.022,
            sky: [0.22, 0.24, 0.34],
        },
    }
}

/// Linear blend between two palettes.
pub fn blend_palettes(a: &RegionPalette, b: &RegionPalette, t: f32) -> RegionPalette {
    let t = t.clamp(0.0, 1.0);
    let mix3 = |p: [f32; 3], q: [f32; 3]| [lerp(p[0], q[0], t), lerp(p[1], q[1], t), lerp(p[2], q[2], t)];
    RegionPalette {
        water: mix3(a.water, b.water),
        fog: mix3(a.fog, b.fog),
        fog_density: lerp(a.fog_density, b.fog_density, t),
        sky: mix3(a.sky, b.sky),
    }
}

/// What an observation produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegionObservation {
    pub changed: bool,
    /// First time this region has ever been entered.
    pub first_visit: bool,
}

/// Tracks the boat's region, crossfade progress, and discoveries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionTracker {
    pub current: Region,
    pub previous: Region,
    /// Crossfade from `previous` to `current`, 0..=1.
    pub blend_progress: f32,
    /// One-way discovery flags; grows monotonically.
    pub discovered: BTreeSet<Region>,
}

impl RegionTracker {
    pub fn new(start: Region) -> Self {
        let mut discovered = BTreeSet::new();
        discovered.insert(start);
        Self {
            current: start,
            previous: start,
            blend_progress: 1.0,
            discovered,
        }
    }

    /// Feed the classified region for this frame.
    pub fn observe(&mut self, region: Region) -> RegionObservation {
        if region == self.current {
            return RegionObservation::default();
        }
        self.previous = self.current;
        self.current = region;
        self.blend_progress = 0.0;
        let first_visit = self.discovered.insert(region);
        RegionObservation {
            changed: true,
            first_visit,
        }
    }

    /// Advance the crossfade.
    pub fn advance_blend(&mut self, dt: f32) {
        self.blend_progress = (self.blend_progress + BLEND_RATE * dt).min(1.0);
    }

    /// Palette blended between previous and current.
    pub fn blended_palette(&self) -> RegionPalette {
        blend_palettes(
            &palette(self.previous),
            &palette(self.current),
            self.blend_progress,
        )
    }
}

impl Default for RegionTracker {
    fn default() -> Self {
        Self::new(Region::Heartsea)
    }
}
