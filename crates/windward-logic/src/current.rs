//! Ocean current field — a single gyre around the map center plus a little
//! trigonometric noise. Pure function of position; no temporal state.

use crate::constants::current::*;
use crate::geometry::Vec3;

/// Flow velocity at a world position (horizontal only).
pub fn flow_at(x: f32, z: f32) -> Vec3 {
    let r = (x * x + z * z).sqrt();

    // Tangential gyre: ramps up to GYRE_RADIUS, falls off beyond it.
    let tangent = if r > 1e-3 {
        Vec3::new(-z / r, 0.0, x / r)
    } else {
        Vec3::ZERO
    };
    let falloff = if r <= GYRE_RADIUS {
        r / GYRE_RADIUS
    } else {
        (GYRE_RADIUS / r).min(1.0)
    };
    let gyre = tangent * (GYRE_STRENGTH * falloff);

    // Stationary noise so the flow is not perfectly circular.
    let noise = Vec3::new(
        NOISE_AMP * (z * NOISE_FREQ_Z).sin(),
        0.0,
        NOISE_AMP * (x * NOISE_FREQ_X).cos(),
    );

    gyre + noise
}
