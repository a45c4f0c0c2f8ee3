//! Small vector/angle toolkit shared by the simulation modules.
//!
//! Headings and wind angles are radians measured on the horizontal plane;
//! angle `a` maps to the planar direction `(cos a, 0, sin a)`.

use serde::{Deserialize, Serialize};

/// 3D position/velocity vector.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Length of the horizontal (xz) component.
    pub fn planar_length(&self) -> f32 {
        (self.x * self.x + self.z * self.z).sqrt()
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    /// Horizontal distance, ignoring height.
    pub fn planar_distance(&self, other: &Self) -> f32 {
        (*self - *other).planar_length()
    }

    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
                z: self.z / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        *self + (*other - *self) * t
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl std::ops::AddAssign for Vec3 {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

/// Unit direction on the horizontal plane for an angle in radians.
pub fn direction_from_angle(angle: f32) -> Vec3 {
    Vec3::new(angle.cos(), 0.0, angle.sin())
}

/// Rightward (starboard) unit vector for a heading.
pub fn right_from_angle(angle: f32) -> Vec3 {
    Vec3::new(angle.sin(), 0.0, -angle.cos())
}

/// Wrap an angle into `[-PI, PI]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let two_pi = std::f32::consts::TAU;
    let wrapped = angle.rem_euclid(two_pi);
    if wrapped > std::f32::consts::PI {
        wrapped - two_pi
    } else {
        wrapped
    }
}

/// Signed shortest-arc delta from `from` to `to`, in `[-PI, PI]`.
pub fn angle_delta(from: f32, to: f32) -> f32 {
    wrap_angle(to - from)
}

/// Rotate `from` toward `to` by at most `max_step` radians, shortest arc.
pub fn rotate_toward(from: f32, to: f32, max_step: f32) -> f32 {
    let delta = angle_delta(from, to);
    if delta.abs() <= max_step {
        to
    } else {
        wrap_angle(from + max_step.copysign(delta))
    }
}

pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Cubic ease (3t² − 2t³) for approach animations.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum.x, 5.0);
        assert_eq!(sum.z, 9.0);

        assert_eq!(a.dot(&b), 32.0);

        let n = Vec3::new(3.0, 4.0, 0.0).normalize();
        assert!((n.length() - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 100.0, 0.0);
        let b = Vec3::new(3.0, -50.0, 4.0);
        assert!((a.planar_distance(&b) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_wrap_angle() {
        // ±3π sit on the branch cut; rounding may land on either sign of π,
        // so compare directions rather than pinning the sign
        assert!(angle_delta(wrap_angle(3.0 * PI), PI).abs() < 0.001);
        assert!(angle_delta(wrap_angle(-3.0 * PI), PI).abs() < 0.001);
        assert!((wrap_angle(0.5) - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_angle_delta_shortest_arc() {
        // From 170° to -170° the short way is +20°, not -340°
        let d = angle_delta(170.0_f32.to_radians(), -170.0_f32.to_radians());
        assert!((d - 20.0_f32.to_radians()).abs() < 0.001);
    }

    #[test]
    fn test_rotate_toward_clamps_step() {
        let out = rotate_toward(0.0, 1.0, 0.25);
        assert!((out - 0.25).abs() < 0.001);
        let arrived = rotate_toward(0.9, 1.0, 0.25);
        assert!((arrived - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_smoothstep_ends() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 0.001);
    }
}
