//! Coordinate types.
//!
//! `Uv` is a point in a wall's local 2-D frame; `Vec3` is a world-space
//! point or direction.  Both are `f64`, in feet.

use std::ops::{Add, Mul, Neg, Sub};

// ── Uv ────────────────────────────────────────────────────────────────────────

/// A point in wall-local coordinates: `u` along the wall length, `v` above
/// the wall base.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uv {
    pub u: f64,
    pub v: f64,
}

impl Uv {
    #[inline]
    pub fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Euclidean distance in the wall plane.
    #[inline]
    pub fn distance(self, other: Uv) -> f64 {
        (self.u - other.u).hypot(self.v - other.v)
    }

    /// `true` if both coordinates agree within `tol`.
    #[inline]
    pub fn approx_eq(self, other: Uv, tol: f64) -> bool {
        (self.u - other.u).abs() <= tol && (self.v - other.v).abs() <= tol
    }
}

impl std::fmt::Display for Uv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(u={:.4}, v={:.4})", self.u, self.v)
    }
}

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A world-space vector.  Used both for positions ([`Point3`]) and for
/// directions.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// A world-space position.
pub type Point3 = Vec3;

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };
    pub const X: Vec3 = Vec3 { x: 1.0, y: 0.0, z: 0.0 };
    pub const Y: Vec3 = Vec3 { x: 0.0, y: 1.0, z: 0.0 };
    pub const Z: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 1.0 };

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn dot(self, o: Vec3) -> f64 {
        self.x * o.x + self.y * o.y + self.z * o.z
    }

    #[inline]
    pub fn cross(self, o: Vec3) -> Vec3 {
        Vec3 {
            x: self.y * o.z - self.z * o.y,
            y: self.z * o.x - self.x * o.z,
            z: self.x * o.y - self.y * o.x,
        }
    }

    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or `None` for a (near-)zero vector.
    pub fn normalized(self) -> Option<Vec3> {
        let len = self.length();
        if len <= f64::EPSILON || !len.is_finite() {
            None
        } else {
            Some(self * (1.0 / len))
        }
    }

    /// The component in the horizontal (XY) plane.
    #[inline]
    pub fn horizontal(self) -> Vec3 {
        Vec3 { x: self.x, y: self.y, z: 0.0 }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x + o.x, self.y + o.y, self.z + o.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, o: Vec3) -> Vec3 {
        Vec3::new(self.x - o.x, self.y - o.y, self.z - o.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, s: f64) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    #[inline]
    fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.4}, {:.4}, {:.4})", self.x, self.y, self.z)
    }
}
