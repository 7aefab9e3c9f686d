//! Wall-local coordinate frame.
//!
//! A wall's frame is anchored at the start of the wall's centerline at base
//! height.  `u_axis` runs along the wall, `v_axis` points up, and the face
//! normal is `u_axis × v_axis`.  World position of a wall-local point:
//!
//! ```text
//! p = origin + u · u_axis + v · v_axis + w · normal
//! ```
//!
//! `w` is the signed offset from the centerline; the two wall faces sit at
//! `w = ±thickness / 2`.

use crate::{CoreError, CoreResult, Point3, Uv, Vec3, WallId};

/// Axes may deviate from unit length / orthogonality by this much before the
/// frame is rejected as degenerate.
pub const AXIS_TOLERANCE: f64 = 1e-4;

/// Orthonormal wall frame.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallFrame {
    pub origin: Point3,
    pub u_axis: Vec3,
    pub v_axis: Vec3,
}

impl WallFrame {
    pub fn new(origin: Point3, u_axis: Vec3, v_axis: Vec3) -> Self {
        Self { origin, u_axis, v_axis }
    }

    /// Frame for a vertical wall whose centerline runs from `origin` in
    /// horizontal `direction`.  Returns `None` if `direction` has no
    /// horizontal component.
    pub fn vertical(origin: Point3, direction: Vec3) -> Option<Self> {
        let u_axis = direction.horizontal().normalized()?;
        Some(Self { origin, u_axis, v_axis: Vec3::Z })
    }

    /// Face normal (`u_axis × v_axis`).
    #[inline]
    pub fn normal(&self) -> Vec3 {
        self.u_axis.cross(self.v_axis)
    }

    /// World position of wall-local `uv` on the centerline.
    #[inline]
    pub fn to_world(&self, uv: Uv) -> Point3 {
        self.to_world_offset(uv, 0.0)
    }

    /// World position of wall-local `uv` offset `w` along the face normal.
    pub fn to_world_offset(&self, uv: Uv, w: f64) -> Point3 {
        self.origin + self.u_axis * uv.u + self.v_axis * uv.v + self.normal() * w
    }

    /// Project a world point into the frame, returning `(uv, w)`.
    pub fn to_local(&self, p: Point3) -> (Uv, f64) {
        let d = p - self.origin;
        (
            Uv::new(d.dot(self.u_axis), d.dot(self.v_axis)),
            d.dot(self.normal()),
        )
    }

    /// Reject non-finite, non-unit, or non-orthogonal axes.
    pub fn validate(&self, wall: WallId) -> CoreResult<()> {
        if !(self.origin.is_finite() && self.u_axis.is_finite() && self.v_axis.is_finite()) {
            return Err(CoreError::Malformed {
                wall,
                reason: "frame has non-finite components".into(),
            });
        }
        for (name, axis) in [("u", self.u_axis), ("v", self.v_axis)] {
            let len = axis.length();
            if (len - 1.0).abs() > AXIS_TOLERANCE {
                return Err(CoreError::Geometry {
                    wall,
                    reason: format!("{name} axis is not unit length (|{name}| = {len:.6})"),
                });
            }
        }
        let skew = self.u_axis.dot(self.v_axis);
        if skew.abs() > AXIS_TOLERANCE {
            return Err(CoreError::Geometry {
                wall,
                reason: format!("axes are not orthogonal (u·v = {skew:.6})"),
            });
        }
        Ok(())
    }
}
