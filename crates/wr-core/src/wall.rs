//! Wall and opening records supplied by the wall-extraction stage.

use crate::{CoreError, CoreResult, Point3, Uv, WallFrame, WallId};

// ── Opening ───────────────────────────────────────────────────────────────────

/// A rectangular opening (door, window) in wall-local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opening {
    pub u_min: f64,
    pub u_max: f64,
    pub v_min: f64,
    pub v_max: f64,
}

impl Opening {
    pub fn new(u_min: f64, u_max: f64, v_min: f64, v_max: f64) -> Self {
        Self { u_min, u_max, v_min, v_max }
    }

    /// `true` if the open interval `(a, b)` overlaps the opening's u-range by
    /// more than `tol`.
    #[inline]
    pub fn overlaps_u(&self, a: f64, b: f64, tol: f64) -> bool {
        a < self.u_max - tol && self.u_min < b - tol
    }

    /// Strict interior containment.
    #[inline]
    pub fn contains(&self, uv: Uv) -> bool {
        uv.u > self.u_min && uv.u < self.u_max && uv.v > self.v_min && uv.v < self.v_max
    }
}

// ── Wall ──────────────────────────────────────────────────────────────────────

/// A straight wall segment with its local frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wall {
    pub id: WallId,
    pub frame: WallFrame,
    /// Extent along `u`, starting at `u = 0`.
    pub length: f64,
    /// Extent along `v`, starting at the wall base `v = 0`.
    pub height: f64,
    /// Overall thickness; faces sit at `w = ±thickness / 2`.
    pub thickness: f64,
    pub openings: Vec<Opening>,
}

impl Wall {
    pub fn new(id: WallId, frame: WallFrame, length: f64, height: f64, thickness: f64) -> Self {
        Self { id, frame, length, height, thickness, openings: Vec::new() }
    }

    /// Vertical wall whose centerline runs from `start` to `end` (the z of
    /// `end` is ignored; the base sits at `start.z`).
    pub fn from_baseline(
        id: WallId,
        start: Point3,
        end: Point3,
        height: f64,
        thickness: f64,
    ) -> CoreResult<Self> {
        let run = (end - start).horizontal();
        let frame = WallFrame::vertical(start, run).ok_or_else(|| CoreError::Geometry {
            wall: id,
            reason: "baseline has zero horizontal length".into(),
        })?;
        Ok(Self::new(id, frame, run.length(), height, thickness))
    }

    /// Builder-style helper to attach an opening.
    pub fn with_opening(mut self, opening: Opening) -> Self {
        self.openings.push(opening);
        self
    }

    /// Check structural preconditions and frame sanity.
    ///
    /// Negative or non-finite dimensions and inverted openings are
    /// [`CoreError::Malformed`]; zero dimensions and bad axes are
    /// [`CoreError::Geometry`].
    pub fn validate(&self, tol: f64) -> CoreResult<()> {
        let wall = self.id;
        for (name, value) in [
            ("length", self.length),
            ("height", self.height),
            ("thickness", self.thickness),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(CoreError::Malformed {
                    wall,
                    reason: format!("{name} must be a finite non-negative number, got {value}"),
                });
            }
        }
        if self.length <= tol {
            return Err(CoreError::Geometry { wall, reason: "zero length".into() });
        }
        if self.height <= tol {
            return Err(CoreError::Geometry { wall, reason: "zero height".into() });
        }
        for (i, o) in self.openings.iter().enumerate() {
            let finite = [o.u_min, o.u_max, o.v_min, o.v_max].iter().all(|x| x.is_finite());
            if !finite || o.u_min > o.u_max || o.v_min > o.v_max {
                return Err(CoreError::Malformed {
                    wall,
                    reason: format!("opening {i} is not a valid rectangle: {o:?}"),
                });
            }
        }
        self.frame.validate(wall)
    }

    /// Project a world point onto the wall plane, clamped to the wall's
    /// extent.
    pub fn project(&self, p: Point3) -> Uv {
        let (uv, _) = self.frame.to_local(p);
        Uv::new(uv.u.max(0.0).min(self.length), uv.v.max(0.0).min(self.height))
    }

    /// Distance from `p` to the nearest point on either wall face.
    ///
    /// Zero for points inside the wall's solid volume.
    pub fn face_distance(&self, p: Point3) -> f64 {
        let (uv, w) = self.frame.to_local(p);
        let du = excess(uv.u, 0.0, self.length);
        let dv = excess(uv.v, 0.0, self.height);
        let dw = (w.abs() - self.thickness * 0.5).max(0.0);
        (du * du + dv * dv + dw * dw).sqrt()
    }

    /// Unit vector from `p` toward the nearest wall face point, or `None`
    /// if `p` lies on or inside the wall.
    pub fn toward(&self, p: Point3) -> Option<crate::Vec3> {
        let (_, w) = self.frame.to_local(p);
        let face = self.frame.to_world_offset(self.project(p), w.signum() * self.thickness * 0.5);
        (face - p).normalized()
    }
}

/// Distance by which `x` lies outside `[lo, hi]`.
#[inline]
fn excess(x: f64, lo: f64, hi: f64) -> f64 {
    if x < lo {
        lo - x
    } else if x > hi {
        x - hi
    } else {
        0.0
    }
}
