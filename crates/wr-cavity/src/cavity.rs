//! The `Cavity` record.
//!
//! The schema is consumed by insulation, fastening and trade-coordination
//! stages outside this workspace, so field names and meanings are stable.

use wr_core::{CavityId, Uv, WallId};

/// How a cavity was computed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SourceMode {
    /// From nominal stud spacing.
    Derived,
    /// From exact framing element positions.
    Framing,
}

impl SourceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceMode::Derived => "derived",
            SourceMode::Framing => "framing",
        }
    }
}

/// Whether a cavity spans a full stud bay or sits above a header / below a
/// sill.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CavityKind {
    Full,
    Cripple,
}

impl CavityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CavityKind::Full    => "full",
            CavityKind::Cripple => "cripple",
        }
    }
}

/// A rectangular void in wall-local `(u, v)` coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cavity {
    /// Position in the wall's ordered cavity set (sorted by `u_left`, then
    /// `v_bottom`).
    pub id: CavityId,
    pub wall_id: WallId,
    pub u_left: f64,
    pub u_right: f64,
    pub v_bottom: f64,
    pub v_top: f64,
    pub source_mode: SourceMode,
    pub kind: CavityKind,
}

impl Cavity {
    /// Clear width between the bounding vertical members.
    #[inline]
    pub fn width(&self) -> f64 {
        self.u_right - self.u_left
    }

    /// Clear height between the bounding horizontal members.
    #[inline]
    pub fn height(&self) -> f64 {
        self.v_top - self.v_bottom
    }

    #[inline]
    pub fn center(&self) -> Uv {
        Uv::new(
            (self.u_left + self.u_right) * 0.5,
            (self.v_bottom + self.v_top) * 0.5,
        )
    }

    /// Inclusive containment with `tol` slack on every side.
    #[inline]
    pub fn contains(&self, uv: Uv, tol: f64) -> bool {
        uv.u >= self.u_left - tol
            && uv.u <= self.u_right + tol
            && uv.v >= self.v_bottom - tol
            && uv.v <= self.v_top + tol
    }

    /// Squared distance from `uv` to the cavity rectangle (zero inside).
    pub fn distance_2(&self, uv: Uv) -> f64 {
        let du = (self.u_left - uv.u).max(uv.u - self.u_right).max(0.0);
        let dv = (self.v_bottom - uv.v).max(uv.v - self.v_top).max(0.0);
        du * du + dv * dv
    }

    /// Clamp `uv` into the cavity rectangle.
    #[inline]
    pub fn clamp(&self, uv: Uv) -> Uv {
        Uv::new(
            uv.u.clamp(self.u_left, self.u_right),
            uv.v.clamp(self.v_bottom, self.v_top),
        )
    }

    /// `true` if the interiors intersect by more than `tol` in both axes.
    pub fn overlaps(&self, other: &Cavity, tol: f64) -> bool {
        self.u_left < other.u_right - tol
            && other.u_left < self.u_right - tol
            && self.v_bottom < other.v_top - tol
            && other.v_bottom < self.v_top - tol
    }

    /// Length of the shared v-range with `other` (negative if disjoint).
    #[inline]
    pub fn v_overlap(&self, other: &Cavity) -> f64 {
        self.v_top.min(other.v_top) - self.v_bottom.max(other.v_bottom)
    }
}
