//! Per-wall decomposition parameters.
//!
//! A config is immutable once decomposition starts; the same config may be
//! shared across walls.

use wr_core::Wall;

use crate::{CavityError, CavityResult};

/// Cavity decomposition parameters.  All lengths in feet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CavityConfig {
    /// On-center spacing of vertical members in Derived mode.
    /// Default: 16" (4/3 ft).
    pub stud_spacing: f64,

    /// Thickness of vertical members (and of the sill/header allowance in
    /// Derived mode).  Clear span = centerline spacing − thickness.
    /// Default: 1.5" (0.125 ft).
    pub member_thickness: f64,

    /// Centerline of the first interior member measured from the wall start
    /// in Derived mode.  `None` places it one spacing in.  The members at
    /// `u = 0` and at the wall end are always present.
    ///
    /// `Some(8.0 / 12.0)` (half a 16" spacing) gives the half-spacing layout,
    /// which centers a bay of roughly `[4.73, 5.94]` on `u = 5.33`.  With the
    /// default, a stud face occupies `[5.27, 5.40]` and an entry there is
    /// snapped to a neighbouring bay.
    pub first_member_offset: Option<f64>,

    /// Candidate cavities narrower than this are dropped.  Default: 0.25 ft.
    pub min_clear_width: f64,

    /// Candidate cavities shorter than this are dropped.  Default: 0.25 ft.
    pub min_clear_height: f64,

    /// Geometric comparison tolerance.  Default: 1e-6 ft.
    pub tolerance: f64,
}

impl Default for CavityConfig {
    fn default() -> Self {
        Self {
            stud_spacing:        16.0 / 12.0,
            member_thickness:    1.5 / 12.0,
            first_member_offset: None,
            min_clear_width:     0.25,
            min_clear_height:    0.25,
            tolerance:           1e-6,
        }
    }
}

impl CavityConfig {
    /// Config with a different on-center spacing.
    pub fn with_spacing(spacing: f64) -> Self {
        Self { stud_spacing: spacing, ..Self::default() }
    }

    /// Centerline of the first interior member.
    #[inline]
    pub fn first_interior_member(&self) -> f64 {
        self.first_member_offset.unwrap_or(self.stud_spacing)
    }

    /// Check the parameters against the wall they are about to decompose.
    pub fn validate(&self, wall: &Wall) -> CavityResult<()> {
        let fail = |reason: String| -> CavityResult<()> {
            Err(CavityError::Config { wall: wall.id, reason })
        };

        if !(self.stud_spacing.is_finite() && self.stud_spacing > 0.0) {
            return fail(format!("stud spacing must be positive, got {}", self.stud_spacing));
        }
        if !(self.member_thickness.is_finite() && self.member_thickness >= 0.0) {
            return fail(format!(
                "member thickness must be non-negative, got {}",
                self.member_thickness
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return fail(format!("tolerance must be positive, got {}", self.tolerance));
        }
        if let Some(offset) = self.first_member_offset {
            if !(offset.is_finite() && offset >= 0.0) {
                return fail(format!("first member offset must be non-negative, got {offset}"));
            }
        }
        if !(self.min_clear_width.is_finite() && self.min_clear_width >= 0.0) {
            return fail(format!("minimum clear width must be non-negative, got {}", self.min_clear_width));
        }
        if !(self.min_clear_height.is_finite() && self.min_clear_height >= 0.0) {
            return fail(format!("minimum clear height must be non-negative, got {}", self.min_clear_height));
        }
        if self.min_clear_width >= wall.length {
            return fail(format!(
                "minimum clear width {} is not less than wall length {}",
                self.min_clear_width, wall.length
            ));
        }
        if self.min_clear_height >= wall.height {
            return fail(format!(
                "minimum clear height {} is not less than wall height {}",
                self.min_clear_height, wall.height
            ));
        }
        Ok(())
    }
}
