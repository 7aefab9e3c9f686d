//! Phase 1 and Phase 2 parameters.

use crate::{RouteError, RouteResult, WallAssignment};

// ── FixtureConfig ─────────────────────────────────────────────────────────────

/// Fixture-to-wall assignment parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixtureConfig {
    /// Furthest a connector may sit from a wall face and still be assigned to
    /// it.  Default: 2 ft.
    pub search_radius: f64,

    /// A supply connector whose unit direction has a downward component
    /// greater than this is treated as arriving from below.
    /// Default: cos 45°.
    pub supply_down_threshold: f64,
}

impl Default for FixtureConfig {
    fn default() -> Self {
        Self {
            search_radius:         2.0,
            supply_down_threshold: std::f64::consts::FRAC_1_SQRT_2,
        }
    }
}

impl FixtureConfig {
    pub fn with_radius(search_radius: f64) -> Self {
        Self { search_radius, ..Self::default() }
    }

    pub fn validate(&self) -> RouteResult<()> {
        if !(self.search_radius.is_finite() && self.search_radius >= 0.0) {
            return Err(RouteError::Config(format!(
                "search radius must be non-negative, got {}",
                self.search_radius
            )));
        }
        if !(0.0..=1.0).contains(&self.supply_down_threshold) {
            return Err(RouteError::Config(format!(
                "supply down threshold must lie in [0, 1], got {}",
                self.supply_down_threshold
            )));
        }
        Ok(())
    }
}

// ── ProcessingOrder ───────────────────────────────────────────────────────────

/// Order in which a wall's connectors are routed.  Earlier connectors claim
/// their straight-drop column first.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProcessingOrder {
    /// Ascending connector id.
    #[default]
    ConnectorId,
    /// Largest pipe first, then ascending connector id.
    PipeRadiusDesc,
}

impl ProcessingOrder {
    /// Stable sort of one wall's assignments into processing order.
    pub fn sort(self, assignments: &mut [&WallAssignment]) {
        match self {
            ProcessingOrder::ConnectorId => {
                assignments.sort_by_key(|a| a.connector_id);
            }
            ProcessingOrder::PipeRadiusDesc => {
                assignments.sort_by(|a, b| {
                    b.pipe_radius
                        .total_cmp(&a.pipe_radius)
                        .then_with(|| a.connector_id.cmp(&b.connector_id))
                });
            }
        }
    }
}

// ── RouterConfig ──────────────────────────────────────────────────────────────

/// In-wall routing parameters.  All lengths in feet.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouterConfig {
    /// Extra gap kept on each side of a pipe against other pipes.
    /// Default: 0.02 ft.
    pub clearance: f64,

    /// Offset increment of the free-column scan.  Default: 1/8" (1/96 ft).
    pub search_step: f64,

    /// An entry point that is not inside any cavity falls back to the
    /// nearest one only if it lies within this distance.  Default: 0.25 ft.
    pub max_snap_distance: f64,

    pub order: ProcessingOrder,

    /// Geometric comparison tolerance.  Default: 1e-6 ft.
    pub tolerance: f64,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            clearance:         0.02,
            search_step:       1.0 / 96.0,
            max_snap_distance: 0.25,
            order:             ProcessingOrder::ConnectorId,
            tolerance:         1e-6,
        }
    }
}

impl RouterConfig {
    pub fn validate(&self) -> RouteResult<()> {
        let non_negative = [
            ("clearance", self.clearance),
            ("max snap distance", self.max_snap_distance),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(RouteError::Config(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }
        let positive = [("search step", self.search_step), ("tolerance", self.tolerance)];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(RouteError::Config(format!("{name} must be positive, got {value}")));
            }
        }
        Ok(())
    }
}
