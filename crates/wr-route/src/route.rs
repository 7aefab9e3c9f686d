//! The `Route` record emitted by the wall router.

use wr_core::{CavityId, ConnectorId, ExitBoundary, Point3, SystemType, Uv, WallId};

use crate::{Approach, ClaimedInterval, WallAssignment};

// ── Status ────────────────────────────────────────────────────────────────────

/// Why a connector could not be routed.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnroutedReason {
    /// Cavity narrower than the pipe diameter plus clearance on both sides.
    CavityTooNarrow,
    /// Every candidate column in the cavity collides with an earlier pipe.
    CavityOccupied,
    /// No cavity contains the entry point or lies within snapping distance.
    NoCavityAtEntry,
}

impl UnroutedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            UnroutedReason::CavityTooNarrow => "cavity_too_narrow",
            UnroutedReason::CavityOccupied  => "cavity_occupied",
            UnroutedReason::NoCavityAtEntry => "no_cavity_at_entry",
        }
    }
}

impl std::fmt::Display for UnroutedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RouteStatus {
    Routed,
    Unrouted(UnroutedReason),
}

impl RouteStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RouteStatus::Routed      => "routed",
            RouteStatus::Unrouted(_) => "unrouted",
        }
    }

    pub fn reason(self) -> Option<UnroutedReason> {
        match self {
            RouteStatus::Routed      => None,
            RouteStatus::Unrouted(r) => Some(r),
        }
    }
}

impl std::fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteStatus::Routed      => f.write_str("routed"),
            RouteStatus::Unrouted(r) => write!(f, "unrouted({r})"),
        }
    }
}

// ── Route ─────────────────────────────────────────────────────────────────────

/// One path vertex in wall-local and world coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePoint {
    pub uv: Uv,
    pub world: Point3,
}

/// The routed (or unrouted) path of one connector through one wall.
///
/// A routed path is either a straight column `[start, exit]` or, when the
/// entry column was taken, `[start, jog, exit]` with a horizontal jog at the
/// entry height.  Unrouted routes carry an empty path and no exit point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    pub connector_id: ConnectorId,
    pub wall_id: WallId,
    pub system_type: SystemType,
    pub pipe_radius: f64,
    /// Cavity the pipe runs in; also set for `CavityTooNarrow` and
    /// `CavityOccupied` so the offending cavity can be reported.
    pub cavity_id: Option<CavityId>,
    pub path: Vec<RoutePoint>,
    /// Entry point as assigned, before any snapping into the cavity.
    pub entry_uv: Uv,
    pub exit_uv: Option<Uv>,
    pub exit_boundary: ExitBoundary,
    pub claimed: Option<ClaimedInterval>,
    pub approach: Approach,
    pub status: RouteStatus,
}

impl Route {
    pub(crate) fn unrouted(
        a: &WallAssignment,
        cavity_id: Option<CavityId>,
        reason: UnroutedReason,
    ) -> Self {
        Self {
            connector_id: a.connector_id,
            wall_id: a.wall_id,
            system_type: a.system_type,
            pipe_radius: a.pipe_radius,
            cavity_id,
            path: Vec::new(),
            entry_uv: a.entry_uv,
            exit_uv: None,
            exit_boundary: a.system_type.exit_boundary(),
            claimed: None,
            approach: a.approach,
            status: RouteStatus::Unrouted(reason),
        }
    }

    #[inline]
    pub fn is_routed(&self) -> bool {
        self.status == RouteStatus::Routed
    }

    /// `true` if the pipe had to leave its entry column.
    #[inline]
    pub fn has_jog(&self) -> bool {
        self.path.len() > 2
    }

    /// Path length in feet.
    pub fn length(&self) -> f64 {
        self.path.windows(2).map(|w| w[0].uv.distance(w[1].uv)).sum()
    }

    /// The `u` of the vertical run, if routed.
    pub fn column_u(&self) -> Option<f64> {
        self.claimed.map(|c| c.u_center)
    }
}
