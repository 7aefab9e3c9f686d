//! Phase 1: assign each connector to the nearest wall and find its entry
//! point.
//!
//! Assignment is a pure function of one connector and the wall list, so
//! connectors may be processed in any order (and in parallel with the
//! `parallel` feature).  A connector with no wall face inside the search
//! radius gets no assignment at all.

use tracing::{trace, warn};

use wr_core::{Connector, ConnectorId, Point3, SystemType, Uv, Vec3, Wall, WallId};

use crate::{FixtureConfig, RouteResult};

// ── Approach ──────────────────────────────────────────────────────────────────

/// Initial routing direction out of the fixture.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Approach {
    Down,
    Up,
    /// Horizontal unit vector (world space), oriented toward the wall.
    Horizontal(Vec3),
}

impl Approach {
    pub fn as_str(&self) -> &'static str {
        match self {
            Approach::Down          => "down",
            Approach::Up            => "up",
            Approach::Horizontal(_) => "horizontal",
        }
    }
}

/// Initial direction for `connector` entering `wall`.
///
/// Drains always go down and vents always go up.  A supply goes down when
/// its direction points steeply enough downward, otherwise horizontally
/// along its own horizontal heading flipped to face the wall.
pub fn approach_for(connector: &Connector, wall: &Wall, supply_down_threshold: f64) -> Approach {
    match connector.system_type {
        SystemType::Sanitary => Approach::Down,
        SystemType::Vent => Approach::Up,
        SystemType::SupplyCold | SystemType::SupplyHot => {
            let dir = connector.direction.normalized();
            if dir.is_some_and(|d| -d.z > supply_down_threshold) {
                return Approach::Down;
            }
            let inward = inward(connector.origin, wall);
            match dir.and_then(|d| d.horizontal().normalized()) {
                Some(h) if h.dot(inward) < 0.0 => Approach::Horizontal(-h),
                Some(h) => Approach::Horizontal(h),
                None => Approach::Horizontal(inward),
            }
        }
    }
}

/// Horizontal unit vector from `p` toward the wall.
fn inward(p: Point3, wall: &Wall) -> Vec3 {
    wall.toward(p)
        .and_then(|t| t.horizontal().normalized())
        .unwrap_or_else(|| {
            let (_, w) = wall.frame.to_local(p);
            wall.frame.normal() * -w.signum()
        })
}

// ── WallAssignment ────────────────────────────────────────────────────────────

/// A connector's wall and entry point.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WallAssignment {
    pub connector_id: ConnectorId,
    pub wall_id: WallId,
    /// Connector origin projected onto the wall, clamped to its extent.
    pub entry_uv: Uv,
    pub system_type: SystemType,
    pub pipe_radius: f64,
    pub search_radius_used: f64,
    /// Distance from the connector origin to the assigned wall's face.
    pub distance: f64,
    pub approach: Approach,
}

// ── FixtureRouter ─────────────────────────────────────────────────────────────

/// Nearest-wall assignment for connectors.
#[derive(Clone, Debug, Default)]
pub struct FixtureRouter {
    config: FixtureConfig,
}

impl FixtureRouter {
    pub fn new(config: FixtureConfig) -> RouteResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Assign one connector, or `None` if no wall face lies within the
    /// search radius.  Equidistant walls resolve to the lower wall id.
    pub fn assign_one(&self, connector: &Connector, walls: &[Wall]) -> Option<WallAssignment> {
        let radius = self.config.search_radius;
        let nearest = walls
            .iter()
            .map(|w| (w, w.face_distance(connector.origin)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|(a, da), (b, db)| da.total_cmp(db).then_with(|| a.id.cmp(&b.id)));

        let Some((wall, distance)) = nearest else {
            warn!(connector = %connector.id, radius, "no wall within search radius");
            return None;
        };

        let entry_uv = wall.project(connector.origin);
        trace!(connector = %connector.id, wall = %wall.id, %entry_uv, distance, "assigned");
        Some(WallAssignment {
            connector_id: connector.id,
            wall_id: wall.id,
            entry_uv,
            system_type: connector.system_type,
            pipe_radius: connector.radius,
            search_radius_used: radius,
            distance,
            approach: approach_for(connector, wall, self.config.supply_down_threshold),
        })
    }

    /// Assign every connector, preserving input order.  Unassigned
    /// connectors are omitted.
    pub fn assign(&self, connectors: &[Connector], walls: &[Wall]) -> Vec<WallAssignment> {
        self.partition(connectors, walls).0
    }

    /// Like [`assign`](Self::assign) but also returns the ids of connectors
    /// that could not be placed, in input order.
    pub fn partition(
        &self,
        connectors: &[Connector],
        walls: &[Wall],
    ) -> (Vec<WallAssignment>, Vec<ConnectorId>) {
        #[cfg(not(feature = "parallel"))]
        let results: Vec<Option<WallAssignment>> = connectors
            .iter()
            .map(|c| self.assign_one(c, walls))
            .collect();

        #[cfg(feature = "parallel")]
        let results: Vec<Option<WallAssignment>> = {
            use rayon::prelude::*;
            connectors
                .par_iter()
                .map(|c| self.assign_one(c, walls))
                .collect()
        };

        let mut assigned = Vec::with_capacity(results.len());
        let mut unplaced = Vec::new();
        for (connector, result) in connectors.iter().zip(results) {
            match result {
                Some(a) => assigned.push(a),
                None => unplaced.push(connector.id),
            }
        }
        (assigned, unplaced)
    }
}

/// Assign `connectors` to `walls` with the default supply threshold.
///
/// Shorthand for [`FixtureRouter::assign`].  A negative or non-finite
/// `search_radius` places nothing.
pub fn assign(connectors: &[Connector], walls: &[Wall], search_radius: f64) -> Vec<WallAssignment> {
    FixtureRouter { config: FixtureConfig::with_radius(search_radius) }.assign(connectors, walls)
}
