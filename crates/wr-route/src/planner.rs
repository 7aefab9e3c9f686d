//! Batch pipeline: decompose walls, assign connectors, route.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use wr_cavity::{decompose_all, CavityConfig, CavityError, FramingLayout, WallCavities, WallJob};
use wr_core::{Connector, ConnectorId, Wall, WallId};

use crate::{
    FixtureConfig, FixtureRouter, Route, RouteError, RouteObserver, RouteResult, RouterConfig,
    WallAssignment, WallRouter,
};

// ── Outcome ───────────────────────────────────────────────────────────────────

/// Counts over one planner run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingSummary {
    pub walls:        usize,
    pub walls_failed: usize,
    pub cavities:     usize,
    pub connectors:   usize,
    pub assigned:     usize,
    pub unplaced:     usize,
    pub routed:       usize,
    pub unrouted:     usize,
    /// Routed pipes that had to leave their entry column.
    pub jogged:       usize,
}

/// Everything a planner run produces.
#[derive(Debug)]
pub struct RoutingOutcome {
    /// Cavities of every successfully decomposed wall.
    pub cavities: BTreeMap<WallId, WallCavities>,
    /// Walls rejected for configuration or geometry, in wall id order.
    pub wall_failures: Vec<(WallId, CavityError)>,
    /// Phase 1 output, in connector input order.
    pub assignments: Vec<WallAssignment>,
    /// Connectors with no wall inside the search radius, in input order.
    pub unplaced: Vec<ConnectorId>,
    /// Phase 2 output, grouped by wall id.
    pub routes: Vec<Route>,
    pub summary: RoutingSummary,
}

impl RoutingOutcome {
    pub fn route_for(&self, connector: ConnectorId) -> Option<&Route> {
        self.routes.iter().find(|r| r.connector_id == connector)
    }
}

// ── RoutePlanner ──────────────────────────────────────────────────────────────

/// Fluent builder for one routing run.
///
/// # Optional inputs (have defaults)
///
/// | Method                  | Default                        |
/// |-------------------------|--------------------------------|
/// | `.layout(wall, l)`      | Derived mode for every wall    |
/// | `.cavity_config(c)`     | `CavityConfig::default()`      |
/// | `.wall_config(wall, c)` | the shared cavity config       |
/// | `.fixture_config(c)`    | `FixtureConfig::default()`     |
/// | `.router_config(c)`     | `RouterConfig::default()`      |
///
/// # Example
///
/// ```rust,ignore
/// let outcome = RoutePlanner::new(&walls, &connectors)
///     .layout(WallId(3), &framing)
///     .router_config(RouterConfig { clearance: 0.03, ..Default::default() })
///     .run(&mut NoopObserver)?;
/// ```
pub struct RoutePlanner<'a> {
    walls:          &'a [Wall],
    connectors:     &'a [Connector],
    layouts:        BTreeMap<WallId, &'a FramingLayout>,
    cavity_config:  CavityConfig,
    wall_configs:   BTreeMap<WallId, CavityConfig>,
    fixture_config: FixtureConfig,
    router_config:  RouterConfig,
}

impl<'a> RoutePlanner<'a> {
    pub fn new(walls: &'a [Wall], connectors: &'a [Connector]) -> Self {
        Self {
            walls,
            connectors,
            layouts:        BTreeMap::new(),
            cavity_config:  CavityConfig::default(),
            wall_configs:   BTreeMap::new(),
            fixture_config: FixtureConfig::default(),
            router_config:  RouterConfig::default(),
        }
    }

    /// Decompose `wall` from exact framing instead of nominal spacing.
    pub fn layout(mut self, wall: WallId, layout: &'a FramingLayout) -> Self {
        self.layouts.insert(wall, layout);
        self
    }

    /// Cavity parameters for walls without their own.
    pub fn cavity_config(mut self, config: CavityConfig) -> Self {
        self.cavity_config = config;
        self
    }

    /// Cavity parameters for one wall.
    pub fn wall_config(mut self, wall: WallId, config: CavityConfig) -> Self {
        self.wall_configs.insert(wall, config);
        self
    }

    pub fn fixture_config(mut self, config: FixtureConfig) -> Self {
        self.fixture_config = config;
        self
    }

    pub fn router_config(mut self, config: RouterConfig) -> Self {
        self.router_config = config;
        self
    }

    /// Run decomposition, assignment and routing, reporting to `observer`.
    ///
    /// # Errors
    ///
    /// Invalid fixture/router configuration, duplicate wall ids, malformed
    /// connectors, and malformed wall or framing input.  Per-wall
    /// configuration and geometry failures are not errors; they appear in
    /// [`RoutingOutcome::wall_failures`].
    pub fn run<O: RouteObserver>(&self, observer: &mut O) -> RouteResult<RoutingOutcome> {
        let fixture = FixtureRouter::new(self.fixture_config.clone())?;
        let router = WallRouter::new(self.router_config.clone())?;
        self.validate_inputs()?;

        // ── Decompose ─────────────────────────────────────────────────────
        let jobs: Vec<WallJob<'_>> = self
            .walls
            .iter()
            .map(|w| {
                let config = self.wall_configs.get(&w.id).unwrap_or(&self.cavity_config);
                WallJob::new(w, config, self.layouts.get(&w.id).copied())
            })
            .collect();
        let batch = decompose_all(&jobs)?;
        for cavities in batch.walls.values() {
            observer.on_wall_decomposed(cavities);
        }
        for (wall, error) in &batch.failures {
            observer.on_wall_failed(*wall, error);
        }

        // ── Phase 1 ───────────────────────────────────────────────────────
        let (assignments, unplaced) = fixture.partition(self.connectors, self.walls);
        let unplaced_set: BTreeSet<ConnectorId> = unplaced.iter().copied().collect();
        for connector in self.connectors.iter().filter(|c| unplaced_set.contains(&c.id)) {
            observer.on_unplaced(connector);
        }

        // ── Phase 2 ───────────────────────────────────────────────────────
        let routes = router.route_observed(&assignments, &batch.walls, observer);

        let routed = routes.iter().filter(|r| r.is_routed()).count();
        let summary = RoutingSummary {
            walls:        batch.walls.len(),
            walls_failed: batch.failures.len(),
            cavities:     batch.cavity_count(),
            connectors:   self.connectors.len(),
            assigned:     assignments.len(),
            unplaced:     unplaced.len(),
            routed,
            unrouted:     routes.len() - routed,
            jogged:       routes.iter().filter(|r| r.is_routed() && r.has_jog()).count(),
        };
        observer.on_finish(&summary);
        info!(
            walls = summary.walls,
            walls_failed = summary.walls_failed,
            connectors = summary.connectors,
            routed = summary.routed,
            unrouted = summary.unrouted,
            unplaced = summary.unplaced,
            "routing complete"
        );

        Ok(RoutingOutcome {
            cavities: batch.walls,
            wall_failures: batch.failures,
            assignments,
            unplaced,
            routes,
            summary,
        })
    }

    fn validate_inputs(&self) -> RouteResult<()> {
        let mut seen = BTreeSet::new();
        for w in self.walls {
            if !seen.insert(w.id) {
                return Err(RouteError::Config(format!("duplicate wall id {}", w.id)));
            }
        }
        for c in self.connectors {
            let reason = if !c.origin.is_finite() {
                Some(format!("origin {} is not finite", c.origin))
            } else if !c.direction.is_finite() {
                Some(format!("direction {} is not finite", c.direction))
            } else if !(c.radius.is_finite() && c.radius >= 0.0) {
                Some(format!("radius must be a finite non-negative number, got {}", c.radius))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(RouteError::Connector { connector: c.id, reason });
            }
        }
        Ok(())
    }
}
