//! Phase 2: route assigned connectors through their wall's cavities.
//!
//! # Prefer-straight-drop
//!
//! For each connector, in a fixed processing order:
//!
//! ```text
//! ① locate the cavity containing entry_uv (else the nearest one within
//!    max_snap_distance; else Unrouted(no_cavity_at_entry))
//! ② width < 2·(r + clearance)          → Unrouted(cavity_too_narrow)
//! ③ column u₀ = entry u, kept inside [u_left + r, u_right − r]
//! ④ u₀ free in the cavity's occupancy  → claim, straight drop to the exit
//! ⑤ else scan u₀ ∓ k·step (left first)  → claim, jog at entry v, then drop
//! ⑥ nothing free                       → Unrouted(cavity_occupied)
//! ```
//!
//! The exit is the cavity's `v_bottom` for drains and supplies and `v_top`
//! for vents.  There is no backtracking: a later pipe never displaces an
//! earlier one, and pipes never cross into a neighboring cavity.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use wr_cavity::{Cavity, WallCavities};
use wr_core::{CavityId, ExitBoundary, Uv, WallId};

use crate::{
    ClaimedInterval, OccupancyRecord, Route, RouteObserver, RoutePoint, RouteResult,
    RouteStatus, RouterConfig, UnroutedReason, WallAssignment,
};

// ── RoutingPass ───────────────────────────────────────────────────────────────

/// One wall's routing pass: the wall's cavities plus the occupancy records
/// the pass owns.  Records start empty and are dropped with the pass.
pub struct RoutingPass<'a> {
    cavities:  &'a WallCavities,
    config:    &'a RouterConfig,
    occupancy: BTreeMap<CavityId, OccupancyRecord>,
}

impl<'a> RoutingPass<'a> {
    /// Fails with [`RouteError::Config`](crate::RouteError::Config) when
    /// `config` does not validate.
    pub fn new(cavities: &'a WallCavities, config: &'a RouterConfig) -> RouteResult<Self> {
        config.validate()?;
        Ok(Self::with_valid_config(cavities, config))
    }

    fn with_valid_config(cavities: &'a WallCavities, config: &'a RouterConfig) -> Self {
        Self { cavities, config, occupancy: BTreeMap::new() }
    }

    pub fn wall_id(&self) -> WallId {
        self.cavities.wall_id
    }

    /// Claims made so far in `cavity`.
    pub fn occupancy(&self, cavity: CavityId) -> Option<&OccupancyRecord> {
        self.occupancy.get(&cavity)
    }

    /// Route one connector, claiming its column on success.
    pub fn route_one(&mut self, a: &WallAssignment) -> Route {
        let (cavities, config) = (self.cavities, self.config);
        let tol = config.tolerance;
        let entry = a.entry_uv;

        // ① Resolve the cavity.
        let cavity: &'a Cavity = match cavities.locate(entry) {
            Some(c) => c,
            None => match cavities.nearest_with_distance(entry.u, entry.v) {
                Some((c, d)) if d <= config.max_snap_distance + tol => c,
                _ => return Route::unrouted(a, None, UnroutedReason::NoCavityAtEntry),
            },
        };

        // ② Geometric fit.  A NaN radius never fits.
        let r = a.pipe_radius;
        let half_width = r + config.clearance;
        if !(cavity.width() >= 2.0 * half_width - tol) {
            return Route::unrouted(a, Some(cavity.id), UnroutedReason::CavityTooNarrow);
        }

        // ③ Entry column.
        let start = cavity.clamp(entry);
        let lo = cavity.u_left + r;
        let hi = (cavity.u_right - r).max(lo);
        let u0 = start.u.clamp(lo, hi);

        // ④–⑥ Occupancy.
        let record = self
            .occupancy
            .entry(cavity.id)
            .or_insert_with(|| OccupancyRecord::new(cavity.id));
        let Some(u) = free_column(record, u0, half_width, lo, hi, config.search_step, tol) else {
            return Route::unrouted(a, Some(cavity.id), UnroutedReason::CavityOccupied);
        };
        let claimed = ClaimedInterval::new(u, half_width);
        record.claim(claimed);

        let exit_boundary = a.system_type.exit_boundary();
        let exit_v = match exit_boundary {
            ExitBoundary::BottomPlate => cavity.v_bottom,
            ExitBoundary::TopPlate => cavity.v_top,
        };
        let exit = Uv::new(u, exit_v);

        let mut uvs = vec![start];
        if (u - start.u).abs() > tol {
            uvs.push(Uv::new(u, start.v));
        }
        uvs.push(exit);

        let frame = &cavities.frame;
        let path = uvs
            .into_iter()
            .map(|uv| RoutePoint { uv, world: frame.to_world(uv) })
            .collect();

        Route {
            connector_id: a.connector_id,
            wall_id: a.wall_id,
            system_type: a.system_type,
            pipe_radius: r,
            cavity_id: Some(cavity.id),
            path,
            entry_uv: entry,
            exit_uv: Some(exit),
            exit_boundary,
            claimed: Some(claimed),
            approach: a.approach,
            status: RouteStatus::Routed,
        }
    }
}

/// First free column: `u0` itself, else `u0 ∓ k·step` for `k = 1, 2, …`
/// (left before right).  Each side stops after testing its bound; `step` is
/// floored at `tol`, so the scan makes at most `⌈(hi − lo) / step⌉ + 1` rounds.
pub(crate) fn free_column(
    record: &OccupancyRecord,
    u0: f64,
    half_width: f64,
    lo: f64,
    hi: f64,
    step: f64,
    tol: f64,
) -> Option<f64> {
    let free = |u: f64| record.is_free(&ClaimedInterval::new(u, half_width), tol);
    if free(u0) {
        return Some(u0);
    }
    let step = step.max(tol);
    let rounds = ((hi - lo) / step).ceil().max(0.0) as u64 + 1;
    let (mut left_open, mut right_open) = (u0 > lo + tol, u0 < hi - tol);
    let mut k = 1u64;
    while (left_open || right_open) && k <= rounds {
        let offset = k as f64 * step;
        if left_open {
            let left = u0 - offset;
            left_open = left > lo + tol;
            let u = left.max(lo);
            if free(u) {
                return Some(u);
            }
        }
        if right_open {
            let right = u0 + offset;
            right_open = right < hi - tol;
            let u = right.min(hi);
            if free(u) {
                return Some(u);
            }
        }
        k += 1;
    }
    None
}

// ── WallRouter ────────────────────────────────────────────────────────────────

/// Routes assignments wall by wall.
///
/// Walls are independent and, with the `parallel` feature, run on Rayon's
/// pool.  Within a wall connectors are routed sequentially in
/// [`RouterConfig::order`].  Output is grouped by ascending wall id, each
/// group in processing order, whether or not the feature is on.
#[derive(Clone, Debug, Default)]
pub struct WallRouter {
    config: RouterConfig,
}

impl WallRouter {
    pub fn new(config: RouterConfig) -> RouteResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Route every assignment.  Assignments to a wall missing from
    /// `cavities_by_wall` come back `Unrouted(no_cavity_at_entry)`.
    pub fn route(
        &self,
        assignments: &[WallAssignment],
        cavities_by_wall: &BTreeMap<WallId, WallCavities>,
    ) -> Vec<Route> {
        let mut by_wall: BTreeMap<WallId, Vec<&WallAssignment>> = BTreeMap::new();
        for a in assignments {
            by_wall.entry(a.wall_id).or_default().push(a);
        }

        #[cfg(not(feature = "parallel"))]
        let per_wall: Vec<Vec<Route>> = by_wall
            .into_iter()
            .map(|(wall, group)| self.route_wall(cavities_by_wall.get(&wall), group))
            .collect();

        #[cfg(feature = "parallel")]
        let per_wall: Vec<Vec<Route>> = {
            use rayon::prelude::*;
            by_wall
                .into_iter()
                .collect::<Vec<_>>()
                .into_par_iter()
                .map(|(wall, group)| self.route_wall(cavities_by_wall.get(&wall), group))
                .collect()
        };

        per_wall.into_iter().flatten().collect()
    }

    /// Route and report each result to `observer` in output order.
    pub fn route_observed<O: RouteObserver>(
        &self,
        assignments: &[WallAssignment],
        cavities_by_wall: &BTreeMap<WallId, WallCavities>,
        observer: &mut O,
    ) -> Vec<Route> {
        let routes = self.route(assignments, cavities_by_wall);
        for route in &routes {
            observer.on_route(route);
        }
        routes
    }

    fn route_wall(
        &self,
        cavities: Option<&WallCavities>,
        mut group: Vec<&WallAssignment>,
    ) -> Vec<Route> {
        self.config.order.sort(&mut group);

        let Some(cavities) = cavities else {
            return group
                .into_iter()
                .map(|a| {
                    let route = Route::unrouted(a, None, UnroutedReason::NoCavityAtEntry);
                    log_route(&route);
                    route
                })
                .collect();
        };

        let mut pass = RoutingPass::with_valid_config(cavities, &self.config);
        group
            .into_iter()
            .map(|a| {
                let route = pass.route_one(a);
                log_route(&route);
                route
            })
            .collect()
    }
}

fn log_route(route: &Route) {
    match route.status {
        RouteStatus::Routed => debug!(
            connector = %route.connector_id,
            wall = %route.wall_id,
            cavity = ?route.cavity_id,
            column = ?route.column_u(),
            jog = route.has_jog(),
            "routed"
        ),
        RouteStatus::Unrouted(reason) => warn!(
            connector = %route.connector_id,
            wall = %route.wall_id,
            reason = reason.as_str(),
            "unrouted"
        ),
    }
}
