//! Observer trait for collecting planner results as they are produced.

use wr_cavity::{CavityError, WallCavities};
use wr_core::{Connector, WallId};

use crate::{Route, RoutingSummary};

/// Callbacks invoked by [`RoutePlanner::run`][crate::RoutePlanner::run].
///
/// All methods default to no-ops.  Callbacks run sequentially on the calling
/// thread, after the (possibly parallel) compute phase of each stage, in
/// ascending wall id and then processing order.
///
/// # Example: unrouted counter
///
/// ```rust,ignore
/// struct Unrouted(usize);
///
/// impl RouteObserver for Unrouted {
///     fn on_route(&mut self, route: &Route) {
///         if !route.is_routed() {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait RouteObserver {
    /// A wall was decomposed (possibly into zero cavities).
    fn on_wall_decomposed(&mut self, _cavities: &WallCavities) {}

    /// A wall's configuration or geometry was rejected; its connectors will
    /// come back unrouted.
    fn on_wall_failed(&mut self, _wall: WallId, _error: &CavityError) {}

    /// No wall lies within the connector's search radius.
    fn on_unplaced(&mut self, _connector: &Connector) {}

    fn on_route(&mut self, _route: &Route) {}

    /// Called once after every route has been reported.
    fn on_finish(&mut self, _summary: &RoutingSummary) {}
}

/// A [`RouteObserver`] that does nothing.
pub struct NoopObserver;

impl RouteObserver for NoopObserver {}
