//! `RouteOutputObserver<W>` — bridges `RouteObserver` to an `OutputWriter`.

use tracing::warn;

use wr_cavity::WallCavities;
use wr_route::{Route, RouteObserver, RoutingSummary};

use crate::row::{CavityRow, RoutePointRow, RouteRow};
use crate::writer::OutputWriter;
use crate::{IoError, IoResult};

/// A [`RouteObserver`] that writes cavities, routes and route points to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `RouteObserver`
/// methods have no return value.  After the planner returns, check for
/// errors with [`take_error`][Self::take_error].
pub struct RouteOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<IoError>,
}

impl<W: OutputWriter> RouteOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<IoError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: IoResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> RouteObserver for RouteOutputObserver<W> {
    fn on_wall_decomposed(&mut self, cavities: &WallCavities) {
        let rows: Vec<CavityRow> = cavities.cavities().iter().map(CavityRow::from).collect();
        if !rows.is_empty() {
            let result = self.writer.write_cavities(&rows);
            self.store_err(result);
        }
    }

    fn on_route(&mut self, route: &Route) {
        let result = self.writer.write_route(&RouteRow::from(route));
        self.store_err(result);

        let points = RoutePointRow::from_route(route);
        if !points.is_empty() {
            let result = self.writer.write_route_points(&points);
            self.store_err(result);
        }
    }

    fn on_finish(&mut self, _summary: &RoutingSummary) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
