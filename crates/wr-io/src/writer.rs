//! The `OutputWriter` trait implemented by backend writers.

use crate::{CavityRow, IoResult, RoutePointRow, RouteRow};

/// Sink for planner output.
///
/// Errors are stored by [`RouteOutputObserver`](crate::RouteOutputObserver)
/// and retrieved with its `take_error`.
pub trait OutputWriter {
    fn write_cavities(&mut self, rows: &[CavityRow]) -> IoResult<()>;

    fn write_route(&mut self, row: &RouteRow) -> IoResult<()>;

    fn write_route_points(&mut self, rows: &[RoutePointRow]) -> IoResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> IoResult<()>;
}
