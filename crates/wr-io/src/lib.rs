//! `wr-io` — CSV boundary adapters for the wall cavity router.
//!
//! | Direction | Item                                   | Files                                        |
//! |-----------|----------------------------------------|----------------------------------------------|
//! | in        | [`load_connectors_csv`]                | connector table from the extraction stage    |
//! | out       | [`CsvWriter`] via [`RouteOutputObserver`] | `cavities.csv`, `routes.csv`, `route_points.csv` |
//!
//! # Usage
//!
//! ```rust,ignore
//! use wr_io::{load_connectors_csv, CsvWriter, RouteOutputObserver};
//! use wr_route::RoutePlanner;
//!
//! let connectors = load_connectors_csv(Path::new("connectors.csv"))?;
//! let mut obs = RouteOutputObserver::new(CsvWriter::new(Path::new("./out"))?);
//! let outcome = RoutePlanner::new(&walls, &connectors).run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod loader;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{IoError, IoResult};
pub use loader::{load_connectors_csv, load_connectors_reader};
pub use observer::RouteOutputObserver;
pub use row::{CavityRow, RoutePointRow, RouteRow};
pub use writer::OutputWriter;
