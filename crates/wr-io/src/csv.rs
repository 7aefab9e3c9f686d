//! CSV output backend.
//!
//! Creates three files in the output directory:
//! - `cavities.csv`
//! - `routes.csv`
//! - `route_points.csv`
//!
//! Missing optional values are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CavityRow, IoResult, RoutePointRow, RouteRow};

pub const CAVITY_HEADER: [&str; 8] =
    ["wall_id", "cavity_id", "u_left", "u_right", "v_bottom", "v_top", "source_mode", "kind"];

pub const ROUTE_HEADER: [&str; 17] = [
    "connector_id",
    "wall_id",
    "system_type",
    "pipe_radius",
    "cavity_id",
    "status",
    "reason",
    "entry_u",
    "entry_v",
    "exit_u",
    "exit_v",
    "exit_boundary",
    "column_u",
    "half_width",
    "approach",
    "jog",
    "length",
];

pub const ROUTE_POINT_HEADER: [&str; 7] = ["connector_id", "seq", "u", "v", "x", "y", "z"];

/// Writes planner output to three CSV files.
pub struct CsvWriter {
    cavities: Writer<File>,
    routes:   Writer<File>,
    points:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> IoResult<Self> {
        let mut cavities = Writer::from_path(dir.join("cavities.csv"))?;
        cavities.write_record(CAVITY_HEADER)?;

        let mut routes = Writer::from_path(dir.join("routes.csv"))?;
        routes.write_record(ROUTE_HEADER)?;

        let mut points = Writer::from_path(dir.join("route_points.csv"))?;
        points.write_record(ROUTE_POINT_HEADER)?;

        Ok(Self { cavities, routes, points, finished: false })
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_cavities(&mut self, rows: &[CavityRow]) -> IoResult<()> {
        for row in rows {
            self.cavities.write_record(&[
                row.wall_id.to_string(),
                row.cavity_id.to_string(),
                row.u_left.to_string(),
                row.u_right.to_string(),
                row.v_bottom.to_string(),
                row.v_top.to_string(),
                row.source_mode.to_string(),
                row.kind.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_route(&mut self, row: &RouteRow) -> IoResult<()> {
        self.routes.write_record(&[
            row.connector_id.to_string(),
            row.wall_id.to_string(),
            row.system_type.to_string(),
            row.pipe_radius.to_string(),
            opt(row.cavity_id),
            row.status.to_string(),
            opt(row.reason),
            row.entry_u.to_string(),
            row.entry_v.to_string(),
            opt(row.exit_u),
            opt(row.exit_v),
            row.exit_boundary.to_string(),
            opt(row.column_u),
            opt(row.half_width),
            row.approach.to_string(),
            (row.jog as u8).to_string(),
            row.length.to_string(),
        ])?;
        Ok(())
    }

    fn write_route_points(&mut self, rows: &[RoutePointRow]) -> IoResult<()> {
        for row in rows {
            self.points.write_record(&[
                row.connector_id.to_string(),
                row.seq.to_string(),
                row.u.to_string(),
                row.v.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> IoResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.cavities.flush()?;
        self.routes.flush()?;
        self.points.flush()?;
        Ok(())
    }
}
