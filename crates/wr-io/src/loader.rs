//! CSV connector loader.
//!
//! # CSV format
//!
//! One row per connector, as written by the connector-extraction stage.
//! World coordinates in feet, direction as a (not necessarily unit) vector.
//!
//! ```csv
//! id,owner_id,x,y,z,dx,dy,dz,domain,system_type,radius
//! 0,12,5.33,1.0,3.0,0,0,-1,piping,sanitary,0.125
//! 1,12,5.80,1.0,3.5,0,-1,0,piping,supply-cold,0.03
//! 2,,2.00,1.0,6.5,0,0,1,,vent,0.0625
//! ```
//!
//! `owner_id` and `domain` may be empty (no owner / piping).  `system_type`
//! accepts `supply_cold` and `supply-cold` alike.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use wr_core::{Connector, ConnectorId, Domain, OwnerId, SystemType, Vec3};

use crate::{IoError, IoResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ConnectorRecord {
    id:          u32,
    owner_id:    Option<u32>,
    x:           f64,
    y:           f64,
    z:           f64,
    dx:          f64,
    dy:          f64,
    dz:          f64,
    domain:      Option<String>,
    system_type: String,
    radius:      f64,
}

impl ConnectorRecord {
    fn into_connector(self, row: usize) -> IoResult<Connector> {
        let parse_err = |reason: String| IoError::Parse { row, reason };

        let origin = Vec3::new(self.x, self.y, self.z);
        let direction = Vec3::new(self.dx, self.dy, self.dz);
        if !origin.is_finite() || !direction.is_finite() {
            return Err(parse_err(format!("connector {} has non-finite coordinates", self.id)));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(parse_err(format!("invalid radius {}", self.radius)));
        }
        let system_type: SystemType = self
            .system_type
            .parse()
            .map_err(|e: wr_core::CoreError| parse_err(e.to_string()))?;
        let domain = match self.domain.as_deref().map(str::trim) {
            None | Some("") => Domain::default(),
            Some(s) => s.parse().map_err(|e: wr_core::CoreError| parse_err(e.to_string()))?,
        };

        Ok(Connector {
            id: ConnectorId(self.id),
            owner_id: self.owner_id.map_or(OwnerId::INVALID, OwnerId),
            origin,
            direction,
            domain,
            system_type,
            radius: self.radius,
        })
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load connectors from a CSV file, in file order.
pub fn load_connectors_csv(path: &Path) -> IoResult<Vec<Connector>> {
    let file = std::fs::File::open(path)?;
    load_connectors_reader(file)
}

/// Like [`load_connectors_csv`] but accepts any `Read` source.
pub fn load_connectors_reader<R: Read>(reader: R) -> IoResult<Vec<Connector>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut connectors = Vec::new();
    for (i, result) in csv_reader.deserialize::<ConnectorRecord>().enumerate() {
        let record = result?;
        connectors.push(record.into_connector(i + 1)?);
    }
    debug!(count = connectors.len(), "loaded connectors");
    Ok(connectors)
}
