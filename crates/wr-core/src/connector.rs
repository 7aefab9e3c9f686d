//! MEP connector records and the system classification that drives routing.
//!
//! Connectors are created by the external extraction stage and are read-only
//! to the router.

use std::str::FromStr;

use crate::{ConnectorId, CoreError, OwnerId, Point3, Vec3};

// ── Domain ────────────────────────────────────────────────────────────────────

/// The MEP trade a connector belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Domain {
    #[default]
    Piping,
    Hvac,
    Electrical,
}

impl Domain {
    pub fn as_str(self) -> &'static str {
        match self {
            Domain::Piping     => "piping",
            Domain::Hvac       => "hvac",
            Domain::Electrical => "electrical",
        }
    }
}

impl FromStr for Domain {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "piping"     => Ok(Domain::Piping),
            "hvac"       => Ok(Domain::Hvac),
            "electrical" => Ok(Domain::Electrical),
            other => Err(CoreError::Parse(format!("unknown domain {other:?}"))),
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ExitBoundary ──────────────────────────────────────────────────────────────

/// The plate a routed pipe terminates at.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ExitBoundary {
    BottomPlate,
    TopPlate,
}

impl ExitBoundary {
    pub fn as_str(self) -> &'static str {
        match self {
            ExitBoundary::BottomPlate => "bottom_plate",
            ExitBoundary::TopPlate    => "top_plate",
        }
    }
}

impl std::fmt::Display for ExitBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── SystemType ────────────────────────────────────────────────────────────────

/// MEP system classification.  Governs the exit boundary and the initial
/// routing direction out of the fixture.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SystemType {
    /// Gravity drain.
    Sanitary,
    SupplyCold,
    SupplyHot,
    Vent,
}

impl SystemType {
    /// Drains and supplies leave through the bottom plate, vents through the
    /// top plate.
    #[inline]
    pub fn exit_boundary(self) -> ExitBoundary {
        match self {
            SystemType::Sanitary | SystemType::SupplyCold | SystemType::SupplyHot => {
                ExitBoundary::BottomPlate
            }
            SystemType::Vent => ExitBoundary::TopPlate,
        }
    }

    #[inline]
    pub fn is_supply(self) -> bool {
        matches!(self, SystemType::SupplyCold | SystemType::SupplyHot)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SystemType::Sanitary   => "sanitary",
            SystemType::SupplyCold => "supply_cold",
            SystemType::SupplyHot  => "supply_hot",
            SystemType::Vent       => "vent",
        }
    }
}

impl FromStr for SystemType {
    type Err = CoreError;

    /// Accepts the snake_case names plus the hyphenated spellings used by
    /// some extraction tools (`supply-cold`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "sanitary"    => Ok(SystemType::Sanitary),
            "supply_cold" => Ok(SystemType::SupplyCold),
            "supply_hot"  => Ok(SystemType::SupplyHot),
            "vent"        => Ok(SystemType::Vent),
            other => Err(CoreError::Parse(format!("unknown system type {other:?}"))),
        }
    }
}

impl std::fmt::Display for SystemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Connector ─────────────────────────────────────────────────────────────────

/// An MEP attachment point on a fixture.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connector {
    pub id: ConnectorId,
    pub owner_id: OwnerId,
    /// World position of the connection point.
    pub origin: Point3,
    /// Unit vector the connection faces.  For drains this is meaningless
    /// (always routed down); for supplies it distinguishes under-cabinet from
    /// wall-valve arrivals.
    pub direction: Vec3,
    pub domain: Domain,
    pub system_type: SystemType,
    /// Pipe radius in feet.
    pub radius: f64,
}

impl Connector {
    pub fn new(
        id: ConnectorId,
        origin: Point3,
        direction: Vec3,
        system_type: SystemType,
        radius: f64,
    ) -> Self {
        Self {
            id,
            owner_id: OwnerId::INVALID,
            origin,
            direction,
            domain: Domain::Piping,
            system_type,
            radius,
        }
    }
}
