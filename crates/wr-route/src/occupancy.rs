//! Per-cavity record of claimed pipe columns.
//!
//! Only vertical-column overlap is tracked.  Two pipes whose horizontal jogs
//! cross at different heights are not detected.

use wr_core::CavityId;

/// Horizontal span reserved by one routed pipe: its column center and its
/// radius plus clearance.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClaimedInterval {
    pub u_center: f64,
    pub half_width: f64,
}

impl ClaimedInterval {
    pub fn new(u_center: f64, half_width: f64) -> Self {
        Self { u_center, half_width }
    }

    #[inline]
    pub fn lo(&self) -> f64 {
        self.u_center - self.half_width
    }

    #[inline]
    pub fn hi(&self) -> f64 {
        self.u_center + self.half_width
    }

    /// Interiors intersect by more than `tol`.  Touching intervals do not
    /// overlap.
    #[inline]
    pub fn overlaps(&self, other: &ClaimedInterval, tol: f64) -> bool {
        self.lo() < other.hi() - tol && other.lo() < self.hi() - tol
    }
}

/// Claimed columns in one cavity during one wall's routing pass.
#[derive(Clone, Debug, PartialEq)]
pub struct OccupancyRecord {
    cavity_id: CavityId,
    claims: Vec<ClaimedInterval>,
}

impl OccupancyRecord {
    pub fn new(cavity_id: CavityId) -> Self {
        Self { cavity_id, claims: Vec::new() }
    }

    pub fn cavity_id(&self) -> CavityId {
        self.cavity_id
    }

    /// Claims in the order they were made.
    pub fn claims(&self) -> &[ClaimedInterval] {
        &self.claims
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// `true` if `candidate` overlaps no existing claim.
    pub fn is_free(&self, candidate: &ClaimedInterval, tol: f64) -> bool {
        !self.claims.iter().any(|c| c.overlaps(candidate, tol))
    }

    /// Reserve `interval`.  The caller checks [`is_free`](Self::is_free)
    /// first; claims are never released during a pass.
    pub fn claim(&mut self, interval: ClaimedInterval) {
        self.claims.push(interval);
    }
}
