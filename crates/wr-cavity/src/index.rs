//! Ordered cavity set for one wall plus a spatial index.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `(u, v)` to cavity rectangles.  Entries are
//! inflated by the geometric tolerance so that a point lying exactly on a
//! cavity boundary still hits the cavity.  The router uses it to locate the
//! cavity containing a connector's entry point, falling back to the nearest
//! cavity when the entry lands on a member face.

use std::fmt;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use wr_core::{CavityId, Uv, WallFrame, WallId};

use crate::{Cavity, SourceMode};

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a cavity rectangle inflated by `tol`.
#[derive(Clone)]
struct CavityEntry {
    lo: [f64; 2],
    hi: [f64; 2],
    tol: f64,
    id: CavityId,
}

impl CavityEntry {
    fn new(c: &Cavity, tol: f64) -> Self {
        Self {
            lo: [c.u_left, c.v_bottom],
            hi: [c.u_right, c.v_top],
            tol,
            id: c.id,
        }
    }
}

impl RTreeObject for CavityEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(
            [self.lo[0] - self.tol, self.lo[1] - self.tol],
            [self.hi[0] + self.tol, self.hi[1] + self.tol],
        )
    }
}

impl PointDistance for CavityEntry {
    /// Squared distance from the point to the (uninflated) rectangle; zero
    /// inside.
    fn distance_2(&self, p: &[f64; 2]) -> f64 {
        let du = (self.lo[0] - p[0]).max(p[0] - self.hi[0]).max(0.0);
        let dv = (self.lo[1] - p[1]).max(p[1] - self.hi[1]).max(0.0);
        du * du + dv * dv
    }

    fn contains_point(&self, p: &[f64; 2]) -> bool {
        p[0] >= self.lo[0] - self.tol
            && p[0] <= self.hi[0] + self.tol
            && p[1] >= self.lo[1] - self.tol
            && p[1] <= self.hi[1] + self.tol
    }
}

// ── WallCavities ──────────────────────────────────────────────────────────────

/// The cavities of one wall, immutable after construction.
///
/// Cavities are stored in id order, so `cavities()[id.index()]` is the
/// cavity with that id.  Build with [`WallCavities::new`] or via
/// [`decompose`](crate::decompose).
#[derive(Clone)]
pub struct WallCavities {
    pub wall_id: WallId,
    /// Frame of the owning wall, carried so routes can be emitted in world
    /// coordinates.
    pub frame: WallFrame,
    pub source_mode: SourceMode,
    cavities: Vec<Cavity>,
    /// Largest horizontal gap between two cavities that still counts as
    /// sharing a vertical boundary (one member thickness plus tolerance).
    adjacency_gap: f64,
    tolerance: f64,
    spatial_idx: RTree<CavityEntry>,
}

impl WallCavities {
    /// Index `cavities`, renumbering them by position.
    ///
    /// Callers are expected to pass cavities already sorted in the order they
    /// want ids assigned; the decomposer sorts by `u_left`, then `v_bottom`.
    pub fn new(
        wall_id: WallId,
        frame: WallFrame,
        source_mode: SourceMode,
        mut cavities: Vec<Cavity>,
        adjacency_gap: f64,
        tolerance: f64,
    ) -> Self {
        for (i, c) in cavities.iter_mut().enumerate() {
            c.id = CavityId(i as u32);
            c.wall_id = wall_id;
        }
        let entries: Vec<CavityEntry> = cavities
            .iter()
            .map(|c| CavityEntry::new(c, tolerance))
            .collect();
        let spatial_idx = RTree::bulk_load(entries);
        Self {
            wall_id,
            frame,
            source_mode,
            cavities,
            adjacency_gap,
            tolerance,
            spatial_idx,
        }
    }

    /// A wall with no producible cavities.
    pub fn empty(
        wall_id: WallId,
        frame: WallFrame,
        source_mode: SourceMode,
        tolerance: f64,
    ) -> Self {
        Self::new(wall_id, frame, source_mode, Vec::new(), 0.0, tolerance)
    }

    pub fn cavities(&self) -> &[Cavity] {
        &self.cavities
    }

    pub fn get(&self, id: CavityId) -> Option<&Cavity> {
        self.cavities.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.cavities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cavities.is_empty()
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn adjacency_gap(&self) -> f64 {
        self.adjacency_gap
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The cavity containing `(u, v)` (boundaries inclusive within
    /// tolerance).  If several match, the lowest id wins.
    pub fn find_cavity_for_uv(&self, u: f64, v: f64) -> Option<&Cavity> {
        self.spatial_idx
            .locate_all_at_point(&[u, v])
            .map(|e| e.id)
            .min()
            .and_then(|id| self.get(id))
    }

    /// The cavity whose interior is closest to `(u, v)`.
    ///
    /// Used when the entry point falls on a member face.  Ties go to the
    /// lowest id so the result does not depend on R-tree layout.  Returns
    /// `None` only for an empty set.
    pub fn find_nearest_cavity(&self, u: f64, v: f64) -> Option<&Cavity> {
        self.nearest_with_distance(u, v).map(|(c, _)| c)
    }

    /// Like [`find_nearest_cavity`](Self::find_nearest_cavity) but also
    /// returns the distance to the cavity.
    pub fn nearest_with_distance(&self, u: f64, v: f64) -> Option<(&Cavity, f64)> {
        let p = [u, v];
        let mut iter = self.spatial_idx.nearest_neighbor_iter(&p);
        let first = iter.next()?;
        let best_d2 = first.distance_2(&p);
        let limit = (best_d2.sqrt() + self.tolerance).powi(2);
        let best_id = std::iter::once(first)
            .chain(iter.take_while(|e| e.distance_2(&p) <= limit))
            .map(|e| e.id)
            .min()?;
        self.get(best_id).map(|c| (c, best_d2.sqrt()))
    }

    /// Cavities sharing a vertical boundary with `cavity`: separated from it
    /// by at most one member thickness along `u`, with overlapping v-ranges.
    ///
    /// Sorted by id.  No router in this workspace crosses between cavities;
    /// the query exists for cross-bay consumers.
    pub fn find_adjacent_cavities(&self, cavity: &Cavity) -> Vec<&Cavity> {
        let gap = self.adjacency_gap;
        let tol = self.tolerance;
        let center = cavity.center();
        let p = [center.u, center.v];

        // Any neighbor lies within this radius of the center.
        let reach_u = cavity.width() * 0.5 + gap + tol;
        let reach_v = cavity.height() * 0.5 + tol;
        let reach_2 = reach_u * reach_u + reach_v * reach_v;

        let mut out: Vec<&Cavity> = self
            .spatial_idx
            .nearest_neighbor_iter(&p)
            .take_while(|e| e.distance_2(&p) <= reach_2)
            .filter(|e| e.id != cavity.id)
            .filter_map(|e| self.get(e.id))
            .filter(|other| {
                if other.v_overlap(cavity) <= tol {
                    return false;
                }
                let right_gap = other.u_left - cavity.u_right;
                let left_gap = cavity.u_left - other.u_right;
                (right_gap >= -tol && right_gap <= gap + tol)
                    || (left_gap >= -tol && left_gap <= gap + tol)
            })
            .collect();
        out.sort_by_key(|c| c.id);
        out
    }

    /// Convenience wrapper taking a `Uv`.
    #[inline]
    pub fn locate(&self, uv: Uv) -> Option<&Cavity> {
        self.find_cavity_for_uv(uv.u, uv.v)
    }
}

impl fmt::Debug for WallCavities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WallCavities")
            .field("wall_id", &self.wall_id)
            .field("source_mode", &self.source_mode)
            .field("cavities", &self.cavities)
            .field("adjacency_gap", &self.adjacency_gap)
            .finish()
    }
}

impl PartialEq for WallCavities {
    fn eq(&self, other: &Self) -> bool {
        self.wall_id == other.wall_id
            && self.frame == other.frame
            && self.source_mode == other.source_mode
            && self.cavities == other.cavities
    }
}
