//! Multi-wall decomposition with per-wall failure isolation.
//!
//! Walls are independent: a configuration or geometry failure on one wall is
//! recorded and the rest of the batch continues.  Malformed input is the
//! exception and aborts the batch.

use std::collections::BTreeMap;

use tracing::warn;

use wr_core::{Wall, WallId};

use crate::{decompose, CavityConfig, CavityError, CavityResult, FramingLayout, WallCavities};

/// One wall's decomposition inputs.
#[derive(Copy, Clone, Debug)]
pub struct WallJob<'a> {
    pub wall: &'a Wall,
    pub config: &'a CavityConfig,
    pub layout: Option<&'a FramingLayout>,
}

impl<'a> WallJob<'a> {
    pub fn new(wall: &'a Wall, config: &'a CavityConfig, layout: Option<&'a FramingLayout>) -> Self {
        Self { wall, config, layout }
    }
}

/// Result of [`decompose_all`].
#[derive(Debug, Default)]
pub struct DecompositionBatch {
    /// Successfully decomposed walls (possibly with zero cavities).
    pub walls: BTreeMap<WallId, WallCavities>,
    /// Walls whose configuration or geometry was rejected, in wall-id order.
    pub failures: Vec<(WallId, CavityError)>,
}

impl DecompositionBatch {
    /// Total cavities across all walls.
    pub fn cavity_count(&self) -> usize {
        self.walls.values().map(WallCavities::len).sum()
    }
}

/// Decompose every wall in `jobs`.
///
/// With the `parallel` feature walls run on Rayon's pool; the result is the
/// same either way because it is keyed by wall id.
///
/// # Errors
///
/// Returns the first malformed-input error (in wall-id order).  All other
/// failures are collected in [`DecompositionBatch::failures`].
pub fn decompose_all(jobs: &[WallJob<'_>]) -> CavityResult<DecompositionBatch> {
    #[cfg(not(feature = "parallel"))]
    let results: Vec<(WallId, CavityResult<WallCavities>)> = jobs
        .iter()
        .map(|j| (j.wall.id, decompose(j.wall, j.config, j.layout)))
        .collect();

    #[cfg(feature = "parallel")]
    let results: Vec<(WallId, CavityResult<WallCavities>)> = {
        use rayon::prelude::*;
        jobs.par_iter()
            .map(|j| (j.wall.id, decompose(j.wall, j.config, j.layout)))
            .collect()
    };

    let mut sorted = results;
    sorted.sort_by_key(|(id, _)| *id);

    let mut batch = DecompositionBatch::default();
    for (id, result) in sorted {
        match result {
            Ok(cavities) => {
                batch.walls.insert(id, cavities);
            }
            Err(e) if e.is_malformed() => return Err(e),
            Err(e) => {
                warn!(wall = %id, error = %e, "wall skipped");
                batch.failures.push((id, e));
            }
        }
    }
    Ok(batch)
}
