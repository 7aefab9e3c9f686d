//! Cavity-subsystem error type.

use thiserror::Error;

use wr_core::{CoreError, WallId};

/// Errors produced by `wr-cavity`.  Each is local to one wall.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CavityError {
    #[error("wall {wall}: invalid cavity configuration: {reason}")]
    Config { wall: WallId, reason: String },

    #[error(transparent)]
    Geometry(#[from] CoreError),
}

impl CavityError {
    /// `true` for malformed input, which must halt a batch instead of being
    /// recorded as a per-wall failure.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CavityError::Geometry(e) if e.is_malformed())
    }

    /// The wall the error belongs to, when known.
    pub fn wall(&self) -> Option<WallId> {
        match self {
            CavityError::Config { wall, .. } => Some(*wall),
            CavityError::Geometry(CoreError::Geometry { wall, .. })
            | CavityError::Geometry(CoreError::Malformed { wall, .. }) => Some(*wall),
            CavityError::Geometry(CoreError::Parse(_)) => None,
        }
    }
}

pub type CavityResult<T> = Result<T, CavityError>;
