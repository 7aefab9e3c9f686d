//! Core error type.
//!
//! Two classes of wall failure are distinguished because batch callers treat
//! them differently: a `Geometry` error skips one wall and the batch carries
//! on, while `Malformed` input (negative or non-finite dimensions) aborts the
//! batch at once rather than producing silently wrong geometry.

use thiserror::Error;

use crate::WallId;

/// The top-level error type for `wr-core` and a common base for sub-crates.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// Degenerate but well-formed geometry: zero length or height, axes that
    /// are not unit length or not orthogonal within tolerance.
    #[error("wall {wall}: degenerate geometry: {reason}")]
    Geometry { wall: WallId, reason: String },

    /// Input that violates basic structural preconditions.
    #[error("wall {wall}: malformed input: {reason}")]
    Malformed { wall: WallId, reason: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl CoreError {
    /// `true` for the hard-failure class that must halt a batch.
    pub fn is_malformed(&self) -> bool {
        matches!(self, CoreError::Malformed { .. })
    }
}

/// Shorthand result type for `wr-core`.
pub type CoreResult<T> = Result<T, CoreError>;
