use thiserror::Error;

use wr_cavity::CavityError;
use wr_core::ConnectorId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    #[error("routing configuration error: {0}")]
    Config(String),

    #[error("connector {connector} is malformed: {reason}")]
    Connector {
        connector: ConnectorId,
        reason:    String,
    },

    /// Malformed wall or framing input that aborted batch decomposition.
    #[error(transparent)]
    Malformed(#[from] CavityError),
}

pub type RouteResult<T> = Result<T, RouteError>;
