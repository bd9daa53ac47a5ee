use thiserror::Error;

/// Top-level error type for the Envelis bounding-volume kernel.
#[derive(Debug, Error)]
pub enum EnvelisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,
}

/// Errors related to bounding-volume operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("empty point set")]
    EmptyPointSet,

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience type alias for results using [`EnvelisError`].
pub type Result<T> = std::result::Result<T, EnvelisError>;
