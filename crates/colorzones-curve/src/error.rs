use thiserror::Error;

/// Result type for curve construction.
pub type CurveResult<T> = Result<T, CurveError>;

/// Errors raised while building a [`Curve`](crate::Curve).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Wrong node count, out-of-range coordinates, or x not strictly increasing.
    #[error("invalid curve definition: {0}")]
    InvalidCurveDefinition(String),
}
