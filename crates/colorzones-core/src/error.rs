use colorzones_curve::CurveError;
use thiserror::Error;

use crate::params::Channel;

/// Result type for color zones operations.
pub type ZonesResult<T> = Result<T, ZonesError>;

#[derive(Debug, Error)]
pub enum ZonesError {
    /// A curve failed validation; raised at commit time, before any pixel.
    #[error("{channel:?} curve: {source}")]
    InvalidCurve {
        channel: Channel,
        #[source]
        source: CurveError,
    },

    /// Only the exact pairs 1/2/3 -> 4 are understood.
    #[error("cannot migrate parameters from version {old} to version {new}")]
    UnsupportedLegacyVersion { old: i32, new: i32 },

    #[error("version {version} parameter blob must be {expected} bytes, got {actual}")]
    MalformedBlob {
        version: i32,
        expected: usize,
        actual: usize,
    },

    /// An enum code in a blob has no meaning.
    #[error("invalid {field}: {value}")]
    InvalidField { field: &'static str, value: i32 },

    #[error("expected {expected} floats for the region, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}
