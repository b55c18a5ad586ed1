//! Network error types.
//!
//! These errors cover invalid input when building a network. Missing
//! stations and missing paths are not errors; they surface as skipped
//! stations or empty results instead.

use super::{InvalidLineId, InvalidPosition, InvalidStationName, LineId, SegmentId, StationName};

/// Errors raised while registering stations, lines and segment lengths.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// Station name failed validation
    #[error("station {name:?}: {source}")]
    InvalidStation {
        name: String,
        source: InvalidStationName,
    },

    /// Station coordinates are not finite
    #[error("station {name}: {source}")]
    InvalidPosition {
        name: String,
        source: InvalidPosition,
    },

    /// Line id failed validation
    #[error(transparent)]
    InvalidLineId(#[from] InvalidLineId),

    /// A line with this id was already added
    #[error("duplicate line id: {0}")]
    DuplicateLine(LineId),

    /// Explicit segment length is negative or not finite
    #[error("segment {id}: invalid length {length}")]
    InvalidLength { id: SegmentId, length: f64 },

    /// A segment cannot connect a station to itself
    #[error("segment cannot connect {0} to itself")]
    SelfLoop(StationName),

    /// A length override names a station that is not registered
    #[error("cannot set length between {from} and {to}: unknown station")]
    UnknownSegmentEndpoint { from: String, to: String },
}
