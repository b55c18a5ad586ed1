//! Domain types for the transit map.
//!
//! This module contains the core model types: stations, segments and lines.
//! All types enforce their invariants at construction time, so code that
//! receives these types can trust their validity.

mod error;
mod line;
mod segment;
mod station;

pub use error::NetworkError;
pub use line::{InvalidLineId, Line, LineDisplay, LineId, LineStyle, distinct_color};
pub use segment::{SEGMENT_SEPARATOR, Segment, SegmentId};
pub use station::{InvalidPosition, InvalidStationName, Position, StationName};
