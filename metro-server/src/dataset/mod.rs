//! Network definitions stored as JSON.
//!
//! A definition lists station coordinates, the lines with their declared
//! station sequences, optional explicit segment lengths and the stations to
//! leave out of every route. [`builtin`] returns the bundled map.

mod error;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Line, LineDisplay, LineId, LineStyle, NetworkError, distinct_color};
use crate::network::Network;

pub use error::DatasetError;

const BUILTIN: &str = include_str!("../../data/network.json");

/// Coordinates of one station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationEntry {
    pub x: f64,
    pub y: f64,
}

/// One declared line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineEntry {
    pub id: String,
    pub name: String,
    /// Defaults to a generated colour based on the line's position.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub style: LineStyle,
    pub stations: Vec<String>,
}

/// Explicit length for the segment between two stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LengthEntry {
    pub from: String,
    pub to: String,
    pub length: f64,
}

/// A network definition file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkFile {
    /// Stations by name. Registered in name order.
    pub stations: BTreeMap<String, StationEntry>,
    #[serde(default)]
    pub lines: Vec<LineEntry>,
    #[serde(default)]
    pub segment_lengths: Vec<LengthEntry>,
    #[serde(default)]
    pub excluded_from_routes: Vec<String>,
}

impl NetworkFile {
    /// Parse a definition from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a definition file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Build a network from the definition.
    ///
    /// Stations are registered first, then exclusions, then lines in
    /// declaration order. Segment lengths come last so they can refer to
    /// segments created by the lines.
    pub fn into_network(self) -> Result<Network, DatasetError> {
        let mut network = Network::new();

        for (name, entry) in &self.stations {
            network.register_station(name, entry.x, entry.y)?;
        }

        for name in &self.excluded_from_routes {
            network.exclude_from_routes(name)?;
        }

        for (index, entry) in self.lines.into_iter().enumerate() {
            let id = LineId::parse(&entry.id).map_err(NetworkError::from)?;
            let color = entry.color.unwrap_or_else(|| distinct_color(index));
            let line = Line::new(
                id,
                entry.name,
                LineDisplay::new(color, entry.style),
                entry.stations,
            );
            network.add_line(line)?;
        }

        for entry in &self.segment_lengths {
            network.set_segment_length(&entry.from, &entry.to, entry.length)?;
        }

        info!(
            stations = network.registry().len(),
            lines = network.lines().len(),
            segments = network.catalog().len(),
            "network loaded"
        );

        Ok(network)
    }
}

/// The bundled network definition.
pub fn builtin_file() -> Result<NetworkFile, DatasetError> {
    NetworkFile::from_json_str(BUILTIN)
}

/// The bundled network.
pub fn builtin() -> Result<Network, DatasetError> {
    builtin_file()?.into_network()
}
