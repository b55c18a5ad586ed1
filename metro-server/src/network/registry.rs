//! Station registry: station name to position.

use std::collections::HashMap;

use crate::domain::{NetworkError, Position, StationName};

/// The set of known stations and their positions.
///
/// Each name maps to exactly one position. Iteration follows registration
/// order so that anything derived from the registry is deterministic.
#[derive(Debug, Clone, Default)]
pub struct StationRegistry {
    stations: Vec<(StationName, Position)>,
    index: HashMap<StationName, usize>,
}

impl StationRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and register a station.
    ///
    /// Registering an existing name replaces its position.
    pub fn register(&mut self, name: &str, x: f64, y: f64) -> Result<StationName, NetworkError> {
        let station = StationName::parse(name).map_err(|source| NetworkError::InvalidStation {
            name: name.to_string(),
            source,
        })?;
        let position = Position::new(x, y).map_err(|source| NetworkError::InvalidPosition {
            name: station.to_string(),
            source,
        })?;

        self.insert(station.clone(), position);
        Ok(station)
    }

    /// Register an already-validated station.
    pub fn insert(&mut self, name: StationName, position: Position) {
        match self.index.get(&name) {
            Some(&idx) => self.stations[idx].1 = position,
            None => {
                self.index.insert(name.clone(), self.stations.len());
                self.stations.push((name, position));
            }
        }
    }

    /// Look up the registered name matching `name`.
    ///
    /// The input is normalised the same way `StationName::parse` does, so
    /// surrounding whitespace is ignored. Returns `None` for unknown or
    /// invalid names.
    pub fn resolve(&self, name: &str) -> Option<&StationName> {
        let parsed = StationName::parse(name).ok()?;
        self.index.get(&parsed).map(|&idx| &self.stations[idx].0)
    }

    /// Position of a station, if registered.
    pub fn position(&self, name: &str) -> Option<Position> {
        self.index
            .get(name.trim())
            .map(|&idx| self.stations[idx].1)
    }

    /// Check if a station is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Iterate stations in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&StationName, Position)> {
        self.stations.iter().map(|(name, pos)| (name, *pos))
    }

    /// Returns the number of registered stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Returns true if no stations are registered.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
