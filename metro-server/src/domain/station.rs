//! Station identity and position types.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::segment::SEGMENT_SEPARATOR;

/// Error returned when parsing an invalid station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name: {reason}")]
pub struct InvalidStationName {
    reason: &'static str,
}

/// A validated station name.
///
/// Names are trimmed, non-empty, and can never produce an ambiguous segment
/// id: they must not contain the segment separator, nor start or end with
/// an underscore. Cloning is cheap (the text is shared).
///
/// # Examples
///
/// ```
/// use metro_server::domain::StationName;
///
/// let msk = StationName::parse("  Москва ").unwrap();
/// assert_eq!(msk.as_str(), "Москва");
///
/// assert!(StationName::parse("").is_err());
/// assert!(StationName::parse("A__B").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StationName(Arc<str>);

impl StationName {
    /// Parse a station name, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidStationName> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidStationName {
                reason: "must not be empty",
            });
        }

        if trimmed.contains(SEGMENT_SEPARATOR) {
            return Err(InvalidStationName {
                reason: "must not contain the segment separator",
            });
        }

        if trimmed.starts_with('_') || trimmed.ends_with('_') {
            return Err(InvalidStationName {
                reason: "must not start or end with an underscore",
            });
        }

        Ok(StationName(Arc::from(trimmed)))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for StationName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StationName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StationName {
    type Error = InvalidStationName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        StationName::parse(&value)
    }
}

impl From<StationName> for String {
    fn from(name: StationName) -> Self {
        name.0.to_string()
    }
}

impl fmt::Debug for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationName({})", self.as_str())
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a coordinate is NaN or infinite.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid position: coordinates must be finite")]
pub struct InvalidPosition;

/// A point in the map's planar unit system.
///
/// Units are arbitrary: some datasets use projected lon/lat, others a
/// stylised grid. Both coordinates are always finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    /// Create a position, rejecting non-finite coordinates.
    pub fn new(x: f64, y: f64) -> Result<Self, InvalidPosition> {
        if !x.is_finite() || !y.is_finite() {
            return Err(InvalidPosition);
        }
        Ok(Self { x, y })
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_names() {
        assert!(StationName::parse("Москва").is_ok());
        assert!(StationName::parse("Ростов-на-Дону").is_ok());
        assert!(StationName::parse("Великий Новгород").is_ok());
        assert!(StationName::parse("A_B").is_ok());
    }

    #[test]
    fn parse_trims_whitespace() {
        let name = StationName::parse("\tОмск  ").unwrap();
        assert_eq!(name.as_str(), "Омск");
        assert_eq!(name, StationName::parse("Омск").unwrap());
    }

    #[test]
    fn reject_empty() {
        assert!(StationName::parse("").is_err());
        assert!(StationName::parse("   ").is_err());
    }

    #[test]
    fn reject_separator_collisions() {
        assert!(StationName::parse("A__B").is_err());
        assert!(StationName::parse("_A").is_err());
        assert!(StationName::parse("A_").is_err());
    }

    #[test]
    fn display_and_debug() {
        let name = StationName::parse("Уфа").unwrap();
        assert_eq!(format!("{}", name), "Уфа");
        assert_eq!(format!("{:?}", name), "StationName(Уфа)");
    }

    #[test]
    fn borrow_lookup_by_str() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(StationName::parse("Тверь").unwrap(), 1);
        assert_eq!(map.get("Тверь"), Some(&1));
        assert_eq!(map.get("Тула"), None);
    }

    #[test]
    fn serde_uses_plain_string() {
        let name = StationName::parse("Пенза").unwrap();
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Пенза\"");

        let back: StationName = serde_json::from_str(&json).unwrap();
        assert_eq!(back, name);

        assert!(serde_json::from_str::<StationName>("\"\"").is_err());
    }

    #[test]
    fn position_rejects_non_finite() {
        assert!(Position::new(0.0, 0.0).is_ok());
        assert_eq!(Position::new(f64::NAN, 0.0), Err(InvalidPosition));
        assert_eq!(Position::new(0.0, f64::INFINITY), Err(InvalidPosition));
    }

    #[test]
    fn position_distance() {
        let a = Position::new(0.0, 0.0).unwrap();
        let b = Position::new(3.0, 4.0).unwrap();
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Parsing is idempotent on its own output
        #[test]
        fn parse_roundtrip(s in "[A-Za-zА-Яа-я][A-Za-zА-Яа-я -]{0,20}[A-Za-zА-Яа-я]") {
            let name = StationName::parse(&s).unwrap();
            let again = StationName::parse(name.as_str()).unwrap();
            prop_assert_eq!(name, again);
        }

        /// Distance is symmetric and non-negative
        #[test]
        fn distance_symmetric(
            ax in -1e6f64..1e6, ay in -1e6f64..1e6,
            bx in -1e6f64..1e6, by in -1e6f64..1e6,
        ) {
            let a = Position::new(ax, ay).unwrap();
            let b = Position::new(bx, by).unwrap();
            prop_assert!(a.distance_to(&b) >= 0.0);
            prop_assert_eq!(a.distance_to(&b), b.distance_to(&a));
        }
    }
}
