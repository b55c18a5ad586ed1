//! Segment types.
//!
//! A segment is an undirected connection between two stations. Any number of
//! lines may run over the same segment; the canonical id collapses them.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::StationName;

/// Separator joining the two endpoint names in a segment id.
pub const SEGMENT_SEPARATOR: &str = "__";

/// Canonical identifier of an unordered station pair.
///
/// The lexicographically smaller name comes first, so the id is a pure
/// function of the pair regardless of declaration order.
///
/// # Examples
///
/// ```
/// use metro_server::domain::{SegmentId, StationName};
///
/// let a = StationName::parse("Казань").unwrap();
/// let b = StationName::parse("Уфа").unwrap();
///
/// assert_eq!(SegmentId::canonical(&a, &b), SegmentId::canonical(&b, &a));
/// assert_eq!(SegmentId::canonical(&a, &b).as_str(), "Казань__Уфа");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct SegmentId(Arc<str>);

impl SegmentId {
    /// Build the canonical id for a station pair.
    pub fn canonical(a: &StationName, b: &StationName) -> Self {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        SegmentId(Arc::from(format!(
            "{}{}{}",
            first.as_str(),
            SEGMENT_SEPARATOR,
            second.as_str()
        )))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for SegmentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SegmentId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SegmentId> for String {
    fn from(id: SegmentId) -> Self {
        id.0.to_string()
    }
}

impl fmt::Debug for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegmentId({})", self.as_str())
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered segment.
///
/// `from` and `to` keep the order of the first declaration. That order is
/// only useful for display; traversal always treats the segment as undirected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Segment {
    pub id: SegmentId,
    pub from: StationName,
    pub to: StationName,
    /// Explicit length overriding the Euclidean distance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
}

impl Segment {
    /// Create a segment between two stations with no length override.
    pub fn new(from: StationName, to: StationName) -> Self {
        Self {
            id: SegmentId::canonical(&from, &to),
            from,
            to,
            length: None,
        }
    }

    /// Returns true if `station` is one of the endpoints.
    pub fn has_endpoint(&self, station: &StationName) -> bool {
        &self.from == station || &self.to == station
    }

    /// Returns the endpoint opposite `station`, if `station` is an endpoint.
    pub fn other_end(&self, station: &StationName) -> Option<&StationName> {
        if &self.from == station {
            Some(&self.to)
        } else if &self.to == station {
            Some(&self.from)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    #[test]
    fn canonical_orders_lexicographically() {
        let id = SegmentId::canonical(&name("Омск"), &name("Курган"));
        assert_eq!(id.as_str(), "Курган__Омск");
    }

    #[test]
    fn canonical_is_order_independent() {
        let a = name("Москва");
        let b = name("Тверь");
        assert_eq!(SegmentId::canonical(&a, &b), SegmentId::canonical(&b, &a));
    }

    #[test]
    fn segment_keeps_declaration_order() {
        let seg = Segment::new(name("Тверь"), name("Москва"));
        assert_eq!(seg.from, name("Тверь"));
        assert_eq!(seg.to, name("Москва"));
        assert_eq!(seg.id.as_str(), "Москва__Тверь");
        assert!(seg.length.is_none());
    }

    #[test]
    fn other_end() {
        let seg = Segment::new(name("A"), name("B"));
        assert_eq!(seg.other_end(&name("A")), Some(&name("B")));
        assert_eq!(seg.other_end(&name("B")), Some(&name("A")));
        assert_eq!(seg.other_end(&name("C")), None);
        assert!(seg.has_endpoint(&name("A")));
        assert!(!seg.has_endpoint(&name("C")));
    }

    #[test]
    fn serializes_id_as_string() {
        let seg = Segment::new(name("A"), name("B"));
        let json = serde_json::to_value(&seg).unwrap();
        assert_eq!(json["id"], "A__B");
        assert_eq!(json["from"], "A");
        assert!(json.get("length").is_none());
    }
}
