//! Segment catalog.
//!
//! Every line that runs between the same two stations shares one segment.
//! The catalog maps canonical ids to segments and grows as routes are
//! compiled; nothing is ever removed.

use std::collections::HashMap;

use crate::domain::{NetworkError, Segment, SegmentId, StationName};

/// Registry of unique segments, in registration order.
#[derive(Debug, Clone, Default)]
pub struct SegmentCatalog {
    segments: Vec<Segment>,
    index: HashMap<SegmentId, usize>,
}

impl SegmentCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical id for an unordered station pair.
    pub fn canonical_id(a: &StationName, b: &StationName) -> SegmentId {
        SegmentId::canonical(a, b)
    }

    /// Return the segment between `a` and `b`, registering it if new.
    ///
    /// The boolean is true if the segment was created by this call. A new
    /// segment stores `from = a, to = b`.
    pub fn register_or_get(&mut self, a: &StationName, b: &StationName) -> (SegmentId, bool) {
        let id = SegmentId::canonical(a, b);
        if self.index.contains_key(&id) {
            return (id, false);
        }

        self.index.insert(id.clone(), self.segments.len());
        self.segments.push(Segment::new(a.clone(), b.clone()));
        (id, true)
    }

    /// Look up a segment by id.
    pub fn lookup(&self, id: &str) -> Option<&Segment> {
        self.index.get(id).map(|&idx| &self.segments[idx])
    }

    /// Look up the segment between two stations, in either order.
    pub fn lookup_pair(&self, a: &StationName, b: &StationName) -> Option<&Segment> {
        self.lookup(SegmentId::canonical(a, b).as_str())
    }

    /// Attach an explicit length to the segment between `a` and `b`.
    ///
    /// Registers the segment if it does not exist yet.
    pub fn set_length(
        &mut self,
        a: &StationName,
        b: &StationName,
        length: f64,
    ) -> Result<SegmentId, NetworkError> {
        if a == b {
            return Err(NetworkError::SelfLoop(a.clone()));
        }
        let id = SegmentId::canonical(a, b);
        if !length.is_finite() || length < 0.0 {
            return Err(NetworkError::InvalidLength { id, length });
        }

        let (id, _) = self.register_or_get(a, b);
        let idx = self.index[&id];
        self.segments[idx].length = Some(length);
        Ok(id)
    }

    /// Check if a segment id is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterate segments in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }

    /// Returns the number of registered segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if no segments are registered.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> StationName {
        StationName::parse(s).unwrap()
    }

    #[test]
    fn register_creates_once() {
        let mut catalog = SegmentCatalog::new();

        let (id1, created1) = catalog.register_or_get(&name("A"), &name("B"));
        let (id2, created2) = catalog.register_or_get(&name("A"), &name("B"));

        assert!(created1);
        assert!(!created2);
        assert_eq!(id1, id2);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn reverse_declaration_shares_segment() {
        let mut catalog = SegmentCatalog::new();

        let (forward, _) = catalog.register_or_get(&name("A"), &name("B"));
        let (backward, created) = catalog.register_or_get(&name("B"), &name("A"));

        assert!(!created);
        assert_eq!(forward, backward);

        // First declaration order is kept
        let seg = catalog.lookup(backward.as_str()).unwrap();
        assert_eq!(seg.from, name("A"));
        assert_eq!(seg.to, name("B"));
    }

    #[test]
    fn lookup_unknown() {
        let catalog = SegmentCatalog::new();
        assert!(catalog.lookup("A__B").is_none());
        assert!(!catalog.contains("A__B"));
    }

    #[test]
    fn lookup_pair_either_order() {
        let mut catalog = SegmentCatalog::new();
        catalog.register_or_get(&name("A"), &name("B"));

        assert!(catalog.lookup_pair(&name("A"), &name("B")).is_some());
        assert!(catalog.lookup_pair(&name("B"), &name("A")).is_some());
        assert!(catalog.lookup_pair(&name("A"), &name("C")).is_none());
    }

    #[test]
    fn set_length_registers_and_overrides() {
        let mut catalog = SegmentCatalog::new();

        let id = catalog.set_length(&name("B"), &name("A"), 42.0).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup(id.as_str()).unwrap().length, Some(42.0));

        catalog.set_length(&name("A"), &name("B"), 7.5).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.lookup(id.as_str()).unwrap().length, Some(7.5));
    }

    #[test]
    fn set_length_rejects_bad_values() {
        let mut catalog = SegmentCatalog::new();

        assert!(matches!(
            catalog.set_length(&name("A"), &name("B"), -1.0),
            Err(NetworkError::InvalidLength { .. })
        ));
        assert!(matches!(
            catalog.set_length(&name("A"), &name("B"), f64::NAN),
            Err(NetworkError::InvalidLength { .. })
        ));
        assert!(matches!(
            catalog.set_length(&name("A"), &name("A"), 1.0),
            Err(NetworkError::SelfLoop(_))
        ));
        assert!(catalog.is_empty());
    }

    #[test]
    fn iteration_follows_registration_order() {
        let mut catalog = SegmentCatalog::new();
        catalog.register_or_get(&name("C"), &name("D"));
        catalog.register_or_get(&name("A"), &name("B"));

        let ids: Vec<&str> = catalog.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["C__D", "A__B"]);
    }
}
