//! Weighted adjacency graph derived from segments.

use std::collections::{BTreeMap, HashSet};

use tracing::trace;

use crate::domain::{Segment, StationName};

use super::catalog::SegmentCatalog;
use super::registry::StationRegistry;

/// A directed half of an undirected edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub to: StationName,
    pub weight: f64,
}

/// Undirected weighted graph over stations.
///
/// Every edge is stored in both directions with the same weight. Graphs are
/// cheap to rebuild and are never cached by the core.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Graph {
    adjacency: BTreeMap<StationName, Vec<Edge>>,
    edge_count: usize,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from catalogued segments.
    ///
    /// With no subset every registered segment is used; otherwise only the
    /// listed ids (duplicates and unknown ids are ignored). Segments with an
    /// endpoint that has no position are left out. Weights are the explicit
    /// segment length when present, else the Euclidean distance.
    pub fn build<S: AsRef<str>>(
        registry: &StationRegistry,
        catalog: &SegmentCatalog,
        subset: Option<&[S]>,
    ) -> Self {
        let mut graph = Graph::new();

        match subset {
            None => {
                for segment in catalog.iter() {
                    graph.add_segment(registry, segment);
                }
            }
            Some(ids) => {
                let mut seen = HashSet::new();
                for id in ids {
                    let id = id.as_ref();
                    if !seen.insert(id) {
                        continue;
                    }
                    if let Some(segment) = catalog.lookup(id) {
                        graph.add_segment(registry, segment);
                    }
                }
            }
        }

        graph
    }

    fn add_segment(&mut self, registry: &StationRegistry, segment: &Segment) {
        let (Some(from), Some(to)) = (
            registry.position(segment.from.as_str()),
            registry.position(segment.to.as_str()),
        ) else {
            trace!(segment = %segment.id, "segment has no coordinates, excluded from graph");
            return;
        };

        let weight = segment.length.unwrap_or_else(|| from.distance_to(&to));
        self.add_edge(segment.from.clone(), segment.to.clone(), weight);
    }

    /// Add an undirected edge.
    ///
    /// Both directions are stored with the same weight. Self-loops are
    /// ignored.
    pub fn add_edge(&mut self, a: StationName, b: StationName, weight: f64) {
        if a == b {
            return;
        }
        self.adjacency.entry(a.clone()).or_default().push(Edge {
            to: b.clone(),
            weight,
        });
        self.adjacency
            .entry(b)
            .or_default()
            .push(Edge { to: a, weight });
        self.edge_count += 1;
    }

    /// Edges leaving `station`. Empty if the station is not in the graph.
    pub fn neighbors(&self, station: &str) -> &[Edge] {
        self.adjacency
            .get(station)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Check if a station has at least one edge.
    pub fn contains(&self, station: &str) -> bool {
        self.adjacency.contains_key(station)
    }

    /// Weight of the edge between two stations, if any.
    pub fn edge_weight(&self, a: &str, b: &str) -> Option<f64> {
        self.neighbors(a)
            .iter()
            .find(|edge| edge.to.as_str() == b)
            .map(|edge| edge.weight)
    }

    /// Stations with at least one edge, in name order.
    pub fn nodes(&self) -> impl Iterator<Item = &StationName> {
        self.adjacency.keys()
    }

    /// Every directed half-edge as `(from, to, weight)`.
    pub fn edges(&self) -> impl Iterator<Item = (&StationName, &StationName, f64)> {
        self.adjacency
            .iter()
            .flat_map(|(from, edges)| edges.iter().map(move |e| (from, &e.to, e.weight)))
    }

    /// Returns the number of stations in the graph.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns true if the graph has no edges.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }
}
