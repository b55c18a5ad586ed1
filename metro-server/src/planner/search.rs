//! Ranked path search.
//!
//! Uniform-cost frontier expansion that keeps going after the first arrival,
//! so that several distinct routes come out in order of length.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::StationName;
use crate::network::Graph;

use super::config::{SearchConfig, SearchStrategy};
use super::yen::find_paths_exact;

/// Error from path search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// A route between two stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathResult {
    /// Stations from start to end; no station repeats.
    pub path: Vec<StationName>,
    /// Sum of edge weights along the path.
    pub length: f64,
}

impl PathResult {
    /// The zero-length path that stays at `station`.
    pub fn trivial(station: StationName) -> Self {
        Self {
            path: vec![station],
            length: 0.0,
        }
    }
}

/// Partial path on the frontier.
#[derive(Debug)]
struct FrontierEntry {
    length: f64,
    /// Insertion sequence, breaks length ties first-in-first-out.
    seq: u64,
    path: Vec<StationName>,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    // Reversed so that `BinaryHeap` pops the shortest entry first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .length
            .total_cmp(&self.length)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find up to `limit` simple paths from `start` to `end`, shortest first.
///
/// `start == end` yields the single trivial path. A station missing from
/// the graph, or no connection at all, yields an empty list.
///
/// Each station keeps the best length at which any partial path has
/// reached it, and extensions that do no better are dropped. Extensions
/// into `end` are never dropped, so equally short routes that differ in
/// their final hop all surface. The first result is the shortest path;
/// later ones are plausible alternatives in non-decreasing length, not a
/// true k-shortest enumeration (use [`SearchStrategy::Exact`] for that).
pub fn find_paths(
    graph: &Graph,
    start: &StationName,
    end: &StationName,
    limit: usize,
    config: &SearchConfig,
) -> Vec<PathResult> {
    if limit == 0 {
        return Vec::new();
    }
    if start == end {
        return vec![PathResult::trivial(start.clone())];
    }
    if !graph.contains(start.as_str()) || !graph.contains(end.as_str()) {
        return Vec::new();
    }

    let cap = config.iteration_cap(graph.node_count(), limit);
    let mut best: HashMap<&StationName, f64> = HashMap::new();
    let mut frontier = BinaryHeap::new();
    let mut seq = 0u64;
    let mut iterations = 0usize;
    let mut results = Vec::new();

    best.insert(start, 0.0);
    frontier.push(FrontierEntry {
        length: 0.0,
        seq,
        path: vec![start.clone()],
    });

    while let Some(entry) = frontier.pop() {
        iterations += 1;
        if iterations > cap {
            warn!(
                start = %start,
                end = %end,
                cap,
                found = results.len(),
                "path search hit iteration cap"
            );
            break;
        }

        let Some(last) = entry.path.last() else {
            continue;
        };

        if last == end {
            results.push(PathResult {
                path: entry.path,
                length: entry.length,
            });
            if results.len() >= limit {
                break;
            }
            continue;
        }

        for edge in graph.neighbors(last.as_str()) {
            if entry.path.contains(&edge.to) {
                continue;
            }

            let length = entry.length + edge.weight;
            if &edge.to != end {
                if best.get(&edge.to).is_some_and(|&known| known <= length) {
                    continue;
                }
                best.insert(&edge.to, length);
            }

            let mut path = Vec::with_capacity(entry.path.len() + 1);
            path.extend_from_slice(&entry.path);
            path.push(edge.to.clone());

            seq += 1;
            frontier.push(FrontierEntry { length, seq, path });
        }
    }

    debug!(
        start = %start,
        end = %end,
        found = results.len(),
        iterations,
        "ranked path search complete"
    );

    results
}

/// Request for path search.
#[derive(Debug, Clone)]
pub struct PathRequest {
    pub start: StationName,
    pub end: StationName,
    /// Maximum number of paths; the configured default if `None`.
    pub limit: Option<usize>,
    /// Strategy override; the configured default if `None`.
    pub strategy: Option<SearchStrategy>,
}

impl PathRequest {
    /// Create a request using the configured limit and strategy.
    pub fn new(start: StationName, end: StationName) -> Self {
        Self {
            start,
            end,
            limit: None,
            strategy: None,
        }
    }

    /// Set the number of paths to return.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the search strategy.
    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Validate the request against the configuration.
    pub fn validate(&self, config: &SearchConfig) -> Result<(), SearchError> {
        match self.limit {
            Some(0) => Err(SearchError::InvalidRequest(
                "limit must be at least 1".to_string(),
            )),
            Some(limit) if limit > config.max_limit => Err(SearchError::InvalidRequest(format!(
                "limit must be at most {}",
                config.max_limit
            ))),
            _ => Ok(()),
        }
    }
}

/// Result of path search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Found paths, shortest first.
    pub paths: Vec<PathResult>,

    /// The strategy that produced them.
    pub strategy: SearchStrategy,
}

/// Path planner over a prepared graph.
pub struct Planner<'a> {
    graph: &'a Graph,
    config: &'a SearchConfig,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(graph: &'a Graph, config: &'a SearchConfig) -> Self {
        Self { graph, config }
    }

    /// Search for paths matching the request.
    pub fn search(&self, request: &PathRequest) -> Result<SearchResult, SearchError> {
        request.validate(self.config)?;

        let limit = request.limit.unwrap_or(self.config.default_limit);
        let strategy = request.strategy.unwrap_or(self.config.strategy);

        let paths = match strategy {
            SearchStrategy::Ranked => {
                find_paths(self.graph, &request.start, &request.end, limit, self.config)
            }
            SearchStrategy::Exact => {
                find_paths_exact(self.graph, &request.start, &request.end, limit)
            }
        };

        Ok(SearchResult { paths, strategy })
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
