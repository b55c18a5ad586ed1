//! Exact k-shortest simple paths.

use std::cmp::Ordering;
use std::ops::Add;

use pathfinding::num_traits::Zero;
use pathfinding::prelude::yen;
use tracing::debug;

use crate::domain::StationName;
use crate::network::Graph;

use super::search::PathResult;

/// Totally ordered edge weight.
///
/// Graph weights are finite and non-negative, so `total_cmp` agrees with
/// the usual float order.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Distance(f64);

impl Eq for Distance {}

impl Ord for Distance {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Distance {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Distance {
    type Output = Distance;

    fn add(self, rhs: Self) -> Self::Output {
        Distance(self.0 + rhs.0)
    }
}

impl Zero for Distance {
    fn zero() -> Self {
        Distance(0.0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

/// Find the `limit` shortest simple paths from `start` to `end`.
///
/// Same edge cases as [`super::find_paths`]: an empty list for `limit == 0`
/// or a station outside the graph, the trivial path for `start == end`.
pub fn find_paths_exact(
    graph: &Graph,
    start: &StationName,
    end: &StationName,
    limit: usize,
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

    let found = yen(
        start,
        |station: &StationName| {
            graph
                .neighbors(station.as_str())
                .iter()
                .map(|edge| (edge.to.clone(), Distance(edge.weight)))
                .collect::<Vec<_>>()
        },
        |station| station == end,
        limit,
    );

    debug!(
        start = %start,
        end = %end,
        found = found.len(),
        "exact path search complete"
    );

    found
        .into_iter()
        .map(|(path, Distance(length))| PathResult { path, length })
        .collect()
}
