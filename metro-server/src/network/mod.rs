//! The transit network: stations, segments, lines and the derived graph.
//!
//! [`Network`] owns a [`StationRegistry`] and a [`SegmentCatalog`] and is the
//! entry point the web layer (or any other collaborator) calls into with
//! plain station names. It holds no global state; share it behind a lock
//! when several threads need to compile routes.

mod audit;
mod catalog;
mod compile;
mod graph;
mod registry;

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{Line, LineId, NetworkError, Segment, SegmentId, StationName};
use crate::planner::{PathResult, SearchConfig, SearchStrategy, find_paths, find_paths_exact};

pub use audit::{AuditIssue, AuditReport, audit};
pub use catalog::SegmentCatalog;
pub use compile::{CompiledRoute, SkipReason, SkippedStation, compile_route, stations_from_segments};
pub use graph::{Edge, Graph};
pub use registry::StationRegistry;

/// A line together with the result of compiling its stations.
#[derive(Debug, Clone)]
pub struct CompiledLine {
    pub line: Line,
    pub route: CompiledRoute,
}

impl CompiledLine {
    /// The line id.
    pub fn id(&self) -> &LineId {
        &self.line.id
    }

    /// Segment ids of the line, in travel order.
    pub fn segments(&self) -> &[SegmentId] {
        &self.route.segments
    }
}

/// Stations, segments and lines of one map.
#[derive(Debug, Clone, Default)]
pub struct Network {
    registry: StationRegistry,
    catalog: SegmentCatalog,
    lines: Vec<CompiledLine>,
    line_index: HashMap<LineId, usize>,
    excluded: HashSet<StationName>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// The station registry.
    pub fn registry(&self) -> &StationRegistry {
        &self.registry
    }

    /// The segment catalog.
    pub fn catalog(&self) -> &SegmentCatalog {
        &self.catalog
    }

    /// Register (or move) a station.
    pub fn register_station(
        &mut self,
        name: &str,
        x: f64,
        y: f64,
    ) -> Result<StationName, NetworkError> {
        self.registry.register(name, x, y)
    }

    /// Exclude a station from all routes compiled from now on.
    ///
    /// Lines added before the call keep their segments.
    pub fn exclude_from_routes(&mut self, name: &str) -> Result<(), NetworkError> {
        let station = StationName::parse(name).map_err(|source| NetworkError::InvalidStation {
            name: name.to_string(),
            source,
        })?;
        self.excluded.insert(station);
        Ok(())
    }

    /// Stations excluded from routes.
    pub fn excluded(&self) -> &HashSet<StationName> {
        &self.excluded
    }

    /// Compile a station sequence, registering any new segments.
    pub fn compile_route<S: AsRef<str>>(&mut self, stations: &[S]) -> CompiledRoute {
        compile_route(&self.registry, &mut self.catalog, stations, &self.excluded)
    }

    /// Resolve a segment id.
    pub fn resolve_segment(&self, id: &str) -> Option<&Segment> {
        self.catalog.lookup(id)
    }

    /// Best-effort station sequence for a list of segment ids.
    pub fn stations_from_segments<S: AsRef<str>>(&self, ids: &[S]) -> Vec<StationName> {
        stations_from_segments(&self.catalog, ids)
    }

    /// Give the segment between two registered stations an explicit length.
    pub fn set_segment_length(
        &mut self,
        from: &str,
        to: &str,
        length: f64,
    ) -> Result<SegmentId, NetworkError> {
        let (Some(a), Some(b)) = (self.registry.resolve(from), self.registry.resolve(to)) else {
            return Err(NetworkError::UnknownSegmentEndpoint {
                from: from.to_string(),
                to: to.to_string(),
            });
        };
        self.catalog.set_length(a, b, length)
    }

    /// Build the graph over all segments, or over the given subset.
    pub fn build_graph<S: AsRef<str>>(&self, subset: Option<&[S]>) -> Graph {
        Graph::build(&self.registry, &self.catalog, subset)
    }

    /// Build the graph over the segments used by the given lines.
    ///
    /// Unknown line ids are ignored.
    pub fn graph_for_lines<S: AsRef<str>>(&self, line_ids: &[S]) -> Graph {
        let segments: Vec<&str> = line_ids
            .iter()
            .filter_map(|id| self.line(id.as_ref()))
            .flat_map(|line| line.segments().iter().map(SegmentId::as_str))
            .collect();
        self.build_graph(Some(segments.as_slice()))
    }

    /// Compile and add a line.
    pub fn add_line(&mut self, line: Line) -> Result<&CompiledLine, NetworkError> {
        if self.line_index.contains_key(&line.id) {
            return Err(NetworkError::DuplicateLine(line.id));
        }

        let route = self.compile_route(&line.stations);
        debug!(
            line = %line.id,
            segments = route.segments.len(),
            skipped = route.skipped.len(),
            "line compiled"
        );

        let idx = self.lines.len();
        self.line_index.insert(line.id.clone(), idx);
        self.lines.push(CompiledLine { line, route });
        Ok(&self.lines[idx])
    }

    /// All lines, in the order they were added.
    pub fn lines(&self) -> &[CompiledLine] {
        &self.lines
    }

    /// Look up a line by id.
    pub fn line(&self, id: &str) -> Option<&CompiledLine> {
        let id = LineId::parse(id).ok()?;
        self.line_index.get(&id).map(|&idx| &self.lines[idx])
    }

    /// Find up to `limit` paths over all segments.
    ///
    /// Unknown or invalid station names give an empty result, including when
    /// `start == end`.
    pub fn find_paths(
        &self,
        start: &str,
        end: &str,
        limit: usize,
        config: &SearchConfig,
    ) -> Vec<PathResult> {
        let (Some(start), Some(end)) = (self.registry.resolve(start), self.registry.resolve(end))
        else {
            return Vec::new();
        };
        let graph = self.build_graph::<&str>(None);

        match config.strategy {
            SearchStrategy::Ranked => find_paths(&graph, start, end, limit, config),
            SearchStrategy::Exact => find_paths_exact(&graph, start, end, limit),
        }
    }
}
