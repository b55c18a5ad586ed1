//! Path finding over the network graph.
//!
//! Two strategies are available. The ranked search expands a frontier of
//! partial paths in order of length and returns the shortest path first,
//! followed by alternatives. The exact search runs Yen's algorithm and
//! returns the true k shortest simple paths.

mod config;
mod search;
mod validate;
mod yen;

pub use config::{SearchConfig, SearchStrategy};
pub use search::{PathRequest, PathResult, Planner, SearchError, SearchResult, find_paths};
pub use validate::{CandidateError, ValidatedRoute, validate_candidate, validate_candidates};
pub use yen::find_paths_exact;
