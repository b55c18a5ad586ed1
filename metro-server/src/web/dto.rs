//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::{LineStyle, SegmentId, StationName};
use crate::network::{CompiledLine, SkippedStation};
use crate::planner::{PathResult, SearchStrategy, ValidatedRoute};

/// A station with its coordinates.
#[derive(Debug, Serialize)]
pub struct StationResult {
    pub name: StationName,
    pub x: f64,
    pub y: f64,
}

/// Response listing all stations.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// A line in list results.
#[derive(Debug, Serialize)]
pub struct LineResult {
    pub id: String,
    pub name: String,
    pub color: String,
    pub style: LineStyle,
    /// Stations as declared, before unknown or excluded ones were dropped
    pub declared: Vec<String>,
    /// Stations the line actually runs through
    pub stations: Vec<StationName>,
    pub segments: Vec<SegmentId>,
    pub skipped: Vec<SkippedStation>,
}

impl LineResult {
    /// Build from a compiled line and its reconstructed station sequence.
    pub fn from_compiled(compiled: &CompiledLine, stations: Vec<StationName>) -> Self {
        Self {
            id: compiled.id().to_string(),
            name: compiled.line.name.clone(),
            color: compiled.line.display.color.clone(),
            style: compiled.line.display.style,
            declared: compiled.line.stations.clone(),
            stations,
            segments: compiled.segments().to_vec(),
            skipped: compiled.route.skipped.clone(),
        }
    }
}

/// Response listing all lines.
#[derive(Debug, Serialize)]
pub struct LinesResponse {
    pub lines: Vec<LineResult>,
}

/// A segment with its graph weight.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    pub id: SegmentId,
    pub from: StationName,
    pub to: StationName,
    /// Explicit length, if one was set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<f64>,
    /// Weight used for path search; absent if an endpoint has no position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

/// Request to compile a station sequence into segments.
#[derive(Debug, Deserialize)]
pub struct CompileRouteRequest {
    pub stations: Vec<String>,
}

/// Compiled segments plus the stations that were dropped.
#[derive(Debug, Serialize)]
pub struct CompileRouteResponse {
    pub segments: Vec<SegmentId>,
    pub skipped: Vec<SkippedStation>,
    /// Number of segments that did not exist before this request
    pub created: usize,
}

/// Request to turn segment ids back into stations.
#[derive(Debug, Deserialize)]
pub struct StationsFromSegmentsRequest {
    pub segments: Vec<String>,
}

/// Reconstructed station sequence.
#[derive(Debug, Serialize)]
pub struct StationsFromSegmentsResponse {
    pub stations: Vec<StationName>,
}

/// Query for path search.
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    /// Start station name
    pub from: String,

    /// Destination station name
    pub to: String,

    /// Number of paths to return (defaults to the configured limit)
    pub limit: Option<usize>,

    /// Comma-separated line ids to restrict the graph to
    pub lines: Option<String>,

    /// `ranked` or `exact`
    pub strategy: Option<SearchStrategy>,
}

impl PathQuery {
    /// Line ids from the `lines` parameter, or `None` for all segments.
    pub fn line_ids(&self) -> Option<Vec<String>> {
        self.lines.as_ref().map(|lines| split_list(lines))
    }
}

/// Split a comma-separated list, dropping empty items.
fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Response for path search.
#[derive(Debug, Serialize)]
pub struct PathsResponse {
    pub paths: Vec<PathResult>,
    pub strategy: SearchStrategy,
}

/// One externally proposed route.
#[derive(Debug, Deserialize)]
pub struct CandidateRequest {
    pub route: Vec<String>,
    pub description: Option<String>,
}

/// Request to validate candidate routes.
#[derive(Debug, Deserialize)]
pub struct ValidateRoutesRequest {
    pub candidates: Vec<CandidateRequest>,

    /// Restrict validation to the segments of these lines
    pub lines: Option<Vec<String>>,
}

/// A candidate that failed validation.
#[derive(Debug, Serialize)]
pub struct RejectedCandidate {
    /// Position in the request
    pub index: usize,
    pub error: String,
}

/// Response for route validation.
#[derive(Debug, Serialize)]
pub struct ValidateRoutesResponse {
    pub routes: Vec<ValidatedRoute>,
    pub rejected: Vec<RejectedCandidate>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
