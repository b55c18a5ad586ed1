//! Checks for externally proposed routes.
//!
//! Candidate routes may come from anywhere (a client, a suggestion service,
//! a hand-written fixture). Only routes that walk real edges of the graph
//! between known stations are kept.

use serde::Serialize;
use tracing::debug;

use crate::domain::StationName;
use crate::network::{Graph, StationRegistry};

/// Why a candidate route was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CandidateError {
    #[error("route needs at least two stations")]
    TooShort,

    #[error("unknown station: {0}")]
    UnknownStation(String),

    #[error("station visited twice: {0}")]
    RepeatedStation(String),

    #[error("no segment between {from} and {to}")]
    MissingSegment { from: String, to: String },
}

/// A candidate that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedRoute {
    pub path: Vec<StationName>,
    pub length: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Validate one candidate route.
///
/// Every station must be registered, no station may appear twice, and each
/// consecutive pair must be joined by an edge of `graph`. The length is the
/// sum of the edge weights.
pub fn validate_candidate<S: AsRef<str>>(
    graph: &Graph,
    registry: &StationRegistry,
    stations: &[S],
    description: Option<String>,
) -> Result<ValidatedRoute, CandidateError> {
    if stations.len() < 2 {
        return Err(CandidateError::TooShort);
    }

    let mut path: Vec<StationName> = Vec::with_capacity(stations.len());
    for raw in stations {
        let raw = raw.as_ref();
        let station = registry
            .resolve(raw)
            .ok_or_else(|| CandidateError::UnknownStation(raw.to_string()))?;
        if path.contains(station) {
            return Err(CandidateError::RepeatedStation(station.to_string()));
        }
        path.push(station.clone());
    }

    let mut length = 0.0;
    for hop in path.windows(2) {
        let weight = graph
            .edge_weight(hop[0].as_str(), hop[1].as_str())
            .ok_or_else(|| CandidateError::MissingSegment {
                from: hop[0].to_string(),
                to: hop[1].to_string(),
            })?;
        length += weight;
    }

    Ok(ValidatedRoute {
        path,
        length,
        description,
    })
}

/// Keep the candidates that validate, in their original order.
pub fn validate_candidates<S: AsRef<str>>(
    graph: &Graph,
    registry: &StationRegistry,
    candidates: impl IntoIterator<Item = (Vec<S>, Option<String>)>,
) -> Vec<ValidatedRoute> {
    candidates
        .into_iter()
        .filter_map(|(stations, description)| {
            match validate_candidate(graph, registry, &stations, description) {
                Ok(route) => Some(route),
                Err(e) => {
                    debug!(error = %e, "candidate route rejected");
                    None
                }
            }
        })
        .collect()
}
