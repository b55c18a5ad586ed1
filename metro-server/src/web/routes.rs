//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};

use crate::cache::PathKey;
use crate::domain::{LineId, StationName};
use crate::network::{AuditReport, Graph, Network, audit};
use crate::planner::{PathRequest, Planner, SearchError, validate_candidate};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations", get(list_stations))
        .route("/api/lines", get(list_lines))
        .route("/api/segments/:id", get(get_segment))
        .route("/api/routes/compile", post(compile_route))
        .route("/api/routes/stations", post(stations_from_segments))
        .route("/api/routes/validate", post(validate_routes))
        .route("/api/paths", get(find_paths))
        .route("/api/audit", get(audit_network))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List all stations in registration order.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let network = state.network.read().await;

    let stations = network
        .registry()
        .iter()
        .map(|(name, pos)| StationResult {
            name: name.clone(),
            x: pos.x,
            y: pos.y,
        })
        .collect();

    Json(StationsResponse { stations })
}

/// List all lines with their compiled segments.
async fn list_lines(State(state): State<AppState>) -> Json<LinesResponse> {
    let network = state.network.read().await;

    let lines = network
        .lines()
        .iter()
        .map(|compiled| {
            let stations = network.stations_from_segments(compiled.segments());
            LineResult::from_compiled(compiled, stations)
        })
        .collect();

    Json(LinesResponse { lines })
}

/// Look up one segment by id.
async fn get_segment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SegmentResult>, AppError> {
    let network = state.network.read().await;

    let segment = network
        .resolve_segment(&id)
        .ok_or_else(|| AppError::NotFound {
            message: format!("Unknown segment: {id}"),
        })?;

    let weight = network
        .build_graph(Some(&[segment.id.as_str()][..]))
        .edge_weight(segment.from.as_str(), segment.to.as_str());

    Ok(Json(SegmentResult {
        id: segment.id.clone(),
        from: segment.from.clone(),
        to: segment.to.clone(),
        length: segment.length,
        weight,
    }))
}

/// Compile a station sequence, registering new segments.
async fn compile_route(
    State(state): State<AppState>,
    Json(req): Json<CompileRouteRequest>,
) -> Json<CompileRouteResponse> {
    let mut network = state.network.write().await;

    let before = network.catalog().len();
    let route = network.compile_route(&req.stations);
    let created = network.catalog().len() - before;

    if created > 0 {
        state.cache.invalidate_all();
        info!(created, "segment catalog grew, path cache cleared");
    }

    Json(CompileRouteResponse {
        segments: route.segments,
        skipped: route.skipped,
        created,
    })
}

/// Rebuild a station sequence from segment ids.
async fn stations_from_segments(
    State(state): State<AppState>,
    Json(req): Json<StationsFromSegmentsRequest>,
) -> Json<StationsFromSegmentsResponse> {
    let network = state.network.read().await;
    let stations = network.stations_from_segments(&req.segments);
    Json(StationsFromSegmentsResponse { stations })
}

/// Find ranked paths between two stations.
async fn find_paths(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PathsResponse>, AppError> {
    let start = parse_station("from", &query.from)?;
    let end = parse_station("to", &query.to)?;
    let lines = query
        .line_ids()
        .map(|ids| ids.iter().map(|id| parse_line(id)).collect::<Result<Vec<_>, _>>())
        .transpose()?;

    let mut request = PathRequest::new(start.clone(), end.clone());
    request.limit = query.limit;
    request.strategy = query.strategy;
    request.validate(&state.config)?;

    let limit = request.limit.unwrap_or(state.config.default_limit);
    let strategy = request.strategy.unwrap_or(state.config.strategy);

    // Held until the result is cached; the catalog only grows under the
    // write lock.
    let network = state.network.read().await;

    if !network.registry().contains(start.as_str()) || !network.registry().contains(end.as_str())
    {
        return Ok(Json(PathsResponse {
            paths: Vec::new(),
            strategy,
        }));
    }

    let generation = network.catalog().len();
    let key = PathKey::new(start, end, limit, strategy, lines.clone(), generation);

    if let Some(paths) = state.cache.get(&key).await {
        return Ok(Json(PathsResponse {
            paths: (*paths).clone(),
            strategy,
        }));
    }

    let graph = graph_for(&network, lines.as_deref())?;
    let result = Planner::new(&graph, &state.config).search(&request)?;

    state
        .cache
        .insert(key, Arc::new(result.paths.clone()))
        .await;

    Ok(Json(PathsResponse {
        paths: result.paths,
        strategy: result.strategy,
    }))
}

/// Validate externally proposed routes against the graph.
async fn validate_routes(
    State(state): State<AppState>,
    Json(req): Json<ValidateRoutesRequest>,
) -> Result<Json<ValidateRoutesResponse>, AppError> {
    let lines = req
        .lines
        .as_ref()
        .map(|ids| ids.iter().map(|id| parse_line(id)).collect::<Result<Vec<_>, _>>())
        .transpose()?;

    let network = state.network.read().await;
    let graph = graph_for(&network, lines.as_deref())?;

    let mut routes = Vec::new();
    let mut rejected = Vec::new();
    for (index, candidate) in req.candidates.into_iter().enumerate() {
        match validate_candidate(
            &graph,
            network.registry(),
            &candidate.route,
            candidate.description,
        ) {
            Ok(route) => routes.push(route),
            Err(e) => rejected.push(RejectedCandidate {
                index,
                error: e.to_string(),
            }),
        }
    }

    Ok(Json(ValidateRoutesResponse { routes, rejected }))
}

/// Run the network self-check.
async fn audit_network(State(state): State<AppState>) -> Json<AuditReport> {
    let network = state.network.read().await;
    Json(audit(&network))
}

/// Graph over all segments, or over the segments of the given lines.
fn graph_for(network: &Network, lines: Option<&[LineId]>) -> Result<Graph, AppError> {
    let Some(lines) = lines else {
        return Ok(network.build_graph::<&str>(None));
    };

    if let Some(missing) = lines.iter().find(|id| network.line(id.as_str()).is_none()) {
        return Err(AppError::NotFound {
            message: format!("Unknown line: {missing}"),
        });
    }

    let ids: Vec<&str> = lines.iter().map(LineId::as_str).collect();
    Ok(network.graph_for_lines(&ids))
}

fn parse_station(field: &str, value: &str) -> Result<StationName, AppError> {
    StationName::parse(value).map_err(|e| AppError::BadRequest {
        message: format!("Invalid {field} station {value:?}: {e}"),
    })
}

fn parse_line(value: &str) -> Result<LineId, AppError> {
    LineId::parse(value).map_err(|e| AppError::BadRequest {
        message: format!("Invalid line id {value:?}: {e}"),
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        match e {
            SearchError::InvalidRequest(message) => AppError::BadRequest { message },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(status = %status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
