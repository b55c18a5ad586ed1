use metro_server::cache::CacheConfig;
use metro_server::config::ServerConfig;
use metro_server::dataset::{self, NetworkFile};
use metro_server::network::audit;
use metro_server::planner::SearchConfig;
use metro_server::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = ServerConfig::from_env()?;

    // Load the network definition
    let network = match &config.network_file {
        Some(path) => {
            info!(path = %path.display(), "loading network definition");
            NetworkFile::from_path(path)?.into_network()?
        }
        None => dataset::builtin()?,
    };

    let report = audit(&network);
    for issue in &report.errors {
        warn!(?issue, "network audit error");
    }
    info!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "network audit complete"
    );

    let state = AppState::new(network, SearchConfig::default(), &CacheConfig::default());
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!(addr = %config.bind_addr, "metro server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
