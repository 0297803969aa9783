use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use fuel_server::config::ServerConfig;
use fuel_server::overpass::{MockOverpass, OverpassClient};
use fuel_server::prices::InMemoryPriceStore;
use fuel_server::web::{AppState, create_router};

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "fuel_server=info,tower_http=info";

#[tokio::main]
async fn main() -> ExitCode {
    // Loaded first so `RUST_LOG` may come from the file too
    let env_file = dotenvy::dotenv();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    if let Err(e) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("tracing init failed: {e}");
    }

    match env_file {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(e) if e.not_found() => {}
        Err(e) => {
            error!(error = %e, "failed to read environment file");
            return ExitCode::FAILURE;
        }
    }

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    // Prices live for the lifetime of the process only
    let prices = InMemoryPriceStore::new();

    let state = match &config.mock_file {
        Some(path) => match MockOverpass::from_file(path) {
            Ok(mock) => {
                if mock.is_empty() {
                    warn!(path = %path.display(), "mock station file holds no elements");
                }
                warn!(
                    path = %path.display(),
                    elements = mock.len(),
                    "serving stations from local file instead of Overpass"
                );
                AppState::new(mock, prices, config.clone())
            }
            Err(e) => {
                error!(error = %e, "failed to load mock stations");
                return ExitCode::FAILURE;
            }
        },
        None => match OverpassClient::new(config.overpass.clone()) {
            Ok(client) => {
                info!(url = %config.overpass.base_url, "using Overpass API");
                AppState::new(client, prices, config.clone())
            }
            Err(e) => {
                error!(error = %e, "failed to create Overpass client");
                return ExitCode::FAILURE;
            }
        },
    };

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    info!(%addr, "fuel price finder listening");
    info!("  GET  /health");
    info!("  GET  /api/stations/nearby?lat=&lng=&radius=");
    info!("  GET  /api/stations/cheapest?lat=&lng=&fuelType=&limit=");
    info!("  POST /api/stations/:id/update-price");

    if let Err(e) = axum::serve(listener, app).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
