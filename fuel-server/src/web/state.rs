//! Application state for the web layer.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::overpass::StationSource;
use crate::prices::PriceStore;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Where raw station elements come from
    pub source: Arc<dyn StationSource>,

    /// Crowd-sourced price table
    pub prices: Arc<dyn PriceStore>,

    /// Request defaults (radii, limits)
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        source: impl StationSource + 'static,
        prices: impl PriceStore + 'static,
        config: ServerConfig,
    ) -> Self {
        Self {
            source: Arc::new(source),
            prices: Arc::new(prices),
            config: Arc::new(config),
        }
    }
}
