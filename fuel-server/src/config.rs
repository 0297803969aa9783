//! Server configuration, read from environment variables.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use crate::overpass::OverpassConfig;
use crate::stations::DEFAULT_CHEAPEST_LIMIT;

/// Default search radius for nearby stations (metres).
const DEFAULT_NEARBY_RADIUS_M: f64 = 10_000.0;

/// Default search radius for the cheapest query (metres). Wider than the
/// nearby radius so that enough priced stations turn up.
const DEFAULT_CHEAPEST_RADIUS_M: f64 = 50_000.0;

/// Error returned when an environment variable holds an unusable value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {var}: {value:?}")]
pub struct ConfigError {
    pub var: &'static str,
    pub value: String,
}

/// Configuration for the HTTP server and its collaborators.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: IpAddr,

    /// Port to bind.
    pub port: u16,

    /// Overpass client settings.
    pub overpass: OverpassConfig,

    /// Radius used by the nearby query when the request gives none.
    pub nearby_radius_m: f64,

    /// Radius used by the cheapest query when the request gives none.
    pub cheapest_radius_m: f64,

    /// Result count for the cheapest query when the request gives none.
    pub cheapest_limit: usize,

    /// Serve stations from this Overpass JSON file instead of the live API.
    pub mock_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Unset or empty variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &'static str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(v) = get("HOST") {
            config.host = parse_var("HOST", &v)?;
        }
        if let Some(v) = get("PORT") {
            config.port = parse_var("PORT", &v)?;
        }
        if let Some(v) = get("OVERPASS_API_URL") {
            config.overpass = config.overpass.with_base_url(v.trim());
        }
        if let Some(v) = get("OVERPASS_TIMEOUT_SECS") {
            config.overpass = config
                .overpass
                .with_timeout(parse_var("OVERPASS_TIMEOUT_SECS", &v)?);
        }
        if let Some(v) = get("OVERPASS_QUERY_TIMEOUT") {
            config.overpass = config
                .overpass
                .with_query_timeout(parse_var("OVERPASS_QUERY_TIMEOUT", &v)?);
        }
        if let Some(v) = get("NEARBY_RADIUS_M") {
            config.nearby_radius_m = parse_radius("NEARBY_RADIUS_M", &v)?;
        }
        if let Some(v) = get("CHEAPEST_RADIUS_M") {
            config.cheapest_radius_m = parse_radius("CHEAPEST_RADIUS_M", &v)?;
        }
        if let Some(v) = get("CHEAPEST_LIMIT") {
            config.cheapest_limit = parse_var("CHEAPEST_LIMIT", &v)?;
        }
        if let Some(v) = get("OVERPASS_MOCK_FILE") {
            config.mock_file = Some(PathBuf::from(v.trim()));
        }

        Ok(config)
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: 3000,
            overpass: OverpassConfig::default(),
            nearby_radius_m: DEFAULT_NEARBY_RADIUS_M,
            cheapest_radius_m: DEFAULT_CHEAPEST_RADIUS_M,
            cheapest_limit: DEFAULT_CHEAPEST_LIMIT,
            mock_file: None,
        }
    }
}

fn parse_var<T: FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        var,
        value: value.to_string(),
    })
}

fn parse_radius(var: &'static str, value: &str) -> Result<f64, ConfigError> {
    let radius: f64 = parse_var(var, value)?;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(ConfigError {
            var,
            value: value.to_string(),
        });
    }
    Ok(radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overpass::DEFAULT_BASE_URL;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();

        assert_eq!(config.bind_addr(), "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.overpass.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.nearby_radius_m, 10_000.0);
        assert_eq!(config.cheapest_radius_m, 50_000.0);
        assert_eq!(config.cheapest_limit, 5);
        assert!(config.mock_file.is_none());
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cheapest_limit, 5);
    }

    #[test]
    fn reads_all_variables() {
        let config = ServerConfig::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8080"),
            ("OVERPASS_API_URL", "http://localhost:12345/api/interpreter"),
            ("OVERPASS_TIMEOUT_SECS", "10"),
            ("OVERPASS_QUERY_TIMEOUT", "15"),
            ("NEARBY_RADIUS_M", "2500"),
            ("CHEAPEST_RADIUS_M", "20000"),
            ("CHEAPEST_LIMIT", "3"),
            ("OVERPASS_MOCK_FILE", "data/stations.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.overpass.base_url, "http://localhost:12345/api/interpreter");
        assert_eq!(config.overpass.timeout_secs, 10);
        assert_eq!(config.overpass.query_timeout_secs, 15);
        assert_eq!(config.nearby_radius_m, 2500.0);
        assert_eq!(config.cheapest_radius_m, 20_000.0);
        assert_eq!(config.cheapest_limit, 3);
        assert_eq!(config.mock_file, Some(PathBuf::from("data/stations.json")));
    }

    #[test]
    fn reads_dotenv_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# local overrides").unwrap();
        writeln!(file, "PORT=4000").unwrap();
        writeln!(file, "CHEAPEST_LIMIT=8").unwrap();
        writeln!(file, "OVERPASS_MOCK_FILE=\"data/windhoek_overpass.json\"").unwrap();

        let vars: HashMap<String, String> = dotenvy::from_path_iter(file.path())
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        let config = ServerConfig::from_lookup(|key| vars.get(key).cloned()).unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.cheapest_limit, 8);
        assert_eq!(config.mock_file, Some(PathBuf::from("data/windhoek_overpass.json")));
    }

    #[test]
    fn blank_values_keep_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("PORT", "  ")])).unwrap();
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn invalid_values_name_the_variable() {
        let err = ServerConfig::from_lookup(lookup(&[("PORT", "eighty")])).unwrap_err();
        assert_eq!(err.var, "PORT");
        assert_eq!(err.to_string(), "invalid value for PORT: \"eighty\"");

        let err = ServerConfig::from_lookup(lookup(&[("NEARBY_RADIUS_M", "-1")])).unwrap_err();
        assert_eq!(err.var, "NEARBY_RADIUS_M");

        let err = ServerConfig::from_lookup(lookup(&[("HOST", "localhost:80")])).unwrap_err();
        assert_eq!(err.var, "HOST");
    }
}
