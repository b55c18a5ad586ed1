//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Error reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid METRO_BIND_ADDR {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Runtime settings for the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,

    /// Network definition to load; the bundled network if `None`
    pub network_file: Option<PathBuf>,
}

impl ServerConfig {
    /// Read `METRO_BIND_ADDR` and `METRO_NETWORK_FILE`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = lookup("METRO_BIND_ADDR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = value
            .trim()
            .parse()
            .map_err(|source| ConfigError::BindAddr {
                value: value.clone(),
                source,
            })?;

        let network_file = lookup("METRO_NETWORK_FILE")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            network_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.network_file, None);
    }

    #[test]
    fn overrides() {
        let config = config(&[
            ("METRO_BIND_ADDR", "0.0.0.0:8080"),
            ("METRO_NETWORK_FILE", "/srv/map.json"),
        ])
        .unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.network_file, Some(PathBuf::from("/srv/map.json")));
    }

    #[test]
    fn invalid_bind_addr() {
        let err = config(&[("METRO_BIND_ADDR", "not an address")]).unwrap_err();
        assert!(matches!(err, ConfigError::BindAddr { .. }));
    }
}
