//! Configuration types for matchgrab
//!
//! Settings are layered: built-in defaults, then an optional TOML file, then
//! `MATCHGRAB__<SECTION>__<KEY>` environment variables. Command-line flags in
//! the binaries are applied on top of the loaded value.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "MATCHGRAB";

/// Root configuration for matchgrab
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Match store configuration
    pub store: StoreConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Logging configuration
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from an optional file plus environment overrides.
    ///
    /// A missing file is not an error; the defaults apply instead.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix(ENV_PREFIX).separator("__")
    }

    fn load_with_env(path: Option<&Path>, environment: config::Environment) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }
        let config = builder
            .add_source(environment)
            .build()?
            .try_deserialize()?;
        Ok(config)
    }
}

/// Where the match records live
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path to the redb database file
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("matches/db.redb"),
        }
    }
}

/// HTTP server configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address for the query API
    pub listen: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([0, 0, 0, 0], 8080)),
        }
    }
}

/// Logging configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.path, PathBuf::from("matches/db.redb"));
        assert_eq!(config.server.listen.port(), 8080);
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[store]\npath = \"/data/lol/matches.redb\"\n\n[server]\nlisten = \"127.0.0.1:9100\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/data/lol/matches.redb"));
        assert_eq!(config.server.listen.port(), 9100);
        // Unset sections keep their defaults
        assert_eq!(config.log.level, "info");
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[store]\npath = \"/data/lol/matches.redb\"\n\n[server]\nlisten = \"127.0.0.1:9100\""
        )
        .unwrap();

        let vars: config::Map<String, String> = [
            ("MATCHGRAB__SERVER__LISTEN", "127.0.0.1:9200"),
            ("MATCHGRAB__LOG__LEVEL", "debug"),
            ("OTHER__SERVER__LISTEN", "127.0.0.1:1"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let environment = Config::environment().source(Some(vars));

        let config = Config::load_with_env(Some(file.path()), environment).unwrap();
        assert_eq!(config.server.listen.port(), 9200);
        assert_eq!(config.log.level, "debug");
        // Keys the environment leaves alone come from the file
        assert_eq!(config.store.path, PathBuf::from("/data/lol/matches.redb"));
    }

    #[test]
    fn test_env_overrides_without_file() {
        let vars: config::Map<String, String> =
            [("MATCHGRAB__STORE__PATH".to_string(), "/srv/m.redb".to_string())]
                .into_iter()
                .collect();
        let environment = Config::environment().source(Some(vars));

        let config = Config::load_with_env(None, environment).unwrap();
        assert_eq!(config.store.path, PathBuf::from("/srv/m.redb"));
        assert_eq!(config.server.listen.port(), 8080);
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("absent.toml").as_path())).unwrap();
        assert_eq!(config.server.listen.port(), 8080);
    }
}
