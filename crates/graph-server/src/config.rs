//! Configuration loading.
//!
//! Mirrors the original service's layout: each named service has a YAML
//! file at `config/services/<name>/config.yaml`, selected by the CLI's one
//! positional argument.
use std::fmt;
use std::path::{Path, PathBuf};

use graph_pg::PgConfig;
use serde::Deserialize;

/// Top-level service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub db: Backend,
    pub api: ApiConfig,
    pub postgres: Option<PgConfig>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Mem,
    Pg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug)]
pub enum ConfigError {
    NotFound(PathBuf),
    Io { path: PathBuf, detail: String },
    Parse { path: PathBuf, detail: String },
    MissingPostgresSection,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "config file not found: {}", path.display()),
            Self::Io { path, detail } => {
                write!(f, "failed to read config {}: {detail}", path.display())
            }
            Self::Parse { path, detail } => {
                write!(f, "failed to parse config {}: {detail}", path.display())
            }
            Self::MissingPostgresSection => {
                write!(f, "db: pg requires a postgres: section in the config file")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Locates and parses `config/services/<service_name>/config.yaml`
    /// relative to `base_dir`.
    pub fn load(base_dir: &Path, service_name: &str) -> Result<Self, ConfigError> {
        let path = base_dir
            .join("config")
            .join("services")
            .join(service_name)
            .join("config.yaml");
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        let raw = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        let config: Config = serde_yaml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            detail: e.to_string(),
        })?;
        if config.db == Backend::Pg && config.postgres.is_none() {
            return Err(ConfigError::MissingPostgresSection);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn parses_a_minimal_in_memory_config() {
        let yaml = "db: mem\napi:\n  host: 0.0.0.0\n  port: 8080\n";
        let config: Config = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.db, Backend::Mem);
        assert_eq!(config.api.port, 8080);
    }

    #[test]
    fn parses_a_postgres_config() {
        let yaml = "\
db: pg
api:
  host: 0.0.0.0
  port: 8080
postgres:
  host: localhost
  port: 5432
  database: graph
  user: graph
  password: secret
  minsize: 1
  maxsize: 10
";
        let config: Config = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.db, Backend::Pg);
        let pg = config.postgres.expect("postgres section");
        assert_eq!(pg.database, "graph");
    }

    #[test]
    fn missing_postgres_section_is_rejected_when_pg_selected() {
        let dir = std::env::temp_dir().join(format!(
            "graph-server-config-test-{}",
            std::process::id()
        ));
        let service_dir = dir.join("config").join("services").join("broken");
        std::fs::create_dir_all(&service_dir).expect("mkdir");
        std::fs::write(service_dir.join("config.yaml"), "db: pg\napi:\n  host: x\n  port: 1\n")
            .expect("write");
        let result = Config::load(&dir, "broken");
        assert!(matches!(result, Err(ConfigError::MissingPostgresSection)));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_config_file_is_not_found() {
        let dir = std::env::temp_dir().join(format!(
            "graph-server-config-test-missing-{}",
            std::process::id()
        ));
        let result = Config::load(&dir, "nonexistent");
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }
}
