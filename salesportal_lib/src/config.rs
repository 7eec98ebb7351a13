//! Optional TOML configuration for the portal tooling.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EngineError;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "salesportal.toml";

/// Environment variable that overrides the configured snapshot path.
pub const SNAPSHOT_ENV: &str = "SALESPORTAL_SNAPSHOT";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalConfig {
    /// Snapshot JSON to load records from.
    pub snapshot: Option<PathBuf>,
    /// Default output format (table, json, csv, markdown).
    pub output: Option<String>,
    /// Year used when a command is run without `--year`.
    pub default_year: Option<i32>,
}

impl PortalConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, EngineError> {
        toml::from_str(content).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Read `path`. A missing file yields the defaults; an unreadable or
    /// malformed one is a `Config` error.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(EngineError::Config(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        };
        let config: Self = toml::from_str(&content)
            .map_err(|e| EngineError::Config(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Replace the snapshot path with `value` when it is set and non-blank.
    pub fn with_snapshot_override(mut self, value: Option<String>) -> Self {
        if let Some(path) = value.filter(|v| !v.trim().is_empty()) {
            self.snapshot = Some(PathBuf::from(path.trim()));
        }
        self
    }

    /// Apply [`SNAPSHOT_ENV`] from the process environment.
    pub fn with_env(self) -> Self {
        self.with_snapshot_override(std::env::var(SNAPSHOT_ENV).ok())
    }
}
