//! Harness configuration.
//!
//! Layered lowest to highest: built-in defaults, an optional TOML file,
//! environment variables, then command line flags.
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:3000"
//! timeout_secs = 10
//!
//! [run]
//! persistence_pause_ms = 1000
//! ```

use client::{ApiConfig, ApiError, ApiResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Pause between the two reads of the persistence check.
    pub persistence_pause: Duration,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            persistence_pause: Duration::from_secs(1),
        }
    }
}

impl RunConfig {
    pub fn with_persistence_pause(mut self, pause: Duration) -> Self {
        self.persistence_pause = pause;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct HarnessConfig {
    pub api: ApiConfig,
    pub run: RunConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    api: ApiSection,
    #[serde(default)]
    run: RunSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ApiSection {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RunSection {
    persistence_pause_ms: Option<u64>,
}

impl HarnessConfig {
    /// Defaults, then `config_file` if given, then the environment.
    pub fn load(config_file: Option<&Path>) -> ApiResult<Self> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        Ok(Self {
            api: config.api.with_env_overrides()?,
            run: config.run,
        })
    }

    pub fn from_file(path: &Path) -> ApiResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| ApiError::InvalidConfig {
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml(&raw).map_err(|e| ApiError::InvalidConfig {
            message: format!("{}: {}", path.display(), e),
        })
    }

    fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        let file: ConfigFile = toml::from_str(raw)?;
        let mut config = Self::default();

        if let Some(base_url) = file.api.base_url {
            config.api.base_url = base_url;
        }
        if let Some(secs) = file.api.timeout_secs {
            config.api.timeout = Duration::from_secs(secs);
        }
        if let Some(ms) = file.run.persistence_pause_ms {
            config.run.persistence_pause = Duration::from_millis(ms);
        }

        Ok(config)
    }

    pub fn validate(&self) -> ApiResult<()> {
        self.api
            .validate()
            .map_err(|message| ApiError::InvalidConfig { message })
    }
}
