//! Configuration loading for the rxlink engine
//!
//! Resolution priority: environment variables override TOML file values,
//! which override compiled defaults. There is no database tier; the engine
//! carries no persistence of its own.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Default RxNav REST base address
pub const DEFAULT_RXNORM_BASE_URL: &str = "https://rxnav.nlm.nih.gov/REST";

/// Engine configuration
///
/// Every field has a compiled default, so a missing TOML file and an empty
/// environment still yield a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Base URL of the RxNorm lookup service
    pub rxnorm_base_url: String,
    /// Per-attempt HTTP timeout in seconds
    pub request_timeout_secs: u64,
    /// Retry attempts per logical gateway call before the failure is terminal
    pub retry_attempts: u32,
    /// Base retry delay in milliseconds; actual delay grows linearly with the
    /// attempt number
    pub retry_delay_ms: u64,
    /// Worker-pool size for batch resolution
    pub max_workers: usize,
    /// Records per durability chunk
    pub chunk_size: usize,
    /// Pause between chunks in milliseconds (throttle for the remote service)
    pub chunk_pause_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rxnorm_base_url: DEFAULT_RXNORM_BASE_URL.to_string(),
            request_timeout_secs: 30,
            retry_attempts: 3,
            retry_delay_ms: 1000,
            max_workers: 4,
            chunk_size: 1000,
            chunk_pause_ms: 100,
        }
    }
}

impl EngineConfig {
    /// Load configuration with ENV -> TOML -> default priority
    ///
    /// `path` is the optional TOML file; a missing file is not an error, it
    /// just means defaults (plus environment overrides) apply.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) if p.exists() => {
                let config = Self::from_toml_file(p)?;
                info!(path = %p.display(), "Engine configuration loaded from TOML");
                config
            }
            Some(p) => {
                warn!(path = %p.display(), "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read config failed: {}", e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse config failed: {}", e)))
    }

    /// Apply `RXLINK_*` environment-variable overrides in place
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("RXLINK_RXNORM_BASE_URL") {
            if !url.trim().is_empty() {
                self.rxnorm_base_url = url;
            }
        }
        override_parsed(&mut self.request_timeout_secs, "RXLINK_REQUEST_TIMEOUT_SECS");
        override_parsed(&mut self.retry_attempts, "RXLINK_RETRY_ATTEMPTS");
        override_parsed(&mut self.retry_delay_ms, "RXLINK_RETRY_DELAY_MS");
        override_parsed(&mut self.max_workers, "RXLINK_MAX_WORKERS");
        override_parsed(&mut self.chunk_size, "RXLINK_CHUNK_SIZE");
        override_parsed(&mut self.chunk_pause_ms, "RXLINK_CHUNK_PAUSE_MS");
    }

    fn validate(&self) -> Result<()> {
        if self.rxnorm_base_url.trim().is_empty() {
            return Err(Error::Config("rxnorm_base_url must not be empty".to_string()));
        }
        if self.retry_attempts == 0 {
            return Err(Error::Config("retry_attempts must be at least 1".to_string()));
        }
        if self.max_workers == 0 {
            return Err(Error::Config("max_workers must be at least 1".to_string()));
        }
        if self.chunk_size == 0 {
            return Err(Error::Config("chunk_size must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn chunk_pause(&self) -> Duration {
        Duration::from_millis(self.chunk_pause_ms)
    }
}

fn override_parsed<T: std::str::FromStr>(slot: &mut T, var: &str) {
    if let Ok(raw) = std::env::var(var) {
        match raw.parse() {
            Ok(value) => *slot = value,
            Err(_) => warn!(var, value = %raw, "Ignoring unparseable environment override"),
        }
    }
}
