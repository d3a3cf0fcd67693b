//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `DISPATCH_TRAINER`
//! prefix with `__` separating nested values.
//!
//! # Example
//!
//! ```no_run
//! use dispatch_trainer::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Root application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Generation backend tuning.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Simulation behavior tuning.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

/// Generation backend configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerationConfig {
    /// Per-request budget in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Retries after a retryable failure before falling back.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

/// Simulation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Fixed RNG seed for reproducible sessions. Unset means entropy-seeded.
    pub rng_seed: Option<u64>,
}

impl GenerationConfig {
    /// Request budget as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_retries() -> u32 {
    1
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_retries: default_max_retries(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self { rng_seed: None }
    }
}

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors raised by semantic validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("generation timeout must be positive")]
    ZeroTimeout,
}

impl AppConfig {
    /// Loads configuration from the environment.
    ///
    /// Reads a `.env` file if present, then environment variables with the
    /// `DISPATCH_TRAINER` prefix: `DISPATCH_TRAINER__GENERATION__TIMEOUT_MS=5000`
    /// sets `generation.timeout_ms`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DISPATCH_TRAINER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.generation.timeout_ms == 0 {
            return Err(ValidationError::ZeroTimeout);
        }
        Ok(())
    }
}
