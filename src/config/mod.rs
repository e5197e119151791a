//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `BOOKING_WIZARD` prefix and nested values use double underscores as separators.
//! Every section has defaults, so an empty environment yields a working
//! in-memory setup.
//!
//! # Example
//!
//! ```no_run
//! use booking_wizard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Backend: {:?}", config.backend.kind);
//! ```

mod backend;
mod error;
mod logging;
mod notifications;
mod wizard;

pub use backend::{BackendConfig, BackendKind};
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use notifications::NotificationConfig;
pub use wizard::{DateChangeResetSetting, WizardConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rental backend (in-memory or REST)
    #[serde(default)]
    pub backend: BackendConfig,

    /// Step order, cascade policy, wheel filtering and submission contract
    #[serde(default)]
    pub wizard: WizardConfig,

    /// Notification lifetime
    #[serde(default)]
    pub notifications: NotificationConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `BOOKING_WIZARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `BOOKING_WIZARD__BACKEND__KIND=http` -> `backend.kind = http`
    /// - `BOOKING_WIZARD__WIZARD__STEPS=name,contact,...` -> `wizard.steps = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("BOOKING_WIZARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.backend.validate()?;
        self.wizard.validate()?;
        self.notifications.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
