//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `ROBO_VERIFY`
//! prefix and `__` as the nesting separator.
//!
//! # Example
//!
//! ```no_run
//! use robo_verify::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod verifier;

pub use ai::AiConfig;
pub use error::{ConfigError, ValidationError};
pub use verifier::{VerifierConfig, DEFAULT_MAX_ROUNDS};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// AI provider configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Verifier endpoint configuration
    pub verifier: VerifierConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// Loads a `.env` file if present, then reads environment variables
    /// with the `ROBO_VERIFY` prefix, e.g.
    /// `ROBO_VERIFY__VERIFIER__ENDPOINT=https://...` ->
    /// `verifier.endpoint`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("ROBO_VERIFY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ai.validate()?;
        self.verifier.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize the tests that touch them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var(
            "ROBO_VERIFY__VERIFIER__ENDPOINT",
            "https://verifier.example.com/verify",
        );
        env::set_var("ROBO_VERIFY__AI__API_KEY", "sk-test");
    }

    fn clear_env() {
        env::remove_var("ROBO_VERIFY__VERIFIER__ENDPOINT");
        env::remove_var("ROBO_VERIFY__AI__API_KEY");
        env::remove_var("ROBO_VERIFY__VERIFIER__MAX_ROUNDS");
    }

    #[test]
    fn loads_minimal_config_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();

        let config = AppConfig::load().expect("config should load");
        assert_eq!(
            config.verifier.endpoint,
            "https://verifier.example.com/verify"
        );
        assert_eq!(config.verifier.max_rounds, DEFAULT_MAX_ROUNDS);
        assert!(config.validate().is_ok());

        clear_env();
    }

    #[test]
    fn overrides_round_limit_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("ROBO_VERIFY__VERIFIER__MAX_ROUNDS", "5");

        let config = AppConfig::load().expect("config should load");
        assert_eq!(config.verifier.max_rounds, 5);

        clear_env();
    }
}
