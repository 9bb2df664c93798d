//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    pub database: DatabaseConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SIGNTRACK").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [(
                "SIGNTRACK__DATABASE__URL",
                Some("postgres://localhost/signtrack_test"),
            )],
            || {
                let config = AppConfig::load().expect("config should load from environment");
                assert_eq!(config.database.url, "postgres://localhost/signtrack_test");
                assert_eq!(config.database.max_connections, 10);
                assert_eq!(config.database.min_connections, 1);
            },
        );
    }

    #[test]
    fn test_load_pool_overrides() {
        temp_env::with_vars(
            [
                (
                    "SIGNTRACK__DATABASE__URL",
                    Some("postgres://localhost/signtrack_test"),
                ),
                ("SIGNTRACK__DATABASE__MAX_CONNECTIONS", Some("32")),
                ("SIGNTRACK__DATABASE__MIN_CONNECTIONS", Some("4")),
            ],
            || {
                let config = AppConfig::load().expect("config should load from environment");
                assert_eq!(config.database.max_connections, 32);
                assert_eq!(config.database.min_connections, 4);
            },
        );
    }

    #[test]
    fn test_load_requires_database_url() {
        temp_env::with_vars([("SIGNTRACK__DATABASE__URL", None::<&str>)], || {
            assert!(AppConfig::load().is_err());
        });
    }
}
