//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Company profile written on first run.
    #[serde(default)]
    pub company: CompanyDefaults,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    #[serde(default = "default_url")]
    pub url: String,
    /// Maximum number of connections in the pool.
    ///
    /// Keep this at 1: the single connection serialises write transactions.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Seconds a queued transaction waits for the connection before giving up.
    ///
    /// Callers queue behind the single connection; past this limit `begin`
    /// fails with a storage error.
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    /// Log every SQL statement.
    #[serde(default)]
    pub sqlx_logging: bool,
}

fn default_url() -> String {
    "sqlite://tally.db?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    1
}

fn default_acquire_timeout() -> u64 {
    600
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

impl DatabaseConfig {
    /// Configuration for a SQLite file at `path`, created if missing.
    #[must_use]
    pub fn sqlite_file(path: impl AsRef<std::path::Path>) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path.as_ref().display()),
            ..Self::default()
        }
    }
}

/// Company profile defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyDefaults {
    /// Company name.
    #[serde(default = "default_company_name")]
    pub name: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Postal address.
    #[serde(default)]
    pub address: String,
    /// Tax identifier.
    #[serde(default)]
    pub tax_id: String,
}

fn default_company_name() -> String {
    "My Company".to_string()
}

impl Default for CompanyDefaults {
    fn default() -> Self {
        Self {
            name: default_company_name(),
            phone: String::new(),
            email: String::new(),
            address: String::new(),
            tax_id: String::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "tally=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
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
            .add_source(
                config::Environment::with_prefix("TALLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
