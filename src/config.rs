//! Konfigurasi server kasir.
//!
//! Urutan prioritas: environment variable, lalu file `.env` (dotenvy),
//! lalu nilai default di bawah.

use serde::{Deserialize, Serialize};
use std::env;
use std::sync::OnceLock;

/// Mode jalan: development atau production (`APP_ENV`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn from_env() -> Self {
        env::var("APP_ENV")
            .map(|s| Self::parse(&s))
            .unwrap_or(Environment::Development)
    }

    pub fn is_production(&self) -> bool {
        *self == Environment::Production
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub app_name: String,
    pub version: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Pool SQLite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite:kasir.db?mode=rwc`
    pub url: String,

    /// `DB_MAX_CONNECTIONS`
    pub max_connections: u32,

    /// `DB_MIN_CONNECTIONS`
    pub min_connections: u32,

    /// Acquire timeout in seconds
    pub connect_timeout_secs: u64,

    pub idle_timeout_secs: u64,

    /// How long a writer waits for the SQLite write lock
    pub busy_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Expected value of the `X-API-Key` header
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive (error, warn, info, debug, trace or full env-filter syntax)
    pub level: String,

    /// Output JSON, default aktif di production
    pub json_format: bool,
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:kasir.db?mode=rwc".to_string(),
            max_connections: 25,
            min_connections: 5,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            busy_timeout_secs: 30,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::from_env();
        let db_defaults = DatabaseConfig::default();

        Self {
            environment: env,
            app_name: env::var("APP_NAME").unwrap_or_else(|_| "Kasir API".to_string()),
            version: env!("CARGO_PKG_VERSION").to_string(),

            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env_parse("PORT", 8080),
            },

            database: DatabaseConfig {
                url: env::var("DB_CONN").unwrap_or(db_defaults.url),
                max_connections: env_parse("DB_MAX_CONNECTIONS", db_defaults.max_connections),
                min_connections: env_parse("DB_MIN_CONNECTIONS", db_defaults.min_connections),
                connect_timeout_secs: db_defaults.connect_timeout_secs,
                idle_timeout_secs: db_defaults.idle_timeout_secs,
                busy_timeout_secs: env_parse("DB_BUSY_TIMEOUT_SECS", db_defaults.busy_timeout_secs),
            },

            security: SecurityConfig {
                api_key: env::var("APIKEY").ok().filter(|k| !k.trim().is_empty()),
            },

            logging: LoggingConfig {
                level: env::var("RUST_LOG").unwrap_or_else(|_| {
                    if env.is_production() { "info".to_string() } else { "debug".to_string() }
                }),
                json_format: env.is_production(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from .env (if present), environment and defaults
    pub fn load() -> Self {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Error reading .env file: {}", e);
            }
        }
        Self::default()
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.server.host.clone(), self.server.port)
    }

    /// Validate configuration for production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.security.api_key.is_none() {
            return Err(
                "APIKEY must be set in production. Set it via environment variable or .env."
                    .to_string(),
            );
        }

        if self.database.min_connections > self.database.max_connections {
            return Err(format!(
                "DB_MIN_CONNECTIONS ({}) must not exceed DB_MAX_CONNECTIONS ({})",
                self.database.min_connections, self.database.max_connections
            ));
        }

        Ok(())
    }
}

/// Global configuration instance
static GLOBAL_CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration
pub fn init_config() -> &'static AppConfig {
    GLOBAL_CONFIG.get_or_init(AppConfig::load)
}
