pub mod api;
pub mod checkout;
pub mod config;
pub mod database;
pub mod errors;
pub mod ledger;
pub mod logger;
pub mod models;
pub mod recorder;
pub mod report;
pub mod validation;

use config::{AppConfig, Environment};
use sqlx::SqlitePool;

/// State aplikasi yang dibagikan ke semua handler.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub api_key: Option<String>,
    pub environment: Environment,
}

impl AppState {
    pub fn new(db: SqlitePool, config: &AppConfig) -> Self {
        Self {
            db,
            api_key: config.security.api_key.clone(),
            environment: config.environment,
        }
    }
}
