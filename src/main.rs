use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};

use kasir_api::api::{self, middleware::cors};
use kasir_api::database::connection::init_db;
use kasir_api::{config, logger, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = config::init_config();

    if let Err(e) = logger::init(&config.logging) {
        eprintln!("Warning: {}", e);
    }

    if let Err(e) = config.validate() {
        tracing::error!(target: "app", "{}", e);
        return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
    }

    if config.security.api_key.is_none() {
        tracing::warn!(target: "app", "APIKEY is not set, protected routes are open");
    }

    tracing::info!(
        target: "app",
        name = %config.app_name,
        version = %config.version,
        environment = config.environment.as_str(),
        "Application starting"
    );

    let pool = init_db(&config.database).await.map_err(|e| {
        tracing::error!(target: "database", error = %e, "Failed to connect to database");
        std::io::Error::new(std::io::ErrorKind::Other, e)
    })?;

    let state = web::Data::new(AppState::new(pool, config));
    let bind = config.bind_address();
    tracing::info!(target: "app", host = %bind.0, port = bind.1, "Starting server");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(from_fn(cors))
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .bind(bind)?
    .run()
    .await
}
