pub mod categories;
pub mod middleware;
pub mod products;
pub mod reports;
pub mod system;
pub mod transactions;

use actix_web::middleware::from_fn;
use actix_web::web;

use crate::errors::AppError;
use middleware::require_api_key;

/// Body, path dan query yang gagal di-decode dijawab 400 dengan format error standar.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Request body tidak valid: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Parameter path tidak valid: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(format!("Query string tidak valid: {}", err)).into()
    }));
}

/// Register every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    extractor_configs(cfg);

    cfg.route("/", web::get().to(system::api_info))
        .route("/health", web::get().to(system::health))
        .service(
            web::scope("/api")
                .service(
                    web::resource("/produk")
                        .route(web::get().to(products::list_products))
                        .route(web::post().to(products::create_product)),
                )
                .service(
                    web::resource("/produk/{id}")
                        .route(web::get().to(products::get_product))
                        .route(web::put().to(products::update_product))
                        .route(web::delete().to(products::delete_product))
                        .wrap(from_fn(require_api_key)),
                )
                .service(
                    web::resource("/categories")
                        .route(web::get().to(categories::list_categories))
                        .route(web::post().to(categories::create_category)),
                )
                .service(
                    web::resource("/categories/{id}")
                        .route(web::get().to(categories::get_category))
                        .route(web::put().to(categories::update_category))
                        .route(web::delete().to(categories::delete_category))
                        .wrap(from_fn(require_api_key)),
                )
                .service(
                    web::resource("/checkout")
                        .route(web::post().to(transactions::create_checkout))
                        .wrap(from_fn(require_api_key)),
                )
                .service(
                    web::resource("/transactions/{id}")
                        .route(web::get().to(transactions::get_transaction))
                        .wrap(from_fn(require_api_key)),
                )
                .service(web::resource("/report/hari-ini").route(web::get().to(reports::report_today)))
                .service(web::resource("/report").route(web::get().to(reports::report_by_range))),
        );
}
