//! Info API dan health check.

use actix_web::{web, HttpResponse};
use serde::Serialize;
use serde_json::json;

use crate::database::connection::health_check;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub environment: &'static str,
    pub database: DatabaseHealth,
}

#[derive(Debug, Serialize)]
pub struct DatabaseHealth {
    pub status: &'static str,
    pub pool_size: u32,
    pub response_time_ms: f64,
}

pub async fn api_info() -> HttpResponse {
    let endpoint = |method: &str, path: &str, description: &str| {
        json!({ "method": method, "path": path, "description": description })
    };

    HttpResponse::Ok().json(json!({
        "name": "Kasir API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            endpoint("GET", "/health", "Health check"),
            endpoint("GET", "/api/produk", "Get all products"),
            endpoint("POST", "/api/produk", "Create new product"),
            endpoint("GET", "/api/produk/{id}", "Get product by ID"),
            endpoint("PUT", "/api/produk/{id}", "Update product by ID"),
            endpoint("DELETE", "/api/produk/{id}", "Delete product by ID"),
            endpoint("GET", "/api/categories", "Get all categories"),
            endpoint("POST", "/api/categories", "Create new category"),
            endpoint("GET", "/api/categories/{id}", "Get category by ID"),
            endpoint("PUT", "/api/categories/{id}", "Update category by ID"),
            endpoint("DELETE", "/api/categories/{id}", "Delete category by ID"),
            endpoint("POST", "/api/checkout", "Checkout transaction"),
            endpoint("GET", "/api/transactions/{id}", "Get transaction by ID"),
            endpoint("GET", "/api/report/hari-ini", "Get today's transactions report"),
            endpoint(
                "GET",
                "/api/report?start_date={start_date}&end_date={end_date}",
                "Get transactions report by date range"
            ),
        ],
    }))
}

/// Get system health status
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let start = std::time::Instant::now();

    let database = match health_check(&state.db).await {
        Ok(()) => DatabaseHealth {
            status: "healthy",
            pool_size: state.db.size(),
            response_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
        Err(e) => {
            tracing::error!(target: "database", error = %e, "Database health check failed");
            DatabaseHealth {
                status: "unhealthy",
                pool_size: 0,
                response_time_ms: 0.0,
            }
        }
    };

    let healthy = database.status == "healthy";
    let body = HealthStatus {
        status: if healthy { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        environment: state.environment.as_str(),
        database,
    };

    if healthy {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
