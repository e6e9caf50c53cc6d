use actix_web::{web, HttpResponse};

use crate::checkout::checkout;
use crate::errors::{AppError, AppResult};
use crate::models::transaction::CheckoutRequest;
use crate::recorder::find_transaction;
use crate::AppState;

/// POST /api/checkout
pub async fn create_checkout(
    state: web::Data<AppState>,
    payload: web::Json<CheckoutRequest>,
) -> AppResult<HttpResponse> {
    let transaction = checkout(&state.db, &payload.items).await?;
    Ok(HttpResponse::Ok().json(transaction))
}

/// GET /api/transactions/{id}
pub async fn get_transaction(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let transaction = find_transaction(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaksi id {} tidak ditemukan", id)))?;

    Ok(HttpResponse::Ok().json(transaction))
}
