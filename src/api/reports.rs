use actix_web::{web, HttpResponse};

use crate::errors::{AppError, AppResult};
use crate::models::transaction::{ReportQuery, SalesReport};
use crate::report::{sales_report, ReportRange};
use crate::AppState;

/// Periode tanpa transaksi dijawab sebagai laporan kosong, bukan error.
fn report_response(result: AppResult<SalesReport>) -> AppResult<HttpResponse> {
    match result {
        Ok(report) => Ok(HttpResponse::Ok().json(report)),
        Err(AppError::NoData) => Ok(HttpResponse::Ok().json(SalesReport::empty())),
        Err(e) => Err(e),
    }
}

/// GET /api/report/hari-ini
pub async fn report_today(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    report_response(sales_report(&state.db, ReportRange::Today).await)
}

/// GET /api/report?start_date=YYYY-MM-DD&end_date=YYYY-MM-DD
pub async fn report_by_range(
    state: web::Data<AppState>,
    query: web::Query<ReportQuery>,
) -> AppResult<HttpResponse> {
    let range = ReportRange::from_query(&query).map_err(AppError::Validation)?;
    report_response(sales_report(&state.db, range).await)
}
