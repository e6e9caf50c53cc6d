//! Laporan penjualan per periode.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;

use crate::errors::{AppError, AppResult};
use crate::models::transaction::{BestSellingProduct, ReportQuery, SalesReport};
use crate::validation::parse_date;

/// Report window. Dates are UTC calendar days, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportRange {
    Today,
    Between { start: NaiveDate, end: NaiveDate },
}

impl ReportRange {
    /// Build a range from query parameters. Only a complete pair selects an
    /// explicit range; a missing or half-filled pair falls back to today.
    pub fn from_query(query: &ReportQuery) -> Result<Self, String> {
        let start = query.start_date.as_deref().filter(|s| !s.trim().is_empty());
        let end = query.end_date.as_deref().filter(|s| !s.trim().is_empty());

        match (start, end) {
            (Some(start), Some(end)) => {
                let start = parse_date("start_date", start)?;
                let end = parse_date("end_date", end)?;
                if start > end {
                    return Err("start_date tidak boleh setelah end_date".into());
                }
                Ok(ReportRange::Between { start, end })
            }
            _ => Ok(ReportRange::Today),
        }
    }

    pub fn bounds(&self, today: NaiveDate) -> (NaiveDate, NaiveDate) {
        match *self {
            ReportRange::Today => (today, today),
            ReportRange::Between { start, end } => (start, end),
        }
    }
}

/// Hitung total transaksi, pendapatan, dan produk terlaris dalam periode.
/// Returns `NoData` when the window holds no transaction.
pub async fn sales_report(pool: &SqlitePool, range: ReportRange) -> AppResult<SalesReport> {
    let (start, end) = range.bounds(Utc::now().date_naive());

    let (total_transactions, total_revenue): (i64, f64) = sqlx::query_as(
        "SELECT COUNT(id), COALESCE(SUM(total_price), 0.0)
         FROM transactions
         WHERE date(created_at) BETWEEN ? AND ?",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;

    if total_transactions == 0 {
        tracing::debug!(target: "report", %start, %end, "no transactions in window");
        return Err(AppError::NoData);
    }

    // Seri dipecah dengan product id terkecil supaya hasil deterministik.
    let best: Option<(i64, String, i64)> = sqlx::query_as(
        "SELECT p.id, p.name, SUM(td.quantity) AS qty_terjual
         FROM transaction_details td
         JOIN transactions t ON td.transaction_id = t.id
         JOIN products p ON td.product_id = p.id
         WHERE date(t.created_at) BETWEEN ? AND ?
         GROUP BY p.id, p.name
         ORDER BY qty_terjual DESC, p.id ASC
         LIMIT 1",
    )
    .bind(start)
    .bind(end)
    .fetch_optional(pool)
    .await?;

    Ok(SalesReport {
        total_revenue,
        total_transactions,
        best_selling_product: best.map(|(product_id, name, quantity)| BestSellingProduct {
            product_id,
            name,
            quantity,
        }),
    })
}
