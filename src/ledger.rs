//! Stock ledger: per-product stock reads and the conditional decrement used by
//! checkout. Every function runs on the connection of an open unit of work.

use sqlx::SqliteConnection;

use crate::errors::{AppError, AppResult};

/// Nama, harga dan stok produk pada saat dibaca di dalam transaksi.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct StockSnapshot {
    pub name: String,
    pub price: f64,
    pub stock: i64,
}

pub async fn read_stock(conn: &mut SqliteConnection, product_id: i64) -> AppResult<StockSnapshot> {
    sqlx::query_as::<_, StockSnapshot>("SELECT name, price, stock FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Produk id {} tidak ditemukan", product_id)))
}

/// `stock = stock - quantity` hanya jika `stock >= quantity`, dalam satu statement.
/// Returns the number of rows affected (0 or 1).
pub async fn decrement_stock(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE products SET stock = stock - ? WHERE id = ? AND stock >= ?")
        .bind(quantity)
        .bind(product_id)
        .bind(quantity)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected())
}

/// Read the product and take `quantity` units from its stock.
///
/// The read establishes existence (`NotFound`); the guarded update is what
/// actually protects against overselling. If it touches no row the product
/// existed a moment ago, so the outcome is `InsufficientStock`.
pub async fn reserve(
    conn: &mut SqliteConnection,
    product_id: i64,
    quantity: i64,
) -> AppResult<StockSnapshot> {
    let snapshot = read_stock(conn, product_id).await?;

    if decrement_stock(conn, product_id, quantity).await? == 0 {
        return Err(AppError::InsufficientStock {
            product_id,
            requested: quantity,
            available: snapshot.stock,
        });
    }

    Ok(snapshot)
}
