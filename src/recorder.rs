//! Transaction recorder: writes the transaction header and its detail rows,
//! and reads a stored transaction back.

use chrono::NaiveDateTime;
use sqlx::{SqliteConnection, SqlitePool};

use crate::models::transaction::{Transaction, TransactionDetail};

/// Satu baris detail yang belum tersimpan.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: f64,
}

/// Insert the header and return its generated id.
pub async fn insert_header(
    conn: &mut SqliteConnection,
    total_price: f64,
    created_at: NaiveDateTime,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO transactions (total_price, created_at) VALUES (?, ?)")
        .bind(total_price)
        .bind(created_at)
        .execute(&mut *conn)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Insert every line against `transaction_id`, keeping input order.
pub async fn insert_details(
    conn: &mut SqliteConnection,
    transaction_id: i64,
    lines: &[DetailLine],
) -> Result<Vec<TransactionDetail>, sqlx::Error> {
    let mut details = Vec::with_capacity(lines.len());

    for line in lines {
        let result = sqlx::query(
            "INSERT INTO transaction_details (transaction_id, product_id, product_name, quantity, subtotal)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(transaction_id)
        .bind(line.product_id)
        .bind(&line.product_name)
        .bind(line.quantity)
        .bind(line.subtotal)
        .execute(&mut *conn)
        .await?;

        details.push(TransactionDetail {
            id: result.last_insert_rowid(),
            transaction_id,
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            quantity: line.quantity,
            subtotal: line.subtotal,
        });
    }

    Ok(details)
}

/// Ambil satu transaksi beserta detailnya.
pub async fn find_transaction(
    pool: &SqlitePool,
    transaction_id: i64,
) -> Result<Option<Transaction>, sqlx::Error> {
    let header: Option<(i64, f64, NaiveDateTime)> =
        sqlx::query_as("SELECT id, total_price, created_at FROM transactions WHERE id = ?")
            .bind(transaction_id)
            .fetch_optional(pool)
            .await?;

    let Some((id, total_price, created_at)) = header else {
        return Ok(None);
    };

    let details = sqlx::query_as::<_, TransactionDetail>(
        "SELECT id, transaction_id, product_id, product_name, quantity, subtotal
         FROM transaction_details
         WHERE transaction_id = ?
         ORDER BY id ASC",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(Some(Transaction {
        id,
        total_price,
        created_at,
        details,
    }))
}
