//! Checkout: reserve stock for every line item, then record the transaction,
//! all inside one database transaction.

use chrono::{SubsecRound, Utc};
use sqlx::SqlitePool;

use crate::errors::{AppError, AppResult};
use crate::ledger;
use crate::models::transaction::{CheckoutItem, Transaction};
use crate::recorder::{self, DetailLine};
use crate::validation::validate_checkout_items;

/// Jalankan checkout secara all-or-nothing.
///
/// The write lock is taken at `BEGIN IMMEDIATE`, so concurrent checkouts wait
/// on the pool's busy timeout instead of failing on lock upgrade. Any early
/// return drops `tx`, which rolls back every decrement and insert made so far.
pub async fn checkout(pool: &SqlitePool, items: &[CheckoutItem]) -> AppResult<Transaction> {
    validate_checkout_items(items).map_err(AppError::Validation)?;

    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let mut total_price = 0.0_f64;
    let mut lines = Vec::with_capacity(items.len());

    for item in items {
        let product = ledger::reserve(&mut *tx, item.product_id, item.quantity).await?;

        let subtotal = product.price * item.quantity as f64;
        total_price += subtotal;

        tracing::debug!(
            target: "checkout",
            product_id = item.product_id,
            quantity = item.quantity,
            stock_before = product.stock,
            subtotal,
            "stock reserved"
        );

        lines.push(DetailLine {
            product_id: item.product_id,
            product_name: product.name,
            quantity: item.quantity,
            subtotal,
        });
    }

    let created_at = Utc::now().naive_utc().trunc_subsecs(0);
    let transaction_id = recorder::insert_header(&mut *tx, total_price, created_at).await?;
    let details = recorder::insert_details(&mut *tx, transaction_id, &lines).await?;

    tx.commit().await?;

    tracing::info!(
        target: "checkout",
        transaction_id,
        total_price,
        lines = details.len(),
        "checkout committed"
    );

    Ok(Transaction {
        id: transaction_id,
        total_price,
        created_at,
        details,
    })
}
