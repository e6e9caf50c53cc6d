use sqlx::SqlitePool;

/// Menjalankan semua migrasi database (CREATE TABLE IF NOT EXISTS).
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // ═══════════════════════════════════════
    // TABLE: categories
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS categories (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            category    TEXT    NOT NULL UNIQUE,
            description TEXT    NOT NULL DEFAULT ''
        )",
    )
    .execute(pool)
    .await?;

    // ═══════════════════════════════════════
    // TABLE: products
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS products (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT    NOT NULL,
            price       REAL    NOT NULL CHECK(price >= 0),
            stock       INTEGER NOT NULL DEFAULT 0 CHECK(stock >= 0),
            category_id INTEGER NOT NULL REFERENCES categories(id)
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id)")
        .execute(pool)
        .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_products_name ON products(name)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: transactions
    // ═══════════════════════════════════════
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS transactions (
            id          INTEGER  PRIMARY KEY AUTOINCREMENT,
            total_price REAL     NOT NULL CHECK(total_price >= 0),
            created_at  DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_transactions_created_at ON transactions(created_at)")
        .execute(pool)
        .await?;

    // ═══════════════════════════════════════
    // TABLE: transaction_details
    // ═══════════════════════════════════════
    // product_name adalah snapshot nama saat penjualan.
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS transaction_details (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            transaction_id INTEGER NOT NULL REFERENCES transactions(id) ON DELETE CASCADE,
            product_id     INTEGER NOT NULL REFERENCES products(id),
            product_name   TEXT    NOT NULL,
            quantity       INTEGER NOT NULL CHECK(quantity > 0),
            subtotal       REAL    NOT NULL
        )",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_tx_details_transaction ON transaction_details(transaction_id)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_tx_details_product ON transaction_details(product_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
