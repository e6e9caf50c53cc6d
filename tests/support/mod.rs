#![allow(dead_code)]

use std::path::PathBuf;

use kasir_api::config::{DatabaseConfig, Environment};
use kasir_api::database::connection::init_db;
use kasir_api::AppState;
use sqlx::SqlitePool;
use uuid::Uuid;

pub const API_KEY: &str = "test-api-key";

/// Database file baru per test, dihapus saat `TestDb` di-drop.
pub struct TestDb {
    pub pool: SqlitePool,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn init_test_db() -> TestDb {
    let path = std::env::temp_dir().join(format!("kasir_test_{}.db", Uuid::new_v4()));
    let config = DatabaseConfig {
        url: format!("sqlite:{}?mode=rwc", path.display()),
        max_connections: 4,
        min_connections: 1,
        busy_timeout_secs: 10,
        ..DatabaseConfig::default()
    };

    let pool = init_db(&config).await.expect("init test db");
    TestDb { pool, path }
}

pub fn build_state(pool: SqlitePool, api_key: Option<&str>) -> AppState {
    AppState {
        db: pool,
        api_key: api_key.map(String::from),
        environment: Environment::Development,
    }
}

pub async fn seed_category(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO categories (category, description) VALUES (?, ?)")
        .bind(name)
        .bind(format!("Kategori {name}"))
        .execute(pool)
        .await
        .expect("insert category")
        .last_insert_rowid()
}

pub async fn seed_product(
    pool: &SqlitePool,
    category_id: i64,
    name: &str,
    price: f64,
    stock: i64,
) -> i64 {
    sqlx::query("INSERT INTO products (name, price, stock, category_id) VALUES (?, ?, ?, ?)")
        .bind(name)
        .bind(price)
        .bind(stock)
        .bind(category_id)
        .execute(pool)
        .await
        .expect("insert product")
        .last_insert_rowid()
}

pub async fn stock_of(pool: &SqlitePool, product_id: i64) -> i64 {
    let (stock,): (i64,) = sqlx::query_as("SELECT stock FROM products WHERE id = ?")
        .bind(product_id)
        .fetch_one(pool)
        .await
        .expect("select stock");
    stock
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("count rows");
    count
}
