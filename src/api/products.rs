use actix_web::{web, HttpResponse};
use sqlx::SqlitePool;

use crate::errors::{AppError, AppResult};
use crate::models::product::{Product, ProductInput, ProductQuery, ProductWithCategory};
use crate::validation::validate_product_input;
use crate::AppState;

const PRODUCT_SELECT: &str = "
    SELECT p.id, p.name, p.price, p.stock,
           c.id AS category_id, c.category AS category_name, c.description AS category_description
    FROM products p
    JOIN categories c ON p.category_id = c.id
";

async fn fetch_product(pool: &SqlitePool, id: i64) -> AppResult<Product> {
    let query = format!("{} WHERE p.id = ?", PRODUCT_SELECT);

    sqlx::query_as::<_, ProductWithCategory>(&query)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Product::from)
        .ok_or_else(|| AppError::NotFound(format!("Produk id {} tidak ditemukan", id)))
}

async fn ensure_category(pool: &SqlitePool, category_id: i64) -> AppResult<()> {
    let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM categories WHERE id = ?")
        .bind(category_id)
        .fetch_optional(pool)
        .await?;

    match exists {
        Some(_) => Ok(()),
        None => Err(AppError::Validation(format!(
            "Kategori id {} tidak ditemukan",
            category_id
        ))),
    }
}

/// Ambil daftar produk, bisa difilter by nama (case-insensitive).
pub async fn list_products(
    state: web::Data<AppState>,
    query: web::Query<ProductQuery>,
) -> AppResult<HttpResponse> {
    let term = query
        .name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s.to_lowercase()));

    let mut sql = PRODUCT_SELECT.to_string();
    if term.is_some() {
        sql.push_str(" WHERE LOWER(p.name) LIKE ?");
    }
    sql.push_str(" ORDER BY p.id ASC");

    let mut q = sqlx::query_as::<_, ProductWithCategory>(&sql);
    if let Some(term) = term {
        q = q.bind(term);
    }

    let products: Vec<Product> = q
        .fetch_all(&state.db)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(HttpResponse::Ok().json(products))
}

pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let product = fetch_product(&state.db, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Buat produk baru
pub async fn create_product(
    state: web::Data<AppState>,
    payload: web::Json<ProductInput>,
) -> AppResult<HttpResponse> {
    let input = payload.into_inner();
    validate_product_input(&input).map_err(AppError::Validation)?;
    ensure_category(&state.db, input.category_id).await?;

    let result = sqlx::query("INSERT INTO products (name, price, stock, category_id) VALUES (?, ?, ?, ?)")
        .bind(input.name.trim())
        .bind(input.price)
        .bind(input.stock)
        .bind(input.category_id)
        .execute(&state.db)
        .await
        .map_err(|e| AppError::from_write(e, "Kategori produk tidak valid"))?;

    let product = fetch_product(&state.db, result.last_insert_rowid()).await?;
    tracing::info!(target: "http", product_id = product.id, "product created");

    Ok(HttpResponse::Created().json(product))
}

pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<ProductInput>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let input = payload.into_inner();
    validate_product_input(&input).map_err(AppError::Validation)?;
    ensure_category(&state.db, input.category_id).await?;

    let result = sqlx::query(
        "UPDATE products SET name = ?, price = ?, stock = ?, category_id = ? WHERE id = ?",
    )
    .bind(input.name.trim())
    .bind(input.price)
    .bind(input.stock)
    .bind(input.category_id)
    .bind(id)
    .execute(&state.db)
    .await
    .map_err(|e| AppError::from_write(e, "Kategori produk tidak valid"))?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Produk id {} tidak ditemukan", id)));
    }

    let product = fetch_product(&state.db, id).await?;
    Ok(HttpResponse::Ok().json(product))
}

/// Hapus produk. Produk yang sudah tercatat di transaksi tidak bisa dihapus.
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| {
            AppError::from_write(e, "Produk sudah tercatat di transaksi dan tidak bisa dihapus")
        })?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Produk id {} tidak ditemukan", id)));
    }

    tracing::info!(target: "http", product_id = id, "product deleted");
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Produk berhasil dihapus" })))
}
