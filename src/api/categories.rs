use actix_web::{web, HttpResponse};

use crate::errors::{AppError, AppResult};
use crate::models::product::{Category, CategoryInput};
use crate::validation::validate_category_input;
use crate::AppState;

fn not_found(id: i64) -> AppError {
    AppError::NotFound(format!("Kategori id {} tidak ditemukan", id))
}

pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, category, description FROM categories ORDER BY id ASC",
    )
    .fetch_all(&state.db)
    .await?;

    Ok(HttpResponse::Ok().json(categories))
}

pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let category = sqlx::query_as::<_, Category>(
        "SELECT id, category, description FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(category))
}

/// Tambah kategori baru
pub async fn create_category(
    state: web::Data<AppState>,
    payload: web::Json<CategoryInput>,
) -> AppResult<HttpResponse> {
    let input = payload.into_inner();
    validate_category_input(&input).map_err(AppError::Validation)?;

    let name = input.category.trim().to_string();
    let description = input.description.trim().to_string();

    let result = sqlx::query("INSERT INTO categories (category, description) VALUES (?, ?)")
        .bind(&name)
        .bind(&description)
        .execute(&state.db)
        .await
        .map_err(|e| AppError::from_write(e, "Kategori sudah ada"))?;

    Ok(HttpResponse::Created().json(Category {
        id: result.last_insert_rowid(),
        category: name,
        description,
    }))
}

pub async fn update_category(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    payload: web::Json<CategoryInput>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let input = payload.into_inner();
    validate_category_input(&input).map_err(AppError::Validation)?;

    let name = input.category.trim().to_string();
    let description = input.description.trim().to_string();

    let result = sqlx::query("UPDATE categories SET category = ?, description = ? WHERE id = ?")
        .bind(&name)
        .bind(&description)
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| AppError::from_write(e, "Kategori sudah ada"))?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    Ok(HttpResponse::Ok().json(Category {
        id,
        category: name,
        description,
    }))
}

/// Hapus kategori. Kategori yang masih dipakai produk tidak bisa dihapus.
pub async fn delete_category(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(&state.db)
        .await
        .map_err(|e| AppError::from_write(e, "Kategori masih dipakai oleh produk"))?;

    if result.rows_affected() == 0 {
        return Err(not_found(id));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Kategori berhasil dihapus" })))
}
