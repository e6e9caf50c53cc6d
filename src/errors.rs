use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Autentikasi gagal: {0}")]
    Auth(String),

    #[error("Data tidak ditemukan: {0}")]
    NotFound(String),

    #[error("Stok tidak cukup untuk produk id {product_id} (diminta {requested}, tersedia {available})")]
    InsufficientStock {
        product_id: i64,
        requested: i64,
        available: i64,
    },

    #[error("Validasi gagal: {0}")]
    Validation(String),

    #[error("Konflik data: {0}")]
    Conflict(String),

    #[error("Tidak ada transaksi pada periode tersebut")]
    NoData,
}

/// Extended code SQLite memakai untuk FK `ON DELETE RESTRICT`; sqlx tidak
/// menganggapnya foreign-key violation.
const SQLITE_CONSTRAINT_TRIGGER: &str = "1811";

impl AppError {
    /// Map constraint violations from CRUD writes to client errors; everything
    /// else stays a persistence failure.
    pub fn from_write(err: sqlx::Error, conflict_msg: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err)
                if db_err.is_unique_violation()
                    || db_err.is_foreign_key_violation()
                    || db_err.code().as_deref() == Some(SQLITE_CONSTRAINT_TRIGGER) =>
            {
                AppError::Conflict(conflict_msg.to_string())
            }
            _ => AppError::Database(err),
        }
    }

    /// Message yang aman untuk dikirim ke client. Detail error database hanya masuk log.
    pub fn public_message(&self) -> String {
        match self {
            AppError::Database(_) => {
                "Terjadi kesalahan internal. Silakan hubungi administrator.".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InsufficientStock { .. } | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::NoData => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(target: "http", error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "error": self.public_message()
        }))
    }
}

pub type AppResult<T> = Result<T, AppError>;
