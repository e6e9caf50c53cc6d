//! Input validation module
//!
//! Centralized validation for:
//! - Product & category input
//! - Financial data (amounts, quantities)
//! - Checkout line items
//! - Report date parameters

use chrono::NaiveDate;

use crate::models::product::{CategoryInput, ProductInput};
use crate::models::transaction::CheckoutItem;

/// Validation result type
pub type ValidationResult = Result<(), String>;

/// Batas jumlah baris per checkout.
pub const MAX_CHECKOUT_ITEMS: usize = 500;

/// Validate product name
pub fn validate_product_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Nama produk tidak boleh kosong".into());
    }

    if trimmed.chars().count() > 200 {
        return Err("Nama produk maksimal 200 karakter".into());
    }

    Ok(())
}

/// Validate category name
pub fn validate_category_name(name: &str) -> ValidationResult {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Nama kategori tidak boleh kosong".into());
    }

    if trimmed.chars().count() > 100 {
        return Err("Nama kategori maksimal 100 karakter".into());
    }

    Ok(())
}

pub fn validate_description(description: &str) -> ValidationResult {
    if description.chars().count() > 500 {
        return Err("Deskripsi terlalu panjang (max 500 karakter)".into());
    }
    Ok(())
}

/// Validate monetary amount
/// - Must be finite and not below `min` (default 0)
/// - Maximum: 1 trillion
pub fn validate_amount(amount: f64, min: Option<f64>) -> ValidationResult {
    if amount.is_nan() || amount.is_infinite() {
        return Err("Harga tidak valid".into());
    }

    let min_val = min.unwrap_or(0.0);
    if amount < min_val {
        return Err(format!("Harga minimal {}", min_val));
    }

    if amount > 1_000_000_000_000.0 {
        return Err("Harga terlalu besar".into());
    }

    Ok(())
}

/// Validate quantity (stock or checkout quantity)
pub fn validate_quantity(qty: i64, min: i64) -> ValidationResult {
    if qty < min {
        return Err(format!("Jumlah minimal {}", min));
    }

    if qty > 1_000_000 {
        return Err("Jumlah maksimal 1000000".into());
    }

    Ok(())
}

pub fn validate_product_input(input: &ProductInput) -> ValidationResult {
    validate_product_name(&input.name)?;
    validate_amount(input.price, None)?;
    validate_quantity(input.stock, 0).map_err(|e| format!("Stok tidak valid: {}", e))?;

    if input.category_id <= 0 {
        return Err("category_id tidak valid".into());
    }

    Ok(())
}

pub fn validate_category_input(input: &CategoryInput) -> ValidationResult {
    validate_category_name(&input.category)?;
    validate_description(&input.description)
}

/// Validate checkout line items. An empty cart is rejected.
pub fn validate_checkout_items(items: &[CheckoutItem]) -> ValidationResult {
    if items.is_empty() {
        return Err("Keranjang kosong".into());
    }

    if items.len() > MAX_CHECKOUT_ITEMS {
        return Err(format!("Maksimal {} item per checkout", MAX_CHECKOUT_ITEMS));
    }

    for (idx, item) in items.iter().enumerate() {
        if item.product_id <= 0 {
            return Err(format!("Item #{}: product_id tidak valid", idx + 1));
        }
        validate_quantity(item.quantity, 1)
            .map_err(|e| format!("Item #{} (produk id {}): {}", idx + 1, item.product_id, e))?;
    }

    Ok(())
}

/// Parse tanggal ISO (`YYYY-MM-DD`).
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| format!("{} harus berformat YYYY-MM-DD", field))
}
