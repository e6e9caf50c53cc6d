use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Transaksi hasil checkout. `created_at` dalam UTC.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub total_price: f64,
    pub created_at: NaiveDateTime,
    pub details: Vec<TransactionDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutRequest {
    pub items: Vec<CheckoutItem>,
}

/// Ringkasan penjualan untuk satu periode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub total_revenue: f64,
    #[serde(rename = "total_transaksi")]
    pub total_transactions: i64,
    #[serde(rename = "produk_terlaris")]
    pub best_selling_product: Option<BestSellingProduct>,
}

impl SalesReport {
    /// Laporan kosong: dipakai HTTP layer saat periode tidak punya transaksi.
    pub fn empty() -> Self {
        SalesReport {
            total_revenue: 0.0,
            total_transactions: 0,
            best_selling_product: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestSellingProduct {
    #[serde(skip_serializing)]
    #[serde(default)]
    pub product_id: i64,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "qty_terjual")]
    pub quantity: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
