use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub category: Category,
}

/// Product dengan kolom kategori (JOIN result).
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductWithCategory {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: i64,
    pub category_name: String,
    pub category_description: String,
}

impl From<ProductWithCategory> for Product {
    fn from(row: ProductWithCategory) -> Self {
        Product {
            id: row.id,
            name: row.name,
            price: row.price,
            stock: row.stock,
            category: Category {
                id: row.category_id,
                category: row.category_name,
                description: row.category_description,
            },
        }
    }
}

/// Payload create/update produk.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub category_id: i64,
}

/// Payload create/update kategori.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryInput {
    pub category: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQuery {
    pub name: Option<String>,
}
