//! Product rows and their attribute values.

use pcbuild_core::types::{ProductId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `products` table, joined with the category slug.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductRow {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Populated from `categories.slug` via JOIN.
    pub category: String,
    pub price: i64,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub stock: i32,
    pub created_at: Timestamp,
}

/// One `product_attributes` row joined with its attribute type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductAttributeRow {
    pub product_id: ProductId,
    pub key: String,
    pub kind: String,
    pub string_value: Option<String>,
    pub number_value: Option<f64>,
}
