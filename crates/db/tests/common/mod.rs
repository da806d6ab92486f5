#![allow(dead_code)]

//! Catalog fixtures inserted directly with SQL.

use sqlx::PgPool;

/// Insert a product into the category with the given slug.
///
/// `minutes_ago` offsets `created_at` so smaller values are newer.
pub async fn insert_product(
    pool: &PgPool,
    id: &str,
    category: &str,
    published: bool,
    stock: i32,
    featured: bool,
    minutes_ago: i32,
) {
    sqlx::query(
        "INSERT INTO products \
             (id, category_id, name, slug, price, is_published, is_featured, stock, created_at) \
         SELECT $1, c.id, $1, $1, 1000000, $3, $4, $5, NOW() - make_interval(mins => $6) \
         FROM categories c WHERE c.slug = $2",
    )
    .bind(id)
    .bind(category)
    .bind(published)
    .bind(featured)
    .bind(stock)
    .bind(minutes_ago)
    .execute(pool)
    .await
    .unwrap_or_else(|e| panic!("insert product {id} failed: {e}"));
}

/// Insert an eligible, non-featured product.
pub async fn insert_listed(pool: &PgPool, id: &str, category: &str, minutes_ago: i32) {
    insert_product(pool, id, category, true, 5, false, minutes_ago).await;
}

pub async fn set_text(pool: &PgPool, product_id: &str, key: &str, value: &str) {
    sqlx::query(
        "INSERT INTO product_attributes (product_id, attribute_type_id, string_value) \
         SELECT $1, id, $3 FROM attribute_types WHERE key = $2",
    )
    .bind(product_id)
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .unwrap_or_else(|e| panic!("set {key} on {product_id} failed: {e}"));
}

pub async fn set_number(pool: &PgPool, product_id: &str, key: &str, value: f64) {
    sqlx::query(
        "INSERT INTO product_attributes (product_id, attribute_type_id, number_value) \
         SELECT $1, id, $3 FROM attribute_types WHERE key = $2",
    )
    .bind(product_id)
    .bind(key)
    .bind(value)
    .execute(pool)
    .await
    .unwrap_or_else(|e| panic!("set {key} on {product_id} failed: {e}"));
}

/// Id of a seeded attribute type.
pub async fn attribute_type_id(pool: &PgPool, key: &str) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT id FROM attribute_types WHERE key = $1")
        .bind(key)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("attribute type {key} missing: {e}"));
    row.0
}

/// Id of a seeded category.
pub async fn category_id(pool: &PgPool, slug: &str) -> i64 {
    let row: (i64,) = sqlx::query_as("SELECT id FROM categories WHERE slug = $1")
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| panic!("category {slug} missing: {e}"));
    row.0
}
