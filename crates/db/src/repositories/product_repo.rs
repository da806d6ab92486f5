//! Repository for products and their attribute values.

use pcbuild_core::types::{DbId, ProductId};
use sqlx::PgPool;

use crate::models::product::{ProductAttributeRow, ProductRow};

/// Column list for `products` queries (joined with `categories`).
const PRODUCT_COLUMNS: &str = "p.id, p.name, p.slug, c.slug AS category, p.price, p.image_url, \
     p.is_published, p.is_featured, p.stock, p.created_at";

/// Column list for `product_attributes` queries (joined with `attribute_types`).
const ATTRIBUTE_COLUMNS: &str =
    "pa.product_id, at.key, at.kind, pa.string_value, pa.number_value";

/// Provides catalog reads and attribute value writes.
pub struct ProductRepo;

impl ProductRepo {
    /// Fetch products by id. Unknown ids are absent from the result.
    pub async fn find_by_ids(
        pool: &PgPool,
        ids: &[ProductId],
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} \
             FROM products p \
             JOIN categories c ON c.id = p.category_id \
             WHERE p.id = ANY($1)"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Published, in-stock products of one category, featured first then
    /// newest, with `id` as the final tiebreak.
    pub async fn candidate_pool(
        pool: &PgPool,
        category_slug: &str,
        exclude_ids: &[ProductId],
        limit: i64,
    ) -> Result<Vec<ProductRow>, sqlx::Error> {
        let query = format!(
            "SELECT {PRODUCT_COLUMNS} \
             FROM products p \
             JOIN categories c ON c.id = p.category_id \
             WHERE c.slug = $1 \
               AND p.is_published \
               AND p.stock > 0 \
               AND NOT (p.id = ANY($2)) \
             ORDER BY p.is_featured DESC, p.created_at DESC, p.id ASC \
             LIMIT $3"
        );
        sqlx::query_as::<_, ProductRow>(&query)
            .bind(category_slug)
            .bind(exclude_ids)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// All attribute values of the given products, ordered by product then key.
    pub async fn attributes_for(
        pool: &PgPool,
        product_ids: &[ProductId],
    ) -> Result<Vec<ProductAttributeRow>, sqlx::Error> {
        let query = format!(
            "SELECT {ATTRIBUTE_COLUMNS} \
             FROM product_attributes pa \
             JOIN attribute_types at ON at.id = pa.attribute_type_id \
             WHERE pa.product_id = ANY($1) \
             ORDER BY pa.product_id, at.key"
        );
        sqlx::query_as::<_, ProductAttributeRow>(&query)
            .bind(product_ids)
            .fetch_all(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Insert or replace one attribute value of a product.
    ///
    /// Exactly one of `string_value` and `number_value` must be set; the
    /// table's check constraint rejects anything else.
    pub async fn upsert_attribute(
        pool: &PgPool,
        product_id: &str,
        attribute_type_id: DbId,
        string_value: Option<&str>,
        number_value: Option<f64>,
    ) -> Result<ProductAttributeRow, sqlx::Error> {
        let query = format!(
            "WITH upserted AS ( \
                INSERT INTO product_attributes \
                    (product_id, attribute_type_id, string_value, number_value) \
                VALUES ($1, $2, $3, $4) \
                ON CONFLICT (product_id, attribute_type_id) DO UPDATE SET \
                    string_value = EXCLUDED.string_value, \
                    number_value = EXCLUDED.number_value \
                RETURNING * \
             ) \
             SELECT {ATTRIBUTE_COLUMNS} \
             FROM upserted pa \
             JOIN attribute_types at ON at.id = pa.attribute_type_id"
        );
        sqlx::query_as::<_, ProductAttributeRow>(&query)
            .bind(product_id)
            .bind(attribute_type_id)
            .bind(string_value)
            .bind(number_value)
            .fetch_one(pool)
            .await
    }
}
