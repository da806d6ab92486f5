//! Repository for the `attribute_types` table.

use pcbuild_core::types::DbId;
use sqlx::PgPool;

use crate::models::attribute_type::AttributeTypeRow;

const COLUMNS: &str = "id, key, label, kind, created_at, updated_at";

/// Read access to attribute type definitions.
pub struct AttributeTypeRepo;

impl AttributeTypeRepo {
    /// List all attribute types, ordered by key.
    pub async fn list(pool: &PgPool) -> Result<Vec<AttributeTypeRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attribute_types ORDER BY key");
        sqlx::query_as::<_, AttributeTypeRow>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AttributeTypeRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attribute_types WHERE id = $1");
        sqlx::query_as::<_, AttributeTypeRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_key(
        pool: &PgPool,
        key: &str,
    ) -> Result<Option<AttributeTypeRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attribute_types WHERE key = $1");
        sqlx::query_as::<_, AttributeTypeRow>(&query)
            .bind(key)
            .fetch_optional(pool)
            .await
    }
}
