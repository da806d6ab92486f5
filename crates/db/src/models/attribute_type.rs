use pcbuild_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `attribute_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttributeTypeRow {
    pub id: DbId,
    pub key: String,
    pub label: String,
    /// `STRING` or `NUMBER`.
    pub kind: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
