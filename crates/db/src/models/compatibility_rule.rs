//! Compatibility rule rows and admin DTOs.

use pcbuild_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from `compatibility_rules`, joined with category slugs and
/// attribute keys. Wildcard categories and a missing right attribute come
/// back as `NULL`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CompatibilityRuleRow {
    pub id: DbId,
    pub left_category_id: Option<DbId>,
    pub left_category: Option<String>,
    pub left_attribute_type_id: DbId,
    pub left_attribute: String,
    pub right_category_id: Option<DbId>,
    pub right_category: Option<String>,
    pub right_attribute_type_id: Option<DbId>,
    pub right_attribute: Option<String>,
    pub operator: String,
    pub note: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a compatibility rule.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompatibilityRule {
    pub left_category_id: Option<DbId>,
    pub left_attribute_type_id: DbId,
    pub right_category_id: Option<DbId>,
    pub right_attribute_type_id: Option<DbId>,
    pub operator: String,
    pub note: Option<String>,
}

/// DTO for updating a compatibility rule. Only the operator and note change;
/// a rule pointing at different attributes is a new rule.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCompatibilityRule {
    pub operator: Option<String>,
    pub note: Option<String>,
}
