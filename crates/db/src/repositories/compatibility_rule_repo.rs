//! Repository for compatibility rules.

use pcbuild_core::types::DbId;
use sqlx::PgPool;

use crate::models::compatibility_rule::{
    CompatibilityRuleRow, CreateCompatibilityRule, UpdateCompatibilityRule,
};

/// Column list for `compatibility_rules` queries (joined with categories and
/// attribute types on both sides).
const RULE_COLUMNS: &str = "cr.id, \
     cr.left_category_id, lc.slug AS left_category, \
     cr.left_attribute_type_id, la.key AS left_attribute, \
     cr.right_category_id, rc.slug AS right_category, \
     cr.right_attribute_type_id, ra.key AS right_attribute, \
     cr.operator, cr.note, cr.created_at, cr.updated_at";

/// Joins resolving slugs and keys. Category sides are nullable (wildcards),
/// as is the right attribute.
const RULE_JOINS: &str = "LEFT JOIN categories lc ON lc.id = cr.left_category_id \
     JOIN attribute_types la ON la.id = cr.left_attribute_type_id \
     LEFT JOIN categories rc ON rc.id = cr.right_category_id \
     LEFT JOIN attribute_types ra ON ra.id = cr.right_attribute_type_id";

/// Provides CRUD operations for compatibility rules.
pub struct CompatibilityRuleRepo;

impl CompatibilityRuleRepo {
    /// Rules whose categories are each a wildcard or one of `category_slugs`,
    /// ordered by id.
    pub async fn list_for_categories(
        pool: &PgPool,
        category_slugs: &[String],
    ) -> Result<Vec<CompatibilityRuleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {RULE_COLUMNS} \
             FROM compatibility_rules cr \
             {RULE_JOINS} \
             WHERE (cr.left_category_id IS NULL OR lc.slug = ANY($1)) \
               AND (cr.right_category_id IS NULL OR rc.slug = ANY($1)) \
             ORDER BY cr.id"
        );
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .bind(category_slugs)
            .fetch_all(pool)
            .await
    }

    /// List every rule, ordered by id.
    pub async fn list(pool: &PgPool) -> Result<Vec<CompatibilityRuleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {RULE_COLUMNS} FROM compatibility_rules cr {RULE_JOINS} ORDER BY cr.id"
        );
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<CompatibilityRuleRow>, sqlx::Error> {
        let query = format!(
            "SELECT {RULE_COLUMNS} FROM compatibility_rules cr {RULE_JOINS} WHERE cr.id = $1"
        );
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create a rule, returning the inserted row with slugs and keys resolved.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCompatibilityRule,
    ) -> Result<CompatibilityRuleRow, sqlx::Error> {
        let query = format!(
            "WITH inserted AS ( \
                INSERT INTO compatibility_rules \
                    (left_category_id, left_attribute_type_id, right_category_id, \
                     right_attribute_type_id, operator, note) \
                VALUES ($1, $2, $3, $4, $5, $6) \
                RETURNING * \
             ) \
             SELECT {RULE_COLUMNS} \
             FROM inserted cr \
             {RULE_JOINS}"
        );
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .bind(input.left_category_id)
            .bind(input.left_attribute_type_id)
            .bind(input.right_category_id)
            .bind(input.right_attribute_type_id)
            .bind(&input.operator)
            .bind(&input.note)
            .fetch_one(pool)
            .await
    }

    /// Update a rule. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompatibilityRule,
    ) -> Result<Option<CompatibilityRuleRow>, sqlx::Error> {
        let query = format!(
            "WITH updated AS ( \
                UPDATE compatibility_rules SET \
                    operator = COALESCE($2, operator), \
                    note = COALESCE($3, note) \
                WHERE id = $1 \
                RETURNING * \
             ) \
             SELECT {RULE_COLUMNS} \
             FROM updated cr \
             {RULE_JOINS}"
        );
        sqlx::query_as::<_, CompatibilityRuleRow>(&query)
            .bind(id)
            .bind(&input.operator)
            .bind(&input.note)
            .fetch_optional(pool)
            .await
    }

    /// Delete a rule by id. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM compatibility_rules WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
