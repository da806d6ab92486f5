//! [`CatalogStore`] backed by Postgres.

use std::collections::HashMap;

use async_trait::async_trait;
use pcbuild_core::catalog::{
    AttributeKind, AttributeValue, CatalogStore, Component, ComponentAttribute,
};
use pcbuild_core::compatibility::rules::{CompatibilityRule, Operator};
use pcbuild_core::error::CoreError;
use pcbuild_core::types::ProductId;
use sqlx::PgPool;

use crate::models::compatibility_rule::CompatibilityRuleRow;
use crate::models::product::{ProductAttributeRow, ProductRow};
use crate::repositories::{CompatibilityRuleRepo, ProductRepo};

/// Reads catalog data fresh from the database on every call.
#[derive(Debug, Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach attribute values to product rows, preserving row order.
    async fn hydrate(&self, rows: Vec<ProductRow>) -> Result<Vec<Component>, CoreError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<ProductId> = rows.iter().map(|r| r.id.clone()).collect();
        let attribute_rows = ProductRepo::attributes_for(&self.pool, &ids)
            .await
            .map_err(query_failed)?;

        let mut attributes: HashMap<ProductId, Vec<ComponentAttribute>> = HashMap::new();
        for row in attribute_rows {
            if let Some((product_id, attribute)) = attribute_from_row(row) {
                attributes.entry(product_id).or_default().push(attribute);
            }
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let attrs = attributes.remove(&row.id).unwrap_or_default();
                component_from_row(row, attrs)
            })
            .collect())
    }
}

#[async_trait]
impl CatalogStore for PgCatalog {
    async fn components_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Component>, CoreError> {
        let rows = ProductRepo::find_by_ids(&self.pool, ids)
            .await
            .map_err(query_failed)?;
        self.hydrate(rows).await
    }

    async fn candidate_pool(
        &self,
        category_slug: &str,
        exclude_ids: &[ProductId],
        limit: usize,
    ) -> Result<Vec<Component>, CoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = ProductRepo::candidate_pool(&self.pool, category_slug, exclude_ids, limit)
            .await
            .map_err(query_failed)?;
        self.hydrate(rows).await
    }

    async fn compatibility_rules(
        &self,
        category_slugs: &[String],
    ) -> Result<Vec<CompatibilityRule>, CoreError> {
        let rows = CompatibilityRuleRepo::list_for_categories(&self.pool, category_slugs)
            .await
            .map_err(query_failed)?;
        Ok(rows.into_iter().filter_map(rule_from_row).collect())
    }
}

fn query_failed(err: sqlx::Error) -> CoreError {
    tracing::error!(error = %err, "Catalog query failed");
    CoreError::Internal(format!("Catalog query failed: {err}"))
}

fn component_from_row(row: ProductRow, attributes: Vec<ComponentAttribute>) -> Component {
    Component {
        id: row.id,
        name: row.name,
        slug: row.slug,
        category: row.category,
        price: row.price,
        image_url: row.image_url,
        is_published: row.is_published,
        is_featured: row.is_featured,
        stock: row.stock,
        created_at: row.created_at,
        attributes,
    }
}

/// Convert one attribute row, dropping values that do not match their
/// declared kind. A dropped value reads as absent to the evaluator.
fn attribute_from_row(row: ProductAttributeRow) -> Option<(ProductId, ComponentAttribute)> {
    let value = match AttributeValue::from_columns(row.string_value, row.number_value) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(
                product_id = %row.product_id,
                key = %row.key,
                error = %err,
                "Skipping malformed attribute value"
            );
            return None;
        }
    };
    match AttributeKind::from_name(&row.kind) {
        Ok(kind) if kind == value.kind() => {}
        _ => {
            tracing::warn!(
                product_id = %row.product_id,
                key = %row.key,
                declared = %row.kind,
                "Skipping attribute value of the wrong kind",
            );
            return None;
        }
    }
    Some((
        row.product_id,
        ComponentAttribute {
            key: row.key,
            value,
        },
    ))
}

/// Convert a stored rule. Rules with an unknown operator are skipped.
pub fn rule_from_row(row: CompatibilityRuleRow) -> Option<CompatibilityRule> {
    let operator = match Operator::from_name(&row.operator) {
        Ok(op) => op,
        Err(err) => {
            tracing::warn!(rule_id = row.id, error = %err, "Skipping rule with unknown operator");
            return None;
        }
    };
    Some(CompatibilityRule {
        id: row.id,
        left_category: row.left_category,
        left_attribute: row.left_attribute,
        right_category: row.right_category,
        right_attribute: row.right_attribute,
        operator,
        note: row.note,
    })
}
