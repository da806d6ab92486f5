//! In-memory [`CatalogStore`] for fixtures and tests.
//!
//! Mirrors the ordering and eligibility semantics of the PostgreSQL store so
//! the same expectations hold against either backend.

use std::sync::RwLock;

use async_trait::async_trait;

use super::{AttributeValue, CatalogStore, Component, ComponentAttribute};
use crate::compatibility::rules::CompatibilityRule;
use crate::error::CoreError;
use crate::types::ProductId;

/// A catalog held entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    components: RwLock<Vec<Component>>,
    rules: RwLock<Vec<CompatibilityRule>>,
}

impl InMemoryCatalog {
    pub fn new(components: Vec<Component>, rules: Vec<CompatibilityRule>) -> Self {
        Self {
            components: RwLock::new(components),
            rules: RwLock::new(rules),
        }
    }

    /// Insert or replace one attribute value on an existing component.
    pub fn set_attribute(
        &self,
        product_id: &str,
        key: &str,
        value: AttributeValue,
    ) -> Result<(), CoreError> {
        let mut components = self.components.write().map_err(|_| poisoned())?;
        let component = components
            .iter_mut()
            .find(|c| c.id == product_id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Product",
                id: product_id.to_string(),
            })?;

        match component.attributes.iter_mut().find(|a| a.key == key) {
            Some(existing) => existing.value = value,
            None => component.attributes.push(ComponentAttribute {
                key: key.to_string(),
                value,
            }),
        }
        Ok(())
    }
}

fn poisoned() -> CoreError {
    CoreError::Internal("in-memory catalog lock poisoned".to_string())
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn components_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Component>, CoreError> {
        let components = self.components.read().map_err(|_| poisoned())?;
        Ok(components
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    async fn candidate_pool(
        &self,
        category_slug: &str,
        exclude_ids: &[ProductId],
        limit: usize,
    ) -> Result<Vec<Component>, CoreError> {
        let components = self.components.read().map_err(|_| poisoned())?;
        let mut pool: Vec<Component> = components
            .iter()
            .filter(|c| c.category == category_slug)
            .filter(|c| c.is_eligible_for_builder())
            .filter(|c| !exclude_ids.contains(&c.id))
            .cloned()
            .collect();

        pool.sort_by(|a, b| {
            b.is_featured
                .cmp(&a.is_featured)
                .then_with(|| b.created_at.cmp(&a.created_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        pool.truncate(limit);
        Ok(pool)
    }

    async fn compatibility_rules(
        &self,
        category_slugs: &[String],
    ) -> Result<Vec<CompatibilityRule>, CoreError> {
        let in_scope = |category: &Option<String>| match category {
            None => true,
            Some(slug) => category_slugs.contains(slug),
        };
        let rules = self.rules.read().map_err(|_| poisoned())?;
        Ok(rules
            .iter()
            .filter(|r| in_scope(&r.left_category) && in_scope(&r.right_category))
            .cloned()
            .collect())
    }
}
