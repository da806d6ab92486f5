//! Catalog data model and the store seam the compatibility core reads from.
//!
//! The core never talks to a database directly. Everything it needs is
//! fetched through [`CatalogStore`], once per operation, and then evaluated
//! in memory.

pub mod memory;

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::compatibility::rules::CompatibilityRule;
use crate::error::CoreError;
use crate::types::{ProductId, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const CATEGORY_CPU: &str = "cpu";
pub const CATEGORY_MAINBOARD: &str = "mainboard";
pub const CATEGORY_GPU: &str = "gpu";
pub const CATEGORY_RAM: &str = "ram";
pub const CATEGORY_PSU: &str = "psu";
pub const CATEGORY_CASE: &str = "case";
pub const CATEGORY_STORAGE: &str = "storage";
pub const CATEGORY_COOLER: &str = "cooler";

/// The fixed set of categories the PC builder fills, in display order.
pub const BUILDER_CATEGORIES: [&str; 8] = [
    CATEGORY_CPU,
    CATEGORY_MAINBOARD,
    CATEGORY_GPU,
    CATEGORY_RAM,
    CATEGORY_PSU,
    CATEGORY_CASE,
    CATEGORY_STORAGE,
    CATEGORY_COOLER,
];

// ---------------------------------------------------------------------------
// Attribute kinds and values
// ---------------------------------------------------------------------------

/// Declared kind of an attribute type. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AttributeKind {
    String,
    Number,
}

impl AttributeKind {
    /// Parse from the database `kind` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "STRING" => Ok(Self::String),
            "NUMBER" => Ok(Self::Number),
            other => Err(CoreError::Validation(format!(
                "Unknown attribute kind '{other}'. Must be one of: STRING, NUMBER"
            ))),
        }
    }

    /// Database name value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Number => "NUMBER",
        }
    }
}

/// A concrete attribute value carried by a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Text(String),
    Number(f64),
}

impl AttributeValue {
    /// Build a value from the `(string_value, number_value)` column pair.
    ///
    /// Exactly one side must be populated.
    pub fn from_columns(
        string_value: Option<String>,
        number_value: Option<f64>,
    ) -> Result<Self, CoreError> {
        match (string_value, number_value) {
            (Some(s), None) => Ok(Self::Text(s)),
            (None, Some(n)) => Ok(Self::Number(n)),
            (Some(_), Some(_)) => Err(CoreError::Validation(
                "Attribute value carries both a string and a number".to_string(),
            )),
            (None, None) => Err(CoreError::Validation(
                "Attribute value carries neither a string nor a number".to_string(),
            )),
        }
    }

    pub fn kind(&self) -> AttributeKind {
        match self {
            Self::Text(_) => AttributeKind::String,
            Self::Number(_) => AttributeKind::Number,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }

    /// Split back into the `(string_value, number_value)` column pair.
    pub fn into_columns(self) -> (Option<String>, Option<f64>) {
        match self {
            Self::Text(s) => (Some(s), None),
            Self::Number(n) => (None, Some(n)),
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            // Whole numbers print without a trailing ".0" (4, not 4.0).
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Reject a value whose kind differs from the attribute type's declared kind.
pub fn check_attribute_value(
    attribute_key: &str,
    kind: AttributeKind,
    value: &AttributeValue,
) -> Result<(), CoreError> {
    if value.kind() == kind {
        return Ok(());
    }
    Err(CoreError::Validation(format!(
        "Attribute '{attribute_key}' is declared {} but received a {} value",
        kind.as_str(),
        value.kind().as_str()
    )))
}

// ---------------------------------------------------------------------------
// Components
// ---------------------------------------------------------------------------

/// One attribute value attached to a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentAttribute {
    pub key: String,
    pub value: AttributeValue,
}

/// A catalog product hydrated with its category slug and attribute values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    /// Category slug (e.g. `cpu`).
    pub category: String,
    /// Price in the smallest currency unit.
    pub price: i64,
    pub image_url: Option<String>,
    pub is_published: bool,
    pub is_featured: bool,
    pub stock: i32,
    pub created_at: Timestamp,
    pub attributes: Vec<ComponentAttribute>,
}

impl Component {
    /// Look up an attribute value by key.
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.key == key)
            .map(|a| &a.value)
    }

    /// Builder-style attribute setter, mainly for fixtures.
    pub fn with_attribute(mut self, key: &str, value: impl Into<AttributeValue>) -> Self {
        self.attributes.push(ComponentAttribute {
            key: key.to_string(),
            value: value.into(),
        });
        self
    }

    /// Only published, in-stock products may be offered by the builder.
    pub fn is_eligible_for_builder(&self) -> bool {
        self.is_published && self.stock > 0
    }

    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            slug: self.slug.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
        }
    }
}

/// Lightweight projection returned by the suggestion engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    pub price: i64,
    pub image_url: Option<String>,
}

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Read access to the catalog needed by the compatibility core.
///
/// Implementations must read fresh data on every call; the core never caches
/// across operations because admins edit attribute values and rules live.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Fetch the components with the given ids, each returned once.
    ///
    /// Unknown ids are simply absent from the result.
    async fn components_by_ids(&self, ids: &[ProductId]) -> Result<Vec<Component>, CoreError>;

    /// Eligible components of one category, featured first then newest,
    /// skipping `exclude_ids`, at most `limit` rows.
    async fn candidate_pool(
        &self,
        category_slug: &str,
        exclude_ids: &[ProductId],
        limit: usize,
    ) -> Result<Vec<Component>, CoreError>;

    /// Rules whose left and right categories are each either a wildcard or
    /// one of `category_slugs`.
    async fn compatibility_rules(
        &self,
        category_slugs: &[String],
    ) -> Result<Vec<CompatibilityRule>, CoreError>;
}
