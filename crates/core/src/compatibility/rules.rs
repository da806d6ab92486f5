//! Compatibility rule records and evaluation result types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{AttributeKind, AttributeValue};
use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// Comparison applied between the left and right resolved values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operator {
    /// Exact match, e.g. socket codes.
    Equal,
    /// Left must not exceed right, e.g. card length against case clearance.
    LessThanOrEqual,
}

impl Operator {
    /// Parse from the database `operator` column.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "EQUAL" => Ok(Self::Equal),
            "LESS_THAN_OR_EQUAL" => Ok(Self::LessThanOrEqual),
            other => Err(CoreError::Validation(format!(
                "Unknown operator '{other}'. Must be one of: EQUAL, LESS_THAN_OR_EQUAL"
            ))),
        }
    }

    /// Database name value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equal => "EQUAL",
            Self::LessThanOrEqual => "LESS_THAN_OR_EQUAL",
        }
    }

    /// Phrase used when a rule has no note of its own.
    pub fn phrase(self) -> &'static str {
        match self {
            Self::Equal => "must equal",
            Self::LessThanOrEqual => "must be at most",
        }
    }
}

/// One side of a rule: which category (or any) and which attribute to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSide<'a> {
    /// `None` is the wildcard: any selected component carrying the attribute.
    pub category: Option<&'a str>,
    pub attribute_key: &'a str,
}

impl RuleSide<'_> {
    /// `category.ATTRIBUTE`, with `*` standing in for the wildcard.
    pub fn label(&self) -> String {
        format!("{}.{}", self.category.unwrap_or("*"), self.attribute_key)
    }
}

/// A declarative compatibility constraint loaded from the rule store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityRule {
    pub id: DbId,
    pub left_category: Option<String>,
    pub left_attribute: String,
    pub right_category: Option<String>,
    /// `None` marks a rule that cannot currently be checked.
    pub right_attribute: Option<String>,
    pub operator: Operator,
    pub note: Option<String>,
}

impl CompatibilityRule {
    pub fn left_side(&self) -> RuleSide<'_> {
        RuleSide {
            category: self.left_category.as_deref(),
            attribute_key: &self.left_attribute,
        }
    }

    pub fn right_side(&self) -> Option<RuleSide<'_>> {
        self.right_attribute.as_deref().map(|key| RuleSide {
            category: self.right_category.as_deref(),
            attribute_key: key,
        })
    }

    /// True when every non-wildcard category the rule reads is selected.
    pub fn categories_present(&self, present: &BTreeSet<&str>) -> bool {
        let side_present = |category: &Option<String>| match category {
            None => true,
            Some(slug) => present.contains(slug.as_str()),
        };
        side_present(&self.left_category) && side_present(&self.right_category)
    }

    /// Both attribute keys this rule reads.
    pub fn attribute_keys(&self) -> Vec<String> {
        std::iter::once(self.left_attribute.clone())
            .chain(self.right_attribute.clone())
            .collect()
    }

    /// The admin-written note, if it carries any text.
    pub fn note_text(&self) -> Option<&str> {
        self.note.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// Check on write that `operator` can compare the declared attribute kinds.
///
/// Rules without a right attribute are accepted; they stay inert.
pub fn validate_rule_definition(
    operator: Operator,
    left_kind: AttributeKind,
    right_kind: Option<AttributeKind>,
) -> Result<(), CoreError> {
    let Some(right_kind) = right_kind else {
        return Ok(());
    };
    match operator {
        Operator::Equal if left_kind == right_kind => Ok(()),
        Operator::Equal => Err(CoreError::Validation(format!(
            "EQUAL rules must compare attributes of the same kind, got {} and {}",
            left_kind.as_str(),
            right_kind.as_str()
        ))),
        Operator::LessThanOrEqual
            if left_kind == AttributeKind::Number && right_kind == AttributeKind::Number =>
        {
            Ok(())
        }
        Operator::LessThanOrEqual => Err(CoreError::Validation(
            "LESS_THAN_OR_EQUAL rules require NUMBER attributes on both sides".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// Stable machine-readable identifiers for issues and suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    SocketMismatch,
    RamTypeMismatch,
    RamSlotsExceeded,
    RamCapacityExceeded,
    RamSpeedAboveRated,
    InsufficientWattage,
    ClearanceExceeded,
    RuleViolation,
    RuleMisconfigured,
    InconsistentAttribute,
}

impl IssueCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SocketMismatch => "SOCKET_MISMATCH",
            Self::RamTypeMismatch => "RAM_TYPE_MISMATCH",
            Self::RamSlotsExceeded => "RAM_SLOTS_EXCEEDED",
            Self::RamCapacityExceeded => "RAM_CAPACITY_EXCEEDED",
            Self::RamSpeedAboveRated => "RAM_SPEED_ABOVE_RATED",
            Self::InsufficientWattage => "INSUFFICIENT_WATTAGE",
            Self::ClearanceExceeded => "CLEARANCE_EXCEEDED",
            Self::RuleViolation => "RULE_VIOLATION",
            Self::RuleMisconfigured => "RULE_MISCONFIGURED",
            Self::InconsistentAttribute => "INCONSISTENT_ATTRIBUTE",
        }
    }
}

/// Severity tag on an issue. Advisories are [`Suggestion`]s, so every issue
/// is an `error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// The category/attribute pair and resolved value on one side of a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueOperand {
    pub category: Option<String>,
    pub attribute_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<AttributeValue>,
}

impl IssueOperand {
    pub(crate) fn new(side: RuleSide<'_>, value: Option<AttributeValue>) -> Self {
        Self {
            category: side.category.map(str::to_string),
            attribute_key: side.attribute_key.to_string(),
            value,
        }
    }
}

/// A blocking compatibility problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub code: IssueCode,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<IssueOperand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<IssueOperand>,
}

/// A non-blocking advisory note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub code: IssueCode,
    pub message: String,
    pub rule_id: DbId,
    pub related_attribute_keys: Vec<String>,
}

/// A rule that was present but could not be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRule {
    pub rule_id: DbId,
    pub reason: &'static str,
}

/// Outcome of evaluating a selection against the rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompatibilityResult {
    /// True iff `issues` is empty.
    pub ok: bool,
    pub issues: Vec<Issue>,
    pub suggestions: Vec<Suggestion>,
    /// Inert rules, reported to the caller for logging only.
    #[serde(skip)]
    pub skipped: Vec<SkippedRule>,
}
