//! Rule evaluator. Pure logic, no database access.
//!
//! Every applicable rule is checked; evaluation never stops at the first
//! failure and never panics on bad rule data. Calling [`evaluate`] twice with
//! the same inputs yields the same result.

use std::collections::BTreeSet;

use super::policy::RuleCheck;
use super::resolver::{resolve, Resolution};
use super::rules::{
    CompatibilityResult, CompatibilityRule, Issue, IssueCode, IssueOperand, Operator, RuleSide,
    Severity, SkippedRule, Suggestion,
};
use crate::catalog::{AttributeValue, Component};

/// Outcome of applying an operator to two resolved values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Satisfied,
    Violated,
    /// The operator cannot compare these value kinds.
    Incomparable,
}

/// Apply `operator` to `left` and `right`.
///
/// Strings compare exactly as stored (no case folding). `LessThanOrEqual`
/// is numeric only.
pub fn compare(operator: Operator, left: &AttributeValue, right: &AttributeValue) -> Comparison {
    use AttributeValue::{Number, Text};

    let holds = match (operator, left, right) {
        (Operator::Equal, Text(l), Text(r)) => l == r,
        (Operator::Equal, Number(l), Number(r)) => l == r,
        (Operator::LessThanOrEqual, Number(l), Number(r)) => l <= r,
        _ => return Comparison::Incomparable,
    };
    if holds {
        Comparison::Satisfied
    } else {
        Comparison::Violated
    }
}

/// Evaluate a hydrated selection against a rule set.
pub fn evaluate(components: &[Component], rules: &[CompatibilityRule]) -> CompatibilityResult {
    let present: BTreeSet<&str> = components.iter().map(|c| c.category.as_str()).collect();

    let mut issues = Vec::new();
    let mut suggestions = Vec::new();
    let mut skipped = Vec::new();
    // (category, attribute) pairs already reported as inconsistent.
    let mut flagged: BTreeSet<(Option<String>, String)> = BTreeSet::new();

    for rule in rules {
        let Some(right_side) = rule.right_side() else {
            skipped.push(SkippedRule {
                rule_id: rule.id,
                reason: "rule has no right-hand attribute",
            });
            continue;
        };
        if !rule.categories_present(&present) {
            continue;
        }

        let left_side = rule.left_side();
        let (left, right) = match (
            resolve(components, left_side),
            resolve(components, right_side),
        ) {
            (Resolution::Value(l), Resolution::Value(r)) => (l, r),
            (l, r) => {
                for (side, resolution) in [(left_side, l), (right_side, r)] {
                    if let Resolution::Inconsistent(values) = resolution {
                        flag_inconsistent(side, values, &mut flagged, &mut issues);
                    }
                }
                continue;
            }
        };

        match compare(rule.operator, &left, &right) {
            Comparison::Satisfied => {}
            Comparison::Violated => {
                let check = RuleCheck::classify(rule);
                let message = violation_message(rule, check, left_side, &left, right_side, &right);
                if check.is_advisory() {
                    suggestions.push(Suggestion {
                        code: check.issue_code(),
                        message,
                        rule_id: rule.id,
                        related_attribute_keys: rule.attribute_keys(),
                    });
                } else {
                    issues.push(Issue {
                        code: check.issue_code(),
                        severity: Severity::Error,
                        message,
                        rule_id: Some(rule.id),
                        left: Some(IssueOperand::new(left_side, Some(left))),
                        right: Some(IssueOperand::new(right_side, Some(right))),
                    });
                }
            }
            Comparison::Incomparable => {
                issues.push(Issue {
                    code: IssueCode::RuleMisconfigured,
                    severity: Severity::Error,
                    message: format!(
                        "Compatibility rule #{} cannot compare {} ({}) with {} ({}) using {}",
                        rule.id,
                        left_side.label(),
                        left.kind().as_str(),
                        right_side.label(),
                        right.kind().as_str(),
                        rule.operator.as_str()
                    ),
                    rule_id: Some(rule.id),
                    left: Some(IssueOperand::new(left_side, Some(left))),
                    right: Some(IssueOperand::new(right_side, Some(right))),
                });
            }
        }
    }

    CompatibilityResult {
        ok: issues.is_empty(),
        issues,
        suggestions,
        skipped,
    }
}

/// Render `note (left = value, right = value)`.
fn violation_message(
    rule: &CompatibilityRule,
    check: RuleCheck,
    left_side: RuleSide<'_>,
    left: &AttributeValue,
    right_side: RuleSide<'_>,
    right: &AttributeValue,
) -> String {
    let note = match rule.note_text().or_else(|| check.fallback_note()) {
        Some(note) => note.to_string(),
        None => format!(
            "{} {} {}",
            left_side.attribute_key,
            rule.operator.phrase(),
            right_side.attribute_key
        ),
    };
    format!(
        "{note} ({} = {left}, {} = {right})",
        left_side.label(),
        right_side.label()
    )
}

fn flag_inconsistent(
    side: RuleSide<'_>,
    values: Vec<AttributeValue>,
    flagged: &mut BTreeSet<(Option<String>, String)>,
    issues: &mut Vec<Issue>,
) {
    let key = (
        side.category.map(str::to_string),
        side.attribute_key.to_string(),
    );
    if !flagged.insert(key) {
        return;
    }
    let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
    issues.push(Issue {
        code: IssueCode::InconsistentAttribute,
        severity: Severity::Error,
        message: format!(
            "Selected {} components disagree on {}: {}",
            side.category.unwrap_or("*"),
            side.attribute_key,
            rendered.join(", ")
        ),
        rule_id: None,
        left: Some(IssueOperand::new(side, None)),
        right: None,
    });
}
