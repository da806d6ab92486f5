//! Attribute resolver.
//!
//! Reads the value a rule side refers to out of an already-loaded selection.
//! Multi-instance categories (several RAM kits, several drives) go through an
//! explicit aggregation step: NUMBER values are summed, STRING values must
//! all agree.

use super::rules::RuleSide;
use crate::catalog::{AttributeValue, Component};

/// Result of resolving one rule side against a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No selected component carries the attribute; the rule does not apply.
    Absent,
    /// A single comparable value.
    Value(AttributeValue),
    /// Same-category instances disagree (or mix kinds). Distinct values in
    /// selection order.
    Inconsistent(Vec<AttributeValue>),
}

/// Resolve one rule side against the selection.
///
/// A wildcard side takes the first component carrying the attribute. A
/// category side gathers the attribute from every instance of that category
/// and aggregates.
pub fn resolve(components: &[Component], side: RuleSide<'_>) -> Resolution {
    match side.category {
        None => components
            .iter()
            .find_map(|c| c.attribute(side.attribute_key))
            .cloned()
            .map_or(Resolution::Absent, Resolution::Value),
        Some(category) => {
            let values: Vec<&AttributeValue> = components
                .iter()
                .filter(|c| c.category == category)
                .filter_map(|c| c.attribute(side.attribute_key))
                .collect();
            aggregate(&values)
        }
    }
}

/// Combine the values one category contributes for an attribute.
///
/// NUMBER values are summed across instances. STRING values (or a mix of
/// kinds) must be identical.
pub fn aggregate(values: &[&AttributeValue]) -> Resolution {
    match values {
        [] => Resolution::Absent,
        [single] => Resolution::Value((*single).clone()),
        _ => {
            let numbers: Option<Vec<f64>> = values.iter().map(|v| v.as_number()).collect();
            match numbers {
                Some(numbers) => Resolution::Value(AttributeValue::Number(numbers.iter().sum())),
                None => agree_or_flag(values),
            }
        }
    }
}

/// STRING values (or a mix of kinds) must be identical across instances.
fn agree_or_flag(values: &[&AttributeValue]) -> Resolution {
    let mut distinct: Vec<AttributeValue> = Vec::new();
    for value in values {
        if !distinct.contains(value) {
            distinct.push((*value).clone());
        }
    }
    if distinct.len() == 1 {
        Resolution::Value(distinct.remove(0))
    } else {
        Resolution::Inconsistent(distinct)
    }
}
