//! Compatibility engine.
//!
//! Rules are data: a left category/attribute, a right category/attribute and
//! an operator. The resolver extracts values from a selection, the evaluator
//! interprets every applicable rule, and the policy module decides which
//! violations block a build.

pub mod evaluator;
pub mod policy;
pub mod resolver;
pub mod rules;
