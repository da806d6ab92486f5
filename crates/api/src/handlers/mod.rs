//! HTTP handlers, one module per resource.

pub mod builder;
pub mod compatibility_rules;
pub mod product_attributes;
