//! PC builder compatibility core.
//!
//! Pure domain logic with no database dependency: the catalog data model,
//! the catalog store seam, the attribute resolver, the rule evaluator and the
//! suggestion engine that reuses it as a filter.

pub mod builder;
pub mod catalog;
pub mod compatibility;
pub mod error;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;
