//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod attribute_type_repo;
pub mod compatibility_rule_repo;
pub mod product_repo;

pub use attribute_type_repo::AttributeTypeRepo;
pub use compatibility_rule_repo::CompatibilityRuleRepo;
pub use product_repo::ProductRepo;
