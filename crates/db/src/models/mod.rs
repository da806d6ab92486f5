//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` create/update DTOs where the admin surface writes the table

pub mod attribute_type;
pub mod compatibility_rule;
pub mod product;
