/// Lookup tables and rules use PostgreSQL BIGSERIAL keys.
pub type DbId = i64;

/// Products are keyed by opaque text identifiers.
pub type ProductId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
