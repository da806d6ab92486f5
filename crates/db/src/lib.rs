//! Postgres persistence for the PC builder catalog.
//!
//! Repositories are zero-sized structs taking `&PgPool`. [`PgCatalog`] wraps
//! them behind the core's `CatalogStore` seam.

pub mod catalog;
pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;

pub use catalog::PgCatalog;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded schema migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
