use std::sync::Arc;

use pcbuild_core::catalog::CatalogStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used by the admin surface and health check.
    pub pool: pcbuild_db::DbPool,
    /// Catalog read seam used by the builder operations.
    pub catalog: Arc<dyn CatalogStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
