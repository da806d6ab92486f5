pub mod admin;
pub mod builder;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /builder/compatibility                          evaluate a selection (POST)
/// /builder/suggestions                            compatible candidates (POST)
///
/// /admin/attribute-types                          list attribute types (GET)
/// /admin/compatibility-rules                      list, create rules (GET, POST)
/// /admin/compatibility-rules/{id}                 update, delete rule (PUT, DELETE)
/// /admin/products/{id}/attributes/{key}           write attribute value (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/builder", builder::router())
        .nest("/admin", admin::router())
}
