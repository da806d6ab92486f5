//! Route definitions for the `/admin` rule store surface.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{compatibility_rules, product_attributes};
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// GET    /attribute-types                   -> list_attribute_types
/// GET    /compatibility-rules               -> list_rules
/// POST   /compatibility-rules               -> create_rule
/// PUT    /compatibility-rules/{id}          -> update_rule
/// DELETE /compatibility-rules/{id}          -> delete_rule
/// PUT    /products/{id}/attributes/{key}    -> put_attribute
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/attribute-types",
            get(compatibility_rules::list_attribute_types),
        )
        .route(
            "/compatibility-rules",
            get(compatibility_rules::list_rules).post(compatibility_rules::create_rule),
        )
        .route(
            "/compatibility-rules/{id}",
            put(compatibility_rules::update_rule).delete(compatibility_rules::delete_rule),
        )
        .route(
            "/products/{id}/attributes/{key}",
            put(product_attributes::put_attribute),
        )
}
