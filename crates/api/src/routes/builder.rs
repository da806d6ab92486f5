//! Route definitions for the `/builder` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::builder;
use crate::state::AppState;

/// Routes mounted at `/builder`.
///
/// ```text
/// POST   /compatibility   -> check_compatibility
/// POST   /suggestions     -> suggest
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/compatibility", post(builder::check_compatibility))
        .route("/suggestions", post(builder::suggest))
}
