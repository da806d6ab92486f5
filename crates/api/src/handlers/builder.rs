//! Handlers for the `/builder` resource.
//!
//! Thin wrappers over the core builder operations: they read the body, call
//! into `pcbuild_core::builder` through the catalog seam, and log what the
//! core reports back.

use axum::extract::State;
use axum::Json;
use pcbuild_core::builder::{self, SuggestionMap};
use pcbuild_core::compatibility::rules::CompatibilityResult;
use pcbuild_core::types::ProductId;
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /builder/compatibility`.
#[derive(Debug, Deserialize)]
pub struct CompatibilityRequest {
    #[serde(alias = "productIds")]
    pub product_ids: Vec<ProductId>,
}

/// Request body for `POST /builder/suggestions`.
#[derive(Debug, Deserialize)]
pub struct SuggestionsRequest {
    #[serde(default, alias = "productIds")]
    pub product_ids: Vec<ProductId>,
    /// Falls back to the configured default when omitted.
    #[serde(default, alias = "maxPerCategory")]
    pub max_per_category: Option<usize>,
}

/// POST /api/v1/builder/compatibility
///
/// Evaluate the selection. Blocking issues and advisory suggestions are part
/// of a 200 response; only bad input or an unavailable catalog is an error.
pub async fn check_compatibility(
    State(state): State<AppState>,
    Json(body): Json<CompatibilityRequest>,
) -> AppResult<Json<DataResponse<CompatibilityResult>>> {
    let result = builder::evaluate_compatibility(state.catalog.as_ref(), &body.product_ids).await?;

    for skipped in &result.skipped {
        tracing::debug!(
            rule_id = skipped.rule_id,
            reason = skipped.reason,
            "Compatibility rule skipped"
        );
    }
    tracing::debug!(
        selection = body.product_ids.len(),
        ok = result.ok,
        issues = result.issues.len(),
        suggestions = result.suggestions.len(),
        "Evaluated build compatibility",
    );

    Ok(Json(DataResponse { data: result }))
}

/// POST /api/v1/builder/suggestions
///
/// Returns one list per builder category missing from the selection.
pub async fn suggest(
    State(state): State<AppState>,
    Json(body): Json<SuggestionsRequest>,
) -> AppResult<Json<DataResponse<SuggestionMap>>> {
    let limit = body
        .max_per_category
        .unwrap_or(state.config.default_suggestion_limit);

    let suggestions =
        builder::suggest_components(state.catalog.as_ref(), &body.product_ids, limit).await?;

    tracing::debug!(
        selection = body.product_ids.len(),
        limit,
        categories = suggestions.len(),
        "Built component suggestions",
    );

    Ok(Json(DataResponse { data: suggestions }))
}
