//! Handlers for the admin rule store: attribute types and compatibility rules.
//!
//! Rules are validated against the declared kinds of the attribute types
//! they reference before they are written, so the evaluator only meets a
//! kind mismatch when an attribute type was repointed afterwards.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use pcbuild_core::catalog::AttributeKind;
use pcbuild_core::compatibility::rules::{validate_rule_definition, Operator};
use pcbuild_core::error::CoreError;
use pcbuild_core::types::DbId;
use pcbuild_db::models::attribute_type::AttributeTypeRow;
use pcbuild_db::models::compatibility_rule::{
    CompatibilityRuleRow, CreateCompatibilityRule, UpdateCompatibilityRule,
};
use pcbuild_db::repositories::{AttributeTypeRepo, CompatibilityRuleRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ── Attribute types ──────────────────────────────────────────────────

/// GET /api/v1/admin/attribute-types
pub async fn list_attribute_types(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<AttributeTypeRow>>>> {
    let types = AttributeTypeRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: types }))
}

// ── Compatibility rules ──────────────────────────────────────────────

/// GET /api/v1/admin/compatibility-rules
///
/// Every rule with category slugs and attribute keys resolved.
pub async fn list_rules(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CompatibilityRuleRow>>>> {
    let rules = CompatibilityRuleRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: rules }))
}

/// POST /api/v1/admin/compatibility-rules
///
/// Create a rule. Returns the created rule with HTTP 201.
pub async fn create_rule(
    State(state): State<AppState>,
    Json(input): Json<CreateCompatibilityRule>,
) -> AppResult<(StatusCode, Json<DataResponse<CompatibilityRuleRow>>)> {
    let operator = Operator::from_name(&input.operator)?;
    let left_kind = attribute_kind(&state.pool, input.left_attribute_type_id).await?;
    let right_kind = match input.right_attribute_type_id {
        Some(id) => Some(attribute_kind(&state.pool, id).await?),
        None => None,
    };
    validate_rule_definition(operator, left_kind, right_kind)?;

    let rule = CompatibilityRuleRepo::create(&state.pool, &input).await?;
    tracing::info!(
        rule_id = rule.id,
        operator = %rule.operator,
        left = %rule.left_attribute,
        right = ?rule.right_attribute,
        "Compatibility rule created",
    );
    Ok((StatusCode::CREATED, Json(DataResponse { data: rule })))
}

/// PUT /api/v1/admin/compatibility-rules/{id}
///
/// Update the operator and/or note. Returns 404 if not found.
pub async fn update_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCompatibilityRule>,
) -> AppResult<Json<DataResponse<CompatibilityRuleRow>>> {
    if let Some(name) = &input.operator {
        let operator = Operator::from_name(name)?;
        let existing = CompatibilityRuleRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| rule_not_found(id))?;
        let left_kind = attribute_kind(&state.pool, existing.left_attribute_type_id).await?;
        let right_kind = match existing.right_attribute_type_id {
            Some(right_id) => Some(attribute_kind(&state.pool, right_id).await?),
            None => None,
        };
        validate_rule_definition(operator, left_kind, right_kind)?;
    }

    let rule = CompatibilityRuleRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| rule_not_found(id))?;
    tracing::info!(rule_id = id, operator = %rule.operator, "Compatibility rule updated");
    Ok(Json(DataResponse { data: rule }))
}

/// DELETE /api/v1/admin/compatibility-rules/{id}
///
/// Returns 204 on success, 404 if not found.
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if CompatibilityRuleRepo::delete(&state.pool, id).await? {
        tracing::info!(rule_id = id, "Compatibility rule deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(rule_not_found(id))
    }
}

fn rule_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "CompatibilityRule",
        id: id.to_string(),
    })
}

/// Declared kind of an attribute type referenced by a rule body.
async fn attribute_kind(pool: &PgPool, id: DbId) -> AppResult<AttributeKind> {
    let row = AttributeTypeRepo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| CoreError::Validation(format!("Unknown attribute type id {id}")))?;
    Ok(AttributeKind::from_name(&row.kind)?)
}
