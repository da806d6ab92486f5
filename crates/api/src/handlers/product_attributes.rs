//! Handler for writing product attribute values.

use axum::extract::{Path, State};
use axum::Json;
use pcbuild_core::catalog::{check_attribute_value, AttributeKind, AttributeValue};
use pcbuild_core::error::CoreError;
use pcbuild_db::models::product::ProductAttributeRow;
use pcbuild_db::repositories::{AttributeTypeRepo, ProductRepo};
use serde::Deserialize;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body: a JSON string for STRING attributes, a number for NUMBER.
#[derive(Debug, Deserialize)]
pub struct PutAttributeRequest {
    pub value: AttributeValue,
}

/// PUT /api/v1/admin/products/{id}/attributes/{key}
///
/// Insert or replace one attribute value. The value must match the kind
/// declared by the attribute type.
pub async fn put_attribute(
    State(state): State<AppState>,
    Path((product_id, key)): Path<(String, String)>,
    Json(body): Json<PutAttributeRequest>,
) -> AppResult<Json<DataResponse<ProductAttributeRow>>> {
    if !ProductRepo::exists(&state.pool, &product_id).await? {
        return Err(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        }
        .into());
    }
    let attribute_type = AttributeTypeRepo::find_by_key(&state.pool, &key)
        .await?
        .ok_or_else(|| CoreError::NotFound {
            entity: "AttributeType",
            id: key.clone(),
        })?;

    let kind = AttributeKind::from_name(&attribute_type.kind)?;
    check_attribute_value(&key, kind, &body.value)?;

    let (string_value, number_value) = body.value.into_columns();
    let row = ProductRepo::upsert_attribute(
        &state.pool,
        &product_id,
        attribute_type.id,
        string_value.as_deref(),
        number_value,
    )
    .await?;

    tracing::info!(product_id = %product_id, key = %key, "Product attribute written");
    Ok(Json(DataResponse { data: row }))
}
