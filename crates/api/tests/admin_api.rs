//! HTTP-level tests for the `/api/v1/admin` rule store surface.
//!
//! Categories, attribute types and the standard rules are seeded by
//! migrations, so these run against realistic data.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_db_app, delete, get, post_json, put_json};
use serde_json::json;
use sqlx::PgPool;

async fn id_of(pool: &PgPool, table: &str, column: &str, value: &str) -> i64 {
    let row: (i64,) = sqlx::query_as(&format!("SELECT id FROM {table} WHERE {column} = $1"))
        .bind(value)
        .fetch_one(pool)
        .await
        .unwrap();
    row.0
}

async fn insert_product(pool: &PgPool, id: &str, category: &str) {
    sqlx::query(
        "INSERT INTO products (id, category_id, name, slug, is_published, stock) \
         SELECT $1, id, $1, $1, true, 3 FROM categories WHERE slug = $2",
    )
    .bind(id)
    .bind(category)
    .execute(pool)
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_attribute_types(pool: PgPool) {
    let response = get(build_db_app(pool), "/api/v1/admin/attribute-types").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().expect("data should be an array");
    assert_eq!(data.len(), 18);
    assert!(data
        .iter()
        .any(|t| t["key"] == "GPU_LENGTH_MM" && t["kind"] == "NUMBER"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_rules_resolves_slugs_and_keys(pool: PgPool) {
    let response = get(build_db_app(pool), "/api/v1/admin/compatibility-rules").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 8);
    assert_eq!(data[0]["left_category"], "cpu");
    assert_eq!(data[0]["left_attribute"], "CPU_SOCKET");
    assert_eq!(data[0]["right_category"], "mainboard");
    assert_eq!(data[0]["operator"], "EQUAL");
}

// ---------------------------------------------------------------------------
// Rule CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_rule_lifecycle(pool: PgPool) {
    let body = json!({
        "left_category_id": id_of(&pool, "categories", "slug", "cpu").await,
        "left_attribute_type_id": id_of(&pool, "attribute_types", "key", "CPU_TDP_W").await,
        "right_category_id": id_of(&pool, "categories", "slug", "psu").await,
        "right_attribute_type_id": id_of(&pool, "attribute_types", "key", "PSU_WATTAGE").await,
        "operator": "LESS_THAN_OR_EQUAL",
        "note": "PSU must cover the CPU TDP"
    });
    let app = build_db_app(pool);

    let response = post_json(app.clone(), "/api/v1/admin/compatibility-rules", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["data"]["id"].as_i64().unwrap();
    assert_eq!(created["data"]["right_attribute"], "PSU_WATTAGE");

    let response = put_json(
        app.clone(),
        &format!("/api/v1/admin/compatibility-rules/{id}"),
        json!({ "note": "CPU power draw must fit the PSU" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["note"], "CPU power draw must fit the PSU");
    assert_eq!(updated["data"]["operator"], "LESS_THAN_OR_EQUAL");

    let uri = format!("/api/v1/admin/compatibility-rules/{id}");
    assert_eq!(delete(app.clone(), &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(delete(app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_unknown_operator(pool: PgPool) {
    let body = json!({
        "left_attribute_type_id": id_of(&pool, "attribute_types", "key", "CPU_SOCKET").await,
        "right_attribute_type_id": id_of(&pool, "attribute_types", "key", "MB_SOCKET").await,
        "operator": "GREATER_THAN"
    });
    let response = post_json(build_db_app(pool), "/api/v1/admin/compatibility-rules", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_rejects_ordering_on_strings(pool: PgPool) {
    let body = json!({
        "left_attribute_type_id": id_of(&pool, "attribute_types", "key", "RAM_TYPE").await,
        "right_attribute_type_id": id_of(&pool, "attribute_types", "key", "MB_RAM_TYPE").await,
        "operator": "LESS_THAN_OR_EQUAL"
    });
    let response = post_json(build_db_app(pool), "/api/v1/admin/compatibility-rules", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_with_missing_category_conflicts(pool: PgPool) {
    let body = json!({
        "left_category_id": 999_999,
        "left_attribute_type_id": id_of(&pool, "attribute_types", "key", "CPU_SOCKET").await,
        "operator": "EQUAL"
    });
    let response = post_json(build_db_app(pool), "/api/v1/admin/compatibility-rules", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_operator_is_checked_against_kinds(pool: PgPool) {
    let (socket_rule,): (i64,) = sqlx::query_as(
        "SELECT cr.id FROM compatibility_rules cr \
         JOIN attribute_types at ON at.id = cr.left_attribute_type_id \
         WHERE at.key = 'CPU_SOCKET'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let response = put_json(
        build_db_app(pool),
        &format!("/api/v1/admin/compatibility-rules/{socket_rule}"),
        json!({ "operator": "LESS_THAN_OR_EQUAL" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_missing_rule_returns_404(pool: PgPool) {
    let response = put_json(
        build_db_app(pool),
        "/api/v1/admin/compatibility-rules/999999",
        json!({ "note": "x" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Attribute values
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_put_attribute_enforces_declared_kind(pool: PgPool) {
    insert_product(&pool, "psu-750", "psu").await;
    let app = build_db_app(pool);
    let uri = "/api/v1/admin/products/psu-750/attributes/PSU_WATTAGE";

    let response = put_json(app.clone(), uri, json!({ "value": 750 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["number_value"], 750.0);
    assert_eq!(json["data"]["string_value"], serde_json::Value::Null);

    let response = put_json(app, uri, json!({ "value": "750W" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_put_attribute_unknown_targets_return_404(pool: PgPool) {
    insert_product(&pool, "psu-750", "psu").await;
    let app = build_db_app(pool);

    let response = put_json(
        app.clone(),
        "/api/v1/admin/products/ghost/attributes/PSU_WATTAGE",
        json!({ "value": 750 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json(
        app,
        "/api/v1/admin/products/psu-750/attributes/NOT_A_KEY",
        json!({ "value": 750 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Attribute edits are visible to the very next evaluation.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_attribute_edit_changes_next_evaluation(pool: PgPool) {
    insert_product(&pool, "gpu-long", "gpu").await;
    insert_product(&pool, "case-small", "case").await;
    let app = build_db_app(pool);

    for (uri, value) in [
        ("/api/v1/admin/products/gpu-long/attributes/GPU_LENGTH_MM", 361),
        ("/api/v1/admin/products/case-small/attributes/CASE_GPU_CLEARANCE_MM", 360),
    ] {
        let response = put_json(app.clone(), uri, json!({ "value": value })).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let selection = json!({ "product_ids": ["gpu-long", "case-small"] });
    let response = post_json(app.clone(), "/api/v1/builder/compatibility", selection.clone()).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["ok"], false);
    assert_eq!(json["data"]["issues"][0]["code"], "CLEARANCE_EXCEEDED");

    put_json(
        app.clone(),
        "/api/v1/admin/products/gpu-long/attributes/GPU_LENGTH_MM",
        json!({ "value": 357 }),
    )
    .await;

    let response = post_json(app, "/api/v1/builder/compatibility", selection).await;
    assert_eq!(body_json(response).await["data"]["ok"], true);
}
