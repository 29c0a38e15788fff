//! HTTP-level integration tests for the preset endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use common::{body_json, create_preset, delete, get, post_json, put_json, send};
use serde_json::json;
use sqlx::SqlitePool;

fn ids(list: &serde_json::Value) -> Vec<i64> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Create / get
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_save_preset_returns_201_with_derived_name(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let response = post_json(
        app,
        "/api/savepreset",
        json!({"material": {"name": "steel", "thickness": 3}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["name"], "steel_3");
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = false)]
async fn test_save_preset_keeps_explicit_name(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let response = post_json(
        app,
        "/api/savepreset",
        json!({"name": "Fast steel", "material": {"name": "steel", "thickness": 2}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["name"], "Fast steel");
}

#[sqlx::test(migrations = false)]
async fn test_get_preset_returns_full_record(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let doc = json!({
        "material": {"name": "aluminium", "thickness": 1.5},
        "cutting": {"power": 70, "gas": "N2"}
    });
    let id = create_preset(app.clone(), doc.clone()).await;

    let response = get(app, &format!("/api/get_preset?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["id"], id);
    assert_eq!(json["name"], "aluminium_1.5");
    assert_eq!(json["materialCode"], json["payload"]["material"]["name"]);
    assert_eq!(json["thickness"], json["payload"]["material"]["thickness"]);
    assert_eq!(json["payload"], doc);
    assert_eq!(json["status"], "active");
    assert!(json["updatedAt"].is_string());
}

#[sqlx::test(migrations = false)]
async fn test_get_nonexistent_preset_returns_404(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let response = get(app, "/api/get_preset?id=999999").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = false)]
async fn test_get_preset_without_id_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;

    let response = get(app.clone(), "/api/get_preset").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");

    let response = get(app, "/api/get_preset?id=abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_save_preset_rejects_invalid_documents(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;

    for doc in [
        json!({}),
        json!({"material": {"thickness": 3}}),
        json!({"material": {"name": "steel"}}),
        json!({"material": {"name": "   ", "thickness": 3}}),
        json!({"material": {"name": "steel", "thickness": "3"}}),
        json!([1, 2, 3]),
    ] {
        let response = post_json(app.clone(), "/api/savepreset", doc.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "document: {doc}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR", "document: {doc}");
    }
}

#[sqlx::test(migrations = false)]
async fn test_save_preset_rejects_malformed_json(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let response = send(
        app,
        Method::POST,
        "/api/savepreset",
        Body::from("{not json"),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = false)]
async fn test_save_preset_accepts_body_without_content_type(pool: SqlitePool) {
    use tower::ServiceExt;

    let app = common::build_test_app(pool).await;
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/savepreset")
        .body(Body::from(
            json!({"material": {"name": "brass", "thickness": 4}}).to_string(),
        ))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_update_preset_rewrites_payload_and_materialized_fields(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let id = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 3}})).await;

    let response = put_json(
        app.clone(),
        "/api/updatepreset",
        json!({"id": id, "name": "thin copper", "material": {"name": "copper", "thickness": 0.8}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["msg"].is_string());

    let json = body_json(get(app, &format!("/api/get_preset?id={id}")).await).await;
    assert_eq!(json["name"], "thin copper");
    assert_eq!(json["materialCode"], "copper");
    assert_eq!(json["thickness"], 0.8);
    // The addressing id is not part of the stored document.
    assert!(json["payload"].get("id").is_none());
    assert_eq!(json["payload"]["material"]["name"], "copper");
}

#[sqlx::test(migrations = false)]
async fn test_update_accepts_string_id(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let id = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 3}})).await;

    let response = put_json(
        app,
        "/api/updatepreset",
        json!({"id": id.to_string(), "material": {"name": "steel", "thickness": 4}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = false)]
async fn test_update_without_id_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let response = put_json(
        app,
        "/api/updatepreset",
        json!({"material": {"name": "steel", "thickness": 3}}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

#[sqlx::test(migrations = false)]
async fn test_update_with_invalid_document_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let id = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 3}})).await;

    let response = put_json(app.clone(), "/api/updatepreset", json!({"id": id, "material": {}})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    // The stored preset is untouched.
    let json = body_json(get(app, &format!("/api/get_preset?id={id}")).await).await;
    assert_eq!(json["thickness"], 3.0);
}

#[sqlx::test(migrations = false)]
async fn test_update_missing_and_deleted_return_same_404(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let id = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 3}})).await;
    let response = delete(app.clone(), &format!("/api/deletepreset?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = |id: i64| json!({"id": id, "material": {"name": "steel", "thickness": 5}});

    let deleted = put_json(app.clone(), "/api/updatepreset", doc(id)).await;
    let missing = put_json(app, "/api/updatepreset", doc(424242)).await;

    assert_eq!(deleted.status(), StatusCode::NOT_FOUND);
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(deleted).await["code"], "NOT_FOUND");
    assert_eq!(body_json(missing).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Soft delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_soft_delete_then_second_delete_returns_404(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let id = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 3}})).await;

    let first = delete(app.clone(), &format!("/api/deletepreset?id={id}")).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(body_json(first).await["status"], "ok");

    let second = delete(app, &format!("/api/deletepreset?id={id}")).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = false)]
async fn test_delete_without_id_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let response = delete(app, "/api/deletepreset").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = false)]
async fn test_soft_deleted_preset_visibility(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let kept = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 1}})).await;
    let gone = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 2}})).await;
    delete(app.clone(), &format!("/api/deletepreset?id={gone}")).await;

    let active = body_json(get(app.clone(), "/api/listpresets").await).await;
    assert_eq!(ids(&active), vec![kept]);

    let everything = body_json(get(app.clone(), "/api/listpresets?all=true").await).await;
    assert!(ids(&everything).contains(&gone));
    let deleted_entry = everything
        .as_array()
        .unwrap()
        .iter()
        .find(|item| item["id"] == gone)
        .unwrap();
    assert_eq!(deleted_entry["status"], "deleted");
    assert!(deleted_entry.get("payload").is_none());

    let fetched = body_json(get(app, &format!("/api/get_preset?id={gone}")).await).await;
    assert_eq!(fetched["status"], "deleted");
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_list_orders_most_recently_updated_first(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let first = create_preset(app.clone(), json!({"material": {"name": "a", "thickness": 1}})).await;
    let second = create_preset(app.clone(), json!({"material": {"name": "b", "thickness": 1}})).await;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let response = put_json(
        app.clone(),
        "/api/updatepreset",
        json!({"id": first, "material": {"name": "a", "thickness": 2}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let list = body_json(get(app, "/api/listpresets").await).await;
    assert_eq!(ids(&list), vec![first, second]);
}

#[sqlx::test(migrations = false)]
async fn test_list_accepts_flag_spellings_and_rejects_garbage(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;

    for query in ["all=1", "all=yes", "all=FALSE", "all=0"] {
        let response = get(app.clone(), &format!("/api/listpresets?{query}")).await;
        assert_eq!(response.status(), StatusCode::OK, "{query}");
    }

    let response = get(app, "/api/listpresets?all=maybe").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = false)]
async fn test_list_on_empty_store_returns_empty_array(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let list = body_json(get(app, "/api/listpresets?all=true").await).await;
    assert_eq!(list, json!([]));
}

// ---------------------------------------------------------------------------
// Copy
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_copy_preset_creates_identical_active_row(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let doc = json!({"name": "Template", "material": {"name": "steel", "thickness": 6}, "piercing": {"time": 0.4}});
    let id = create_preset(app.clone(), doc).await;

    let response = post_json(app.clone(), "/api/copy_preset", json!({"id": id})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    let copy_id = json["id"].as_i64().unwrap();
    assert_ne!(copy_id, id);
    assert!(json["msg"].is_string());

    let original = body_json(get(app.clone(), &format!("/api/get_preset?id={id}")).await).await;
    let copy = body_json(get(app, &format!("/api/get_preset?id={copy_id}")).await).await;
    for field in ["name", "materialCode", "thickness", "payload"] {
        assert_eq!(copy[field], original[field], "{field}");
    }
    assert_eq!(copy["status"], "active");
    assert_eq!(original["status"], "active");
}

#[sqlx::test(migrations = false)]
async fn test_copy_deleted_or_missing_preset_returns_404(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    let id = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 3}})).await;
    delete(app.clone(), &format!("/api/deletepreset?id={id}")).await;

    let response = post_json(app.clone(), "/api/copy_preset", json!({"id": id})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(app.clone(), "/api/copy_preset", json!({"id": 31337})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(app, "/api/copy_preset", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Purge
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_delete_all_presets_empties_store(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 1}})).await;
    let gone = create_preset(app.clone(), json!({"material": {"name": "steel", "thickness": 2}})).await;
    delete(app.clone(), &format!("/api/deletepreset?id={gone}")).await;

    let response = delete(app.clone(), "/api/delete_all_presets").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["msg"], "Deleted 2 presets");

    let list = body_json(get(app, "/api/listpresets?all=true").await).await;
    assert_eq!(list, json!([]));
}

// ---------------------------------------------------------------------------
// Latest preset by material
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_getpreset_returns_latest_active_payload(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;
    create_preset(
        app.clone(),
        json!({"material": {"name": "steel", "thickness": 3}, "cutting": {"power": 50}}),
    )
    .await;
    let newer = create_preset(
        app.clone(),
        json!({"material": {"name": "steel", "thickness": 3}, "cutting": {"power": 80}}),
    )
    .await;

    let response = get(app.clone(), "/api/getpreset?code=steel&thickness=3").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["cutting"]["power"], 80);

    delete(app.clone(), &format!("/api/deletepreset?id={newer}")).await;
    let response = get(app, "/api/getpreset?code=steel&thickness=3.0").await;
    assert_eq!(body_json(response).await["cutting"]["power"], 50);
}

#[sqlx::test(migrations = false)]
async fn test_getpreset_errors(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;

    let response = get(app.clone(), "/api/getpreset?code=steel&thickness=9").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get(app.clone(), "/api/getpreset?code=steel").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(app, "/api/getpreset?code=steel&thickness=thick").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// End-to-end lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = false)]
async fn test_steel_preset_lifecycle(pool: SqlitePool) {
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app.clone(),
        "/api/savepreset",
        json!({"material": {"name": "steel", "thickness": 3}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "steel_3");
    let id = created["id"].as_i64().unwrap();

    let response = put_json(
        app.clone(),
        "/api/updatepreset",
        json!({"id": id, "material": {"name": "steel", "thickness": 5}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(get(app.clone(), &format!("/api/get_preset?id={id}")).await).await;
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["thickness"], 5.0);

    let response = delete(app.clone(), &format!("/api/deletepreset?id={id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json(
        app,
        "/api/updatepreset",
        json!({"id": id, "material": {"name": "steel", "thickness": 6}}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
