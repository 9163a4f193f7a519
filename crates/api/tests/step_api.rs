//! HTTP-level integration tests for the `/workflow-steps` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, post_json, put_json};
use sqlx::PgPool;
use uuid::Uuid;

async fn create_workflow(pool: &PgPool, name: &str) -> String {
    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/workflows",
            serde_json::json!({
                "name": name,
                "description": null,
                "status": "Active",
                "application_id": Uuid::new_v4(),
                "module_id": Uuid::new_v4(),
                "starting_page_id": Uuid::new_v4(),
                "actor_id": Uuid::new_v4(),
            }),
        )
        .await,
    )
    .await;
    created["id"].as_str().unwrap().to_string()
}

fn step_payload(workflow_id: &str, name: &str, sequence: i32) -> serde_json::Value {
    serde_json::json!({
        "workflow_id": workflow_id,
        "step_name": name,
        "sequence": sequence,
        "application_id": Uuid::new_v4(),
        "module_id": Uuid::new_v4(),
        "page_id": Uuid::new_v4(),
        "section_id": Uuid::new_v4(),
        "role_ids": [Uuid::new_v4()],
        "actor_id": Uuid::new_v4(),
    })
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_step(pool: PgPool) {
    let workflow_id = create_workflow(&pool, "Step Host Flow").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/workflow-steps",
        step_payload(&workflow_id, "step1", 1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["step_name"], "step1");
    assert_eq!(created["sequence"], 1);
    assert_eq!(created["workflow_id"], workflow_id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_step_under_missing_workflow_fails(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/workflow-steps",
        step_payload(&Uuid::new_v4().to_string(), "step1", 1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert!(body["fields"]["workflow_id"].is_array());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_step_field_violations(pool: PgPool) {
    let workflow_id = create_workflow(&pool, "Invalid Step Flow").await;

    let mut payload = step_payload(&workflow_id, "first step", 100);
    payload["role_ids"] = serde_json::json!([]);

    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/workflow-steps", payload).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fields"]["step_name"].is_array());
    assert!(body["fields"]["sequence"].is_array());
    assert!(body["fields"]["role_ids"].is_array());
}

// ---------------------------------------------------------------------------
// Duplicate sequences are structurally permitted
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_sequence_is_allowed(pool: PgPool) {
    let workflow_id = create_workflow(&pool, "Loose Ordering Flow").await;

    let app = common::build_test_app(pool.clone());
    let first = post_json(
        app,
        "/api/v1/workflow-steps",
        step_payload(&workflow_id, "step1", 5),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let app = common::build_test_app(pool);
    let second = post_json(
        app,
        "/api/v1/workflow-steps",
        step_payload(&workflow_id, "step2", 5),
    )
    .await;
    assert_eq!(
        second.status(),
        StatusCode::CREATED,
        "sequence is a display hint, not a unique key"
    );
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_step(pool: PgPool) {
    let workflow_id = create_workflow(&pool, "Editable Step Flow").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/workflow-steps",
            step_payload(&workflow_id, "step1", 1),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/workflow-steps/{id}"),
        step_payload(&workflow_id, "step2", 2),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["step_name"], "step2");
    assert_eq!(updated["sequence"], 2);
    assert!(updated["old_data"].is_object());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_step_returns_404(pool: PgPool) {
    let workflow_id = create_workflow(&pool, "Missing Step Flow").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/workflow-steps/{}", Uuid::new_v4()),
        step_payload(&workflow_id, "step1", 1),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_step(pool: PgPool) {
    let workflow_id = create_workflow(&pool, "Removable Step Flow").await;

    let app = common::build_test_app(pool.clone());
    let created = body_json(
        post_json(
            app,
            "/api/v1/workflow-steps",
            step_payload(&workflow_id, "step1", 1),
        )
        .await,
    )
    .await;
    let id = created["id"].as_str().unwrap();
    let actor = Uuid::new_v4();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/workflow-steps/{id}?actor_id={actor}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/workflow-steps/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_steps_by_workflow(pool: PgPool) {
    let first = create_workflow(&pool, "First List Flow").await;
    let second = create_workflow(&pool, "Second List Flow").await;

    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/workflow-steps",
        step_payload(&first, "step1", 1),
    )
    .await;
    let app = common::build_test_app(pool.clone());
    post_json(
        app,
        "/api/v1/workflow-steps",
        step_payload(&second, "step1", 1),
    )
    .await;

    let app = common::build_test_app(pool.clone());
    let scoped = body_json(
        get(app, &format!("/api/v1/workflow-steps?workflow_id={first}")).await,
    )
    .await;
    assert_eq!(scoped.as_array().unwrap().len(), 1);
    assert_eq!(scoped[0]["workflow_id"], first);

    let app = common::build_test_app(pool);
    let summaries = body_json(get(app, "/api/v1/workflow-steps/summaries").await).await;
    let first_entry = &summaries.as_array().unwrap()[0];
    assert!(first_entry["id"].is_string());
    assert!(first_entry["step_name"].is_string());
}
