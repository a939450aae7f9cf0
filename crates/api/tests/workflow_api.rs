//! HTTP-level integration tests for the workflow template and instance
//! endpoints.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router.
//! Business documents are created through their own endpoints so the module
//! hooks fire exactly as they do in production.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, put_json, put_json_as};
use serde_json::json;
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn manager_step(order: i64, name: &str) -> serde_json::Value {
    json!({ "order": order, "name": name, "approver_type": "manager" })
}

fn leave_template(steps: Vec<serde_json::Value>) -> serde_json::Value {
    json!({
        "name": "Leave approval",
        "description": "Approval chain for leave requests",
        "module": "leave",
        "steps": steps,
    })
}

fn new_leave() -> serde_json::Value {
    json!({
        "employee_id": 101,
        "leave_type": "annual",
        "start_date": "2026-09-01",
        "end_date": "2026-09-05",
        "reason": "family trip",
    })
}

/// Create a template over HTTP and return its id.
async fn create_template(app: &axum::Router, body: serde_json::Value) -> i64 {
    let response = post_json(app.clone(), "/api/v1/workflows", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a leave over HTTP and return the full document.
async fn create_leave(app: &axum::Router) -> serde_json::Value {
    let response = post_json(app.clone(), "/api/v1/leaves", new_leave()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"].clone()
}

/// Fetch the single open instance for the leave module.
async fn only_leave_instance(app: &axum::Router) -> serde_json::Value {
    let response = get(app.clone(), "/api/v1/workflow-instances?module=leave").await;
    assert_eq!(response.status(), StatusCode::OK);
    let instances = body_json(response).await["data"].clone();
    let instances = instances.as_array().unwrap().clone();
    assert_eq!(instances.len(), 1, "expected exactly one leave instance");
    instances[0].clone()
}

async fn submit_action(
    app: &axum::Router,
    instance_id: i64,
    action: &str,
    comment: Option<&str>,
) -> axum::response::Response {
    put_json(
        app.clone(),
        &format!("/api/v1/workflow-instances/{instance_id}/action"),
        json!({ "action": action, "comment": comment }),
    )
    .await
}

// ---------------------------------------------------------------------------
// Test: template CRUD round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_template_crud_round_trip(pool: PgPool) {
    let app = build_test_app(pool);

    let id = create_template(&app, leave_template(vec![manager_step(1, "manager")])).await;

    // Get
    let response = get(app.clone(), &format!("/api/v1/workflows/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["module"], "leave");
    assert_eq!(json["data"]["is_active"], true);

    // Update: rename and deactivate.
    let response = put_json(
        app.clone(),
        &format!("/api/v1/workflows/{id}"),
        json!({ "name": "Leave approval v2", "is_active": false }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["name"], "Leave approval v2");
    assert_eq!(json["data"]["is_active"], false);

    // List filtered by module.
    let response = get(app.clone(), "/api/v1/workflows?module=leave").await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    // Delete.
    let response = delete(app.clone(), &format!("/api/v1/workflows/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/workflows/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Test: template validation failures
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_role_step_without_approver_id_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let body = leave_template(vec![json!({
        "order": 1,
        "name": "hr role",
        "approver_type": "role",
    })]);
    let response = post_json(app.clone(), "/api/v1/workflows", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_module_is_rejected(pool: PgPool) {
    let app = build_test_app(pool);

    let body = json!({
        "name": "Expense approval",
        "module": "expense",
        "steps": [manager_step(1, "manager")],
    });
    let response = post_json(app.clone(), "/api/v1/workflows", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: steps are stored sorted by order
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_steps_are_sorted_on_create(pool: PgPool) {
    let app = build_test_app(pool);

    let id = create_template(
        &app,
        leave_template(vec![
            manager_step(30, "director"),
            manager_step(10, "manager"),
            manager_step(20, "hr"),
        ]),
    )
    .await;

    let response = get(app.clone(), &format!("/api/v1/workflows/{id}")).await;
    let json = body_json(response).await;
    let orders: Vec<i64> = json["data"]["steps"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["order"].as_i64().unwrap())
        .collect();
    assert_eq!(orders, vec![10, 20, 30]);
}

// ---------------------------------------------------------------------------
// Test: single-step approval resolves instance and leave
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_single_step_approval_flow(pool: PgPool) {
    let app = build_test_app(pool);

    create_template(&app, leave_template(vec![manager_step(1, "manager")])).await;
    let leave = create_leave(&app).await;
    assert_eq!(leave["status"], "pending_approval");

    let instance = only_leave_instance(&app).await;
    assert_eq!(instance["status"], "pending");
    assert_eq!(instance["current_step"], 0);
    assert!(instance["step_history"].as_array().unwrap().is_empty());

    let instance_id = instance["id"].as_i64().unwrap();
    let response = submit_action(&app, instance_id, "approve", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");
    assert_eq!(json["data"]["step_history"].as_array().unwrap().len(), 1);

    // The outcome is reflected on the leave itself.
    let leave_id = leave["id"].as_i64().unwrap();
    let response = get(app.clone(), &format!("/api/v1/leaves/{leave_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");

    // A second approve hits a terminal instance.
    let response = submit_action(&app, instance_id, "approve", None).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INVALID_STATE");

    // Neither the leave nor the history changed.
    let response = get(app.clone(), &format!("/api/v1/leaves/{leave_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");

    let response = get(
        app.clone(),
        &format!("/api/v1/workflow-instances/{instance_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["step_history"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// Test: three-step progression pending -> in_progress -> approved
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_three_step_progression(pool: PgPool) {
    let app = build_test_app(pool);

    create_template(
        &app,
        leave_template(vec![
            manager_step(1, "manager"),
            manager_step(2, "hr"),
            manager_step(3, "director"),
        ]),
    )
    .await;
    create_leave(&app).await;

    let instance = only_leave_instance(&app).await;
    let instance_id = instance["id"].as_i64().unwrap();

    for (n, expected) in [(1, "in_progress"), (2, "in_progress"), (3, "approved")] {
        let response = submit_action(&app, instance_id, "approve", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["status"], expected, "after approval {n}");
        assert_eq!(json["data"]["step_history"].as_array().unwrap().len(), n);
    }
}

// ---------------------------------------------------------------------------
// Test: step history attributes each action to its acting user
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_attributes_acting_users(pool: PgPool) {
    let app = build_test_app(pool);

    create_template(
        &app,
        leave_template(vec![manager_step(1, "manager"), manager_step(2, "hr")]),
    )
    .await;
    create_leave(&app).await;

    let instance = only_leave_instance(&app).await;
    let instance_id = instance["id"].as_i64().unwrap();
    let path = format!("/api/v1/workflow-instances/{instance_id}/action");

    let response = put_json_as(app.clone(), 11, &path, json!({ "action": "approve" })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = put_json_as(
        app.clone(),
        22,
        &path,
        json!({ "action": "approve", "comment": "looks fine" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let history = json["data"]["step_history"].as_array().unwrap().clone();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["user_id"], 11);
    assert_eq!(history[1]["user_id"], 22);
    assert_eq!(history[1]["comment"], "looks fine");
}

// ---------------------------------------------------------------------------
// Test: reject resolves instance and writes the reason back
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_reject_resolves_and_records_reason(pool: PgPool) {
    let app = build_test_app(pool);

    create_template(
        &app,
        leave_template(vec![
            manager_step(1, "manager"),
            manager_step(2, "hr"),
            manager_step(3, "director"),
        ]),
    )
    .await;
    let leave = create_leave(&app).await;

    let instance = only_leave_instance(&app).await;
    let instance_id = instance["id"].as_i64().unwrap();

    let response = submit_action(&app, instance_id, "reject", Some("insufficient balance")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");

    let history = json["data"]["step_history"].as_array().unwrap().clone();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["action"], "reject");
    assert_eq!(history[0]["comment"], "insufficient balance");

    let leave_id = leave["id"].as_i64().unwrap();
    let response = get(app.clone(), &format!("/api/v1/leaves/{leave_id}")).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "rejected");
    assert_eq!(json["data"]["rejection_reason"], "insufficient balance");
}

// ---------------------------------------------------------------------------
// Test: action error cases
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_action_on_unknown_instance_is_404(pool: PgPool) {
    let app = build_test_app(pool);
    let response = submit_action(&app, 999_999, "approve", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invalid_action_string_is_400(pool: PgPool) {
    let app = build_test_app(pool);

    create_template(&app, leave_template(vec![manager_step(1, "manager")])).await;
    create_leave(&app).await;
    let instance = only_leave_instance(&app).await;
    let instance_id = instance["id"].as_i64().unwrap();

    let response = submit_action(&app, instance_id, "escalate", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Test: template deletion does not affect an open instance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_template_delete_leaves_open_instance_intact(pool: PgPool) {
    let app = build_test_app(pool);

    let template_id =
        create_template(&app, leave_template(vec![manager_step(1, "manager")])).await;
    let leave = create_leave(&app).await;
    let instance = only_leave_instance(&app).await;
    let instance_id = instance["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/v1/workflows/{template_id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The instance still advances against its snapshot.
    let response = submit_action(&app, instance_id, "approve", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "approved");

    let leave_id = leave["id"].as_i64().unwrap();
    let response = get(app.clone(), &format!("/api/v1/leaves/{leave_id}")).await;
    assert_eq!(body_json(response).await["data"]["status"], "approved");
}

// ---------------------------------------------------------------------------
// Test: trailing skippable step resolves on prior approval
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_trailing_skippable_step_resolves_approved(pool: PgPool) {
    let app = build_test_app(pool);

    create_template(
        &app,
        leave_template(vec![
            manager_step(1, "manager"),
            json!({ "order": 2, "name": "audit", "approver_type": "other", "can_skip": true }),
        ]),
    )
    .await;
    create_leave(&app).await;

    let instance = only_leave_instance(&app).await;
    let instance_id = instance["id"].as_i64().unwrap();

    let response = submit_action(&app, instance_id, "approve", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "approved");
}

// ---------------------------------------------------------------------------
// Test: details enrichment, including a deleted reference document
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_details_enrichment_and_deleted_reference(pool: PgPool) {
    use hrflow_db::repositories::LeaveRepo;

    let app = build_test_app(pool.clone());

    create_template(&app, leave_template(vec![manager_step(1, "manager")])).await;
    let leave = create_leave(&app).await;
    let leave_id = leave["id"].as_i64().unwrap();

    let instance = only_leave_instance(&app).await;
    let instance_id = instance["id"].as_i64().unwrap();

    // With everything live, both enrichments are present.
    let response = get(
        app.clone(),
        &format!("/api/v1/workflow-instances/{instance_id}/details"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["workflow"]["module"], "leave");
    assert_eq!(json["data"]["reference_document"]["id"], leave_id);

    // Delete the leave out from under the instance.
    assert!(LeaveRepo::delete(&pool, leave_id).await.unwrap());

    let response = get(
        app.clone(),
        &format!("/api/v1/workflow-instances/{instance_id}/details"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["data"]["reference_document"].is_null());
}
