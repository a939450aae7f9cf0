//! Handlers for workflow templates and workflow instances.
//!
//! Templates define reusable approval chains per business module; instances
//! track one document's progress through a chain. Instance creation has no
//! public endpoint: instances are opened internally by the module hooks in
//! the leave and time-correction handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use hrflow_core::error::CoreError;
use hrflow_core::module::Module;
use hrflow_core::types::DbId;
use hrflow_core::workflow::{sort_steps, validate_steps};
use hrflow_db::models::workflow::{
    ActionRequest, CreateWorkflowTemplate, InstanceFilter, TemplateFilter,
    UpdateWorkflowTemplate,
};
use hrflow_db::repositories::{WorkflowInstanceRepo, WorkflowTemplateRepo};

use crate::engine::instance;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Templates
// ---------------------------------------------------------------------------

/// POST /api/v1/workflows
///
/// Create a workflow template. The module must be a registered one and
/// `role` steps must carry an `approver_id`; steps are stored sorted by
/// `order` ascending.
pub async fn create_template(
    _auth: AuthUser,
    State(state): State<AppState>,
    Json(mut input): Json<CreateWorkflowTemplate>,
) -> AppResult<impl IntoResponse> {
    Module::from_tag(&input.module)?;
    validate_steps(&input.steps)?;
    sort_steps(&mut input.steps);

    let template = WorkflowTemplateRepo::create(&state.pool, &input).await?;

    tracing::info!(
        template_id = template.id,
        module = %template.module,
        steps = template.steps.0.len(),
        "Workflow template created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// GET /api/v1/workflows
pub async fn list_templates(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<TemplateFilter>,
) -> AppResult<impl IntoResponse> {
    let templates = WorkflowTemplateRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// GET /api/v1/workflows/{id}
pub async fn get_template(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = WorkflowTemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "WorkflowTemplate",
            id,
        })?;
    Ok(Json(DataResponse { data: template }))
}

/// PUT /api/v1/workflows/{id}
///
/// Partial update. In-flight instances are unaffected: they progress
/// against the step snapshot taken when they were opened.
pub async fn update_template(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(mut input): Json<UpdateWorkflowTemplate>,
) -> AppResult<impl IntoResponse> {
    if let Some(module) = &input.module {
        Module::from_tag(module)?;
    }
    if let Some(steps) = &mut input.steps {
        validate_steps(steps)?;
        sort_steps(steps);
    }

    let template = WorkflowTemplateRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "WorkflowTemplate",
            id,
        })?;

    tracing::info!(template_id = template.id, "Workflow template updated");
    Ok(Json(DataResponse { data: template }))
}

/// DELETE /api/v1/workflows/{id}
pub async fn delete_template(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = WorkflowTemplateRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "WorkflowTemplate",
            id,
        }
        .into());
    }

    tracing::info!(template_id = id, "Workflow template deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Instances
// ---------------------------------------------------------------------------

/// GET /api/v1/workflow-instances
pub async fn list_instances(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<InstanceFilter>,
) -> AppResult<impl IntoResponse> {
    let instances = WorkflowInstanceRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: instances }))
}

/// GET /api/v1/workflow-instances/{id}
pub async fn get_instance(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let found = WorkflowInstanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "WorkflowInstance",
            id,
        })?;
    Ok(Json(DataResponse { data: found }))
}

/// GET /api/v1/workflow-instances/{id}/details
///
/// Instance enriched with its template and reference document. Either
/// enrichment is null when the weak reference no longer resolves.
pub async fn get_instance_details(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let details = instance::get_details(&state.pool, id).await?;
    Ok(Json(DataResponse { data: details }))
}

/// PUT /api/v1/workflow-instances/{id}/action
///
/// Submit an approve/reject decision for the instance's current step.
/// 404 if the instance is unknown, 409 if it is already resolved.
pub async fn apply_instance_action(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ActionRequest>,
) -> AppResult<impl IntoResponse> {
    let updated = instance::apply_action(&state.pool, id, &input, auth.user_id).await?;
    Ok(Json(DataResponse { data: updated }))
}
