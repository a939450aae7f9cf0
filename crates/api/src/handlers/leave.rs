//! Handlers for the `/leaves` resource.
//!
//! Leave creation is a workflow integration point: when an active template
//! with steps exists for the leave module, the new leave is persisted as
//! `pending_approval` and a workflow instance is opened against it. With no
//! template the leave keeps its default status and no instance exists --
//! absence of a workflow is a valid configuration, not an error.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use hrflow_core::error::CoreError;
use hrflow_core::module::{Module, STATUS_DEFAULT, STATUS_PENDING_APPROVAL};
use hrflow_core::types::DbId;
use hrflow_db::models::leave::{CreateLeave, LeaveFilter};
use hrflow_db::repositories::LeaveRepo;

use crate::engine::instance;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/leaves
pub async fn create_leave(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateLeave>,
) -> AppResult<impl IntoResponse> {
    let template = instance::active_template(&state.pool, Module::Leave).await?;
    let status = if template.is_some() {
        STATUS_PENDING_APPROVAL
    } else {
        STATUS_DEFAULT
    };

    let leave = LeaveRepo::create(&state.pool, &input, status).await?;

    if let Some(template) = template {
        instance::open_instance(&state.pool, &template, Module::Leave, leave.id).await?;
    }

    tracing::info!(
        leave_id = leave.id,
        employee_id = leave.employee_id,
        user_id = auth.user_id,
        status = %leave.status,
        "Leave request created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: leave })))
}

/// GET /api/v1/leaves
pub async fn list_leaves(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<LeaveFilter>,
) -> AppResult<impl IntoResponse> {
    let leaves = LeaveRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: leaves }))
}

/// GET /api/v1/leaves/{id}
pub async fn get_leave(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let leave = LeaveRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Leave", id })?;
    Ok(Json(DataResponse { data: leave }))
}
