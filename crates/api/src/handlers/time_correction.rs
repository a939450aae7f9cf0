//! Handlers for the `/time-corrections` resource.
//!
//! Same workflow integration point as leave creation: an active template
//! for the time_correction module gates new requests behind an approval
//! instance; no template means the request goes through ungated.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use hrflow_core::error::CoreError;
use hrflow_core::module::{Module, STATUS_DEFAULT, STATUS_PENDING_APPROVAL};
use hrflow_core::types::DbId;
use hrflow_db::models::time_correction::{CreateTimeCorrection, TimeCorrectionFilter};
use hrflow_db::repositories::TimeCorrectionRepo;

use crate::engine::instance;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/time-corrections
pub async fn create_time_correction(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTimeCorrection>,
) -> AppResult<impl IntoResponse> {
    let template = instance::active_template(&state.pool, Module::TimeCorrection).await?;
    let status = if template.is_some() {
        STATUS_PENDING_APPROVAL
    } else {
        STATUS_DEFAULT
    };

    let correction = TimeCorrectionRepo::create(&state.pool, &input, status).await?;

    if let Some(template) = template {
        instance::open_instance(
            &state.pool,
            &template,
            Module::TimeCorrection,
            correction.id,
        )
        .await?;
    }

    tracing::info!(
        time_correction_id = correction.id,
        employee_id = correction.employee_id,
        user_id = auth.user_id,
        status = %correction.status,
        "Time correction created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: correction })))
}

/// GET /api/v1/time-corrections
pub async fn list_time_corrections(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(filter): Query<TimeCorrectionFilter>,
) -> AppResult<impl IntoResponse> {
    let corrections = TimeCorrectionRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: corrections }))
}

/// GET /api/v1/time-corrections/{id}
pub async fn get_time_correction(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let correction = TimeCorrectionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "TimeCorrection",
            id,
        })?;
    Ok(Json(DataResponse { data: correction }))
}
