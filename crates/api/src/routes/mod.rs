pub mod health;
pub mod leave;
pub mod time_correction;
pub mod workflow;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workflows                          templates: list, create
/// /workflows/{id}                     get, update, delete
///
/// /workflow-instances                 list (filter: module, status)
/// /workflow-instances/{id}            get
/// /workflow-instances/{id}/details    enriched get
/// /workflow-instances/{id}/action     submit approve/reject (PUT)
///
/// /leaves                             list, create (workflow hook)
/// /leaves/{id}                        get
///
/// /time-corrections                   list, create (workflow hook)
/// /time-corrections/{id}              get
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workflows", workflow::template_router())
        .nest("/workflow-instances", workflow::instance_router())
        .nest("/leaves", leave::router())
        .nest("/time-corrections", time_correction::router())
}
