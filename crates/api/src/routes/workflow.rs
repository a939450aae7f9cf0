//! Route definitions for workflow templates and instances.
//!
//! All endpoints require authentication.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::workflow;
use crate::state::AppState;

/// Routes mounted at `/workflows`.
///
/// ```text
/// GET    /          -> list_templates
/// POST   /          -> create_template
/// GET    /{id}      -> get_template
/// PUT    /{id}      -> update_template
/// DELETE /{id}      -> delete_template
/// ```
pub fn template_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(workflow::list_templates).post(workflow::create_template),
        )
        .route(
            "/{id}",
            get(workflow::get_template)
                .put(workflow::update_template)
                .delete(workflow::delete_template),
        )
}

/// Routes mounted at `/workflow-instances`.
///
/// Instance creation has no route: instances are opened internally by the
/// business-module hooks.
///
/// ```text
/// GET    /               -> list_instances
/// GET    /{id}           -> get_instance
/// GET    /{id}/details   -> get_instance_details
/// PUT    /{id}/action    -> apply_instance_action
/// ```
pub fn instance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(workflow::list_instances))
        .route("/{id}", get(workflow::get_instance))
        .route("/{id}/details", get(workflow::get_instance_details))
        .route("/{id}/action", put(workflow::apply_instance_action))
}
