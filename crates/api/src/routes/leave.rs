//! Route definitions for the `/leaves` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::leave;
use crate::state::AppState;

/// Routes mounted at `/leaves`.
///
/// ```text
/// GET    /       -> list_leaves
/// POST   /       -> create_leave
/// GET    /{id}   -> get_leave
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(leave::list_leaves).post(leave::create_leave))
        .route("/{id}", get(leave::get_leave))
}
