//! Route definitions for the `/time-corrections` resource.
//!
//! All endpoints require authentication.

use axum::routing::get;
use axum::Router;

use crate::handlers::time_correction;
use crate::state::AppState;

/// Routes mounted at `/time-corrections`.
///
/// ```text
/// GET    /       -> list_time_corrections
/// POST   /       -> create_time_correction
/// GET    /{id}   -> get_time_correction
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(time_correction::list_time_corrections)
                .post(time_correction::create_time_correction),
        )
        .route("/{id}", get(time_correction::get_time_correction))
}
