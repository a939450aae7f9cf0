//! Route definition for the root-level health check.

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted at the server root (outside `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
