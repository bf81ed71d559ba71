use axum::{
    Router,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use banter_core::health::{healthz, readyz};
use banter_core::middleware::request_id_layer;

use crate::handlers::password::{check_reset_code, issue_reset_code, reset_password};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Password recovery
        .route("/password/code", post(issue_reset_code))
        .route("/password/code/check", post(check_reset_code))
        .route("/password", patch(reset_password))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
