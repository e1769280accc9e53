//! Axum router wiring.
//!
//! `/v1/evaluate` for decisions plus the operational endpoints.

use axum::{routing::{get, post}, Router};

use crate::{app_state::AppState, ops, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/evaluate", post(transport::http::evaluate))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
