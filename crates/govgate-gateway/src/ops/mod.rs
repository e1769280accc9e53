//! Operational endpoints for the governance gateway.
//!
//! - `/healthz` : process liveness only
//! - `/readyz`  : 503 "draining" after shutdown starts, 503 "no policies" while
//!   the policy store is empty (every evaluation would deny), else 200 "ready"
//! - `/metrics` : `govgate_*` series in Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::app_state::AppState;

const PROMETHEUS_TEXT: &str = "text/plain; version=0.0.4; charset=utf-8";

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_draining() {
        return (StatusCode::SERVICE_UNAVAILABLE, "draining");
    }
    if state.store().is_empty() {
        tracing::warn!("readiness probe failed: policy store is empty");
        return (StatusCode::SERVICE_UNAVAILABLE, "no policies");
    }
    (StatusCode::OK, "ready")
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    ([(header::CONTENT_TYPE, PROMETHEUS_TEXT)], state.metrics().render()).into_response()
}
