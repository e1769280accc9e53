//! `POST /v1/evaluate` handler.
//!
//! - Correlation id: `X-Correlation-ID` header, else body `correlation_id`,
//!   else `"unknown"`; echoed back in the response header.
//! - The engine call is synchronous, so it runs on the blocking pool under
//!   `gateway.evaluate_timeout_ms`.
//! - Engine errors never reach the body; only fixed messages do.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use govgate_core::error::{ClientCode, GovError, Result};
use govgate_core::Decision;

use crate::app_state::AppState;
use crate::obs::GovernanceMetrics;

use super::envelope::{
    body_correlation_id, parse_request, DecisionEnvelope, ErrorEnvelope, EvaluateRequest,
    MSG_INTERNAL, MSG_INVALID_JSON,
};

pub const CORRELATION_HEADER: &str = "x-correlation-id";
const UNKNOWN_CORRELATION: &str = "unknown";

pub async fn evaluate(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let header_cid = headers
        .get(CORRELATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let parsed: std::result::Result<JsonValue, _> = serde_json::from_slice(&body);

    let correlation_id = header_cid
        .or_else(|| {
            parsed
                .as_ref()
                .ok()
                .and_then(body_correlation_id)
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_CORRELATION.to_string());

    tracing::info!(%correlation_id, bytes = body.len(), "governance_request");

    let json = match parsed {
        Ok(j) => j,
        Err(e) => {
            tracing::error!(%correlation_id, error = %e, "json decode error");
            return error_response(&state, StatusCode::BAD_REQUEST, MSG_INVALID_JSON, &correlation_id);
        }
    };

    let req = match parse_request(&json) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(%correlation_id, error = %e, "bad evaluate request");
            let status = status_for(e.client_code());
            let msg = match e {
                GovError::BadRequest(msg) => msg,
                _ => MSG_INTERNAL.to_string(),
            };
            return error_response(&state, status, &msg, &correlation_id);
        }
    };

    let (service, intent) = (req.service.clone(), req.intent.clone());
    let decision = match run_engine(&state, req).await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(%correlation_id, %service, %intent, error = %e, "unexpected engine failure");
            return error_response(&state, status_for(e.client_code()), MSG_INTERNAL, &correlation_id);
        }
    };

    let (allowed, reason) = decision.into_parts();
    tracing::info!(%correlation_id, allowed, %reason, "governance_response");

    let envelope = DecisionEnvelope {
        service,
        intent,
        allowed,
        reason,
        timestamp: epoch_secs(&state),
        correlation_id: correlation_id.clone(),
    };
    let status = if allowed { StatusCode::OK } else { StatusCode::FORBIDDEN };
    respond(&state, status, &correlation_id, envelope)
}

/// Holds one `evaluations_in_flight` slot; released on drop, including when
/// the handler future is dropped on client disconnect.
struct InFlight(Arc<GovernanceMetrics>);

impl InFlight {
    fn enter(metrics: Arc<GovernanceMetrics>) -> Self {
        metrics.evaluations_in_flight.inc(&[]);
        Self(metrics)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.evaluations_in_flight.dec(&[]);
    }
}

async fn run_engine(state: &AppState, req: EvaluateRequest) -> Result<Decision> {
    let engine = state.engine();
    let timeout = Duration::from_millis(state.cfg().gateway.evaluate_timeout_ms);

    let _in_flight = InFlight::enter(engine.metrics());
    let task = tokio::task::spawn_blocking(move || {
        engine.evaluate(&req.service, &req.intent, &req.context)
    });
    let out = tokio::time::timeout(timeout, task).await;

    match out {
        Ok(Ok(decision)) => Ok(decision),
        Ok(Err(join)) => Err(GovError::Internal(format!("evaluation task failed: {join}"))),
        Err(_) => Err(GovError::Timeout),
    }
}

fn status_for(code: ClientCode) -> StatusCode {
    match code {
        ClientCode::BadRequest => StatusCode::BAD_REQUEST,
        // Timeouts and internal faults share the generic 500 body.
        ClientCode::InvalidPolicy
        | ClientCode::UnsupportedVersion
        | ClientCode::Timeout
        | ClientCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn epoch_secs(state: &AppState) -> f64 {
    state.engine().clock().now().timestamp_millis() as f64 / 1000.0
}

fn error_response(state: &AppState, status: StatusCode, msg: &str, correlation_id: &str) -> Response {
    respond(
        state,
        status,
        correlation_id,
        ErrorEnvelope {
            error: msg.to_string(),
            correlation_id: correlation_id.to_string(),
        },
    )
}

fn respond<T: Serialize>(state: &AppState, status: StatusCode, correlation_id: &str, body: T) -> Response {
    state
        .metrics()
        .http_requests
        .inc(&[("status", status.as_str())]);

    let mut resp = (status, Json(body)).into_response();
    if let Ok(v) = HeaderValue::from_str(correlation_id) {
        resp.headers_mut()
            .insert(HeaderName::from_static(CORRELATION_HEADER), v);
    }
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_flight_released_on_drop() {
        let metrics = Arc::new(GovernanceMetrics::default());
        let guard = InFlight::enter(Arc::clone(&metrics));
        assert_eq!(metrics.evaluations_in_flight.get(&[]), 1);
        drop(guard);
        assert_eq!(metrics.evaluations_in_flight.get(&[]), 0);
    }

    #[tokio::test]
    async fn in_flight_released_when_request_future_is_dropped() {
        let metrics = Arc::new(GovernanceMetrics::default());
        let held = Arc::clone(&metrics);
        let request = async move {
            let _in_flight = InFlight::enter(held);
            std::future::pending::<()>().await;
        };

        // stands in for a client disconnect: the future never completes
        let _ = tokio::time::timeout(Duration::from_millis(10), request).await;
        assert_eq!(metrics.evaluations_in_flight.get(&[]), 0);
    }
}
