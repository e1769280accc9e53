//! Request parsing and response envelopes for `/v1/evaluate`.

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use govgate_core::error::{GovError, Result};
use govgate_core::Context;

pub const MSG_INVALID_JSON: &str = "Invalid JSON in request body";
pub const MSG_MISSING_FIELDS: &str = "Missing required fields: service and intent";
pub const MSG_BAD_CONTEXT: &str = "Field 'context' must be an object";
pub const MSG_INTERNAL: &str = "Internal server error";

/// Parsed evaluate request.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluateRequest {
    pub service: String,
    pub intent: String,
    pub context: Context,
}

/// Correlation id carried in the body, if any.
pub fn body_correlation_id(body: &Json) -> Option<&str> {
    body.get("correlation_id")
        .and_then(Json::as_str)
        .filter(|s| !s.is_empty())
}

/// Extract `service`, `intent` and optional `context` from a JSON body.
///
/// `context` may be absent or null (empty context). Errors carry the
/// client-facing message.
pub fn parse_request(body: &Json) -> Result<EvaluateRequest> {
    let field = |name: &str| {
        body.get(name)
            .and_then(Json::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let (Some(service), Some(intent)) = (field("service"), field("intent")) else {
        return Err(GovError::BadRequest(MSG_MISSING_FIELDS.into()));
    };

    let context = match body.get("context") {
        None | Some(Json::Null) => Context::new(),
        Some(obj @ Json::Object(_)) => context_from(obj)?,
        Some(_) => return Err(GovError::BadRequest(MSG_BAD_CONTEXT.into())),
    };

    Ok(EvaluateRequest { service, intent, context })
}

fn context_from(v: &Json) -> Result<Context> {
    Context::deserialize(v).map_err(|_| GovError::BadRequest(MSG_BAD_CONTEXT.into()))
}

/// Decision envelope (200 when allowed, 403 when denied).
#[derive(Debug, Serialize)]
pub struct DecisionEnvelope {
    pub service: String,
    pub intent: String,
    pub allowed: bool,
    pub reason: String,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub correlation_id: String,
}

/// Error envelope (400 / 500).
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub correlation_id: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn context_defaults_to_empty() {
        let r = parse_request(&json!({"service": "orbit", "intent": "call_reasoning"})).unwrap();
        assert!(r.context.is_empty());
        let r = parse_request(&json!({"service": "orbit", "intent": "x", "context": null})).unwrap();
        assert!(r.context.is_empty());
    }

    #[test]
    fn missing_or_empty_fields() {
        for body in [
            json!({"service": "orbit"}),
            json!({"intent": "x"}),
            json!({"service": "", "intent": "x"}),
            json!({"service": 7, "intent": "x"}),
            json!([1, 2]),
        ] {
            let err = parse_request(&body).unwrap_err();
            assert_eq!(err.to_string(), format!("bad request: {MSG_MISSING_FIELDS}"));
        }
    }

    #[test]
    fn context_must_be_object() {
        let err = parse_request(&json!({"service": "orbit", "intent": "x", "context": [1]}))
            .unwrap_err();
        assert!(err.to_string().contains("context"));
    }

    #[test]
    fn body_correlation() {
        assert_eq!(body_correlation_id(&json!({"correlation_id": "abc"})), Some("abc"));
        assert_eq!(body_correlation_id(&json!({"correlation_id": ""})), None);
    }
}
