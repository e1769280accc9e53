//! Built-in default policy set (orbit -> reasoning / metrics).

use govgate_core::policy::{Condition, Operator, PolicyDocument, RateLimits, TimeRestrictions};

fn all_hours() -> TimeRestrictions {
    TimeRestrictions { allowed_hours: (0..24).collect() }
}

pub fn default_policies() -> Vec<PolicyDocument> {
    vec![
        PolicyDocument {
            service: "orbit".into(),
            intent: "call_reasoning".into(),
            enabled: true,
            description: Some("Allow Orbit to call Axon reasoning service".into()),
            time_restrictions: Some(all_hours()),
            rate_limits: Some(RateLimits {
                requests_per_minute: Some(100),
                requests_per_hour: Some(1000),
            }),
            conditions: vec![Condition::context_check("user_type", Operator::NotEquals, "blocked")
                .with_description("User must not be blocked")],
        },
        PolicyDocument {
            service: "orbit".into(),
            intent: "call_metrics".into(),
            enabled: true,
            description: Some("Allow Orbit to retrieve metrics".into()),
            time_restrictions: Some(all_hours()),
            rate_limits: Some(RateLimits {
                requests_per_minute: Some(60),
                requests_per_hour: Some(500),
            }),
            conditions: Vec::new(),
        },
    ]
}
