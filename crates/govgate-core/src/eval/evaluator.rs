//! Policy evaluation: one document + one context -> one decision.
//!
//! Check order is fixed and the first failing check decides:
//! enabled -> time window -> rate limits -> conditions (in stored order).

use crate::policy::{Condition, ConditionKind, Context, PolicyDocument, RateLimits, Value};
use crate::rate::{RateCounter, RateWindow};

use super::condition::compare;
use super::decision::{Decision, Outcome};

/// Decide `policy` for `context` at `hour_utc`.
///
/// The only side effect is the `counter` call for declared rate limits.
pub fn decide(
    policy: &PolicyDocument,
    context: &Context,
    hour_utc: u32,
    counter: &dyn RateCounter,
) -> Decision {
    if !policy.enabled {
        return Decision::deny(Outcome::PolicyDisabled);
    }

    if !within_time_window(policy, hour_utc) {
        return Decision::deny(Outcome::OutsideTimeWindow);
    }

    if let Some(limits) = &policy.rate_limits {
        if !within_rate_limits(&policy.key(), limits, counter) {
            return Decision::deny(Outcome::RateLimitExceeded);
        }
    }

    for condition in &policy.conditions {
        if !condition_holds(policy, condition, context) {
            return Decision::deny(Outcome::ConditionNotMet {
                description: condition.description.clone(),
            });
        }
    }

    Decision::allow()
}

fn within_time_window(policy: &PolicyDocument, hour_utc: u32) -> bool {
    match &policy.time_restrictions {
        Some(tr) if !tr.allowed_hours.is_empty() => tr.allowed_hours.contains(&hour_utc),
        _ => true,
    }
}

fn within_rate_limits(key: &str, limits: &RateLimits, counter: &dyn RateCounter) -> bool {
    let declared: Vec<(RateWindow, u64)> = [
        (RateWindow::Minute, limits.requests_per_minute),
        (RateWindow::Hour, limits.requests_per_hour),
    ]
    .into_iter()
    .filter_map(|(window, limit)| limit.map(|l| (window, l)))
    .collect();

    declared.is_empty() || counter.admit(key, &declared)
}

static NULL: Value = Value::Null;

fn condition_holds(policy: &PolicyDocument, condition: &Condition, context: &Context) -> bool {
    match &condition.kind {
        Some(ConditionKind::ContextCheck) => {
            let actual = condition
                .field
                .as_deref()
                .and_then(|f| context.get(f))
                .unwrap_or(&NULL);
            match &condition.operator {
                Some(op) => compare(actual, op, &condition.value),
                None => false,
            }
        }
        // Unrecognized condition types pass (fail-open); `lint` reports them at load.
        other => {
            tracing::warn!(
                service = %policy.service,
                intent = %policy.intent,
                condition_type = ?other,
                "unknown condition type treated as satisfied"
            );
            true
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU64, Ordering};

    use super::*;
    use crate::policy::{Operator, TimeRestrictions};
    use crate::rate::NoopCounter;

    fn ctx(pairs: &[(&str, Value)]) -> Context {
        pairs.iter().map(|(k, v)| (k.to_string(), v.clone())).collect()
    }

    fn blocked_check() -> Condition {
        Condition::context_check("user_type", Operator::NotEquals, "blocked")
            .with_description("User must not be blocked")
    }

    #[test]
    fn disabled_wins_over_everything() {
        let mut p = PolicyDocument::new("orbit", "call_reasoning");
        p.enabled = false;
        p.time_restrictions = Some(TimeRestrictions { allowed_hours: vec![3] });
        p.conditions.push(blocked_check());
        for hour in [3, 12] {
            let d = decide(&p, &ctx(&[("user_type", "blocked".into())]), hour, &NoopCounter);
            assert_eq!(d.into_parts(), (false, "Policy is disabled".to_string()));
        }
    }

    #[test]
    fn time_window() {
        let mut p = PolicyDocument::new("orbit", "call_reasoning");
        p.time_restrictions = Some(TimeRestrictions { allowed_hours: vec![9, 10, 11] });
        assert!(decide(&p, &Context::new(), 10, &NoopCounter).allowed());
        assert_eq!(
            decide(&p, &Context::new(), 5, &NoopCounter).reason(),
            "Request outside allowed time window"
        );

        p.time_restrictions = Some(TimeRestrictions::default());
        assert!(decide(&p, &Context::new(), 5, &NoopCounter).allowed());
    }

    #[test]
    fn first_failing_condition_wins() {
        let mut p = PolicyDocument::new("orbit", "call_reasoning");
        p.conditions.push(blocked_check());
        p.conditions.push(
            Condition::context_check("tier", Operator::Equals, "gold").with_description("Gold tier"),
        );

        let d = decide(&p, &ctx(&[("user_type", "blocked".into())]), 0, &NoopCounter);
        assert_eq!(d.reason(), "Condition not met: User must not be blocked");

        let d = decide(&p, &ctx(&[("user_type", "active".into())]), 0, &NoopCounter);
        assert_eq!(d.reason(), "Condition not met: Gold tier");

        let d = decide(
            &p,
            &ctx(&[("user_type", "active".into()), ("tier", "gold".into())]),
            0,
            &NoopCounter,
        );
        assert!(d.allowed());
    }

    #[test]
    fn missing_operator_denies_and_unknown_type_passes() {
        let mut p = PolicyDocument::new("orbit", "x");
        let mut c = Condition::context_check("a", Operator::Equals, 1i64);
        c.operator = None;
        p.conditions.push(c);
        assert_eq!(
            decide(&p, &Context::new(), 0, &NoopCounter).reason(),
            "Condition not met: Unknown"
        );

        let mut p = PolicyDocument::new("orbit", "x");
        let mut c = Condition::context_check("a", Operator::Equals, 1i64);
        c.kind = Some(ConditionKind::Other("geo_check".into()));
        p.conditions.push(c);
        assert!(decide(&p, &Context::new(), 0, &NoopCounter).allowed());
    }

    struct Deny;

    impl RateCounter for Deny {
        fn admit(&self, _: &str, _: &[(RateWindow, u64)]) -> bool {
            false
        }
    }

    struct Calls(AtomicU64);

    impl RateCounter for Calls {
        fn admit(&self, key: &str, limits: &[(RateWindow, u64)]) -> bool {
            assert_eq!(key, "orbit:call_metrics");
            assert_eq!(limits, &[(RateWindow::Minute, 60), (RateWindow::Hour, 500)]);
            self.0.fetch_add(1, Ordering::Relaxed);
            true
        }
    }

    #[test]
    fn rate_limits_consult_counter() {
        let mut p = PolicyDocument::new("orbit", "call_metrics");
        p.rate_limits = Some(RateLimits {
            requests_per_minute: Some(60),
            requests_per_hour: Some(500),
        });

        assert!(decide(&p, &Context::new(), 0, &NoopCounter).allowed());
        assert_eq!(
            decide(&p, &Context::new(), 0, &Deny).reason(),
            "Rate limit exceeded"
        );

        let calls = Calls(AtomicU64::new(0));
        assert!(decide(&p, &Context::new(), 0, &calls).allowed());
        assert_eq!(calls.0.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn no_declared_window_skips_counter() {
        let mut p = PolicyDocument::new("orbit", "call_metrics");
        p.rate_limits = Some(RateLimits { requests_per_minute: None, requests_per_hour: None });
        assert!(decide(&p, &Context::new(), 0, &Deny).allowed());
    }

    #[test]
    fn disabled_policy_skips_counter() {
        let mut p = PolicyDocument::new("orbit", "call_metrics");
        p.enabled = false;
        p.rate_limits = Some(RateLimits { requests_per_minute: Some(1), requests_per_hour: None });
        assert_eq!(decide(&p, &Context::new(), 0, &Deny).reason(), "Policy is disabled");
    }
}
