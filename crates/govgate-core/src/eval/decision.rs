use std::fmt;

/// Why a request was allowed or denied.
///
/// Reason text is derived from the variant only, so identical inputs always
/// produce identical text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Authorized,
    PolicyNotFound { service: String, intent: String },
    PolicyDisabled,
    OutsideTimeWindow,
    RateLimitExceeded,
    ConditionNotMet { description: Option<String> },
    /// Store or decode failure. The cause is logged, never shown.
    EvaluationError,
}

impl Outcome {
    /// Stable label for metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Authorized => "authorized",
            Outcome::PolicyNotFound { .. } => "policy_not_found",
            Outcome::PolicyDisabled => "policy_disabled",
            Outcome::OutsideTimeWindow => "outside_time_window",
            Outcome::RateLimitExceeded => "rate_limit_exceeded",
            Outcome::ConditionNotMet { .. } => "condition_not_met",
            Outcome::EvaluationError => "evaluation_error",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Authorized => f.write_str("Request authorized"),
            Outcome::PolicyNotFound { service, intent } => {
                write!(f, "No policy defined for {service}:{intent}")
            }
            Outcome::PolicyDisabled => f.write_str("Policy is disabled"),
            Outcome::OutsideTimeWindow => f.write_str("Request outside allowed time window"),
            Outcome::RateLimitExceeded => f.write_str("Rate limit exceeded"),
            Outcome::ConditionNotMet { description } => write!(
                f,
                "Condition not met: {}",
                description.as_deref().unwrap_or("Unknown")
            ),
            Outcome::EvaluationError => f.write_str("Governance evaluation error"),
        }
    }
}

/// Allow/deny result. Always complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    outcome: Outcome,
}

impl Decision {
    pub fn allow() -> Self {
        Self { outcome: Outcome::Authorized }
    }

    pub fn deny(outcome: Outcome) -> Self {
        Self { outcome }
    }

    pub fn allowed(&self) -> bool {
        self.outcome == Outcome::Authorized
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    pub fn reason(&self) -> String {
        self.outcome.to_string()
    }

    /// `(allowed, reason)` pair.
    pub fn into_parts(self) -> (bool, String) {
        (self.allowed(), self.reason())
    }
}

impl From<Outcome> for Decision {
    fn from(outcome: Outcome) -> Self {
        Self { outcome }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasons_are_stable() {
        let d = Decision::deny(Outcome::PolicyNotFound {
            service: "orbit".into(),
            intent: "call_x".into(),
        });
        assert_eq!(d.into_parts(), (false, "No policy defined for orbit:call_x".to_string()));

        let d = Decision::deny(Outcome::ConditionNotMet { description: None });
        assert_eq!(d.reason(), "Condition not met: Unknown");

        assert_eq!(Decision::allow().into_parts(), (true, "Request authorized".to_string()));
    }
}
