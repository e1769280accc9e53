//! Policy evaluation vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use govgate_core::eval::decide;
use govgate_core::rate::NoopCounter;

mod vector_loader;

#[test]
fn policy_vectors() {
    let files = [
        "orbit_call_reasoning_allowed.json",
        "disabled_policy.json",
        "outside_time_window.json",
        "inside_time_window.json",
        "blocked_user.json",
        "active_user.json",
        "undescribed_condition.json",
    ];

    for f in files {
        let v = vector_loader::load_policy(f);
        let d = decide(&v.policy, &v.context, v.hour, &NoopCounter);
        assert_eq!(d.allowed(), v.expect.allowed, "vector={}", v.description);
        assert_eq!(d.reason(), v.expect.reason, "vector={}", v.description);
    }
}

#[test]
fn repeated_decisions_are_identical() {
    let v = vector_loader::load_policy("blocked_user.json");
    let first = decide(&v.policy, &v.context, v.hour, &NoopCounter);
    for _ in 0..10 {
        assert_eq!(decide(&v.policy, &v.context, v.hour, &NoopCounter), first);
    }
}
