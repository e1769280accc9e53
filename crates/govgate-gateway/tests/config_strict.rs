#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use govgate_gateway::config::{self, LogFormat, RateLimitMode};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:8080"
store:
  seed_defaults: true
  polices_file: "p.json" # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let ok = r#"
version: 1
store:
  seed_defaults: true
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.listen, "0.0.0.0:8080");
    assert_eq!(cfg.gateway.evaluate_timeout_ms, 2000);
    assert_eq!(cfg.rate_limit.mode, RateLimitMode::Noop);
    assert_eq!(cfg.logging.format, LogFormat::Text);
}

#[test]
fn store_section_is_required() {
    let err = config::load_from_str("version: 1\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");

    let err = config::load_from_str("version: 1\nstore: {}\n").expect_err("must fail");
    assert!(err.to_string().contains("policies_file or seed_defaults"));
}

#[test]
fn unsupported_version() {
    let err = config::load_from_str("version: 2\nstore: { seed_defaults: true }\n")
        .expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn timeout_out_of_range() {
    let bad = r#"
version: 1
gateway:
  evaluate_timeout_ms: 5
store:
  seed_defaults: true
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn full_config() {
    let ok = r#"
version: 1
gateway:
  listen: "127.0.0.1:9090"
  evaluate_timeout_ms: 500
store:
  policies_file: "policies/default.json"
rate_limit:
  mode: in_memory
logging:
  format: json
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.store.policies_file.as_deref(), Some("policies/default.json"));
    assert!(!cfg.store.seed_defaults);
    assert_eq!(cfg.rate_limit.mode, RateLimitMode::InMemory);
    assert_eq!(cfg.logging.format, LogFormat::Json);
}
