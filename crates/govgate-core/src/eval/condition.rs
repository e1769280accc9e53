//! Condition comparisons (fail-closed).
//!
//! Rules:
//! - Never error, never panic.
//! - Any type mismatch or unsupported operator compares `false`.

use std::cmp::Ordering;

use crate::policy::{Operator, Value};

/// Compare `actual` (from the context, `Null` when absent) with `expected`.
pub fn compare(actual: &Value, operator: &Operator, expected: &Value) -> bool {
    match operator {
        Operator::Equals => actual == expected,
        Operator::NotEquals => actual != expected,
        Operator::Contains => contains(actual, expected),
        Operator::GreaterThan => numeric(actual, expected, Ordering::is_gt),
        Operator::LessThan => numeric(actual, expected, Ordering::is_lt),
        Operator::Unsupported(_) => false,
    }
}

fn contains(actual: &Value, expected: &Value) -> bool {
    match actual {
        Value::Str(haystack) => expected.as_str().is_some_and(|needle| haystack.contains(needle)),
        Value::List(items) => items.iter().any(|item| item == expected),
        _ => false,
    }
}

fn numeric(actual: &Value, expected: &Value, want: fn(Ordering) -> bool) -> bool {
    let ord = match (actual, expected) {
        // exact for integers beyond f64 precision
        (Value::Int(_) | Value::UInt(_), Value::Int(_) | Value::UInt(_)) => {
            actual.as_i128().zip(expected.as_i128()).map(|(a, e)| a.cmp(&e))
        }
        _ => match (actual.as_f64(), expected.as_f64()) {
            (Some(a), Some(e)) => a.partial_cmp(&e),
            _ => None,
        },
    };
    ord.is_some_and(want)
}
