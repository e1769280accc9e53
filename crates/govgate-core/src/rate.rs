//! Rate-limit counter seam.
//!
//! Policies declare per-minute and per-hour quotas; enforcement is delegated
//! to a `RateCounter`. The default `NoopCounter` admits everything, so a
//! declared limit alone never denies a request.

use std::fmt;
use std::time::Duration;

/// Quota window declared by a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateWindow {
    Minute,
    Hour,
}

impl RateWindow {
    pub fn duration(self) -> Duration {
        match self {
            RateWindow::Minute => Duration::from_secs(60),
            RateWindow::Hour => Duration::from_secs(3600),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RateWindow::Minute => "minute",
            RateWindow::Hour => "hour",
        }
    }
}

impl fmt::Display for RateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Quota check for one request against `key`.
///
/// `admit` checks every `(window, limit)` pair before charging any of them:
/// a request is counted in all windows or in none, so a request denied by
/// the hour window leaves the minute window untouched.
pub trait RateCounter: Send + Sync {
    fn admit(&self, key: &str, limits: &[(RateWindow, u64)]) -> bool;
}

/// Admits every request.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCounter;

impl RateCounter for NoopCounter {
    fn admit(&self, _key: &str, _limits: &[(RateWindow, u64)]) -> bool {
        true
    }
}
