//! Wall-clock seam.
//!
//! The time-window check depends on the current UTC hour; tests inject a
//! fixed clock instead of patching global time.

use chrono::{DateTime, TimeZone, Timelike, Utc};

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current hour of day, 0..=23, UTC.
    fn hour_utc(&self) -> u32 {
        self.now().hour()
    }
}

/// Real time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// 2024-01-01 at `hour:00:00` UTC. Hours above 23 clamp to 23.
    pub fn at_hour(hour: u32) -> Self {
        Self(
            Utc.with_ymd_and_hms(2024, 1, 1, hour.min(23), 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
