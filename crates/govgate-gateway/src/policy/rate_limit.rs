//! In-process fixed-window rate counter.
//!
//! Counts are per gateway process and reset when the window rolls over.
//! Multiple replicas each count independently; a shared counter store is
//! needed for a global quota.
//!
//! Both windows for a key live in one map entry, so the check-then-charge in
//! `admit` happens under a single shard lock.

use std::time::Instant;

use dashmap::DashMap;

use govgate_core::rate::{RateCounter, RateWindow};

#[derive(Debug)]
struct Window {
    started: Instant,
    count: u64,
}

#[derive(Debug, Default)]
struct Slots {
    minute: Option<Window>,
    hour: Option<Window>,
}

impl Slots {
    fn slot(&mut self, window: RateWindow) -> &mut Option<Window> {
        match window {
            RateWindow::Minute => &mut self.minute,
            RateWindow::Hour => &mut self.hour,
        }
    }

    fn get(&self, window: RateWindow) -> Option<&Window> {
        match window {
            RateWindow::Minute => self.minute.as_ref(),
            RateWindow::Hour => self.hour.as_ref(),
        }
    }
}

#[derive(Debug, Default)]
pub struct FixedWindowCounter {
    keys: DashMap<String, Slots>,
}

impl FixedWindowCounter {
    pub fn new() -> Self {
        Self::default()
    }

    fn hit(&self, key: &str, limits: &[(RateWindow, u64)], now: Instant) -> bool {
        let mut slots = self.keys.entry(key.to_string()).or_insert_with(Slots::default);

        for &(window, limit) in limits {
            let w = slots
                .slot(window)
                .get_or_insert_with(|| Window { started: now, count: 0 });
            if now.saturating_duration_since(w.started) >= window.duration() {
                w.started = now;
                w.count = 0;
            }
            if w.count >= limit {
                return false;
            }
        }

        for &(window, _) in limits {
            if let Some(w) = slots.slot(window) {
                w.count += 1;
            }
        }
        true
    }

    /// Requests counted in the current window.
    pub fn current(&self, key: &str, window: RateWindow) -> u64 {
        self.keys
            .get(key)
            .and_then(|s| {
                s.get(window)
                    .filter(|w| w.started.elapsed() < window.duration())
                    .map(|w| w.count)
            })
            .unwrap_or(0)
    }
}

impl RateCounter for FixedWindowCounter {
    fn admit(&self, key: &str, limits: &[(RateWindow, u64)]) -> bool {
        self.hit(key, limits, Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const MINUTE_2: &[(RateWindow, u64)] = &[(RateWindow::Minute, 2)];

    #[test]
    fn denies_after_limit_within_window() {
        let c = FixedWindowCounter::new();
        let t0 = Instant::now();
        assert!(c.hit("orbit:x", MINUTE_2, t0));
        assert!(c.hit("orbit:x", MINUTE_2, t0));
        assert!(!c.hit("orbit:x", MINUTE_2, t0));
        assert_eq!(c.current("orbit:x", RateWindow::Minute), 2);
        // other window and other key are independent
        assert!(c.hit("orbit:x", &[(RateWindow::Hour, 2)], t0));
        assert!(c.hit("orbit:y", MINUTE_2, t0));
    }

    #[test]
    fn window_rolls_over() {
        let c = FixedWindowCounter::new();
        let t0 = Instant::now();
        let limits = &[(RateWindow::Minute, 1)];
        assert!(c.hit("k", limits, t0));
        assert!(!c.hit("k", limits, t0 + Duration::from_secs(59)));
        assert!(c.hit("k", limits, t0 + Duration::from_secs(60)));
    }

    #[test]
    fn zero_limit_always_denies() {
        let c = FixedWindowCounter::new();
        assert!(!c.admit("k", &[(RateWindow::Hour, 0)]));
    }

    #[test]
    fn hour_denial_does_not_charge_minute() {
        let c = FixedWindowCounter::new();
        let t0 = Instant::now();
        let limits = &[(RateWindow::Minute, 5), (RateWindow::Hour, 1)];

        assert!(c.hit("orbit:call_metrics", limits, t0));
        for _ in 0..3 {
            assert!(!c.hit("orbit:call_metrics", limits, t0));
        }
        assert_eq!(c.current("orbit:call_metrics", RateWindow::Minute), 1);
        assert_eq!(c.current("orbit:call_metrics", RateWindow::Hour), 1);
    }

    #[test]
    fn minute_denial_does_not_charge_hour() {
        let c = FixedWindowCounter::new();
        let t0 = Instant::now();
        let limits = &[(RateWindow::Minute, 1), (RateWindow::Hour, 10)];

        assert!(c.hit("k", limits, t0));
        assert!(!c.hit("k", limits, t0));
        assert_eq!(c.current("k", RateWindow::Hour), 1);
    }
}
