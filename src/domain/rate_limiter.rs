//! Fixed-window request limiter keyed by client address.
//!
//! [`FixedWindowLimiter`] keeps one counter per client key in a
//! [`DashMap`]. A key's window starts at its first request; once the window
//! length has fully elapsed the next request starts a fresh window with a
//! count of one. Bursts straddling a window boundary are admitted.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Default number of requests admitted per window.
pub const DEFAULT_MAX_REQUESTS: u32 = 60;

/// Default window length.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(60_000);

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// The request is admitted.
    Allowed {
        /// Requests left in the current window.
        remaining: u32,
    },
    /// The request exceeds the limit.
    Limited {
        /// Time until the current window ends.
        retry_after: Duration,
    },
}

impl RateDecision {
    /// Returns `true` when the request is admitted.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed { .. })
    }
}

/// Admission control for a family of routes.
///
/// Implementations must be safe to call from many request tasks at once
/// and must never block on I/O.
pub trait RateLimiter: Send + Sync + std::fmt::Debug {
    /// Records one request for `key` and decides whether to admit it.
    fn check_and_increment(&self, key: &str) -> RateDecision;

    /// Drops keys whose window has elapsed. Returns how many were removed.
    fn evict_expired(&self) -> usize;
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// In-process fixed-window limiter.
///
/// # Concurrency
///
/// - Checks on different keys proceed in parallel (sharded map).
/// - Checks on the same key are serialized by the shard's entry lock, so
///   concurrent increments are never lost.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    windows: DashMap<String, Window>,
    max_requests: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    /// Creates a limiter admitting `max_requests` per `window` per key.
    #[must_use]
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: DashMap::new(),
            max_requests,
            window,
        }
    }

    /// [`RateLimiter::check_and_increment`] against an explicit clock.
    pub fn check_and_increment_at(&self, key: &str, now: Instant) -> RateDecision {
        match self.windows.entry(key.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(Window {
                    count: 1,
                    started: now,
                });
                self.allowed(1)
            }
            Entry::Occupied(mut slot) => {
                let state = slot.get_mut();
                let elapsed = now.saturating_duration_since(state.started);
                if elapsed > self.window {
                    *state = Window {
                        count: 1,
                        started: now,
                    };
                    return self.allowed(1);
                }
                state.count = state.count.saturating_add(1);
                if state.count <= self.max_requests {
                    self.allowed(state.count)
                } else {
                    RateDecision::Limited {
                        retry_after: self.window.saturating_sub(elapsed),
                    }
                }
            }
        }
    }

    /// [`RateLimiter::evict_expired`] against an explicit clock.
    pub fn evict_expired_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, state| now.saturating_duration_since(state.started) <= self.window);
        before.saturating_sub(self.windows.len())
    }

    /// Number of tracked keys.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.windows.len()
    }

    const fn allowed(&self, count: u32) -> RateDecision {
        RateDecision::Allowed {
            remaining: self.max_requests.saturating_sub(count),
        }
    }
}

impl Default for FixedWindowLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW)
    }
}

impl RateLimiter for FixedWindowLimiter {
    fn check_and_increment(&self, key: &str) -> RateDecision {
        self.check_and_increment_at(key, Instant::now())
    }

    fn evict_expired(&self) -> usize {
        self.evict_expired_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn admits_up_to_limit_then_rejects() {
        let limiter = FixedWindowLimiter::default();
        let now = Instant::now();
        for _ in 0..DEFAULT_MAX_REQUESTS {
            assert!(limiter.check_and_increment_at("1.2.3.4", now).is_allowed());
        }
        assert!(!limiter.check_and_increment_at("1.2.3.4", now).is_allowed());
    }

    #[test]
    fn small_n_all_admitted() {
        let limiter = FixedWindowLimiter::new(5, DEFAULT_WINDOW);
        let now = Instant::now();
        for n in 1..=5 {
            assert_eq!(
                limiter.check_and_increment_at("k", now),
                RateDecision::Allowed { remaining: 5 - n }
            );
        }
        assert!(matches!(
            limiter.check_and_increment_at("k", now),
            RateDecision::Limited { .. }
        ));
    }

    #[test]
    fn keys_are_independent() {
        let limiter = FixedWindowLimiter::new(1, DEFAULT_WINDOW);
        let now = Instant::now();
        assert!(limiter.check_and_increment_at("a", now).is_allowed());
        assert!(!limiter.check_and_increment_at("a", now).is_allowed());
        assert!(limiter.check_and_increment_at("b", now).is_allowed());
    }

    #[test]
    fn window_resets_after_elapsed() {
        let limiter = FixedWindowLimiter::new(2, DEFAULT_WINDOW);
        let start = Instant::now();
        for _ in 0..5 {
            let _ = limiter.check_and_increment_at("k", start);
        }
        assert!(!limiter.check_and_increment_at("k", start).is_allowed());

        let exactly_at_boundary = start + DEFAULT_WINDOW;
        assert!(!limiter.check_and_increment_at("k", exactly_at_boundary).is_allowed());

        let later = start + DEFAULT_WINDOW + Duration::from_millis(1);
        assert_eq!(
            limiter.check_and_increment_at("k", later),
            RateDecision::Allowed { remaining: 1 }
        );
    }

    #[test]
    fn evicts_only_elapsed_windows() {
        let limiter = FixedWindowLimiter::new(10, Duration::from_secs(60));
        let start = Instant::now();
        let _ = limiter.check_and_increment_at("old", start);
        let _ = limiter.check_and_increment_at("fresh", start + Duration::from_secs(30));

        let removed = limiter.evict_expired_at(start + Duration::from_secs(61));
        assert_eq!(removed, 1);
        assert_eq!(limiter.tracked_keys(), 1);
        assert!(limiter
            .check_and_increment_at("fresh", start + Duration::from_secs(61))
            .is_allowed());
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let limiter = Arc::new(FixedWindowLimiter::new(1_000, DEFAULT_WINDOW));
        let now = Instant::now();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        let _ = limiter.check_and_increment_at("shared", now);
                    }
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().is_ok());
        }
        assert_eq!(
            limiter.check_and_increment_at("shared", now),
            RateDecision::Allowed {
                remaining: 1_000 - 801
            }
        );
    }
}
