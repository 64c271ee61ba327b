//! Per-source-IP admission throttle (SPEC_FULL.md §4.6, B2, S6).
//!
//! The spec's HTTP rate limit is a literal "at most one successful POST
//! per source IP per sliding 60-second window", not a bursty budget, so
//! this keeps the atomic, lock-free spirit of a token bucket while
//! dropping the token/refill bookkeeping: each IP gets one slot holding
//! the millis of its last admitted request, and `DashMap::entry` gives
//! the same per-key atomicity `JobStateIndex::create` relies on for P7.

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::net::IpAddr;

pub struct RateLimiter {
    window_millis: i64,
    last_admitted: DashMap<IpAddr, i64>,
}

impl RateLimiter {
    pub fn new(window_millis: i64) -> Self {
        Self { window_millis, last_admitted: DashMap::new() }
    }

    /// Returns `true` if `ip` may proceed at `now_millis`, atomically
    /// recording the attempt either way. A denied request does not reset
    /// the window — the original attempt still holds it.
    pub fn check(&self, ip: IpAddr, now_millis: i64) -> bool {
        match self.last_admitted.entry(ip) {
            Entry::Occupied(mut slot) => {
                if now_millis - *slot.get() >= self.window_millis {
                    slot.insert(now_millis);
                    true
                } else {
                    false
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(now_millis);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip() -> IpAddr {
        "10.0.0.1".parse().unwrap()
    }

    #[test]
    fn first_request_from_an_ip_is_always_allowed() {
        let limiter = RateLimiter::new(60_000);
        assert!(limiter.check(ip(), 0));
    }

    #[test]
    fn second_request_within_window_is_denied() {
        let limiter = RateLimiter::new(60_000);
        assert!(limiter.check(ip(), 0));
        assert!(!limiter.check(ip(), 30_000));
    }

    #[test]
    fn request_after_window_elapses_is_allowed() {
        let limiter = RateLimiter::new(60_000);
        assert!(limiter.check(ip(), 0));
        assert!(limiter.check(ip(), 60_000));
    }

    #[test]
    fn distinct_ips_do_not_share_a_slot() {
        let limiter = RateLimiter::new(60_000);
        assert!(limiter.check(ip(), 0));
        assert!(limiter.check("10.0.0.2".parse().unwrap(), 0));
    }
}
