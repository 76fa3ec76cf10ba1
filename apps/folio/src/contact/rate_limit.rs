//! Sliding-window rate limiter keyed by client, with a bounded client map.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    Allowed { remaining: usize },
    Limited { retry_after: Duration },
}

#[derive(Debug)]
struct ClientWindow {
    hits: VecDeque<Instant>,
    last_seen: Instant,
}

impl ClientWindow {
    fn expire(&mut self, now: Instant, window: Duration) {
        while let Some(&oldest) = self.hits.front() {
            if now.saturating_duration_since(oldest) >= window {
                self.hits.pop_front();
            } else {
                break;
            }
        }
    }
}

/// At most `max_requests` per `window` per client. No more than
/// `max_tracked` clients are held; expired clients are pruned first, then
/// the least recently seen one is evicted.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    max_tracked: usize,
    clients: Mutex<HashMap<String, ClientWindow>>,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration, max_tracked: usize) -> Self {
        Self {
            max_requests: max_requests.max(1),
            window,
            max_tracked: max_tracked.max(1),
            clients: Mutex::new(HashMap::new()),
        }
    }

    pub fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Instant::now())
    }

    /// Records a hit for `client` at `now` unless the window is full.
    pub fn check_at(&self, client: &str, now: Instant) -> RateDecision {
        let mut clients = self.clients.lock();

        if !clients.contains_key(client) && clients.len() >= self.max_tracked {
            let window = self.window;
            clients.retain(|_, w| {
                w.expire(now, window);
                !w.hits.is_empty()
            });
            if clients.len() >= self.max_tracked {
                let oldest = clients
                    .iter()
                    .min_by_key(|(_, w)| w.last_seen)
                    .map(|(k, _)| k.clone());
                if let Some(key) = oldest {
                    debug!("Rate limiter full, evicting client {key}");
                    clients.remove(&key);
                }
            }
        }

        let entry = clients
            .entry(client.to_string())
            .or_insert_with(|| ClientWindow {
                hits: VecDeque::new(),
                last_seen: now,
            });
        entry.expire(now, self.window);
        entry.last_seen = now;

        if entry.hits.len() >= self.max_requests {
            let oldest = entry.hits.front().copied().unwrap_or(now);
            let retry_after = self.window.saturating_sub(now.saturating_duration_since(oldest));
            return RateDecision::Limited { retry_after };
        }

        entry.hits.push_back(now);
        RateDecision::Allowed {
            remaining: self.max_requests - entry.hits.len(),
        }
    }

    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINUTE: Duration = Duration::from_secs(60);

    #[test]
    fn test_allows_up_to_limit_then_blocks() {
        let limiter = RateLimiter::new(2, MINUTE, 100);
        let t0 = Instant::now();
        assert_eq!(limiter.check_at("a", t0), RateDecision::Allowed { remaining: 1 });
        assert_eq!(limiter.check_at("a", t0), RateDecision::Allowed { remaining: 0 });
        assert!(matches!(limiter.check_at("a", t0), RateDecision::Limited { .. }));
    }

    #[test]
    fn test_window_slides() {
        let limiter = RateLimiter::new(1, MINUTE, 100);
        let t0 = Instant::now();
        limiter.check_at("a", t0);
        match limiter.check_at("a", t0 + Duration::from_secs(20)) {
            RateDecision::Limited { retry_after } => assert_eq!(retry_after, Duration::from_secs(40)),
            other => panic!("expected limit, got {other:?}"),
        }
        assert!(matches!(
            limiter.check_at("a", t0 + MINUTE),
            RateDecision::Allowed { .. }
        ));
    }

    #[test]
    fn test_clients_are_independent() {
        let limiter = RateLimiter::new(1, MINUTE, 100);
        let t0 = Instant::now();
        limiter.check_at("a", t0);
        assert!(matches!(limiter.check_at("b", t0), RateDecision::Allowed { .. }));
    }

    #[test]
    fn test_map_is_bounded() {
        let limiter = RateLimiter::new(5, MINUTE, 3);
        let t0 = Instant::now();
        for (i, client) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            limiter.check_at(client, t0 + Duration::from_millis(i as u64));
        }
        assert_eq!(limiter.tracked_clients(), 3);
    }

    #[test]
    fn test_expired_clients_pruned_before_eviction() {
        let limiter = RateLimiter::new(5, MINUTE, 2);
        let t0 = Instant::now();
        limiter.check_at("old", t0);
        limiter.check_at("recent", t0 + Duration::from_secs(50));
        // "old" has expired by now; "recent" must survive.
        limiter.check_at("new", t0 + Duration::from_secs(70));
        assert_eq!(limiter.tracked_clients(), 2);
        assert_eq!(
            limiter.check_at("recent", t0 + Duration::from_secs(71)),
            RateDecision::Allowed { remaining: 3 }
        );
    }
}
