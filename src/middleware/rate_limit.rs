//! Fixed-window rate limiting keyed by route scope and client IP.
//!
//! Counters live in process memory behind a mutex; limits are per route and
//! enforced at the top of each handler. Exceeding a window answers 429 with a
//! `Retry-After` hint.

use axum::http::HeaderMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::error::ApiError;

/// Window length shared by all routes.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(60);

struct Counter {
    count: u32,
    reset_at: Instant,
}

#[derive(Default)]
pub struct RateLimiter {
    windows: Mutex<HashMap<String, Counter>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one hit for `scope:ip`. Returns `TooManyRequests` once the
    /// window's limit is exhausted.
    pub fn check(
        &self,
        scope: &str,
        ip: &str,
        limit: u32,
        window: Duration,
    ) -> Result<(), ApiError> {
        let key = format!("{scope}:{ip}");
        let now = Instant::now();
        let mut windows = self.windows.lock();

        match windows.get_mut(&key) {
            Some(counter) if counter.reset_at > now => {
                if counter.count < limit {
                    counter.count += 1;
                    Ok(())
                } else {
                    let retry_after_secs = counter
                        .reset_at
                        .saturating_duration_since(now)
                        .as_secs_f64()
                        .ceil() as u64;
                    Err(ApiError::TooManyRequests { retry_after_secs })
                }
            }
            _ => {
                windows.insert(
                    key,
                    Counter {
                        count: 1,
                        reset_at: now + window,
                    },
                );
                Ok(())
            }
        }
    }
}

/// Best-effort client IP from proxy headers, falling back to loopback. The
/// service sits behind a reverse proxy, so the socket address is useless.
pub fn client_ip(headers: &HeaderMap) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }
    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        return real_ip.trim().to_string();
    }
    "127.0.0.1".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_limit_then_rejects() {
        let limiter = RateLimiter::new();
        let window = Duration::from_secs(60);

        for _ in 0..3 {
            assert!(limiter.check("calc", "10.0.0.1", 3, window).is_ok());
        }
        let err = limiter.check("calc", "10.0.0.1", 3, window).unwrap_err();
        assert!(matches!(err, ApiError::TooManyRequests { .. }));

        // other clients and scopes are unaffected
        assert!(limiter.check("calc", "10.0.0.2", 3, window).is_ok());
        assert!(limiter.check("projects", "10.0.0.1", 3, window).is_ok());
    }

    #[test]
    fn window_expiry_resets_counter() {
        let limiter = RateLimiter::new();
        let window = Duration::from_millis(20);

        assert!(limiter.check("calc", "10.0.0.1", 1, window).is_ok());
        assert!(limiter.check("calc", "10.0.0.1", 1, window).is_err());

        std::thread::sleep(Duration::from_millis(30));
        assert!(limiter.check("calc", "10.0.0.1", 1, window).is_ok());
    }

    #[test]
    fn client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
        headers.insert("x-real-ip", "198.51.100.1".parse().unwrap());
        assert_eq!(client_ip(&headers), "203.0.113.7");

        headers.remove("x-forwarded-for");
        assert_eq!(client_ip(&headers), "198.51.100.1");

        headers.remove("x-real-ip");
        assert_eq!(client_ip(&headers), "127.0.0.1");
    }
}
