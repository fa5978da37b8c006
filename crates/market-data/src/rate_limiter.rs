//! Token bucket pacing for requests against a single storefront host.
//!
//! Each host gets its own bucket. The limiter is owned by whoever issues the
//! fetches, so separate pipeline runs never share buckets.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use log::{debug, warn};

/// Burst allowed before pacing kicks in.
const DEFAULT_BURST_CAPACITY: f64 = 5.0;

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    last_update: Instant,
    /// Tokens per second.
    rate: f64,
    capacity: f64,
}

impl TokenBucket {
    fn new(requests_per_minute: u32, capacity: f64) -> Self {
        Self {
            tokens: capacity,
            last_update: Instant::now(),
            rate: f64::from(requests_per_minute.max(1)) / 60.0,
            capacity,
        }
    }

    fn refill(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_update).as_secs_f64();
        self.tokens = (self.tokens + elapsed * self.rate).min(self.capacity);
        self.last_update = now;
    }

    /// Take a token, or report how long until one is available.
    fn take(&mut self) -> Result<(), Duration> {
        self.refill();
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            Ok(())
        } else {
            Err(Duration::from_secs_f64((1.0 - self.tokens) / self.rate))
        }
    }
}

/// Pacing settings.
#[derive(Clone, Debug, PartialEq)]
pub struct RateLimitConfig {
    pub requests_per_minute: u32,
    pub burst_capacity: f64,
}

impl RateLimitConfig {
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute,
            burst_capacity: DEFAULT_BURST_CAPACITY,
        }
    }
}

/// Per-host token bucket limiter.
pub struct HostRateLimiter {
    buckets: Mutex<HashMap<String, TokenBucket>>,
    config: RateLimitConfig,
}

impl HostRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            buckets: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Lock the buckets, recovering from poison.
    ///
    /// A poisoned bucket map only means slightly off pacing.
    fn lock_buckets(&self) -> MutexGuard<'_, HashMap<String, TokenBucket>> {
        self.buckets.lock().unwrap_or_else(|poisoned| {
            warn!("Host rate limiter mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn new_bucket(&self) -> TokenBucket {
        TokenBucket::new(
            self.config.requests_per_minute,
            self.config.burst_capacity.max(1.0),
        )
    }

    /// Wait until a request to `host` is allowed.
    pub async fn acquire(&self, host: &str) {
        loop {
            let wait = {
                let mut buckets = self.lock_buckets();
                let bucket = buckets
                    .entry(host.to_string())
                    .or_insert_with(|| self.new_bucket());
                match bucket.take() {
                    Ok(()) => return,
                    Err(wait) => wait,
                }
            };

            debug!("Pacing requests to '{}': waiting {:?}", host, wait);
            tokio::time::sleep(wait).await;
        }
    }

    /// Take a token for `host` without waiting.
    pub fn try_acquire(&self, host: &str) -> bool {
        let mut buckets = self.lock_buckets();
        buckets
            .entry(host.to_string())
            .or_insert_with(|| self.new_bucket())
            .take()
            .is_ok()
    }
}

/// Host part of an address, used as the bucket key.
///
/// Falls back to the whole address when it does not parse as a URL.
pub fn host_of(address: &str) -> String {
    reqwest::Url::parse(address)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .unwrap_or_else(|| address.to_string())
}
