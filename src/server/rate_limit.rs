//! Throttling of outbound calls to external channels.
//!
//! [`RateLimiter`] is the seam the synchronization pipeline depends on. The only implementation
//! shipped here, [`TokenBucketLimiter`], keeps its buckets in process memory: when several
//! engine instances run side by side each one throttles independently, so the effective limit
//! is per instance and not global.

use std::{
    collections::HashMap,
    sync::Mutex,
    time::{Duration, Instant},
};

use rand::Rng;

/// Fraction of calls that also sweep idle buckets out of the map.
const CLEANUP_PROBABILITY: f64 = 0.01;

/// Non-blocking admission check keyed by an arbitrary string (channel id, caller address, ...).
pub trait RateLimiter: Send + Sync {
    /// Take one token for `key`. Returns `false` when the caller must back off.
    fn try_acquire(&self, key: &str) -> bool;
}

#[derive(Debug, Clone, Copy)]
struct Bucket {
    tokens: u32,
    last_refill: Instant,
}

/// Per-key token bucket with lazy refill.
///
/// Each bucket holds at most `limit` tokens and regains `limit` tokens per `window`, computed
/// from elapsed time on every call. There is no background timer.
///
/// Buckets idle for longer than two windows are evicted opportunistically to bound memory.
/// An evicted key simply starts again from a full bucket; this is a leak guard, not a
/// security control.
pub struct TokenBucketLimiter {
    limit: u32,
    window: Duration,
    buckets: Mutex<HashMap<String, Bucket>>,
}

impl TokenBucketLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Bucket>> {
        // A panic while holding the lock cannot leave a bucket half-written, the map stays usable.
        self.buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub(crate) fn try_acquire_at(&self, key: &str, now: Instant) -> bool {
        if self.limit == 0 {
            return false;
        }

        let mut buckets = self.lock();

        if rand::rng().random_bool(CLEANUP_PROBABILITY) {
            self.evict_idle(&mut buckets, now);
        }

        let bucket = buckets.entry(key.to_string()).or_insert(Bucket {
            tokens: self.limit,
            last_refill: now,
        });

        self.refill(bucket, now);

        if bucket.tokens > 0 {
            bucket.tokens -= 1;
            true
        } else {
            false
        }
    }

    /// tokens_to_add = floor(elapsed / (window / limit)), capped at `limit`.
    ///
    /// The refill timestamp only moves when at least one token is added, so a burst of calls
    /// a few microseconds apart cannot keep pushing it forward and starve the bucket.
    fn refill(&self, bucket: &mut Bucket, now: Instant) {
        let elapsed_ms = now.saturating_duration_since(bucket.last_refill).as_millis();
        let window_ms = self.window.as_millis().max(1);
        let tokens_to_add = elapsed_ms.saturating_mul(u128::from(self.limit)) / window_ms;

        if tokens_to_add > 0 {
            let refilled = (u128::from(bucket.tokens) + tokens_to_add).min(u128::from(self.limit));
            bucket.tokens = refilled as u32;
            bucket.last_refill = now;
        }
    }

    pub(crate) fn evict_idle(&self, buckets: &mut HashMap<String, Bucket>, now: Instant) {
        let max_idle = self.window.saturating_mul(2);
        let before = buckets.len();

        buckets.retain(|_, bucket| now.saturating_duration_since(bucket.last_refill) <= max_idle);

        let evicted = before - buckets.len();
        if evicted > 0 {
            tracing::trace!(evicted, remaining = buckets.len(), "Evicted idle rate limit buckets");
        }
    }
}

impl RateLimiter for TokenBucketLimiter {
    fn try_acquire(&self, key: &str) -> bool {
        self.try_acquire_at(key, Instant::now())
    }
}

/// Limiter key for calls to one channel.
///
/// Keyed by channel rather than tenant: organizations that share no channel never contend.
pub fn channel_key(channel_id: i32) -> String {
    format!("channel:{}", channel_id)
}
