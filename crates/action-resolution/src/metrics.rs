//! Telemetry helpers for the resolution pipeline.
//!
//! Lightweight process-local counters so callers can surface basic health
//! numbers without an external metrics backend.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

static RESOLVE_TOTAL: AtomicU64 = AtomicU64::new(0);
static RESOLVE_FAILED: AtomicU64 = AtomicU64::new(0);
static RESOLVE_LAT_NS: AtomicU64 = AtomicU64::new(0);
static RESOLVE_LAT_SAMPLES: AtomicU64 = AtomicU64::new(0);

static CACHE_HIT: AtomicU64 = AtomicU64::new(0);
static CACHE_MISS: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricCounter {
    pub total: u64,
    pub failed: u64,
    pub avg_ms: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CacheMetric {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MetricSnapshot {
    pub resolve: MetricCounter,
    pub selector_cache: CacheMetric,
}

pub fn record_resolution(cache_hit: bool, duration: Duration) {
    RESOLVE_TOTAL.fetch_add(1, Ordering::Relaxed);
    if cache_hit {
        CACHE_HIT.fetch_add(1, Ordering::Relaxed);
    } else {
        CACHE_MISS.fetch_add(1, Ordering::Relaxed);
    }
    record_latency(duration);
}

pub fn record_failure(duration: Duration) {
    RESOLVE_TOTAL.fetch_add(1, Ordering::Relaxed);
    RESOLVE_FAILED.fetch_add(1, Ordering::Relaxed);
    record_latency(duration);
}

pub fn snapshot() -> MetricSnapshot {
    let total = RESOLVE_TOTAL.load(Ordering::Relaxed);
    let failed = RESOLVE_FAILED.load(Ordering::Relaxed);
    let nanos = RESOLVE_LAT_NS.load(Ordering::Relaxed);
    let samples = RESOLVE_LAT_SAMPLES.load(Ordering::Relaxed);
    let avg_ms = if samples == 0 {
        0.0
    } else {
        (nanos as f64 / samples as f64) / 1_000_000.0
    };

    let hits = CACHE_HIT.load(Ordering::Relaxed);
    let misses = CACHE_MISS.load(Ordering::Relaxed);
    let probed = hits + misses;
    let hit_rate = if probed == 0 {
        0.0
    } else {
        hits as f64 * 100.0 / probed as f64
    };

    MetricSnapshot {
        resolve: MetricCounter {
            total,
            failed,
            avg_ms,
        },
        selector_cache: CacheMetric {
            hits,
            misses,
            hit_rate,
        },
    }
}

fn record_latency(duration: Duration) {
    let nanos = duration.as_nanos();
    let nanos = if nanos > u64::MAX as u128 {
        u64::MAX
    } else {
        nanos as u64
    };
    RESOLVE_LAT_NS.fetch_add(nanos, Ordering::Relaxed);
    RESOLVE_LAT_SAMPLES.fetch_add(1, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Counters are process-global and other tests bump them concurrently,
    // so assertions are monotonic, not exact.
    #[test]
    fn counters_accumulate_monotonically() {
        let before = snapshot();
        record_resolution(true, Duration::from_millis(3));
        record_failure(Duration::from_millis(7));
        let after = snapshot();

        assert!(after.resolve.total >= before.resolve.total + 2);
        assert!(after.resolve.failed >= before.resolve.failed + 1);
        assert!(after.selector_cache.hits >= before.selector_cache.hits + 1);
        assert!(after.resolve.avg_ms > 0.0);
    }
}
