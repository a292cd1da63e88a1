//! Cache statistics for the evaluation service

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Point-in-time view of the cache counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub candidate_hits: u64,
    pub candidate_misses: u64,
    pub interleave_hits: u64,
    pub interleave_misses: u64,
    pub degraded_fetches: u64,
}

/// Thread-safe counters behind `CacheStats`
#[derive(Debug, Default)]
pub(crate) struct StatsCollector {
    candidate_hits: AtomicU64,
    candidate_misses: AtomicU64,
    interleave_hits: AtomicU64,
    interleave_misses: AtomicU64,
    degraded_fetches: AtomicU64,
}

impl StatsCollector {
    pub fn record_candidates(&self, hit: bool) {
        let counter = if hit {
            &self.candidate_hits
        } else {
            &self.candidate_misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_interleave(&self, hit: bool) {
        let counter = if hit {
            &self.interleave_hits
        } else {
            &self.interleave_misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_degraded_fetch(&self) {
        self.degraded_fetches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> CacheStats {
        CacheStats {
            candidate_hits: self.candidate_hits.load(Ordering::Relaxed),
            candidate_misses: self.candidate_misses.load(Ordering::Relaxed),
            interleave_hits: self.interleave_hits.load(Ordering::Relaxed),
            interleave_misses: self.interleave_misses.load(Ordering::Relaxed),
            degraded_fetches: self.degraded_fetches.load(Ordering::Relaxed),
        }
    }
}
