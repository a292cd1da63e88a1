// ============================================
// Evaluation Service
// ============================================
//
// Orchestrates one online comparison of two rankings:
// 1. Fetch candidates for the filter (memoized per filter signature)
// 2. Interleave both rankings (memoized per filter signature)
// 3. Serve the requested page
// 4. Record clicks and report the win/loss/tie tally
//
// Both caches share the filter signature as key, never expire, and are
// only dropped together by `clear_cache`.

mod stats;

pub use stats::CacheStats;

use crate::models::{Candidate, CandidateFilter, CandidateId, EvaluationSummary, PaginationResult};
use crate::services::interleaving::{Coin, Interleaver, InterleavingResult, Result};
use crate::services::pagination;
use crate::services::ranking::{RankingStrategy, ScoreRanking, TitleBlendRanking};
use crate::services::source::{self, CandidateSource, FetchError};
use dashmap::DashMap;
use stats::StatsCollector;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Candidate set shared between the cache and in-flight requests
pub type CandidateSet = Arc<[Candidate]>;

/// Upper bound on one candidate fetch
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

pub struct EvaluationService {
    source: Arc<dyn CandidateSource>,
    interleaver: Interleaver,
    /// One cell per filter signature; the cell admits a single fetch at a time
    candidates: DashMap<String, Arc<OnceCell<CandidateSet>>>,
    fetch_timeout: Duration,
    stats: StatsCollector,
}

/// Candidates plus whether they stand in for a failed fetch
struct Fetched {
    candidates: CandidateSet,
    degraded: bool,
}

impl EvaluationService {
    /// Compare the score ranking ("old") against the title blend ("new")
    pub fn new(source: Arc<dyn CandidateSource>) -> Self {
        Self::with_strategies(source, Arc::new(ScoreRanking), Arc::new(TitleBlendRanking))
    }

    pub fn with_strategies(
        source: Arc<dyn CandidateSource>,
        old: Arc<dyn RankingStrategy>,
        new: Arc<dyn RankingStrategy>,
    ) -> Self {
        Self {
            source,
            interleaver: Interleaver::new(old, new),
            candidates: DashMap::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            stats: StatsCollector::default(),
        }
    }

    pub fn with_coin(mut self, coin: Arc<dyn Coin>) -> Self {
        self.interleaver = self.interleaver.with_coin(coin);
        self
    }

    pub fn with_fetch_timeout(mut self, fetch_timeout: Duration) -> Self {
        self.fetch_timeout = fetch_timeout;
        self
    }

    /// Candidates matching `filters`.
    ///
    /// Never fails: a source error is logged and served as an empty set,
    /// and is not cached so the next request retries.
    pub async fn fetch_candidates(&self, filters: &CandidateFilter) -> CandidateSet {
        self.fetch(filters).await.candidates
    }

    async fn fetch(&self, filters: &CandidateFilter) -> Fetched {
        let key = filters.cache_key();
        let cell = self
            .candidates
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .value()
            .clone();

        let mut loaded = false;
        let outcome = cell
            .get_or_try_init(|| {
                loaded = true;
                self.load_candidates(filters)
            })
            .await;

        match outcome {
            Ok(candidates) => {
                if !loaded {
                    self.stats.record_candidates(true);
                    debug!(filters = %key, count = candidates.len(), "Candidate cache HIT");
                }
                Fetched {
                    candidates: candidates.clone(),
                    degraded: false,
                }
            }
            Err(e) => {
                self.stats.record_degraded_fetch();
                warn!(
                    error = %e,
                    filters = %key,
                    "Candidate fetch failed, serving empty candidate set"
                );
                Fetched {
                    candidates: Vec::<Candidate>::new().into(),
                    degraded: true,
                }
            }
        }
    }

    async fn load_candidates(&self, filters: &CandidateFilter) -> source::Result<CandidateSet> {
        self.stats.record_candidates(false);

        let fetched = timeout(self.fetch_timeout, self.source.fetch(filters))
            .await
            .map_err(|_| {
                FetchError::Timeout(format!("no candidates after {:?}", self.fetch_timeout))
            })??;
        let total = fetched.len();
        let matching: Vec<Candidate> = fetched.into_iter().filter(|c| filters.matches(c)).collect();

        debug!(
            filters = %filters.cache_key(),
            fetched = total,
            matching = matching.len(),
            "Candidates fetched"
        );

        Ok(matching.into())
    }

    /// Interleaved page for `filters`; `page` is 1-based and clamped.
    ///
    /// A page built from a failed fetch becomes current but is recomputed
    /// on the next request, so a recovered source is picked up.
    pub async fn get_page(
        &self,
        page: usize,
        per_page: usize,
        filters: &CandidateFilter,
    ) -> Result<PaginationResult> {
        let key = filters.cache_key();
        let fetched = self.fetch(filters).await;

        let result = if fetched.degraded {
            self.stats.record_interleave(false);
            self.interleaver.interleave_transient(&fetched.candidates, &key)
        } else {
            let (result, cached) = self.interleaver.interleave_tracked(&fetched.candidates, &key);
            self.stats.record_interleave(cached);
            result
        };

        pagination::paginate(&result, page, per_page)
    }

    pub fn record_click(&self, candidate_id: CandidateId) -> Result<()> {
        self.interleaver.record_click(candidate_id)
    }

    pub fn summarize(&self) -> Result<EvaluationSummary> {
        self.interleaver.summarize()
    }

    /// Interleaving that clicks are currently credited to
    pub fn current_result(&self) -> Result<Arc<InterleavingResult>> {
        self.interleaver.current()
    }

    /// Drop cached candidates, the current interleaving and its clicks
    pub fn clear_cache(&self) {
        let dropped = self.candidates.len();
        self.candidates.clear();
        self.interleaver.clear_cache();

        info!(dropped_candidate_sets = dropped, "Evaluation caches cleared");
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}
