// ============================================
// Balanced Interleaving
// ============================================
//
// Merges the orders of two ranking strategies into one presented list
// so that clicks can be credited to the strategy that placed each item.
//
// Merge:
// 1. Both strategies rank the same candidate set
// 2. A coin decides which side takes the first turn
// 3. The side on turn contributes its best not-yet-placed candidate
// 4. Turns alternate every step, even when a side had nothing to give
//
// One result is held at a time, tagged with the context key it was built
// for. A request for the same key reuses it; any other key replaces it,
// discarding its clicks. The held result is the "current" one that
// pagination and clicks operate on.

pub mod coin;
pub mod result;

pub use coin::{Coin, FixedCoin, RandomCoin, SeededCoin};
pub use result::InterleavingResult;

use crate::models::{Candidate, CandidateId, EvaluationSummary, PaginationResult, Source};
use crate::services::pagination;
use crate::services::ranking::RankingStrategy;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InterleavingError {
    #[error("No interleaving has been performed yet")]
    NotReady,

    #[error("Invalid page size: {0} (must be at least 1)")]
    InvalidPageSize(usize),
}

pub type Result<T> = std::result::Result<T, InterleavingError>;

pub struct Interleaver {
    old: Arc<dyn RankingStrategy>,
    new: Arc<dyn RankingStrategy>,
    coin: Arc<dyn Coin>,
    slot: RwLock<Option<Slot>>,
}

struct Slot {
    result: Arc<InterleavingResult>,
    /// Transient results stay current but are never reused
    reusable: bool,
}

impl Slot {
    fn reuse(&self, context_key: &str) -> Option<Arc<InterleavingResult>> {
        (self.reusable && self.result.context_key() == context_key).then(|| self.result.clone())
    }
}

impl Interleaver {
    pub fn new(old: Arc<dyn RankingStrategy>, new: Arc<dyn RankingStrategy>) -> Self {
        Self {
            old,
            new,
            coin: Arc::new(RandomCoin),
            slot: RwLock::new(None),
        }
    }

    /// Replace the random-bit source deciding the first turn
    pub fn with_coin(mut self, coin: Arc<dyn Coin>) -> Self {
        self.coin = coin;
        self
    }

    /// Interleave `candidates` under `context_key`.
    ///
    /// When the current result was built for the same key it is returned
    /// as-is, whatever `candidates` holds; callers own key discipline.
    pub fn interleave(&self, candidates: &[Candidate], context_key: &str) -> Arc<InterleavingResult> {
        self.interleave_tracked(candidates, context_key).0
    }

    /// Same as `interleave`, also reporting whether the held result answered
    pub(crate) fn interleave_tracked(
        &self,
        candidates: &[Candidate],
        context_key: &str,
    ) -> (Arc<InterleavingResult>, bool) {
        if let Some(result) = self.slot.read().as_ref().and_then(|s| s.reuse(context_key)) {
            debug!(context_key, "Interleaving cache HIT");
            return (result, true);
        }

        // Strategies run without any lock held.
        let computed = Arc::new(self.compute(candidates, context_key));

        let mut slot = self.slot.write();
        if let Some(result) = slot.as_ref().and_then(|s| s.reuse(context_key)) {
            debug!(context_key, "Concurrent interleaving won, discarding ours");
            return (result, true);
        }
        Self::replace(&mut slot, computed.clone(), true);
        (computed, false)
    }

    /// Interleave and make the result current without letting later calls
    /// reuse it. Used for candidate sets served in degraded mode.
    pub(crate) fn interleave_transient(
        &self,
        candidates: &[Candidate],
        context_key: &str,
    ) -> Arc<InterleavingResult> {
        let computed = Arc::new(self.compute(candidates, context_key));
        Self::replace(&mut self.slot.write(), computed.clone(), false);
        computed
    }

    fn replace(slot: &mut Option<Slot>, result: Arc<InterleavingResult>, reusable: bool) {
        if let Some(previous) = slot.as_ref() {
            if previous.result.context_key() != result.context_key() {
                info!(
                    previous_key = previous.result.context_key(),
                    context_key = result.context_key(),
                    discarded_clicks = previous.result.clicks().len(),
                    "Context changed, replacing interleaving"
                );
            }
        }
        *slot = Some(Slot { result, reusable });
    }

    fn compute(&self, candidates: &[Candidate], context_key: &str) -> InterleavingResult {
        let old_ranked = self.old.rank(candidates);
        let new_ranked = self.new.rank(candidates);
        let favor_old = self.coin.favor_old();

        let (sequence, attribution) = merge(&old_ranked, &new_ranked, favor_old);
        let result = InterleavingResult::new(context_key, sequence, attribution);

        info!(
            context_key,
            result_id = %result.id(),
            old_strategy = self.old.name(),
            new_strategy = self.new.name(),
            first_turn = if favor_old { "old" } else { "new" },
            items = result.len(),
            "Interleaving completed"
        );

        result
    }

    /// Result that pagination and clicks currently target
    pub fn current(&self) -> Result<Arc<InterleavingResult>> {
        self.slot
            .read()
            .as_ref()
            .map(|s| s.result.clone())
            .ok_or(InterleavingError::NotReady)
    }

    pub fn paginate(&self, page: usize, per_page: usize) -> Result<PaginationResult> {
        let result = self.current()?;
        pagination::paginate(&result, page, per_page)
    }

    /// Credit a click to the current result.
    /// Ids outside the current sequence (stale UI state) are ignored.
    pub fn record_click(&self, candidate_id: CandidateId) -> Result<()> {
        let result = self.current()?;

        if !result.record_click(candidate_id) {
            debug!(
                candidate_id,
                result_id = %result.id(),
                "Click ignored: candidate not in current interleaving"
            );
        }

        Ok(())
    }

    pub fn summarize(&self) -> Result<EvaluationSummary> {
        Ok(self.current()?.summarize())
    }

    /// Drop the held result and its clicks
    pub fn clear_cache(&self) {
        let dropped = self.slot.write().take();

        info!(dropped = dropped.is_some(), "Interleaving cache cleared");
    }
}

/// Alternating merge of two rankings.
///
/// The side on turn skips ids already placed and contributes at most one
/// candidate. If the side on turn is exhausted, the other side fills the
/// turn. The turn flips after every step.
pub fn merge(old: &[Candidate], new: &[Candidate], favor_old: bool) -> (Vec<Candidate>, Vec<Source>) {
    let capacity = old.len().max(new.len());
    let mut sequence = Vec::with_capacity(capacity);
    let mut attribution = Vec::with_capacity(capacity);
    let mut placed: HashSet<CandidateId> = HashSet::with_capacity(capacity);

    let mut old_cursor = 0;
    let mut new_cursor = 0;
    let mut favor_old = favor_old;

    while old_cursor < old.len() || new_cursor < new.len() {
        let take_old = if favor_old {
            old_cursor < old.len()
        } else {
            new_cursor >= new.len()
        };

        let (ranked, cursor, source) = if take_old {
            (old, &mut old_cursor, Source::Old)
        } else {
            (new, &mut new_cursor, Source::New)
        };

        while *cursor < ranked.len() {
            let candidate = &ranked[*cursor];
            *cursor += 1;

            if placed.insert(candidate.id) {
                sequence.push(candidate.clone());
                attribution.push(source);
                break;
            }
        }

        favor_old = !favor_old;
    }

    (sequence, attribution)
}
