// ============================================
// Click Ledger
// ============================================
//
// Records which presented item a user selected and tallies clicks per
// ranking source.
//
// - One ledger lives inside each interleaving result and dies with it
// - Keyed by candidate id: repeated clicks overwrite, never double-count
// - Read-modify-write is serialized by a mutex per ledger

use crate::models::{CandidateId, EvaluationSummary, Source};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Default)]
pub struct ClickLedger {
    clicks: Mutex<HashMap<CandidateId, Source>>,
}

impl ClickLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the source for a clicked candidate, overwriting any prior click
    pub fn record(&self, candidate_id: CandidateId, source: Source) {
        let previous = self.clicks.lock().insert(candidate_id, source);
        debug!(
            candidate_id,
            source = source.as_str(),
            repeated = previous.is_some(),
            "Click recorded"
        );
    }

    pub fn source_of(&self, candidate_id: CandidateId) -> Option<Source> {
        self.clicks.lock().get(&candidate_id).copied()
    }

    pub fn snapshot(&self) -> HashMap<CandidateId, Source> {
        self.clicks.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.clicks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tally clicks by source and pick a winner
    pub fn summarize(&self) -> EvaluationSummary {
        let clicks = self.clicks.lock();
        let old_clicks = clicks.values().filter(|s| **s == Source::Old).count();
        let new_clicks = clicks.len() - old_clicks;

        EvaluationSummary::from_counts(old_clicks, new_clicks)
    }
}
