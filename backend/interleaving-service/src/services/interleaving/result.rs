use crate::models::{Candidate, CandidateId, EvaluationSummary, Source};
use crate::services::clicks::ClickLedger;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use uuid::Uuid;

/// Merged, de-duplicated, source-tagged sequence for one context key.
///
/// `sequence` and `attribution` are parallel and fixed at creation; only
/// the click ledger changes afterwards.
#[derive(Debug)]
pub struct InterleavingResult {
    id: Uuid,
    context_key: String,
    created_at: DateTime<Utc>,
    sequence: Vec<Candidate>,
    attribution: Vec<Source>,
    positions: HashMap<CandidateId, usize>,
    clicks: ClickLedger,
}

impl InterleavingResult {
    pub(crate) fn new(
        context_key: impl Into<String>,
        sequence: Vec<Candidate>,
        attribution: Vec<Source>,
    ) -> Self {
        debug_assert_eq!(sequence.len(), attribution.len());

        let positions = sequence
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id, i))
            .collect();

        Self {
            id: Uuid::new_v4(),
            context_key: context_key.into(),
            created_at: Utc::now(),
            sequence,
            attribution,
            positions,
            clicks: ClickLedger::new(),
        }
    }

    /// Identity of this computation; a memoized result keeps its id
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn context_key(&self) -> &str {
        &self.context_key
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn sequence(&self) -> &[Candidate] {
        &self.sequence
    }

    pub fn attribution(&self) -> &[Source] {
        &self.attribution
    }

    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    pub fn position_of(&self, candidate_id: CandidateId) -> Option<usize> {
        self.positions.get(&candidate_id).copied()
    }

    /// Source that contributed the candidate, if it was presented
    pub fn source_of(&self, candidate_id: CandidateId) -> Option<Source> {
        self.position_of(candidate_id).map(|i| self.attribution[i])
    }

    /// Recorded clicks, candidate id -> source at click time
    pub fn clicks(&self) -> HashMap<CandidateId, Source> {
        self.clicks.snapshot()
    }

    /// Attribute a click to its source.
    /// Returns `false` (and records nothing) for ids not in this sequence.
    pub fn record_click(&self, candidate_id: CandidateId) -> bool {
        match self.source_of(candidate_id) {
            Some(source) => {
                self.clicks.record(candidate_id, source);
                true
            }
            None => false,
        }
    }

    pub fn summarize(&self) -> EvaluationSummary {
        self.clicks.summarize()
    }
}
