use super::{sort_descending_by, RankingStrategy};
use crate::models::Candidate;

/// Baseline ranking: raw score, highest first
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreRanking;

impl RankingStrategy for ScoreRanking {
    fn rank(&self, candidates: &[Candidate]) -> Vec<Candidate> {
        sort_descending_by(candidates, |c| c.score)
    }

    fn name(&self) -> &str {
        "old"
    }
}
