use super::{sort_descending_by, RankingStrategy};
use crate::models::Candidate;

const SCORE_WEIGHT: f64 = 0.8;
const TITLE_LENGTH_WEIGHT: f64 = 0.2;

/// Challenger ranking: score blended with title length, highest first.
///
/// Title length counts Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleBlendRanking;

impl TitleBlendRanking {
    pub fn blended_score(candidate: &Candidate) -> f64 {
        let title_length = candidate.title.chars().count() as f64;
        candidate.score * SCORE_WEIGHT + title_length * TITLE_LENGTH_WEIGHT
    }
}

impl RankingStrategy for TitleBlendRanking {
    fn rank(&self, candidates: &[Candidate]) -> Vec<Candidate> {
        sort_descending_by(candidates, Self::blended_score)
    }

    fn name(&self) -> &str {
        "new"
    }
}
