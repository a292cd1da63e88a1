/// Ranking Module
///
/// A ranking strategy turns the full candidate set into a total order.
/// The interleaver only ever sees the `RankingStrategy` contract, so the
/// two sides of an evaluation can be swapped freely.
///
/// # Contract
/// - `rank` must not mutate its input
/// - the output is a permutation: every input id appears exactly once
pub mod blended;
pub mod score;

pub use blended::TitleBlendRanking;
pub use score::ScoreRanking;

use crate::models::Candidate;
use std::cmp::Ordering;

/// Ranking 策略特徵
pub trait RankingStrategy: Send + Sync {
    fn rank(&self, candidates: &[Candidate]) -> Vec<Candidate>;

    fn name(&self) -> &str {
        "custom"
    }
}

/// Plain functions and closures are strategies too
impl<F> RankingStrategy for F
where
    F: Fn(&[Candidate]) -> Vec<Candidate> + Send + Sync,
{
    fn rank(&self, candidates: &[Candidate]) -> Vec<Candidate> {
        self(candidates)
    }
}

/// Stable descending sort on a derived key.
/// NaN keys compare equal to everything rather than panicking.
pub(crate) fn sort_descending_by<K>(candidates: &[Candidate], key: K) -> Vec<Candidate>
where
    K: Fn(&Candidate) -> f64,
{
    let mut ranked = candidates.to_vec();
    ranked.sort_by(|a, b| key(b).partial_cmp(&key(a)).unwrap_or(Ordering::Equal));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates() -> Vec<Candidate> {
        vec![
            Candidate {
                id: 1,
                title: "a".to_string(),
                company: "x".to_string(),
                score: 10.0,
            },
            Candidate {
                id: 2,
                title: "b".to_string(),
                company: "x".to_string(),
                score: 30.0,
            },
            Candidate {
                id: 3,
                title: "c".to_string(),
                company: "x".to_string(),
                score: 20.0,
            },
        ]
    }

    #[test]
    fn test_closure_strategy() {
        let reverse_ids = |c: &[Candidate]| {
            let mut out = c.to_vec();
            out.sort_by(|a, b| b.id.cmp(&a.id));
            out
        };

        let ranked = reverse_ids.rank(&candidates());
        let ids: Vec<_> = ranked.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
        assert_eq!(reverse_ids.name(), "custom");
    }

    #[test]
    fn test_strategies_are_interchangeable() {
        let strategies: Vec<Box<dyn RankingStrategy>> =
            vec![Box::new(ScoreRanking), Box::new(TitleBlendRanking)];
        let input = candidates();

        for strategy in &strategies {
            let ranked = strategy.rank(&input);
            let mut ids: Vec<_> = ranked.iter().map(|c| c.id).collect();
            ids.sort();
            assert_eq!(ids, vec![1, 2, 3], "{} is not a permutation", strategy.name());
        }

        // input untouched
        assert_eq!(input, candidates());
    }

    #[test]
    fn test_nan_scores_do_not_panic() {
        let mut input = candidates();
        input[0].score = f64::NAN;
        input[1].score = f64::NAN;

        let ranked = sort_descending_by(&input, |c| c.score);
        assert_eq!(ranked.len(), 3);
    }
}
