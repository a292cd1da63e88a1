use super::{CandidateSource, Result};
use crate::models::{Candidate, CandidateFilter};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Companies own five consecutive postings each
const POSTINGS_PER_COMPANY: usize = 5;

/// In-process stand-in for a real posting store.
///
/// Produces `count` postings with ids `1..=count`, titles
/// `"Job title {id}"`, companies `"Company {n}"` and a uniform score in
/// `[0, 100)`. With a seed every fetch returns the same scores.
#[derive(Debug, Clone)]
pub struct SyntheticCandidateSource {
    count: usize,
    seed: Option<u64>,
}

impl Default for SyntheticCandidateSource {
    fn default() -> Self {
        Self::new(100)
    }
}

impl SyntheticCandidateSource {
    pub fn new(count: usize) -> Self {
        Self { count, seed: None }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn generate(&self) -> Vec<Candidate> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        (0..self.count)
            .map(|i| Candidate {
                id: i as i64 + 1,
                title: format!("Job title {}", i + 1),
                company: format!("Company {}", i / POSTINGS_PER_COMPANY + 1),
                score: rng.gen_range(0.0..100.0),
            })
            .collect()
    }
}

#[async_trait]
impl CandidateSource for SyntheticCandidateSource {
    async fn fetch(&self, filters: &CandidateFilter) -> Result<Vec<Candidate>> {
        let candidates = self.generate();
        debug!(
            generated = candidates.len(),
            filters = %filters.cache_key(),
            "Synthetic candidates generated"
        );
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_generates_reference_shape() {
        let source = SyntheticCandidateSource::new(12);
        let candidates = source.fetch(&CandidateFilter::default()).await.unwrap();

        assert_eq!(candidates.len(), 12);
        assert_eq!(candidates[0].id, 1);
        assert_eq!(candidates[0].title, "Job title 1");
        assert_eq!(candidates[0].company, "Company 1");
        assert_eq!(candidates[4].company, "Company 1");
        assert_eq!(candidates[5].company, "Company 2");
        assert_eq!(candidates[11].company, "Company 3");
        assert!(candidates.iter().all(|c| (0.0..100.0).contains(&c.score)));
    }

    #[tokio::test]
    async fn test_seed_is_reproducible() {
        let a = SyntheticCandidateSource::new(20).with_seed(7);
        let b = SyntheticCandidateSource::new(20).with_seed(7);
        let filters = CandidateFilter::default();

        assert_eq!(a.fetch(&filters).await.unwrap(), b.fetch(&filters).await.unwrap());
    }
}
