mod synthetic;

pub use synthetic::SyntheticCandidateSource;

use crate::models::{Candidate, CandidateFilter};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Candidate source unavailable: {0}")]
    Unavailable(String),

    #[error("Candidate fetch timed out: {0}")]
    Timeout(String),
}

pub type Result<T> = std::result::Result<T, FetchError>;

/// 候選集來源（外部協作者）
///
/// Implementations may pre-filter using `filters`; the evaluation
/// service applies the filter predicates again either way.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch(&self, filters: &CandidateFilter) -> Result<Vec<Candidate>>;
}
