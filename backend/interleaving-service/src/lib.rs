pub mod config;
pub mod models;
pub mod services;

pub use config::Config;
pub use models::{Candidate, CandidateFilter, EvaluationSummary, PaginationResult, Source, Winner};
pub use services::{
    CacheStats, CandidateSource, EvaluationService, FetchError, Interleaver, InterleavingError,
    InterleavingResult, RankingStrategy, ScoreRanking, SyntheticCandidateSource, TitleBlendRanking,
};
