pub mod clicks;
pub mod evaluation;
pub mod interleaving;
pub mod pagination;
pub mod ranking;
pub mod source;

pub use evaluation::{CacheStats, EvaluationService};
pub use interleaving::{Interleaver, InterleavingError, InterleavingResult};
pub use ranking::{RankingStrategy, ScoreRanking, TitleBlendRanking};
pub use source::{CandidateSource, FetchError, SyntheticCandidateSource};
