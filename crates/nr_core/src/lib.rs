pub mod engine;
pub mod error;
pub mod normalize;
pub mod ranking;
pub mod recency;
pub mod rules;
pub mod scoring;
pub mod types;

pub use engine::{Digest, Engine};
pub use error::Error;
pub use rules::{GateMode, RuleSet, ScoreWeights, TieBreak};
pub use scoring::{RejectReason, Verdict};
pub use types::{CandidateArticle, RankedArticle, SearchPage, SearchRequest, SortMode};

pub type Result<T> = std::result::Result<T, Error>;
