// Ranking/selection of estimated condition probabilities
pub mod ranker;

pub use ranker::{
    ConditionEntry, RankConfig, Ranker, DEFAULT_FALLBACK_FLOOR, DEFAULT_MAX_RESULTS,
    DEFAULT_THRESHOLD,
};
