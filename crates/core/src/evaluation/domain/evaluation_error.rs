use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("TextGrid has no \"{0}\" tier")]
    MissingTier(String),
    #[error("TextGrid has {count} \"{name}\" tiers")]
    AmbiguousTier { name: String, count: usize },
    #[error("tier \"{0}\" is not an interval tier")]
    NotIntervalTier(String),
    #[error("tier lengths do not match ({first} vs {second} boundaries)")]
    LengthMismatch { first: usize, second: usize },
    #[error("tier labels do not match at boundary {index}: {first} vs {second}")]
    LabelMismatch {
        index: usize,
        first: String,
        second: String,
    },
    #[error("tolerance must be a non-negative number of milliseconds, got {0}")]
    InvalidTolerance(f64),
}
