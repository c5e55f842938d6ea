#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OutcomeError {
    #[error("Outcome must be a mapping from issue to value, got: {0}")]
    NotAMapping(String),
    #[error("Issue '{issue}' has value that is not a scalar: {value}")]
    InvalidValue { issue: String, value: String },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SpaceError {
    #[error("Issue '{0}' has empty domain")]
    EmptyDomain(String),
    #[error("Issue '{0}' defined more than once")]
    DuplicateIssue(String),
    #[error("Issue '{issue}' lists value '{value}' more than once")]
    DuplicateValue { issue: String, value: String },
    #[error("Outcome space has {size} outcomes, which exceeds enumeration limit {limit}")]
    TooLarge { size: u64, limit: u64 },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BuildError {
    #[error("Utility function has no weighted issues")]
    NoIssues,
    #[error("Weight {weight} for issue '{issue}' must be finite and non-negative")]
    InvalidWeight { issue: String, weight: f64 },
    #[error("Score {score} for '{issue}' = '{value}' is outside of [0, 1]")]
    ScoreOutOfRange {
        issue: String,
        value: String,
        score: f64,
    },
    #[error("Issue '{0}' is weighted, but doesn't exist in outcome space")]
    UnknownIssue(String),
    #[error("Synthetic utility function requires an outcome space")]
    MissingSpace,
    #[error(transparent)]
    Space(#[from] SpaceError),
}
