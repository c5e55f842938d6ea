use boa_outcome_utils::BuildError;

#[derive(thiserror::Error, Debug)]
pub enum FrameworkError {
    #[error("{0} party wasn't added to negotiation")]
    MissingParty(&'static str),
    #[error("Both parties are named '{0}'. Use alias to distinguish them")]
    NameClash(String),
    #[error("Failed to create negotiator. {0:#}")]
    Creation(anyhow::Error),
    #[error("Failed to build utility function. {0}")]
    Utility(#[from] BuildError),
    #[error("Test directory error. {0:#}")]
    TestDir(anyhow::Error),
}
