use thiserror::Error;

/// Errors that can occur while building normalizers or applying rules.
///
/// Pattern matching zero times is never an error; these variants cover
/// configuration mistakes only.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CanonicalError {
    /// A strip or normalize rule was requested by a name no table knows.
    #[error("unknown rule: {0}")]
    UnknownRule(String),

    /// A registry or collaborator supplied a pattern that does not compile.
    #[error("invalid pattern for {name}: {message}")]
    InvalidPattern { name: String, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The process-wide normalizer was installed more than once.
    #[error("global normalizer already initialized")]
    AlreadyInitialized,

    #[error("global normalizer has not been initialized")]
    NotInitialized,
}

impl CanonicalError {
    pub(crate) fn invalid_pattern(name: impl Into<String>, err: regex::Error) -> Self {
        CanonicalError::InvalidPattern {
            name: name.into(),
            message: err.to_string(),
        }
    }
}
