//! Runner error types.

/// Errors that abort an aggregation run.
///
/// Per-repository problems never surface here; they are recorded as
/// [`RepositoryOutcome`](crate::summary::RepositoryOutcome)s instead.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading and validation errors.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Client construction or repository listing errors.
    #[error(transparent)]
    Api(#[from] crate::api::ApiError),

    /// Index persistence errors.
    #[error(transparent)]
    Index(#[from] crate::index::IndexError),
}
