//! Run summary types.

use super::outcome::RepositoryOutcome;
use std::path::PathBuf;

/// Summary of a complete aggregation run.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Number of repositories listed for the organization.
    pub repositories_discovered: usize,

    /// Number of repositories added to at least one index.
    pub indexed: usize,

    /// Number of repositories skipped (e.g., the index repository).
    pub skipped: usize,

    /// Number of repositories declaring an unconfigured minimum version.
    pub unknown_versions: usize,

    /// Number of repositories whose manifest failed to load.
    pub failed: usize,

    /// Every outcome, in repository listing order.
    pub outcomes: Vec<RepositoryOutcome>,

    /// Index files written at the end of the run.
    pub indexes_written: Vec<PathBuf>,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with a repository outcome.
    pub fn record_result(&mut self, outcome: RepositoryOutcome) {
        match &outcome {
            RepositoryOutcome::Indexed { .. } => self.indexed += 1,
            RepositoryOutcome::Skipped { .. } => self.skipped += 1,
            RepositoryOutcome::UnknownVersion { .. } => self.unknown_versions += 1,
            RepositoryOutcome::Failed { .. } => self.failed += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Returns true if any repository failed or could not be routed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.unknown_versions > 0
    }

    /// Returns true if every repository was indexed or cleanly skipped.
    #[must_use]
    pub fn all_success(&self) -> bool {
        !self.has_failures()
    }
}
