//! Per-repository outcome types.

/// Terminal state of one repository in an aggregation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryOutcome {
    /// The template was added to one or more indexes.
    Indexed {
        /// Repository name.
        repository: String,
        /// Versions whose index received the template.
        versions: Vec<String>,
    },

    /// The repository was deliberately not indexed.
    Skipped {
        /// Repository name.
        repository: String,
        /// Reason for skipping.
        reason: String,
    },

    /// The manifest declared a minimum version that is not configured.
    UnknownVersion {
        /// Repository name.
        repository: String,
        /// The declared minimum version.
        version: String,
    },

    /// The manifest could not be fetched or parsed.
    Failed {
        /// Repository name.
        repository: String,
        /// Error message.
        error: String,
    },
}

impl RepositoryOutcome {
    /// Returns the repository this outcome belongs to.
    pub fn repository(&self) -> &str {
        match self {
            Self::Indexed { repository, .. }
            | Self::Skipped { repository, .. }
            | Self::UnknownVersion { repository, .. }
            | Self::Failed { repository, .. } => repository,
        }
    }
}
