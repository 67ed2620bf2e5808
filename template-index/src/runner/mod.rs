//! Orchestrates an index aggregation run.
//!
//! The run lists the organization's public repositories, loads each
//! repository's manifest, routes the resulting description into the
//! version indexes, and finally writes every index.

mod error;
mod routing;

pub use error::RunnerError;
pub use routing::{route, Route};

use crate::api::{GitHubApi, GitHubRepository, HttpTransport, ReqwestTransport};
use crate::config::IndexConfig;
use crate::index::{IndexSink, TemplateDescription, VersionIndex};
use crate::manifest::fetch_manifest;
use crate::summary::{RepositoryOutcome, RunSummary};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, info_span, warn};

/// Runs aggregation against the hosting API.
pub struct Runner<T = ReqwestTransport> {
    config: IndexConfig,
    api: GitHubApi<T>,
}

impl Runner<ReqwestTransport> {
    /// Builds a runner that talks to the network.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the configuration is invalid or the HTTP
    /// client cannot be created.
    pub fn new(config: IndexConfig) -> Result<Self, RunnerError> {
        config.validate("configuration")?;
        let transport = ReqwestTransport::new(config.timeout())?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> Runner<T> {
    /// Builds a runner over the given transport.
    pub fn with_transport(config: IndexConfig, transport: T) -> Self {
        let api = GitHubApi::new(config.api_base_url.clone(), transport);
        Self { config, api }
    }

    /// Returns the configuration of this run.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Executes the full flow and writes one index per configured version.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError`] if the repository list cannot be retrieved or
    /// an index cannot be written.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut indexes: Vec<VersionIndex> =
            self.config.versions.iter().map(VersionIndex::new).collect();

        let mut summary = self.aggregate(&mut indexes)?;
        summary.indexes_written = self.persist(&indexes)?;

        Ok(summary)
    }

    /// Routes every repository of the organization into `sinks`.
    ///
    /// `sinks` must be ordered by ascending version. Nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Api`] if the repository list cannot be
    /// retrieved. Failures of individual repositories are recorded in the
    /// summary instead.
    pub fn aggregate<S: IndexSink>(&self, sinks: &mut [S]) -> Result<RunSummary, RunnerError> {
        let mut summary = RunSummary::new();

        info!(org = %self.config.organization, "Listing repositories");
        let repositories = self
            .api
            .get_public_repositories(&self.config.organization)?;

        info!(count = repositories.len(), "Found repositories");
        summary.repositories_discovered = repositories.len();

        for repository in &repositories {
            let outcome = self.process_repository(repository, sinks);
            summary.record_result(outcome);
        }

        Ok(summary)
    }

    /// Writes every sink into the configured output directory, including
    /// empty ones.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Index`] on the first sink that fails to write.
    pub fn persist<S: IndexSink>(&self, sinks: &[S]) -> Result<Vec<PathBuf>, RunnerError> {
        sinks
            .iter()
            .map(|sink| {
                sink.write(&self.config.output_dir)
                    .map_err(RunnerError::from)
            })
            .collect()
    }

    fn process_repository<S: IndexSink>(
        &self,
        repository: &GitHubRepository,
        sinks: &mut [S],
    ) -> RepositoryOutcome {
        let span = info_span!("repository", repo = %repository.name);
        let _guard = span.enter();

        if repository.name == self.config.index_repository {
            info!("Skipping index repository");
            return RepositoryOutcome::Skipped {
                repository: repository.name.clone(),
                reason: "index repository".to_string(),
            };
        }

        let manifest = match fetch_manifest(
            self.api.transport(),
            repository,
            &self.config.manifest_file,
        ) {
            Ok(manifest) => manifest,
            Err(e) => {
                error!(error = %e, "Failed to load manifest");
                return RepositoryOutcome::Failed {
                    repository: repository.name.clone(),
                    error: e.to_string(),
                };
            }
        };

        let versions: Vec<&str> = sinks.iter().map(IndexSink::version).collect();
        let start = match route(&versions, manifest.minimum_version.as_deref()) {
            Route::All => 0,
            Route::From(position) => position,
            Route::Unknown(version) => {
                warn!(version = %version, "Manifest declares an unknown minimum version");
                return RepositoryOutcome::UnknownVersion {
                    repository: repository.name.clone(),
                    version,
                };
            }
        };

        let description = Arc::new(TemplateDescription::from_manifest(repository, manifest));
        let mut indexed = Vec::new();
        for sink in &mut sinks[start..] {
            sink.add(Arc::clone(&description));
            indexed.push(sink.version().to_string());
        }

        info!(template = %description.name, versions = ?indexed, "Indexed template");
        RepositoryOutcome::Indexed {
            repository: repository.name.clone(),
            versions: indexed,
        }
    }
}
