//! Indexer settings deserialization.

use crate::api::DEFAULT_API_BASE_URL;
use crate::manifest::DEFAULT_MANIFEST_FILE;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for an aggregation run, read from a TOML file.
///
/// Every key is optional; missing keys take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct IndexConfig {
    /// Organization whose public repositories are scanned.
    pub organization: String,

    /// Repository that hosts the indexes; never indexed itself.
    pub index_repository: String,

    /// Platform versions to build indexes for, oldest first.
    pub versions: Vec<String>,

    /// Base URL of the hosting JSON API.
    pub api_base_url: String,

    /// Manifest file name at the root of each repository.
    pub manifest_file: String,

    /// Directory the index files are written to.
    pub output_dir: PathBuf,

    /// Request timeout in seconds (0 disables).
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            organization: default_organization(),
            index_repository: default_index_repository(),
            versions: default_versions(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            output_dir: PathBuf::from("."),
            timeout_secs: 30,
        }
    }
}

impl IndexConfig {
    /// Returns the request timeout, or `None` when timeouts are disabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

pub(crate) fn default_organization() -> String {
    "md-data".to_string()
}

pub(crate) fn default_index_repository() -> String {
    "md-data-index".to_string()
}

pub(crate) fn default_versions() -> Vec<String> {
    vec!["2.6".to_string()]
}
