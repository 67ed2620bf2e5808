#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod api;
pub mod config;
pub mod index;
pub mod manifest;
pub mod runner;
pub mod summary;
mod xml;

pub use api::{
    ApiError, GitHubApi, GitHubRepository, HttpTransport, ReqwestTransport, RestClient,
    RestRequest,
};
pub use config::{ConfigError, IndexConfig};
pub use index::{IndexError, IndexSink, TemplateDescription, VersionIndex};
pub use manifest::{fetch_manifest, ManifestError, TemplateManifest};
pub use runner::{route, Route, Runner, RunnerError};
pub use summary::{RepositoryOutcome, RunSummary};
pub use xml::XmlError;
