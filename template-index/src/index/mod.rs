//! Template descriptions and the version indexes they are published in.

mod description;
mod error;
mod version_index;

pub use description::TemplateDescription;
pub use error::IndexError;
pub use version_index::{index_file_name, VersionIndex, INDEX_FORMAT_VERSION, INDEX_ROOT};

use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Destination for the templates of one platform version.
///
/// The aggregation run only needs to append to and persist an index, so
/// hosts can supply their own collection instead of [`VersionIndex`].
pub trait IndexSink {
    /// Platform version this sink collects templates for.
    fn version(&self) -> &str;

    /// Appends a template. The same description may be shared by many sinks.
    fn add(&mut self, description: Arc<TemplateDescription>);

    /// Persists the sink into `directory` and returns the written path.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the sink cannot be written.
    fn write(&self, directory: &Path) -> Result<PathBuf, IndexError>;
}
