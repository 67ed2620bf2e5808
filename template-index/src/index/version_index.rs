//! Version-tagged template index and its XML persistence.

use super::description::DESCRIPTION_ELEMENT;
use super::{IndexError, IndexSink, TemplateDescription};
use crate::xml::{parse_document, XmlWriter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Root element name of an index document.
pub const INDEX_ROOT: &str = "TemplateIndex";

/// Format version written to, and required of, index documents.
pub const INDEX_FORMAT_VERSION: u32 = 1;

/// Returns the file name of the index for a platform version.
pub fn index_file_name(version: &str) -> String {
    format!("project-template-index-{version}.xml")
}

/// The templates available to one platform version, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionIndex {
    version: String,
    templates: Vec<Arc<TemplateDescription>>,
}

impl VersionIndex {
    /// Creates an empty index for `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            templates: Vec::new(),
        }
    }

    /// Returns the platform version label.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the templates in insertion order.
    pub fn templates(&self) -> &[Arc<TemplateDescription>] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Appends a template.
    pub fn push(&mut self, description: Arc<TemplateDescription>) {
        self.templates.push(description);
    }

    /// Returns the file name this index is saved under.
    pub fn file_name(&self) -> String {
        index_file_name(&self.version)
    }

    /// Serializes the index to an XML document.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Xml`] if the document cannot be written.
    pub fn to_xml(&self) -> Result<Vec<u8>, IndexError> {
        let format = INDEX_FORMAT_VERSION.to_string();
        let mut writer = XmlWriter::new()?;

        writer.start(
            INDEX_ROOT,
            &[("format", format.as_str()), ("version", self.version.as_str())],
        )?;
        for description in &self.templates {
            description.write_xml(&mut writer)?;
        }
        writer.end(INDEX_ROOT)?;

        Ok(writer.finish())
    }

    /// Writes the index into `directory`, creating it if needed, and returns
    /// the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if serialization or any filesystem operation
    /// fails.
    pub fn save(&self, directory: &Path) -> Result<PathBuf, IndexError> {
        let path = directory.join(self.file_name());
        let document = self.to_xml()?;

        std::fs::create_dir_all(directory).map_err(|e| IndexError::IoError {
            path: directory.display().to_string(),
            source: e,
        })?;
        std::fs::write(&path, document).map_err(|e| IndexError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        info!(
            version = %self.version,
            templates = self.templates.len(),
            path = %path.display(),
            "Wrote index"
        );
        Ok(path)
    }

    /// Parses an index document.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the XML is malformed, the root element is not
    /// `TemplateIndex`, the format version is not supported, or an entry has
    /// an unreadable timestamp.
    pub fn parse(document: &[u8]) -> Result<Self, IndexError> {
        let root = parse_document(document)?;

        if root.name != INDEX_ROOT {
            return Err(IndexError::UnexpectedRoot {
                expected: INDEX_ROOT.to_string(),
                found: root.name,
            });
        }

        match root.format_version() {
            Ok(INDEX_FORMAT_VERSION) => {}
            Ok(other) => {
                return Err(IndexError::FormatVersion {
                    expected: INDEX_FORMAT_VERSION,
                    found: other.to_string(),
                })
            }
            Err(found) => {
                return Err(IndexError::FormatVersion {
                    expected: INDEX_FORMAT_VERSION,
                    found,
                })
            }
        }

        let templates = root
            .children_named(DESCRIPTION_ELEMENT)
            .map(|element| TemplateDescription::read_xml(element).map(Arc::new))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            version: root.attribute("version").unwrap_or_default().to_string(),
            templates,
        })
    }

    /// Reads an index file.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::IoError`] if the file cannot be read, otherwise
    /// any error from [`VersionIndex::parse`].
    pub fn load(path: &Path) -> Result<Self, IndexError> {
        debug!(path = %path.display(), "Loading index");

        let document = std::fs::read(path).map_err(|e| IndexError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::parse(&document)
    }
}

impl IndexSink for VersionIndex {
    fn version(&self) -> &str {
        &self.version
    }

    fn add(&mut self, description: Arc<TemplateDescription>) {
        self.push(description);
    }

    fn write(&self, directory: &Path) -> Result<PathBuf, IndexError> {
        self.save(directory)
    }
}
