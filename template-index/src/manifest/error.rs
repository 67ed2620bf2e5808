//! Manifest loading error types.

use crate::api::ApiError;
use crate::xml::XmlError;
use thiserror::Error;

/// Errors that can occur while fetching or validating a template manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The manifest could not be downloaded.
    #[error("Failed to fetch manifest: {0}")]
    Fetch(#[from] ApiError),

    /// The document is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// The document root is not a template manifest.
    #[error("Root element was '{found}', expected '{expected}'")]
    UnexpectedRoot { expected: String, found: String },

    /// The manifest declares a format this tool does not understand.
    #[error("Invalid format version '{found}', expected {expected}")]
    FormatVersion { expected: u32, found: String },

    /// A required element is missing or blank.
    #[error("The '{0}' element cannot be empty")]
    MissingField(&'static str),
}
