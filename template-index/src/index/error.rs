//! Version index error types.

use crate::xml::XmlError;
use thiserror::Error;

/// Errors that can occur while reading or writing a version index.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Failed to read or write an index file.
    #[error("Failed to access index file '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not well-formed XML.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// The document root is not a template index.
    #[error("Root element was '{found}', expected '{expected}'")]
    UnexpectedRoot { expected: String, found: String },

    /// The index declares a format this tool does not understand.
    #[error("Invalid format version '{found}', expected {expected}")]
    FormatVersion { expected: u32, found: String },

    /// An entry carries a `modified` attribute that is not a timestamp.
    #[error("Invalid modified timestamp '{0}'")]
    InvalidTimestamp(String),
}
