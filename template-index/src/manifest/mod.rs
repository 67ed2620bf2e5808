//! Template manifest loading.
//!
//! Every template repository carries a `ProjectTemplateManifest.xml` at the
//! root of its default branch:
//!
//! ```xml
//! <ProjectTemplate format="1">
//!   <Name>Foo</Name>
//!   <Summary>One line</Summary>
//!   <Description>Longer text</Description>
//!   <Author>Jane</Author>
//!   <Tags>web, sample</Tags>
//!   <IconFile>icon.png</IconFile>
//!   <ScreenshotFile>shot.png</ScreenshotFile>
//!   <MinimumVersion>2.6</MinimumVersion>
//! </ProjectTemplate>
//! ```

mod error;

pub use error::ManifestError;

use crate::api::{ApiError, GitHubRepository, HttpTransport};
use crate::xml::{parse_document, XmlElement};
use std::io::Read;
use tracing::debug;

/// Root element name of a manifest document.
pub const MANIFEST_ROOT: &str = "ProjectTemplate";

/// The only manifest format version this tool reads.
pub const MANIFEST_FORMAT_VERSION: u32 = 1;

/// File name of the manifest within a template repository.
pub const DEFAULT_MANIFEST_FILE: &str = "ProjectTemplateManifest.xml";

/// A validated template manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateManifest {
    pub name: String,
    pub summary: Option<String>,
    pub description: String,
    pub author: String,
    pub tags: String,

    /// Icon path relative to the repository's raw content root.
    pub icon_file: Option<String>,

    /// Screenshot path relative to the repository's raw content root.
    pub screenshot_file: Option<String>,

    /// Lowest platform version the template supports, trimmed.
    pub minimum_version: Option<String>,
}

impl TemplateManifest {
    /// Parses and validates a manifest document.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the XML is malformed, the root element or
    /// format version is wrong, or any of Name, Description, Author or Tags is
    /// missing or blank.
    pub fn load(document: &[u8]) -> Result<Self, ManifestError> {
        let root = parse_document(document)?;

        if root.name != MANIFEST_ROOT {
            return Err(ManifestError::UnexpectedRoot {
                expected: MANIFEST_ROOT.to_string(),
                found: root.name,
            });
        }

        match root.format_version() {
            Ok(MANIFEST_FORMAT_VERSION) => {}
            Ok(other) => {
                return Err(ManifestError::FormatVersion {
                    expected: MANIFEST_FORMAT_VERSION,
                    found: other.to_string(),
                })
            }
            Err(found) => {
                return Err(ManifestError::FormatVersion {
                    expected: MANIFEST_FORMAT_VERSION,
                    found,
                })
            }
        }

        Ok(Self {
            name: required(&root, "Name")?,
            summary: optional(&root, "Summary"),
            description: required(&root, "Description")?,
            author: required(&root, "Author")?,
            tags: required(&root, "Tags")?,
            icon_file: optional(&root, "IconFile"),
            screenshot_file: optional(&root, "ScreenshotFile"),
            minimum_version: optional(&root, "MinimumVersion").map(|v| v.trim().to_string()),
        })
    }
}

/// Downloads and loads the manifest of a repository.
///
/// The manifest is read from `<repository url>/raw/master/<file_name>`.
///
/// # Errors
///
/// Returns [`ManifestError::Fetch`] if the download fails, otherwise any
/// validation error from [`TemplateManifest::load`].
pub fn fetch_manifest<T: HttpTransport>(
    transport: &T,
    repository: &GitHubRepository,
    file_name: &str,
) -> Result<TemplateManifest, ManifestError> {
    let url = format!("{}{}", repository.raw_prefix(), file_name);
    debug!(repo = %repository.name, url = %url, "Fetching manifest");

    let mut body = transport.get(&url, None)?;
    let mut document = Vec::new();
    body.read_to_end(&mut document)
        .map_err(|source| ApiError::Io {
            url: url.clone(),
            source,
        })?;

    TemplateManifest::load(&document)
}

fn required(root: &XmlElement, name: &'static str) -> Result<String, ManifestError> {
    match root.child_text(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.to_string()),
        _ => Err(ManifestError::MissingField(name)),
    }
}

fn optional(root: &XmlElement, name: &str) -> Option<String> {
    root.child_text(name)
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use crate::xml::XmlError;

    const FULL: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<ProjectTemplate format="1">
  <Name>Foo</Name>
  <Summary>A foo template</Summary>
  <Description>Creates a foo project.</Description>
  <Author>Jane</Author>
  <Tags>foo, sample</Tags>
  <IconFile>icon.png</IconFile>
  <ScreenshotFile>screenshot.png</ScreenshotFile>
  <MinimumVersion> 2.6 </MinimumVersion>
</ProjectTemplate>"#;

    const MINIMAL: &str = r#"<ProjectTemplate format="1">
  <Name>Foo</Name>
  <Description>Creates a foo project.</Description>
  <Author>Jane</Author>
  <Tags>foo</Tags>
</ProjectTemplate>"#;

    #[test]
    fn loads_full_manifest() {
        let manifest = TemplateManifest::load(FULL.as_bytes()).unwrap();

        assert_eq!(manifest.name, "Foo");
        assert_eq!(manifest.summary.as_deref(), Some("A foo template"));
        assert_eq!(manifest.description, "Creates a foo project.");
        assert_eq!(manifest.author, "Jane");
        assert_eq!(manifest.tags, "foo, sample");
        assert_eq!(manifest.icon_file.as_deref(), Some("icon.png"));
        assert_eq!(manifest.screenshot_file.as_deref(), Some("screenshot.png"));
        assert_eq!(manifest.minimum_version.as_deref(), Some("2.6"));
    }

    #[test]
    fn optional_fields_default_to_absent() {
        let manifest = TemplateManifest::load(MINIMAL.as_bytes()).unwrap();

        assert_eq!(manifest.summary, None);
        assert_eq!(manifest.icon_file, None);
        assert_eq!(manifest.screenshot_file, None);
        assert_eq!(manifest.minimum_version, None);
    }

    #[test]
    fn blank_minimum_version_is_absent() {
        let doc = MINIMAL.replace(
            "<Tags>foo</Tags>",
            "<Tags>foo</Tags><MinimumVersion>   </MinimumVersion>",
        );

        let manifest = TemplateManifest::load(doc.as_bytes()).unwrap();

        assert_eq!(manifest.minimum_version, None);
    }

    #[test]
    fn each_required_field_is_enforced() {
        for field in ["Name", "Description", "Author", "Tags"] {
            let start = MINIMAL.find(&format!("<{field}>")).unwrap();
            let end_tag = format!("</{field}>");
            let end = MINIMAL.find(&end_tag).unwrap() + end_tag.len();
            let missing = format!("{}{}", &MINIMAL[..start], &MINIMAL[end..]);

            let result = TemplateManifest::load(missing.as_bytes());

            assert!(
                matches!(result, Err(ManifestError::MissingField(name)) if name == field),
                "{field} should be required"
            );
        }
    }

    #[test]
    fn whitespace_only_required_field_is_missing() {
        let doc = MINIMAL.replace("<Author>Jane</Author>", "<Author>  \n </Author>");

        let result = TemplateManifest::load(doc.as_bytes());

        assert!(matches!(result, Err(ManifestError::MissingField("Author"))));
    }

    #[test]
    fn rejects_wrong_root_element() {
        let doc = MINIMAL.replace("ProjectTemplate", "Template");

        let result = TemplateManifest::load(doc.as_bytes());

        assert!(matches!(
            result,
            Err(ManifestError::UnexpectedRoot { found, .. }) if found == "Template"
        ));
    }

    #[test]
    fn rejects_other_format_versions() {
        for format in [r#"format="2""#, r#"format="x""#, ""] {
            let doc = MINIMAL.replace(r#"format="1""#, format);

            let result = TemplateManifest::load(doc.as_bytes());

            assert!(
                matches!(result, Err(ManifestError::FormatVersion { expected: 1, .. })),
                "format attribute {format:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_trailing_top_level_element() {
        let doc = format!(r#"{MINIMAL}<ProjectTemplate format="2"/>"#);

        let result = TemplateManifest::load(doc.as_bytes());

        assert!(matches!(
            result,
            Err(ManifestError::Xml(XmlError::TrailingElement(_)))
        ));
    }

    #[test]
    fn description_keeps_text_around_comments() {
        let doc = MINIMAL.replace(
            "Creates a foo project.",
            "Creates a <!-- generated --> foo project.",
        );

        let manifest = TemplateManifest::load(doc.as_bytes()).unwrap();

        assert_eq!(manifest.description, "Creates a  foo project.");
    }

    #[test]
    fn rejects_malformed_xml() {
        let result = TemplateManifest::load(b"<ProjectTemplate format=\"1\"><Name>");

        assert!(matches!(result, Err(ManifestError::Xml(_))));
    }

    #[test]
    fn fetches_from_raw_content_root() {
        let transport = MockTransport::default().with(
            "http://x/foo/raw/master/ProjectTemplateManifest.xml",
            MINIMAL,
        );
        let repo: GitHubRepository =
            serde_json::from_str(r#"{"name": "foo", "url": "http://x/foo"}"#).unwrap();

        let manifest = fetch_manifest(&transport, &repo, DEFAULT_MANIFEST_FILE).unwrap();

        assert_eq!(manifest.name, "Foo");
        assert_eq!(
            transport.requests(),
            vec![(
                "http://x/foo/raw/master/ProjectTemplateManifest.xml".to_string(),
                None
            )]
        );
    }

    #[test]
    fn fetch_failure_is_reported() {
        let transport = MockTransport::default();
        let repo: GitHubRepository =
            serde_json::from_str(r#"{"name": "bar", "url": "http://x/bar"}"#).unwrap();

        let result = fetch_manifest(&transport, &repo, DEFAULT_MANIFEST_FILE);

        assert!(matches!(
            result,
            Err(ManifestError::Fetch(ApiError::Status { status: 404, .. }))
        ));
    }
}
