//! Flattened template record stored in an index.

use super::IndexError;
use crate::api::{timestamp, GitHubRepository};
use crate::manifest::TemplateManifest;
use crate::xml::{XmlElement, XmlError, XmlWriter};
use chrono::{DateTime, SecondsFormat, Utc};

/// Element name of one entry in an index document.
pub(crate) const DESCRIPTION_ELEMENT: &str = "ProjectTemplate";

/// A template as published in a version index.
///
/// Combines what the manifest declares with where the repository serves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDescription {
    pub name: String,
    pub summary: Option<String>,
    pub description: String,
    pub author: String,
    pub tags: String,
    pub icon_url: Option<String>,
    pub screenshot_url: Option<String>,

    /// Archive of the repository's default branch.
    pub template_url: String,

    /// Last push to the repository.
    pub modified: Option<DateTime<Utc>>,
}

impl TemplateDescription {
    /// Builds the description of `repository` from its manifest.
    ///
    /// Icon and screenshot file names are resolved against the repository's
    /// raw content root; an absent file name yields no URL.
    pub fn from_manifest(repository: &GitHubRepository, manifest: TemplateManifest) -> Self {
        let raw_prefix = repository.raw_prefix();
        let resolve = |file: Option<String>| {
            file.filter(|file| !file.is_empty())
                .map(|file| format!("{raw_prefix}{file}"))
        };

        Self {
            name: manifest.name,
            summary: manifest.summary,
            description: manifest.description,
            author: manifest.author,
            tags: manifest.tags,
            icon_url: resolve(manifest.icon_file),
            screenshot_url: resolve(manifest.screenshot_file),
            template_url: repository.zipball_url(),
            modified: repository.pushed_at,
        }
    }

    pub(crate) fn write_xml(&self, writer: &mut XmlWriter) -> Result<(), XmlError> {
        let modified = self
            .modified
            .map(|modified| modified.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default();

        writer.start(DESCRIPTION_ELEMENT, &[("modified", modified.as_str())])?;
        writer.text_element("Name", Some(self.name.as_str()))?;
        writer.text_element("Summary", self.summary.as_deref())?;
        writer.text_element("Description", Some(self.description.as_str()))?;
        writer.text_element("Author", Some(self.author.as_str()))?;
        writer.text_element("Tags", Some(self.tags.as_str()))?;
        writer.text_element("IconUrl", self.icon_url.as_deref())?;
        writer.text_element("TemplateUrl", Some(self.template_url.as_str()))?;
        writer.text_element("ScreenshotUrl", self.screenshot_url.as_deref())?;
        writer.end(DESCRIPTION_ELEMENT)
    }

    pub(crate) fn read_xml(element: &XmlElement) -> Result<Self, IndexError> {
        let modified = match element.attribute("modified").map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                timestamp::parse(raw).ok_or_else(|| IndexError::InvalidTimestamp(raw.to_string()))?,
            ),
        };

        let text = |name: &str| element.child_text(name).unwrap_or_default().to_string();
        let optional = |name: &str| {
            element
                .child_text(name)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Ok(Self {
            name: text("Name"),
            summary: optional("Summary"),
            description: text("Description"),
            author: text("Author"),
            tags: text("Tags"),
            icon_url: optional("IconUrl"),
            screenshot_url: optional("ScreenshotUrl"),
            template_url: text("TemplateUrl"),
            modified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn repository() -> GitHubRepository {
        serde_json::from_str(
            r#"{"name": "foo", "url": "http://x/foo", "pushed_at": "2011-05-03T19:20:00Z"}"#,
        )
        .unwrap()
    }

    fn manifest() -> TemplateManifest {
        TemplateManifest {
            name: "Foo".to_string(),
            summary: None,
            description: "Creates a foo project.".to_string(),
            author: "Jane".to_string(),
            tags: "foo".to_string(),
            icon_file: None,
            screenshot_file: None,
            minimum_version: None,
        }
    }

    #[test]
    fn resolves_urls_against_repository() {
        let manifest = TemplateManifest {
            icon_file: Some("icon.png".to_string()),
            screenshot_file: Some("img/shot.png".to_string()),
            ..manifest()
        };

        let description = TemplateDescription::from_manifest(&repository(), manifest);

        assert_eq!(
            description.icon_url.as_deref(),
            Some("http://x/foo/raw/master/icon.png")
        );
        assert_eq!(
            description.screenshot_url.as_deref(),
            Some("http://x/foo/raw/master/img/shot.png")
        );
        assert_eq!(description.template_url, "http://x/foo/zipball/master");
    }

    #[test]
    fn absent_files_yield_no_urls() {
        let description = TemplateDescription::from_manifest(&repository(), manifest());

        assert_eq!(description.icon_url, None);
        assert_eq!(description.screenshot_url, None);
        assert_eq!(description.template_url, "http://x/foo/zipball/master");
    }

    #[test]
    fn copies_manifest_fields_and_push_time() {
        let description = TemplateDescription::from_manifest(&repository(), manifest());

        assert_eq!(description.name, "Foo");
        assert_eq!(description.author, "Jane");
        assert_eq!(
            description.modified,
            Some(Utc.with_ymd_and_hms(2011, 5, 3, 19, 20, 0).unwrap())
        );
    }
}
