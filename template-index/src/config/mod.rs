//! Configuration loading and validation.
//!
//! Settings come from an optional `template-index.toml`; the CLI layers its
//! flags on top before calling [`IndexConfig::validate`].

mod error;
mod index_config;

pub use error::ConfigError;
pub use index_config::IndexConfig;

use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use url::Url;

impl IndexConfig {
    /// Loads and validates a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable, not valid
    /// TOML, or fails validation.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration");

        if !path.exists() {
            return Err(ConfigError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let config: IndexConfig = toml::from_str(&content).map_err(|e| ConfigError::TomlError {
            path: path.display().to_string(),
            source: e,
        })?;

        config.validate(&path.display().to_string())?;
        Ok(config)
    }

    /// Checks the settings for values a run cannot work with.
    ///
    /// `origin` names where the settings came from in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] describing the first problem.
    pub fn validate(&self, origin: &str) -> Result<(), ConfigError> {
        let invalid = |message: String| ConfigError::ValidationError {
            path: origin.to_string(),
            message,
        };

        if self.organization.trim().is_empty() {
            return Err(invalid("organization must not be empty".to_string()));
        }

        if self.versions.is_empty() {
            return Err(invalid("versions must list at least one version".to_string()));
        }

        let mut seen = HashSet::new();
        for version in &self.versions {
            if version.trim().is_empty() {
                return Err(invalid("versions must not contain blank entries".to_string()));
            }
            if version.trim() != version {
                return Err(invalid(format!(
                    "version '{version}' must not have surrounding whitespace"
                )));
            }
            if version.contains('/') || version.contains('\\') {
                return Err(invalid(format!(
                    "version '{version}' must not contain path separators"
                )));
            }
            if !seen.insert(version.as_str()) {
                return Err(invalid(format!("version '{version}' is listed twice")));
            }
        }

        if Url::parse(&self.api_base_url).is_err() {
            return Err(invalid(format!(
                "api-base-url is not a valid URL: {}",
                self.api_base_url
            )));
        }

        if self.manifest_file.trim().is_empty() {
            return Err(invalid("manifest-file must not be empty".to_string()));
        }

        if self.manifest_file.contains('/') || self.manifest_file.contains('\\') {
            return Err(invalid(
                "manifest-file must not contain path separators".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("template-index.toml");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn can_load_full_config() {
        let temp = TempDir::new().unwrap();
        let path = write_config(
            temp.path(),
            r#"
organization = "acme"
index-repository = "acme-index"
versions = ["2.6", "2.8", "3.0"]
api-base-url = "http://localhost:8080/api"
manifest-file = "Template.xml"
output-dir = "out"
timeout-secs = 0
"#,
        );

        let config = IndexConfig::load(&path).unwrap();

        assert_eq!(config.organization, "acme");
        assert_eq!(config.index_repository, "acme-index");
        assert_eq!(config.versions, vec!["2.6", "2.8", "3.0"]);
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.manifest_file, "Template.xml");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.timeout(), None);
    }

    #[test]
    fn missing_keys_take_defaults() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "organization = \"acme\"\n");

        let config = IndexConfig::load(&path).unwrap();

        assert_eq!(config.organization, "acme");
        assert_eq!(config.index_repository, "md-data-index");
        assert_eq!(config.versions, vec!["2.6"]);
        assert_eq!(config.api_base_url, "https://github.com/api/v2/json");
        assert_eq!(config.manifest_file, "ProjectTemplateManifest.xml");
        assert_eq!(config.timeout(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn default_config_is_valid() {
        assert!(IndexConfig::default().validate("defaults").is_ok());
    }

    #[test]
    fn missing_file_is_reported() {
        let temp = TempDir::new().unwrap();

        let result = IndexConfig::load(&temp.path().join("absent.toml"));

        assert!(matches!(result, Err(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "organisation = \"acme\"\n");

        let result = IndexConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::TomlError { .. })));
    }

    #[test]
    fn rejects_empty_versions() {
        let config = IndexConfig {
            versions: Vec::new(),
            ..Default::default()
        };

        assert!(matches!(
            config.validate("test"),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_and_blank_versions() {
        let duplicate = IndexConfig {
            versions: vec!["2.6".to_string(), "2.6".to_string()],
            ..Default::default()
        };
        let blank = IndexConfig {
            versions: vec!["2.6".to_string(), "  ".to_string()],
            ..Default::default()
        };

        assert!(duplicate.validate("test").is_err());
        assert!(blank.validate("test").is_err());
    }

    #[test]
    fn rejects_versions_with_surrounding_whitespace() {
        let config = IndexConfig {
            versions: vec![" 2.6".to_string()],
            ..Default::default()
        };

        assert!(matches!(
            config.validate("test"),
            Err(ConfigError::ValidationError { message, .. }) if message.contains("whitespace")
        ));
    }

    #[test]
    fn rejects_versions_that_escape_output_dir() {
        for version in ["../escaped", "2.6/beta", "2.6\\beta"] {
            let config = IndexConfig {
                versions: vec![version.to_string()],
                ..Default::default()
            };

            assert!(
                matches!(
                    config.validate("test"),
                    Err(ConfigError::ValidationError { message, .. }) if message.contains("path separators")
                ),
                "accepted {version}"
            );
        }
    }

    #[test]
    fn load_rejects_version_with_path_separator() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "versions = [\"2.6\", \"../x\"]\n");

        let result = IndexConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn rejects_invalid_api_url() {
        let config = IndexConfig {
            api_base_url: "not-a-url".to_string(),
            ..Default::default()
        };

        assert!(matches!(
            config.validate("test"),
            Err(ConfigError::ValidationError { .. })
        ));
    }

    #[test]
    fn rejects_manifest_file_with_separators() {
        let config = IndexConfig {
            manifest_file: "docs/Manifest.xml".to_string(),
            ..Default::default()
        };

        assert!(config.validate("test").is_err());
    }
}
