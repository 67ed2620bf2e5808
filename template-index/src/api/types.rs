//! Typed shapes of the hosting API's JSON payloads.
//!
//! Only the fields that something downstream reads are declared; unknown
//! fields are ignored during decoding.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// A repository as listed by the hosting API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubRepository {
    /// Repository name, unique within its owner.
    pub name: String,

    /// Web location of the repository, e.g. `https://github.com/md-data/foo`.
    pub url: String,

    /// Last time anything was pushed. `None` for empty repositories.
    #[serde(default, with = "timestamp::option")]
    pub pushed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub owner: Option<String>,

    #[serde(default)]
    pub organization: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub fork: bool,

    #[serde(default)]
    pub private: bool,

    #[serde(default)]
    pub has_wiki: bool,

    #[serde(default)]
    pub has_downloads: bool,

    #[serde(default)]
    pub watchers: u32,

    #[serde(default)]
    pub forks: u32,

    #[serde(default)]
    pub open_issues: u32,
}

impl GitHubRepository {
    /// Prefix under which the raw content of the default branch is served.
    pub fn raw_prefix(&self) -> String {
        format!("{}/raw/master/", self.url)
    }

    /// Download location of the default branch as an archive.
    pub fn zipball_url(&self) -> String {
        format!("{}/zipball/master", self.url)
    }
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubUser {
    pub login: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub id: Option<u64>,

    #[serde(default)]
    pub company: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub blog: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub gravatar_id: Option<String>,

    #[serde(default, rename = "type")]
    pub account_type: Option<String>,

    #[serde(default)]
    pub permission: Option<String>,

    #[serde(default)]
    pub public_repo_count: u32,

    #[serde(default)]
    pub public_gist_count: u32,

    #[serde(default)]
    pub followers_count: u32,

    #[serde(default)]
    pub following_count: u32,

    #[serde(default)]
    pub created_at: Option<String>,
}

/// An organization. Shares its shape with [`GitHubUser`] on the wire.
pub type GitHubOrganization = GitHubUser;

/// A team within an organization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubTeam {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub permission: Option<String>,
}

/// One side (base or head) of a pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GitHubPosition {
    #[serde(default)]
    pub label: Option<String>,

    #[serde(default, rename = "ref")]
    pub git_ref: Option<String>,

    #[serde(default)]
    pub sha: Option<String>,

    #[serde(default)]
    pub user: Option<GitHubUser>,

    #[serde(default)]
    pub repository: Option<GitHubRepository>,
}

/// A pull request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GitHubPullRequest {
    pub number: u64,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub base: Option<GitHubPosition>,

    #[serde(default)]
    pub head: Option<GitHubPosition>,

    #[serde(default)]
    pub user: Option<GitHubUser>,

    #[serde(default)]
    pub issue_user: Option<GitHubUser>,

    #[serde(default)]
    pub position: Option<f64>,

    #[serde(default)]
    pub votes: u32,

    #[serde(default)]
    pub comments: u32,

    #[serde(default)]
    pub labels: Vec<String>,

    #[serde(default)]
    pub html_url: Option<String>,

    #[serde(default)]
    pub diff_url: Option<String>,

    #[serde(default)]
    pub patch_url: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Timestamp parsing for the API's two date formats.
///
/// Current responses use RFC 3339 (`2011-05-03T19:20:00Z`); the legacy v2
/// API emits `2011/05/03 12:20:00 -0700`.
pub(crate) mod timestamp {
    use chrono::{DateTime, Utc};

    const LEGACY_FORMAT: &str = "%Y/%m/%d %H:%M:%S %z";

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        let raw = raw.trim();
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, LEGACY_FORMAT))
            .ok()
            .map(|parsed| parsed.with_timezone(&Utc))
    }

    pub(crate) mod option {
        use chrono::{DateTime, Utc};
        use serde::{de, Deserialize, Deserializer};

        pub(crate) fn deserialize<'de, D>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Option::<String>::deserialize(deserializer)? {
                None => Ok(None),
                Some(raw) if raw.trim().is_empty() => Ok(None),
                Some(raw) => super::parse(&raw)
                    .map(Some)
                    .ok_or_else(|| de::Error::custom(format!("invalid timestamp '{raw}'"))),
            }
        }
    }
}
