//! Release provider abstraction.
//!
//! A provider turns a repository identifier and a release selector into a
//! [`Release`] with its downloadable assets.

mod github;

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

pub use github::{DEFAULT_API_URL, GitHubProvider};

/// Repository identifier (owner/repo format).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    pub owner: String,
    pub repo: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
            anyhow::bail!("Invalid repository format. Expected 'owner/repo'.")
        } else {
            Ok(RepoId {
                owner: parts[0].to_string(),
                repo: parts[1].to_string(),
            })
        }
    }
}

/// Which release of a repository to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReleaseSelector {
    /// The most recent non-draft, non-prerelease release
    #[default]
    Latest,
    /// A release pinned by tag name (e.g. "v2.9.87")
    Tag(String),
}

impl ReleaseSelector {
    pub fn from_tag(tag: Option<String>) -> Self {
        match tag {
            Some(tag) => ReleaseSelector::Tag(tag),
            None => ReleaseSelector::Latest,
        }
    }
}

impl fmt::Display for ReleaseSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseSelector::Latest => write!(f, "latest"),
            ReleaseSelector::Tag(tag) => write!(f, "{}", tag),
        }
    }
}

/// A downloadable asset from a release.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseAsset {
    pub name: String,
    pub size: u64,
    /// Last update time (ISO 8601)
    pub updated_at: String,
    pub download_url: String,
}

/// A release from the provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Release {
    /// Version tag (e.g., "v1.0.0")
    pub tag: String,
    /// Downloadable assets, in the order the provider lists them
    pub assets: Vec<ReleaseAsset>,
}

/// Source of release metadata.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Provider: Send + Sync {
    /// Fetch one release of a repository.
    ///
    /// Fails when the request fails, the body is not JSON, or the release
    /// carries no tag or no assets list.
    async fn get_release(&self, repo: &RepoId, selector: &ReleaseSelector) -> Result<Release>;
}
