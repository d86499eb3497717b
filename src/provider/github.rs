//! GitHub provider implementation.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use log::debug;
#[cfg(test)]
use reqwest::Client;

use crate::http::HttpClient;

use super::{Provider, Release, ReleaseAsset, ReleaseSelector, RepoId};

/// Public GitHub REST API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub API response types (internal).
mod api {
    use serde::Deserialize;

    #[derive(Deserialize, Debug)]
    pub struct Release {
        pub tag_name: Option<String>,
        pub assets: Option<Vec<Asset>>,
    }

    #[derive(Deserialize, Debug)]
    pub struct Asset {
        pub name: String,
        pub size: u64,
        pub updated_at: String,
        pub browser_download_url: String,
    }
}

/// GitHub provider implementation.
pub struct GitHubProvider {
    http_client: HttpClient,
    api_url: String,
}

impl GitHubProvider {
    /// Create a new GitHub provider with custom API URL.
    #[cfg(test)]
    pub fn with_api_url(client: Client, api_url: &str) -> Self {
        Self::from_http_client(HttpClient::new(client), api_url)
    }

    /// Create from an existing HttpClient.
    pub fn from_http_client(http_client: HttpClient, api_url: &str) -> Self {
        Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn release_url(&self, repo: &RepoId, selector: &ReleaseSelector) -> String {
        match selector {
            ReleaseSelector::Latest => format!(
                "{}/repos/{}/{}/releases/latest",
                self.api_url, repo.owner, repo.repo
            ),
            ReleaseSelector::Tag(tag) => format!(
                "{}/repos/{}/{}/releases/tags/{}",
                self.api_url, repo.owner, repo.repo, tag
            ),
        }
    }
}

#[async_trait]
impl Provider for GitHubProvider {
    async fn get_release(&self, repo: &RepoId, selector: &ReleaseSelector) -> Result<Release> {
        let url = self.release_url(repo, selector);
        debug!("Fetching {} release of {} from {}...", selector, repo, url);

        let parsed: Option<api::Release> = self
            .http_client
            .get_json(&url)
            .await
            .with_context(|| format!("Failed to fetch {} release of {}", selector, repo))?;

        let release = parsed.ok_or_else(|| anyhow!("Release payload for {} is empty", repo))?;
        release.try_into()
    }
}

impl TryFrom<api::Release> for Release {
    type Error = anyhow::Error;

    fn try_from(r: api::Release) -> Result<Self> {
        let tag = r
            .tag_name
            .filter(|tag| !tag.is_empty())
            .ok_or_else(|| anyhow!("Release payload has no tag_name"))?;
        let assets = r
            .assets
            .ok_or_else(|| anyhow!("Release {} has no assets list", tag))?;

        Ok(Release {
            tag,
            assets: assets.into_iter().map(|a| a.into()).collect(),
        })
    }
}

impl From<api::Asset> for ReleaseAsset {
    fn from(a: api::Asset) -> Self {
        ReleaseAsset {
            name: a.name,
            size: a.size,
            updated_at: a.updated_at,
            download_url: a.browser_download_url,
        }
    }
}
