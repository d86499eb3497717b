use anyhow::Result;
use log::debug;

use crate::{
    provider::{DEFAULT_API_URL, ReleaseSelector, RepoId},
    runtime::Runtime,
};

/// Repository whose releases feed the download page.
pub const DEFAULT_REPO: &str = "ObaWan/pixistudio-updates";

/// Settings shared by every command, resolved from CLI arguments and the
/// environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub token: Option<String>,
    pub repo: RepoId,
    pub selector: ReleaseSelector,
}

impl Config {
    pub fn new<R: Runtime>(
        runtime: &R,
        repo: &str,
        tag: Option<String>,
        api_url: Option<String>,
    ) -> Result<Self> {
        let token = runtime.env_var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        if let Some(token) = &token {
            debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(token));
        }

        Ok(Self {
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            token,
            repo: repo.parse()?,
            selector: ReleaseSelector::from_tag(tag),
        })
    }
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}
