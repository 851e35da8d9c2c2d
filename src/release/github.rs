use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderValue, ACCEPT},
    Client, StatusCode,
};
use url::Url;

use crate::config::{ReleaseConfig, ReleaseLookup};
use crate::release::{ReleaseError, ReleaseInfo, ReleaseSource};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// Release source backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubReleases {
    client: Client,
    url: Url,
    lookup: ReleaseLookup,
}

impl GitHubReleases {
    pub fn new(config: &ReleaseConfig) -> Result<Self, ReleaseError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ReleaseError::Client)?;

        Ok(Self {
            client,
            url: release_info_url(&config.api_base, &config.repo, config.lookup)?,
            lookup: config.lookup,
        })
    }

    /// The endpoint queried on every lookup.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ReleaseSource for GitHubReleases {
    async fn latest_release(&self) -> Result<ReleaseInfo, ReleaseError> {
        tracing::debug!(url = %self.url, "Getting release info");

        let resp = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT))
            .send()
            .await
            .map_err(ReleaseError::Request)?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND && self.lookup == ReleaseLookup::Latest {
            // GitHub answers `/releases/latest` with 404 until a release is published.
            tracing::debug!(url = %self.url, "Repository has no published release");
            return Ok(ReleaseInfo::default());
        }
        if !status.is_success() {
            return Err(ReleaseError::Status(status));
        }

        let body = resp.bytes().await.map_err(ReleaseError::Request)?;
        match self.lookup {
            ReleaseLookup::Latest => serde_json::from_slice(&body).map_err(ReleaseError::Decode),
            ReleaseLookup::List => {
                let mut releases: Vec<ReleaseInfo> =
                    serde_json::from_slice(&body).map_err(ReleaseError::Decode)?;
                if releases.is_empty() {
                    tracing::debug!(url = %self.url, "Repository has no releases");
                    return Ok(ReleaseInfo::default());
                }
                Ok(releases.swap_remove(0))
            }
        }
    }
}

/// Build `{api_base}/repos/{owner}/{name}/releases[/latest]`.
pub fn release_info_url(
    api_base: &Url,
    repo: &str,
    lookup: ReleaseLookup,
) -> Result<Url, ReleaseError> {
    let (owner, name) = repo
        .split_once('/')
        .ok_or_else(|| ReleaseError::InvalidRepo(repo.to_string()))?;

    let mut url = api_base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| ReleaseError::InvalidBase(api_base.clone()))?;
        segments.pop_if_empty().push("repos").push(owner).push(name).push("releases");
        if lookup == ReleaseLookup::Latest {
            segments.push("latest");
        }
    }
    Ok(url)
}
