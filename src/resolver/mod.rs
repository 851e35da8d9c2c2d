//! Mapping of path segments to download URLs.
//!
//! # Rules (first match wins)
//! ```text
//! /                      → latest release, first `.tar.gz` asset
//! /deb                   → https://{host}/deb/{package}_latest_amd64.deb
//! /deb/{version}         → https://{host}/deb/{package}_{version}_amd64.deb
//!                          (one leading `v` stripped, channel names rejected)
//! /{channel}[/...]       → https://{host}/binaries/{package}-{channel}.tar.gz
//! ```
//!
//! Segments are substituted verbatim. Whatever percent-decoding the routing
//! layer did is all the decoding that happens; nothing is re-encoded.

use std::sync::Arc;

use thiserror::Error;

use crate::config::StorageConfig;
use crate::release::{AssetKind, ReleaseError, ReleaseSource};

/// First segment selecting deb packages.
pub const DEB: &str = "deb";

/// Channel names that are published as tarballs only.
pub const RESERVED_CHANNELS: [&str; 2] = ["development", "stable"];

/// Path segments taken from an incoming request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectRequest {
    pub segment1: Option<String>,
    pub segment2: Option<String>,
}

impl RedirectRequest {
    pub fn new(segment1: Option<String>, segment2: Option<String>) -> Self {
        Self { segment1, segment2 }
    }

    pub fn root() -> Self {
        Self::default()
    }

    pub fn one(segment1: impl Into<String>) -> Self {
        Self::new(Some(segment1.into()), None)
    }

    pub fn two(segment1: impl Into<String>, segment2: impl Into<String>) -> Self {
        Self::new(Some(segment1.into()), Some(segment2.into()))
    }
}

/// Why no redirect target could be produced.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("not found")]
    NotFound,
    #[error("error getting latest release: {0}")]
    Upstream(#[from] ReleaseError),
}

/// Stateless resolver shared by every adapter.
#[derive(Clone)]
pub struct Resolver {
    storage: StorageConfig,
    releases: Arc<dyn ReleaseSource>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    pub fn new(storage: StorageConfig, releases: Arc<dyn ReleaseSource>) -> Self {
        Self { storage, releases }
    }

    /// Produce the redirect target for `request`.
    pub async fn resolve(&self, request: &RedirectRequest) -> Result<String, ResolveError> {
        match request.segment1.as_deref() {
            None => self.latest_tarball().await,
            Some(DEB) => match request.segment2.as_deref() {
                Some(requested) => self.deb(requested),
                None => Ok(self.deb_url("latest")),
            },
            Some(channel) => Ok(self.tarball_url(channel)),
        }
    }

    async fn latest_tarball(&self) -> Result<String, ResolveError> {
        let release = self.releases.latest_release().await.map_err(|e| {
            tracing::error!(error = %e, "Release lookup failed");
            ResolveError::Upstream(e)
        })?;

        match release.find(AssetKind::Tarball) {
            Some(asset) => Ok(asset.browser_download_url.clone()),
            None => {
                tracing::debug!(
                    assets = release.assets.len(),
                    "Latest release has no tarball asset"
                );
                Err(ResolveError::NotFound)
            }
        }
    }

    fn deb(&self, requested: &str) -> Result<String, ResolveError> {
        let version = requested.strip_prefix('v').unwrap_or(requested);
        if RESERVED_CHANNELS.contains(&version) {
            tracing::debug!(version, "Channel is not distributed as a deb package");
            return Err(ResolveError::NotFound);
        }
        Ok(self.deb_url(version))
    }

    fn deb_url(&self, version: &str) -> String {
        format!(
            "https://{}/deb/{}_{}_amd64.deb",
            self.storage.host, self.storage.package, version
        )
    }

    fn tarball_url(&self, channel: &str) -> String {
        format!(
            "https://{}/binaries/{}-{}.tar.gz",
            self.storage.host, self.storage.package, channel
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::ReleaseInfo;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake source that counts lookups.
    struct Fixed {
        result: fn() -> Result<ReleaseInfo, ReleaseError>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl ReleaseSource for Fixed {
        async fn latest_release(&self) -> Result<ReleaseInfo, ReleaseError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            (self.result)()
        }
    }

    fn resolver_with(result: fn() -> Result<ReleaseInfo, ReleaseError>) -> (Resolver, Arc<Fixed>) {
        let source = Arc::new(Fixed {
            result,
            calls: AtomicUsize::new(0),
        });
        (Resolver::new(StorageConfig::default(), source.clone()), source)
    }

    fn offline() -> (Resolver, Arc<Fixed>) {
        resolver_with(|| panic!("no lookup expected"))
    }

    #[tokio::test]
    async fn channel_maps_to_binaries_tarball() {
        let (resolver, source) = offline();
        for channel in ["stable", "development", "v0.1.0", "latest"] {
            let url = resolver.resolve(&RedirectRequest::one(channel)).await.unwrap();
            assert_eq!(url, format!("https://storage.offen.dev/binaries/offen-{channel}.tar.gz"));
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn second_segment_is_ignored_for_channels() {
        let (resolver, _) = offline();
        let url = resolver
            .resolve(&RedirectRequest::two("stable", "whatever"))
            .await
            .unwrap();
        assert_eq!(url, "https://storage.offen.dev/binaries/offen-stable.tar.gz");
    }

    #[tokio::test]
    async fn deb_without_version_is_latest() {
        let (resolver, _) = offline();
        let url = resolver.resolve(&RedirectRequest::one("deb")).await.unwrap();
        assert_eq!(url, "https://storage.offen.dev/deb/offen_latest_amd64.deb");
    }

    #[tokio::test]
    async fn deb_version_strips_single_leading_v() {
        let (resolver, _) = offline();
        let with_v = resolver.resolve(&RedirectRequest::two("deb", "v1.2.3")).await.unwrap();
        let without_v = resolver.resolve(&RedirectRequest::two("deb", "1.2.3")).await.unwrap();
        assert_eq!(with_v, "https://storage.offen.dev/deb/offen_1.2.3_amd64.deb");
        assert_eq!(with_v, without_v);

        let double = resolver.resolve(&RedirectRequest::two("deb", "vv1")).await.unwrap();
        assert_eq!(double, "https://storage.offen.dev/deb/offen_v1_amd64.deb");
    }

    #[tokio::test]
    async fn deb_reserved_channels_are_not_found() {
        let (resolver, source) = offline();
        for version in ["development", "stable", "vdevelopment", "vstable"] {
            let err = resolver
                .resolve(&RedirectRequest::two("deb", version))
                .await
                .unwrap_err();
            assert!(matches!(err, ResolveError::NotFound), "{version}");
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn root_picks_first_tarball_asset() {
        let (resolver, source) = resolver_with(|| {
            Ok(ReleaseInfo::from_urls([
                "https://github.com/offen/offen/releases/download/v1/x.zip",
                "https://github.com/offen/offen/releases/download/v1/y.tar.gz",
            ]))
        });
        let url = resolver.resolve(&RedirectRequest::root()).await.unwrap();
        assert_eq!(url, "https://github.com/offen/offen/releases/download/v1/y.tar.gz");
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn root_without_tarball_is_not_found() {
        let (resolver, _) = resolver_with(|| Ok(ReleaseInfo::from_urls(["x.zip"])));
        let err = resolver.resolve(&RedirectRequest::root()).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));

        let (resolver, _) = resolver_with(|| Ok(ReleaseInfo::default()));
        let err = resolver.resolve(&RedirectRequest::root()).await.unwrap_err();
        assert!(matches!(err, ResolveError::NotFound));
    }

    #[tokio::test]
    async fn root_surfaces_upstream_failure() {
        let (resolver, _) = resolver_with(|| Err(ReleaseError::Status(reqwest::StatusCode::BAD_GATEWAY)));
        let err = resolver.resolve(&RedirectRequest::root()).await.unwrap_err();
        assert!(matches!(err, ResolveError::Upstream(ReleaseError::Status(_))));
        assert_eq!(
            err.to_string(),
            "error getting latest release: unexpected response status 502 Bad Gateway"
        );
    }

    #[tokio::test]
    async fn storage_settings_are_used() {
        let storage = StorageConfig {
            host: "downloads.example.com".into(),
            package: "widget".into(),
        };
        let resolver = Resolver::new(storage, offline().1);
        assert_eq!(
            resolver.resolve(&RedirectRequest::two("deb", "v2.0.0")).await.unwrap(),
            "https://downloads.example.com/deb/widget_2.0.0_amd64.deb"
        );
        assert_eq!(
            resolver.resolve(&RedirectRequest::one("stable")).await.unwrap(),
            "https://downloads.example.com/binaries/widget-stable.tar.gz"
        );
    }
}
