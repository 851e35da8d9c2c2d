//! Release payloads returned by the releases API.

use serde::Deserialize;

/// A single published file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Asset {
    pub browser_download_url: String,
}

impl Asset {
    #[cfg(test)]
    pub(crate) fn new(url: impl Into<String>) -> Self {
        Self {
            browser_download_url: url.into(),
        }
    }
}

/// Snapshot of one release. Asset order is whatever the API returned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReleaseInfo {
    #[serde(default)]
    pub assets: Vec<Asset>,
}

/// Package flavours recognised by their file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Tarball,
    Deb,
}

impl AssetKind {
    pub fn suffix(self) -> &'static str {
        match self {
            AssetKind::Tarball => ".tar.gz",
            AssetKind::Deb => ".deb",
        }
    }
}

impl ReleaseInfo {
    #[cfg(test)]
    pub(crate) fn from_urls<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            assets: urls.into_iter().map(Asset::new).collect(),
        }
    }

    /// First asset whose download URL ends with the suffix for `kind`.
    pub fn find(&self, kind: AssetKind) -> Option<&Asset> {
        self.assets
            .iter()
            .find(|asset| asset.browser_download_url.ends_with(kind.suffix()))
    }
}
