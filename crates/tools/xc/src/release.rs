//! Latest-release discovery.
//!
//! The GitHub releases listing is scanned for the highest semantic version
//! that is not a release candidate. Lookup failures are returned to the
//! caller, which decides whether to fall back to [`STABLE_VERSION`](crate::STABLE_VERSION).

use semver::{BuildMetadata, Version};
use serde::Deserialize;
use setup_xc_core::tools::Downloader;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{ReleaseError, XcConfig};

/// Marker identifying pre-release tags.
const PRERELEASE_MARKER: &str = "rc";

/// One entry of the GitHub releases listing.
#[derive(Debug, Deserialize)]
struct ReleaseEntry {
    #[serde(default)]
    tag_name: Option<serde_json::Value>,
}

impl ReleaseEntry {
    fn tag(&self) -> Option<String> {
        match self.tag_name.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(tag) if tag.is_empty() => None,
            serde_json::Value::String(tag) => Some(tag.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Normalize a version string for comparison.
///
/// Surrounding whitespace, leading `=`/`v` characters and build metadata are
/// dropped. Returns `None` if the rest is not a semantic version.
#[must_use]
pub fn clean_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches(['=', 'v']);
    let mut version = Version::parse(trimmed).ok()?;
    version.build = BuildMetadata::EMPTY;
    Some(version)
}

/// Whether `candidate` should replace `current` as the latest release.
///
/// Release candidates are always rejected; otherwise the candidate must be
/// strictly newer.
#[must_use]
pub fn is_valid_release(candidate: &Version, current: &Version) -> bool {
    !candidate.to_string().contains(PRERELEASE_MARKER)
        && candidate.cmp_precedence(current) == Ordering::Greater
}

/// Fold `tags` into the newest valid release, starting from `seed`.
///
/// Every tag is compared against the best seen so far, so the result is the
/// maximum regardless of listing order.
#[must_use]
pub fn latest_release<'a>(seed: Version, tags: impl IntoIterator<Item = &'a str>) -> Version {
    tags.into_iter()
        .filter_map(clean_version)
        .fold(seed, |best, candidate| {
            if is_valid_release(&candidate, &best) {
                candidate
            } else {
                best
            }
        })
}

/// Looks up the latest xc release.
#[derive(Clone)]
pub struct ReleaseResolver {
    downloader: Arc<dyn Downloader>,
    config: XcConfig,
}

impl std::fmt::Debug for ReleaseResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReleaseResolver")
            .field("releases_url", &self.config.releases_url)
            .field("stable_version", &self.config.stable_version)
            .finish_non_exhaustive()
    }
}

impl ReleaseResolver {
    /// Create a resolver reading the listing through `downloader`.
    #[must_use]
    pub fn new(downloader: Arc<dyn Downloader>, config: XcConfig) -> Self {
        Self { downloader, config }
    }

    /// Version used when the listing is unavailable.
    #[must_use]
    pub fn stable_version(&self) -> &str {
        &self.config.stable_version
    }

    /// Fetch the listing and return the newest release as `v<semver>`.
    ///
    /// # Errors
    ///
    /// Returns a [`ReleaseError`] if the listing cannot be downloaded, read or parsed.
    pub async fn fetch_latest(&self) -> Result<String, ReleaseError> {
        let url = &self.config.releases_url;
        debug!(%url, "Fetching xc release listing");

        let listing = self
            .downloader
            .download(url)
            .await
            .map_err(ReleaseError::Fetch)?;
        let body = tokio::fs::read_to_string(&listing).await;
        if let Err(e) = tokio::fs::remove_file(&listing).await {
            debug!(listing = ?listing, error = %e, "Failed to remove release listing");
        }

        let entries: Vec<Option<ReleaseEntry>> = serde_json::from_str(body?.trim())?;
        let seed = clean_version(&self.config.stable_version)
            .ok_or_else(|| ReleaseError::InvalidStableVersion(self.config.stable_version.clone()))?;

        let tags: Vec<String> = entries
            .iter()
            .flatten()
            .filter_map(ReleaseEntry::tag)
            .collect();
        let latest = latest_release(seed, tags.iter().map(String::as_str));

        info!(candidates = tags.len(), %latest, "Resolved latest xc release");
        Ok(format!("v{latest}"))
    }

    /// Warning reported when the listing lookup fails and the stable version is used.
    #[must_use]
    pub fn fallback_message(&self, error: &ReleaseError) -> String {
        format!(
            "Cannot get the latest xc releases infos from {}. Error {error}. Using default builtin version {}.",
            self.config.releases_url, self.config.stable_version
        )
    }

    /// Latest release, or the stable version if the lookup fails.
    pub async fn resolve_latest(&self) -> String {
        match self.fetch_latest().await {
            Ok(version) => version,
            Err(error) => {
                warn!("{}", self.fallback_message(&error));
                self.config.stable_version.clone()
            }
        }
    }
}
