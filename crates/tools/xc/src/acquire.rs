//! Cache-first installation of xc.

use setup_xc_core::tools::{ArchiveFormat, Downloader, Extractor, Platform, ToolCache};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    AcquireError, ReleaseResolver, XcConfig, architecture_name, binary_name, download_url,
};

/// Installs xc into a [`ToolCache`].
///
/// The flow for [`acquire`](Self::acquire) is:
/// 1. resolve an empty version through the [`ReleaseResolver`]
/// 2. reuse the cached directory for `(xc, version)` if there is one
/// 3. otherwise download the release asset, extract it and commit it
/// 4. make the binary executable and return its path
pub struct XcInstaller {
    config: XcConfig,
    platform: Platform,
    cache: Arc<dyn ToolCache>,
    downloader: Arc<dyn Downloader>,
    extractor: Arc<dyn Extractor>,
    releases: ReleaseResolver,
}

impl std::fmt::Debug for XcInstaller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XcInstaller")
            .field("config", &self.config)
            .field("platform", &self.platform)
            .finish_non_exhaustive()
    }
}

impl XcInstaller {
    /// Create an installer for `platform`.
    #[must_use]
    pub fn new(
        config: XcConfig,
        platform: Platform,
        cache: Arc<dyn ToolCache>,
        downloader: Arc<dyn Downloader>,
        extractor: Arc<dyn Extractor>,
    ) -> Self {
        let releases = ReleaseResolver::new(Arc::clone(&downloader), config.clone());
        Self {
            config,
            platform,
            cache,
            downloader,
            extractor,
            releases,
        }
    }

    /// Release resolver sharing this installer's downloader.
    #[must_use]
    pub fn releases(&self) -> &ReleaseResolver {
        &self.releases
    }

    /// Platform the installer downloads for.
    #[must_use]
    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Install `version` (or the latest release if empty) and return the binary path.
    ///
    /// # Errors
    ///
    /// Returns [`AcquireError::NotFound`] if the release asset does not exist,
    /// [`AcquireError::DownloadFailed`] for other download or extraction
    /// failures, and cache or permission errors as they occur.
    pub async fn acquire(&self, version: &str) -> Result<PathBuf, AcquireError> {
        let version = if version.is_empty() {
            self.releases.resolve_latest().await
        } else {
            version.to_string()
        };

        let tool = self.config.tool_name.as_str();
        let binary = binary_name(tool, &self.platform);

        let cached_dir = match self.cache.find(tool, &version) {
            Some(dir) => {
                debug!(%tool, %version, ?dir, "Tool already cached");
                dir
            }
            None => self.download_and_cache(&version, &binary).await?,
        };

        let binary_path = cached_dir.join(&binary);
        make_executable(&binary_path)?;
        Ok(binary_path)
    }

    async fn download_and_cache(&self, version: &str, binary: &str) -> Result<PathBuf, AcquireError> {
        let tool = self.config.tool_name.as_str();
        let arch = architecture_name(&self.platform);
        let url = download_url(
            &self.config.download_base_url,
            version,
            &arch,
            self.platform.os,
        );
        let format = ArchiveFormat::for_os(self.platform.os);

        info!(%tool, %version, %arch, %url, "Downloading release");

        let archive = self
            .downloader
            .download(&url)
            .await
            .map_err(|e| AcquireError::from_download(e, version, &arch, &url))?;

        let extracted = self.extractor.extract(&archive, format).await;
        if let Err(e) = tokio::fs::remove_file(&archive).await {
            debug!(archive = ?archive, error = %e, "Failed to remove downloaded archive");
        }
        let extracted =
            extracted.map_err(|e| AcquireError::from_download(e, version, &arch, &url))?;

        let committed = self.cache.commit_dir(&extracted, binary, tool, version);
        if let Err(e) = tokio::fs::remove_dir_all(&extracted).await {
            debug!(dir = ?extracted, error = %e, "Failed to remove extraction directory");
        }
        let cached_dir = committed.map_err(AcquireError::Cache)?;

        info!(%tool, %version, dir = ?cached_dir, "Cached release");
        Ok(cached_dir)
    }
}

/// Grant read, write and execute to everyone.
fn make_executable(path: &Path) -> Result<(), AcquireError> {
    let to_error = |source| AcquireError::Permissions {
        path: path.to_path_buf(),
        source,
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o777)).map_err(to_error)?;
    }

    #[cfg(not(unix))]
    {
        let mut perms = std::fs::metadata(path).map_err(to_error)?.permissions();
        #[allow(clippy::permissions_set_readonly_false)]
        perms.set_readonly(false);
        std::fs::set_permissions(path, perms).map_err(to_error)?;
    }

    Ok(())
}
