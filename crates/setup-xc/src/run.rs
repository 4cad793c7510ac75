//! Action entry point: read the version input, install xc, publish its path.

use setup_xc_core::Settings;
use setup_xc_core::host::Host;
use setup_xc_core::tools::{ArchiveExtractor, FsToolCache, HttpDownloader, Platform};
use setup_xc_tools_xc::{XcConfig, XcInstaller};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Input naming the requested version.
pub const VERSION_INPUT: &str = "version";

/// Output receiving the installed binary path.
pub const PATH_OUTPUT: &str = "xc-path";

/// Version alias resolved through the release listing.
pub const LATEST: &str = "latest";

/// Build an installer for `platform` from runtime settings.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be created.
pub fn build_installer(
    settings: &Settings,
    config: XcConfig,
    platform: Platform,
) -> setup_xc_core::Result<XcInstaller> {
    let temp_dir = settings.temp_dir();
    let downloader =
        HttpDownloader::new(temp_dir.clone())?.with_token(settings.github_token.clone());
    let cache = FsToolCache::new(settings.cache_dir(), platform.arch.clone());

    debug!(
        cache_dir = ?cache.root(),
        temp_dir = ?temp_dir,
        %platform,
        "Configured xc installer"
    );

    Ok(XcInstaller::new(
        config,
        platform,
        Arc::new(cache),
        Arc::new(downloader),
        Arc::new(ArchiveExtractor::new(temp_dir)),
    ))
}

/// Install the requested xc version and publish it to `host`.
///
/// `requested` overrides the `version` input. An empty version or `latest`
/// is resolved through the release listing; a failed lookup is reported as a
/// host warning and the stable version is installed. Nothing is published if
/// any step fails.
///
/// # Errors
///
/// Returns the first error from input handling, installation or publication.
pub async fn run(
    host: &dyn Host,
    installer: &XcInstaller,
    requested: Option<String>,
) -> miette::Result<PathBuf> {
    let mut version = match requested {
        Some(version) => version.trim().to_string(),
        None => host.get_input(VERSION_INPUT, true)?,
    };

    if version.is_empty() || version.eq_ignore_ascii_case(LATEST) {
        let releases = installer.releases();
        version = match releases.fetch_latest().await {
            Ok(latest) => latest,
            Err(error) => {
                let message = releases.fallback_message(&error);
                warn!("{message}");
                host.warning(&message);
                releases.stable_version().to_string()
            }
        };
    }

    debug!("Downloading xc version {version}");
    let xc_path = installer.acquire(&version).await?;

    if let Some(dir) = xc_path.parent() {
        host.add_path(dir)?;
    }

    info!(
        "xc binary version: '{version}' has been cached at {}",
        xc_path.display()
    );
    host.set_output(PATH_OUTPUT, &xc_path.to_string_lossy())?;

    Ok(xc_path)
}
