//! Error types for xc resolution and installation.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to determine the latest release. Callers fall back to the stable version.
#[derive(Error, Debug, Diagnostic)]
pub enum ReleaseError {
    /// The listing could not be downloaded.
    #[error("Failed to fetch release listing: {0}")]
    #[diagnostic(code(setup_xc::release::fetch))]
    Fetch(#[source] setup_xc_core::Error),

    /// The downloaded listing could not be read.
    #[error("Failed to read release listing: {0}")]
    #[diagnostic(code(setup_xc::release::io))]
    Io(#[from] std::io::Error),

    /// The listing is not a JSON array of releases.
    #[error("Failed to parse release listing: {0}")]
    #[diagnostic(code(setup_xc::release::parse))]
    Parse(#[from] serde_json::Error),

    /// The configured fallback is not a semantic version.
    #[error("Invalid stable version '{0}'")]
    #[diagnostic(code(setup_xc::release::invalid_stable))]
    InvalidStableVersion(String),
}

/// Failure to install xc.
#[derive(Error, Debug, Diagnostic)]
pub enum AcquireError {
    /// The release asset does not exist (HTTP 404).
    #[error("xc '{version}' for '{arch}' arch not found at '{url}'.")]
    #[diagnostic(
        code(setup_xc::acquire::not_found),
        help("Check that the version exists at https://github.com/joerdav/xc/releases")
    )]
    NotFound {
        /// Requested version.
        version: String,
        /// Vendor architecture name.
        arch: String,
        /// Attempted download URL.
        url: String,
    },

    /// Any other download or extraction failure.
    #[error("DownloadXCFailed: could not download or extract xc {version}")]
    #[diagnostic(code(setup_xc::acquire::download_failed))]
    DownloadFailed {
        /// Requested version.
        version: String,
        /// Underlying failure.
        #[source]
        source: setup_xc_core::Error,
    },

    /// The extracted directory could not be committed to the cache.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Cache(setup_xc_core::Error),

    /// The binary could not be made executable.
    #[error("Failed to set permissions on {}: {source}", path.display())]
    #[diagnostic(code(setup_xc::acquire::permissions))]
    Permissions {
        /// Binary path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl AcquireError {
    /// Classify a download or extraction failure.
    #[must_use]
    pub fn from_download(
        error: setup_xc_core::Error,
        version: &str,
        arch: &str,
        url: &str,
    ) -> Self {
        if error.is_not_found() {
            Self::NotFound {
                version: version.to_string(),
                arch: arch.to_string(),
                url: url.to_string(),
            }
        } else {
            Self::DownloadFailed {
                version: version.to_string(),
                source: error,
            }
        }
    }
}
