//! xc tool provider for setup-xc.
//!
//! Resolves and installs release binaries of the [xc](https://github.com/joerdav/xc)
//! task runner:
//! - Latest-version discovery from the GitHub releases listing, with a
//!   built-in stable fallback
//! - Per-OS/per-architecture download URLs (`tar.gz` on Linux and macOS,
//!   `zip` elsewhere)
//! - Cache-first installation through the core [`ToolCache`](setup_xc_core::tools::ToolCache)
//!
//! # Example
//!
//! ```ignore
//! use setup_xc_tools_xc::{XcConfig, XcInstaller};
//!
//! let installer = XcInstaller::new(XcConfig::default(), platform, cache, downloader, extractor);
//! let xc = installer.acquire("v0.4.0").await?;
//! ```

mod acquire;
mod config;
mod error;
mod platform;
mod release;
mod url;

pub use acquire::XcInstaller;
pub use config::{DOWNLOAD_BASE_URL, RELEASES_URL, STABLE_VERSION, TOOL_NAME, XcConfig};
pub use error::{AcquireError, ReleaseError};
pub use platform::{architecture_name, binary_name, executable_suffix};
pub use release::{ReleaseResolver, clean_version, is_valid_release, latest_release};
pub use url::download_url;
