//! Release asset URLs.

use setup_xc_core::tools::{ArchiveFormat, Os};

/// Build the download URL for `version` on `os`/`arch`.
///
/// Linux and macOS assets are tarballs; Windows, and any OS the platform
/// layer could not recognize, gets the zip asset.
#[must_use]
pub fn download_url(base: &str, version: &str, arch: &str, os: Os) -> String {
    let extension = ArchiveFormat::for_os(os).extension();
    format!(
        "{}/{version}/xc_{version}_{os}_{arch}.{extension}",
        base.trim_end_matches('/')
    )
}
