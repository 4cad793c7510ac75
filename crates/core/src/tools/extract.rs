//! Archive extraction into temporary directories.
//!
//! Supports gzip-compressed tarballs and zip archives. Each extraction gets a
//! fresh directory; on failure the partial directory is removed.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::tools::Os;
use crate::{Error, Result};

/// Archive container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// `.tar.gz`
    TarGz,
    /// `.zip`
    Zip,
}

impl ArchiveFormat {
    /// Release archive format used for an OS family.
    #[must_use]
    pub fn for_os(os: Os) -> Self {
        match os {
            Os::Linux | Os::MacOs => Self::TarGz,
            Os::Windows => Self::Zip,
        }
    }

    /// File extension without the leading dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::TarGz => "tar.gz",
            Self::Zip => "zip",
        }
    }
}

/// Unpacks an archive into a fresh temporary directory.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Extract `archive` and return the directory holding its contents.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Extraction`] if the archive is corrupt or unreadable.
    async fn extract(&self, archive: &Path, format: ArchiveFormat) -> Result<PathBuf>;
}

/// [`Extractor`] for tar.gz (flate2 + tar) and zip archives.
#[derive(Debug, Clone)]
pub struct ArchiveExtractor {
    temp_dir: PathBuf,
}

impl ArchiveExtractor {
    /// Create an extractor that unpacks below `temp_dir`.
    #[must_use]
    pub fn new(temp_dir: PathBuf) -> Self {
        Self { temp_dir }
    }
}

#[async_trait]
impl Extractor for ArchiveExtractor {
    async fn extract(&self, archive: &Path, format: ArchiveFormat) -> Result<PathBuf> {
        let dest = self.temp_dir.join(Uuid::new_v4().to_string());
        let archive = archive.to_path_buf();
        debug!(?archive, ?dest, ?format, "Extracting archive");

        let task_archive = archive.clone();
        let task_dest = dest.clone();
        let result = tokio::task::spawn_blocking(move || match format {
            ArchiveFormat::TarGz => extract_tar_gz(&task_archive, &task_dest),
            ArchiveFormat::Zip => extract_zip(&task_archive, &task_dest),
        })
        .await
        .map_err(|e| Error::extraction(&archive, format!("Extraction task failed: {e}")))?;

        if let Err(e) = result {
            let _ = std::fs::remove_dir_all(&dest);
            return Err(e);
        }

        Ok(dest)
    }
}

fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let decoder = GzDecoder::new(BufReader::new(file));
    let mut tarball = Archive::new(decoder);
    tarball.set_preserve_permissions(true);
    tarball
        .unpack(dest)
        .map_err(|e| Error::extraction(archive, format!("Failed to extract tar: {e}")))?;
    Ok(())
}

fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    std::fs::create_dir_all(dest)?;
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(BufReader::new(file))
        .map_err(|e| Error::extraction(archive, format!("Failed to open zip: {e}")))?;

    for i in 0..zip.len() {
        let mut entry = zip
            .by_index(i)
            .map_err(|e| Error::extraction(archive, format!("Failed to read zip entry: {e}")))?;

        // Entries escaping the destination are skipped
        let Some(relative) = entry.enclosed_name() else {
            trace!(name = entry.name(), "Skipping unsafe zip entry");
            continue;
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)?;
            continue;
        }
        if let Some(parent) = outpath.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&outpath)?;
        std::io::copy(&mut entry, &mut out)?;

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
        }
    }
    Ok(())
}
