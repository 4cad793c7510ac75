//! Tool acquisition primitives.
//!
//! Tool crates combine these pieces into an install pipeline:
//!
//! - [`Platform`], [`Os`] - host platform identification
//! - [`ToolCache`] / [`FsToolCache`] - keyed store of extracted tool directories
//! - [`Downloader`] / [`HttpDownloader`] - URL to temporary file
//! - [`Extractor`] / [`ArchiveExtractor`] - archive to temporary directory
//!
//! Each seam is a trait so tests can substitute in-memory doubles.

mod cache;
mod download;
mod extract;
mod platform;

pub use cache::{FsToolCache, ToolCache};
pub use download::{Downloader, HttpDownloader};
pub use extract::{ArchiveExtractor, ArchiveFormat, Extractor};
pub use platform::{Os, Platform};
