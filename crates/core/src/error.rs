//! Error types shared by the setup-xc crates.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// HTTP status code for a missing resource.
const HTTP_NOT_FOUND: u16 = 404;

/// Errors raised by the host, cache, download and extraction primitives.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The server answered with a non-success status.
    #[error("Unexpected HTTP {status} while fetching {url}")]
    #[diagnostic(code(setup_xc::http::status))]
    Http {
        /// Requested URL.
        url: String,
        /// Status code returned by the server.
        status: u16,
    },

    /// The request never produced a response.
    #[error("Request to {url} failed: {message}")]
    #[diagnostic(
        code(setup_xc::http::request),
        help("Check network connectivity to the release host")
    )]
    Request {
        /// Requested URL.
        url: String,
        /// Transport error message.
        message: String,
    },

    /// An archive could not be unpacked.
    #[error("Failed to extract {}: {message}", archive.display())]
    #[diagnostic(code(setup_xc::extract))]
    Extraction {
        /// Archive that was being extracted.
        archive: PathBuf,
        /// Error message.
        message: String,
    },

    /// The expected binary was missing from an extracted directory.
    #[error("Binary '{name}' not found in {}", dir.display())]
    #[diagnostic(code(setup_xc::cache::binary_not_found))]
    BinaryNotFound {
        /// Binary file name.
        name: String,
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// A required host input was not supplied.
    #[error("Input required and not supplied: {0}")]
    #[diagnostic(
        code(setup_xc::host::missing_input),
        help("Set the `with:` input in the workflow step or pass --xc-version")
    )]
    MissingInput(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    #[diagnostic(code(setup_xc::config))]
    Configuration(String),

    /// I/O failure.
    #[error("I/O operation failed: {0}")]
    #[diagnostic(code(setup_xc::io))]
    Io(#[from] std::io::Error),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    #[diagnostic(code(setup_xc::json))]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an HTTP status error.
    #[must_use]
    pub fn http(url: impl Into<String>, status: u16) -> Self {
        Self::Http {
            url: url.into(),
            status,
        }
    }

    /// Create a request (transport) error.
    #[must_use]
    pub fn request(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error.
    #[must_use]
    pub fn extraction(archive: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Extraction {
            archive: archive.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this is an HTTP 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status, .. } if *status == HTTP_NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let error = Error::http("https://example.com/a.tar.gz", 500);
        assert_eq!(
            error.to_string(),
            "Unexpected HTTP 500 while fetching https://example.com/a.tar.gz"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::http("https://example.com", 404).is_not_found());
        assert!(!Error::http("https://example.com", 403).is_not_found());
        assert!(!Error::request("https://example.com", "connection reset").is_not_found());
    }

    #[test]
    fn test_missing_input_display() {
        let error = Error::MissingInput("version".into());
        assert_eq!(
            error.to_string(),
            "Input required and not supplied: version"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = Error::from(io_error);
        assert!(error.to_string().contains("file not found"));
    }
}
