//! Download a URL to a temporary file.

use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

use crate::{Error, Result};

/// Fetches a URL into a fresh temporary file.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `url` and return the path of the written file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] for non-success statuses (see
    /// [`Error::is_not_found`]) and [`Error::Request`] for transport failures.
    async fn download(&self, url: &str) -> Result<PathBuf>;
}

/// [`Downloader`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
    temp_dir: PathBuf,
    token: Option<String>,
}

impl HttpDownloader {
    /// Create a downloader writing into `temp_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend fails to initialize.
    pub fn new(temp_dir: PathBuf) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("setup-xc/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            temp_dir,
            token: None,
        })
    }

    /// Authenticate requests with a GitHub token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Directory that receives downloaded files.
    #[must_use]
    pub fn temp_dir(&self) -> &Path {
        &self.temp_dir
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<PathBuf> {
        debug!(%url, "Downloading");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let mut response = request
            .send()
            .await
            .map_err(|e| Error::request(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::http(url, status.as_u16()));
        }

        tokio::fs::create_dir_all(&self.temp_dir).await?;
        let dest = self.temp_dir.join(Uuid::new_v4().to_string());
        let mut file = tokio::fs::File::create(&dest).await?;

        let written = async {
            while let Some(chunk) = response
                .chunk()
                .await
                .map_err(|e| Error::request(url, e.to_string()))?
            {
                file.write_all(&chunk).await?;
            }
            file.flush().await?;
            Ok::<(), Error>(())
        }
        .await;

        if let Err(e) = written {
            let _ = tokio::fs::remove_file(&dest).await;
            return Err(e);
        }

        debug!(%url, ?dest, "Download complete");
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_download_writes_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/releases"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let downloader = HttpDownloader::new(temp.path().to_path_buf()).unwrap();

        let file = downloader
            .download(&format!("{}/releases", server.uri()))
            .await
            .unwrap();

        assert!(file.starts_with(temp.path()));
        assert_eq!(std::fs::read_to_string(file).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_download_classifies_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let downloader = HttpDownloader::new(temp.path().to_path_buf()).unwrap();

        let err = downloader
            .download(&format!("{}/missing.tar.gz", server.uri()))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_download_server_error_is_not_404() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let downloader = HttpDownloader::new(temp.path().to_path_buf()).unwrap();

        let err = downloader.download(&server.uri()).await.unwrap_err();

        assert!(matches!(err, Error::Http { status: 502, .. }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_download_sends_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .expect(1)
            .mount(&server)
            .await;

        let temp = TempDir::new().unwrap();
        let downloader = HttpDownloader::new(temp.path().to_path_buf())
            .unwrap()
            .with_token(Some("secret".to_string()));

        let file = downloader.download(&server.uri()).await.unwrap();
        assert_eq!(std::fs::read_to_string(file).unwrap(), "ok");
    }
}
