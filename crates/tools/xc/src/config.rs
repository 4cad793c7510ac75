//! Fixed endpoints and defaults for xc releases.

/// Name of the installed tool and its cache key.
pub const TOOL_NAME: &str = "xc";

/// Version installed when the release listing cannot be read.
pub const STABLE_VERSION: &str = "v0.1.181";

/// GitHub releases listing for xc.
pub const RELEASES_URL: &str = "https://api.github.com/repos/joerdav/xc/releases";

/// Prefix of every release asset URL.
pub const DOWNLOAD_BASE_URL: &str = "https://github.com/joerdav/xc/releases/download";

/// Immutable settings for one installer instance.
///
/// The defaults point at the public xc repository; tests redirect the URLs
/// to a local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XcConfig {
    /// Tool name used for the binary and the cache key.
    pub tool_name: String,
    /// Fallback version, `v`-prefixed.
    pub stable_version: String,
    /// Release listing endpoint.
    pub releases_url: String,
    /// Release asset URL prefix.
    pub download_base_url: String,
}

impl Default for XcConfig {
    fn default() -> Self {
        Self {
            tool_name: TOOL_NAME.to_string(),
            stable_version: STABLE_VERSION.to_string(),
            releases_url: RELEASES_URL.to_string(),
            download_base_url: DOWNLOAD_BASE_URL.to_string(),
        }
    }
}

impl XcConfig {
    /// Override the release listing endpoint.
    #[must_use]
    pub fn with_releases_url(mut self, url: impl Into<String>) -> Self {
        self.releases_url = url.into();
        self
    }

    /// Override the asset URL prefix.
    #[must_use]
    pub fn with_download_base_url(mut self, url: impl Into<String>) -> Self {
        self.download_base_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = XcConfig::default();
        assert_eq!(config.tool_name, "xc");
        assert_eq!(config.stable_version, "v0.1.181");
        assert_eq!(
            config.releases_url,
            "https://api.github.com/repos/joerdav/xc/releases"
        );
    }

    #[test]
    fn test_config_overrides() {
        let config = XcConfig::default()
            .with_releases_url("http://127.0.0.1:9000/releases")
            .with_download_base_url("http://127.0.0.1:9000/download");
        assert_eq!(config.releases_url, "http://127.0.0.1:9000/releases");
        assert_eq!(config.download_base_url, "http://127.0.0.1:9000/download");
        assert_eq!(config.stable_version, STABLE_VERSION);
    }
}
