//! Runtime settings for tool acquisition.
//!
//! Values come from the runner environment and can be overridden by CLI flags:
//!
//! | Setting | Environment | Default |
//! |---|---|---|
//! | cache dir | `RUNNER_TOOL_CACHE` | `<user cache dir>/setup-xc/tools` |
//! | temp dir | `RUNNER_TEMP` | `<system temp>/setup-xc` |
//! | GitHub token | `GITHUB_TOKEN`, then `GH_TOKEN` | none |

use std::path::PathBuf;

/// Settings shared by the cache, downloader and extractor.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Custom tool cache root.
    pub cache_dir: Option<PathBuf>,
    /// Custom root for transient downloads and extractions.
    pub temp_dir: Option<PathBuf>,
    /// Token sent to the GitHub API to lift anonymous rate limits.
    pub github_token: Option<String>,
}

impl Settings {
    /// Create settings with every value defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from the runner environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            cache_dir: non_empty_var("RUNNER_TOOL_CACHE").map(PathBuf::from),
            temp_dir: non_empty_var("RUNNER_TEMP").map(PathBuf::from),
            github_token: non_empty_var("GITHUB_TOKEN").or_else(|| non_empty_var("GH_TOKEN")),
        }
    }

    /// Set the cache directory.
    #[must_use]
    pub fn with_cache_dir(mut self, path: PathBuf) -> Self {
        self.cache_dir = Some(path);
        self
    }

    /// Set the temp directory.
    #[must_use]
    pub fn with_temp_dir(mut self, path: PathBuf) -> Self {
        self.temp_dir = Some(path);
        self
    }

    /// Set the GitHub token.
    #[must_use]
    pub fn with_github_token(mut self, token: impl Into<String>) -> Self {
        self.github_token = Some(token.into());
        self
    }

    /// Get the cache directory, defaulting to `~/.cache/setup-xc/tools`.
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        self.cache_dir.clone().unwrap_or_else(default_cache_dir)
    }

    /// Get the temp directory, defaulting to `<system temp>/setup-xc`.
    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("setup-xc"))
    }
}

/// Get the default cache directory for tools.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("setup-xc")
        .join("tools")
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
