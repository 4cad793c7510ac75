//! CI host integration.
//!
//! The [`Host`] trait is the boundary between tool acquisition and the
//! environment that invoked it: reading inputs, publishing outputs, extending
//! the search path and surfacing annotations. [`GitHubActionsHost`] implements
//! it with the GitHub Actions runner protocol:
//!
//! - inputs arrive as `INPUT_<NAME>` environment variables
//! - outputs are appended to `$GITHUB_OUTPUT`
//! - search path entries are appended to `$GITHUB_PATH` (skipped when unset)
//! - annotations are `::warning::` / `::error::` workflow commands on stdout

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

use crate::{Error, Result};

/// Environment that invoked the installer.
pub trait Host: Send + Sync {
    /// Read a named input. Values are trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] when `required` is set and the input is empty.
    fn get_input(&self, name: &str, required: bool) -> Result<String>;

    /// Publish a named output value.
    ///
    /// # Errors
    ///
    /// Returns an error if the output channel cannot be written.
    fn set_output(&self, name: &str, value: &str) -> Result<()>;

    /// Make `dir` part of the search path for subsequent steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the path channel cannot be written.
    fn add_path(&self, dir: &Path) -> Result<()>;

    /// Surface a non-fatal warning to the user.
    fn warning(&self, message: &str);

    /// Report the invocation as failed.
    fn set_failed(&self, message: &str);
}

/// [`Host`] backed by the GitHub Actions runner files and workflow commands.
#[derive(Debug, Clone, Default)]
pub struct GitHubActionsHost {
    output_file: Option<PathBuf>,
    path_file: Option<PathBuf>,
}

impl GitHubActionsHost {
    /// Create a host from `GITHUB_OUTPUT` and `GITHUB_PATH`.
    ///
    /// Missing variables fall back to stdout workflow commands.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            output_file: std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
            path_file: std::env::var_os("GITHUB_PATH").map(PathBuf::from),
        }
    }

    /// Create a host writing to explicit command files.
    #[must_use]
    pub fn with_files(output_file: Option<PathBuf>, path_file: Option<PathBuf>) -> Self {
        Self {
            output_file,
            path_file,
        }
    }
}

impl Host for GitHubActionsHost {
    fn get_input(&self, name: &str, required: bool) -> Result<String> {
        let key = input_env_key(name);
        let value = std::env::var(&key).unwrap_or_default().trim().to_string();
        if required && value.is_empty() {
            return Err(Error::MissingInput(name.to_string()));
        }
        debug!(%name, %key, "Read host input");
        Ok(value)
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        match &self.output_file {
            Some(file) => {
                let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
                if name.contains(&delimiter) || value.contains(&delimiter) {
                    return Err(Error::configuration(format!(
                        "Output '{name}' contains the file command delimiter"
                    )));
                }
                append_line(file, &format!("{name}<<{delimiter}\n{value}\n{delimiter}"))
            }
            None => {
                issue_command("set-output", Some(("name", name)), value);
                Ok(())
            }
        }
    }

    fn add_path(&self, dir: &Path) -> Result<()> {
        match &self.path_file {
            Some(file) => append_line(file, &dir.to_string_lossy()),
            None => {
                // Runners no longer honour `::add-path::`; only local runs get here
                debug!(?dir, "GITHUB_PATH is not set, search path left unchanged");
                Ok(())
            }
        }
    }

    fn warning(&self, message: &str) {
        issue_command("warning", None, message);
    }

    fn set_failed(&self, message: &str) {
        issue_command("error", None, message);
    }
}

/// Environment variable carrying a named input (`version` -> `INPUT_VERSION`).
#[must_use]
pub fn input_env_key(name: &str) -> String {
    format!("INPUT_{}", name.replace(' ', "_").to_uppercase())
}

fn append_line(file: &Path, line: &str) -> Result<()> {
    let mut handle = OpenOptions::new().create(true).append(true).open(file)?;
    writeln!(handle, "{line}")?;
    Ok(())
}

/// Workflow commands are the runner's stdout protocol.
#[allow(clippy::print_stdout)]
fn issue_command(command: &str, property: Option<(&str, &str)>, message: &str) {
    match property {
        Some((key, value)) => println!(
            "::{command} {key}={}::{}",
            escape_property(value),
            escape_data(message)
        ),
        None => println!("::{command}::{}", escape_data(message)),
    }
}

fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(value: &str) -> String {
    escape_data(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_env_key() {
        assert_eq!(input_env_key("version"), "INPUT_VERSION");
        assert_eq!(input_env_key("xc version"), "INPUT_XC_VERSION");
    }

    #[test]
    fn test_get_input_trims_value() {
        temp_env::with_var("INPUT_VERSION", Some("  v0.4.0 \n"), || {
            let host = GitHubActionsHost::default();
            assert_eq!(host.get_input("version", true).unwrap(), "v0.4.0");
        });
    }

    #[test]
    fn test_get_input_required_missing() {
        temp_env::with_var_unset("INPUT_VERSION", || {
            let host = GitHubActionsHost::default();
            let err = host.get_input("version", true).unwrap_err();
            assert!(matches!(err, Error::MissingInput(ref name) if name == "version"));
        });
    }

    #[test]
    fn test_get_input_optional_missing() {
        temp_env::with_var_unset("INPUT_VERSION", || {
            let host = GitHubActionsHost::default();
            assert_eq!(host.get_input("version", false).unwrap(), "");
        });
    }

    #[test]
    fn test_set_output_writes_heredoc() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("output");
        let host = GitHubActionsHost::with_files(Some(output.clone()), None);

        host.set_output("xc-path", "/opt/hostedtoolcache/xc/v0.4.0/x64/xc")
            .unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("xc-path<<ghadelimiter_"));
        assert_eq!(lines[1], "/opt/hostedtoolcache/xc/v0.4.0/x64/xc");
        assert_eq!(lines[0].trim_start_matches("xc-path<<"), lines[2]);
    }

    #[test]
    fn test_add_path_appends() {
        let temp = TempDir::new().unwrap();
        let path_file = temp.path().join("path");
        let host = GitHubActionsHost::with_files(None, Some(path_file.clone()));

        host.add_path(Path::new("/first")).unwrap();
        host.add_path(Path::new("/second")).unwrap();

        let content = std::fs::read_to_string(&path_file).unwrap();
        assert_eq!(content, "/first\n/second\n");
    }

    #[test]
    fn test_add_path_without_path_file_is_noop() {
        let temp = TempDir::new().unwrap();
        let host = GitHubActionsHost::with_files(None, None);

        host.add_path(temp.path()).unwrap();

        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("50% done\nnext"), "50%25 done%0Anext");
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }
}
