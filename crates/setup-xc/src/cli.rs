use crate::tracing::{LogLevel, TracingFormat};
use clap::Parser;
use std::path::PathBuf;

/// Command line of the `setup-xc` binary.
#[derive(Parser, Debug)]
#[command(name = "setup-xc")]
#[command(about = "Download, cache and expose the xc task runner for CI workflows")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    /// Version to install ("latest" or a tag such as v0.4.0).
    ///
    /// Falls back to the `version` action input (`INPUT_VERSION`).
    #[arg(long = "xc-version", value_name = "VERSION")]
    pub xc_version: Option<String>,

    /// Tool cache root, overriding `RUNNER_TOOL_CACHE`.
    #[arg(long, env = "SETUP_XC_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Logging level
    #[arg(short = 'l', long, default_value = "info", value_enum)]
    pub level: LogLevel,

    /// Log output format
    #[arg(long, default_value = "compact", value_enum)]
    pub format: TracingFormat,

    /// Output logs in JSON format (same as --format json)
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Effective log format.
    #[must_use]
    pub fn tracing_format(&self) -> TracingFormat {
        if self.json {
            TracingFormat::Json
        } else {
            self.format
        }
    }
}

/// Parse the process arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["setup-xc"]).unwrap();

        assert!(cli.xc_version.is_none());
        assert!(matches!(cli.level, LogLevel::Info));
        assert_eq!(cli.tracing_format(), TracingFormat::Compact);
    }

    #[test]
    fn test_cli_version_override() {
        let cli = Cli::try_parse_from(["setup-xc", "--xc-version", "v0.4.0"]).unwrap();
        assert_eq!(cli.xc_version.as_deref(), Some("v0.4.0"));
    }

    #[test]
    fn test_cli_log_level_parsing() {
        let cli = Cli::try_parse_from(["setup-xc", "--level", "debug"]).unwrap();
        assert!(matches!(cli.level, LogLevel::Debug));

        let cli = Cli::try_parse_from(["setup-xc", "-l", "warn"]).unwrap();
        assert!(matches!(cli.level, LogLevel::Warn));
    }

    #[test]
    fn test_cli_json_flag_wins() {
        let cli = Cli::try_parse_from(["setup-xc", "--format", "pretty", "--json"]).unwrap();
        assert_eq!(cli.tracing_format(), TracingFormat::Json);
    }

    #[test]
    fn test_cli_cache_dir() {
        let cli = Cli::try_parse_from(["setup-xc", "--cache-dir", "/tmp/tools"]).unwrap();
        assert_eq!(cli.cache_dir, Some(PathBuf::from("/tmp/tools")));
    }

    #[test]
    fn test_cli_invalid_level() {
        assert!(Cli::try_parse_from(["setup-xc", "--level", "loud"]).is_err());
    }
}
