//! setup-xc: install the xc task runner in CI workflows.
//!
//! The binary reads the `version` input, resolves `latest` through the xc
//! release listing, installs the matching release into the runner tool cache,
//! adds it to `PATH` for later steps and publishes the `xc-path` output.

/// Command line definition.
pub mod cli;
/// Entry point logic shared by the binary and tests.
pub mod run;
/// Tracing and logging configuration.
pub mod tracing;

pub use run::{LATEST, PATH_OUTPUT, VERSION_INPUT, build_installer, run};
