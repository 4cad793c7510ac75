//! Core types for setup-xc.
//!
//! This crate holds the pieces that are not specific to any one tool:
//!
//! - [`host`] - the CI host abstraction (inputs, outputs, search path, annotations)
//! - [`tools`] - platform detection, the keyed tool cache, downloads and archive extraction
//! - [`config`] - runtime settings gathered from the environment
//!
//! Tool-specific resolution lives in the `setup-xc-tools-*` crates, which drive
//! the traits defined here.

pub mod config;
mod error;
pub mod host;
pub mod tools;

pub use config::Settings;
pub use error::{Error, Result};
