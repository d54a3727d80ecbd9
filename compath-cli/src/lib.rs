//! Library exports for compath-cli.
//!
//! This module exports the CLI structure for use by the build script
//! and the integration tests.

pub mod cli;
pub mod error;
pub mod resolve;

// Re-export CLI for build script
pub use cli::Cli;
