#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # compath
//!
//! Resolve relative COM paths to absolute directories.
//!
//! A COM path such as `para/gfs/v16.3/gfs.20230101` names a versioned
//! operational data directory without saying which filesystem holds it.
//! This library searches `$COMPATH`, the per-environment COM paths list and
//! finally the known mounts, and reports the best-matching directory.
//!
//! ## Core Types
//!
//! - [`Resolver`] and [`ResolutionRequest`]: the resolution entry point
//! - [`PathComponents`]: a parsed COM path
//! - [`ResolverConfig`] and [`ProcessEnvironment`]: deployment and process inputs
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use compath::{
//!     LogLevel, Logger, ProcessEnvironment, ResolutionRequest, Resolver, ResolverConfig,
//! };
//!
//! let config = ResolverConfig { system_marker: None, ..Default::default() };
//! let process = ProcessEnvironment::default().with_compath("/data/com/gfs/v16.3");
//! let resolver = Resolver::new(config, process, Logger::new(LogLevel::Quiet)).unwrap();
//!
//! let resolved = resolver
//!     .resolve(&ResolutionRequest::new("gfs/v16.3.2/gfs.20230101"))
//!     .unwrap();
//! assert_eq!(resolved.path(), "/data/com/gfs/v16.3/gfs.20230101");
//! ```

pub mod config;
pub mod environment;
pub mod error;
pub mod logging;
pub mod path;

// Re-export key types at crate root for convenience
pub use config::{ConfigLoader, ProcessEnvironment, ResolverConfig};
pub use environment::Environment;
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{
    Direction, PathComponents, Resolution, ResolutionRequest, ResolutionSource, Resolver,
};
