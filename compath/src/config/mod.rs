//! Configuration for COM path resolution.
//!
//! Two kinds of input drive a resolution besides the request itself:
//!
//! - A [`ResolverConfig`], loaded from YAML or taken from the built-in
//!   defaults, describing the deployment: the alias table, where the
//!   per-environment COM paths list lives, and which directory marks the
//!   production system.
//! - A [`ProcessEnvironment`] snapshot of `$COMPATH`, `$COMROOT` and
//!   `$envir`.
//!
//! Both are handed to [`crate::Resolver::new`]; nothing is read from global
//! state during resolution.
//!
//! # Examples
//!
//! ```
//! use compath::config::{ComAlias, ConfigValidator, ResolverConfig};
//!
//! let config = ResolverConfig {
//!     aliases: vec![ComAlias::new("/comx", "/data/<envir>/com")],
//!     system_marker: None,
//!     ..Default::default()
//! };
//! ConfigValidator::validate(&config).unwrap();
//! ```

pub mod environment;
pub mod loader;
pub mod schema;
pub mod validator;

pub use environment::{ProcessEnvironment, COMPATH_VAR, COMROOT_VAR, ENVIR_VAR};
pub use loader::ConfigLoader;
pub use schema::{ComAlias, ResolverConfig, ENVIR_PLACEHOLDER};
pub use validator::ConfigValidator;
