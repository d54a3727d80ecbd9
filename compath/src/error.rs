//! Error types for the compath library.
//!
//! This module provides the error hierarchy for COM path resolution, using
//! `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a compath error.
///
/// # Examples
///
/// ```
/// use compath::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/lfs/h1/ops/prod/com/gfs/v16.3".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the compath library.
#[derive(Debug, Error)]
pub enum Error {
    /// The relative path does not follow the COM path convention.
    #[error("The relative COM path provided ({path}) is not formatted correctly.")]
    MalformedRequest {
        /// The offending relative path.
        path: String,
    },

    /// A process variable required for the request is not set.
    #[error("${variable} is not defined. Please define it or load the prod_envir module.")]
    MissingRequiredEnvironment {
        /// Name of the missing variable.
        variable: String,
    },

    /// The per-environment COM paths list could not be read.
    #[error("could not read the COM paths list at {}: {source}", path.display())]
    ConfigurationUnavailable {
        /// Location of the list that was tried.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// More than one physical directory matched during the filesystem probe.
    #[error("ambiguous COM path: {} directories match ({})", paths.len(), paths.join(", "))]
    AmbiguousProbeMatch {
        /// Every existing path that was found.
        paths: Vec<String>,
    },

    /// No source produced an absolute path.
    #[error("Could not find {path}")]
    NoMatchFound {
        /// The relative path that could not be resolved.
        path: String,
    },

    /// A string is not one of the known environment tags.
    #[error("invalid environment '{value}' (expected prod, para, test or canned)")]
    InvalidEnvironment {
        /// The rejected value.
        value: String,
    },

    /// The directory that identifies the production system is missing.
    #[error("Unable to find {}. Are you on WCOSS?", path.display())]
    SystemNotDetected {
        /// The marker path that was checked.
        path: PathBuf,
    },

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

impl Error {
    /// Check if resolution may continue with the next source after this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use compath::Error;
    ///
    /// let err = Error::AmbiguousProbeMatch { paths: vec!["/a".into(), "/b".into()] };
    /// assert!(err.is_recoverable());
    ///
    /// let err = Error::NoMatchFound { path: "gfs/v16.3".into() };
    /// assert!(!err.is_recoverable());
    /// ```
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConfigurationUnavailable { .. } | Self::AmbiguousProbeMatch { .. }
        )
    }
}
