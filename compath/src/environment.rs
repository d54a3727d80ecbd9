//! Deployment environments.
//!
//! Data and configuration are partitioned by environment. A request may
//! name one explicitly, embed one in its relative path, or inherit one from
//! the `envir` process variable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::logging::Logger;

/// One of the fixed deployment tiers.
///
/// # Examples
///
/// ```
/// use compath::Environment;
///
/// let envir: Environment = "para".parse().unwrap();
/// assert_eq!(envir, Environment::Para);
/// assert_eq!(envir.to_string(), "para");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Production.
    Prod,
    /// Parallel production.
    Para,
    /// Test.
    Test,
    /// Canned (replayed) data.
    Canned,
}

impl Environment {
    /// Every environment, in declaration order.
    pub const ALL: [Self; 4] = [Self::Prod, Self::Para, Self::Test, Self::Canned];

    /// The tag as it appears in paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prod => "prod",
            Self::Para => "para",
            Self::Test => "test",
            Self::Canned => "canned",
        }
    }

    /// Parse a path segment, returning `None` unless it is exactly a tag.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.as_str() == segment)
    }

    /// Pick the environment a request runs under.
    ///
    /// An explicit override always wins, then a tag embedded in the relative
    /// path, then the `envir` process variable, then production. An
    /// unrecognized `envir` value is reported and ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use compath::{Environment, Logger, LogLevel};
    ///
    /// let logger = Logger::new(LogLevel::Quiet);
    /// let envir = Environment::effective(None, Some(Environment::Test), Some("para"), &logger);
    /// assert_eq!(envir, Environment::Test);
    ///
    /// let envir = Environment::effective(None, None, None, &logger);
    /// assert_eq!(envir, Environment::Prod);
    /// ```
    #[must_use]
    pub fn effective(
        explicit: Option<Self>,
        from_path: Option<Self>,
        process_value: Option<&str>,
        logger: &Logger,
    ) -> Self {
        if let Some(envir) = explicit.or(from_path) {
            return envir;
        }

        match process_value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => value.parse().unwrap_or_else(|e: Error| {
                logger.warn(&format!("ignoring $envir: {e}"));
                Self::Prod
            }),
            None => Self::Prod,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_segment(s).ok_or_else(|| Error::InvalidEnvironment {
            value: s.to_string(),
        })
    }
}
