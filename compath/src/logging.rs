//! Logging infrastructure for the compath library.
//!
//! Resolution reports where a path came from and warns about unusable
//! sources on stderr, leaving stdout for the resolved path alone.

use std::env;
use std::fmt;

/// Name of the variable consulted when no verbosity flag is given.
pub const LOG_MODE_VAR: &str = "COMPATH_LOG_MODE";

/// Logging level for controlling output verbosity.
///
/// # Examples
///
/// ```
/// use compath::LogLevel;
///
/// assert!(LogLevel::Quiet < LogLevel::Normal);
/// assert!(LogLevel::Normal < LogLevel::Verbose);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Print nothing but the result.
    Quiet,
    /// Errors and warnings.
    Normal,
    /// Errors, warnings, and the source each path was found in.
    Verbose,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quiet => write!(f, "quiet"),
            Self::Normal => write!(f, "normal"),
            Self::Verbose => write!(f, "verbose"),
        }
    }
}

impl LogLevel {
    /// Parses a log level from a string (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `quiet`, `normal` or `verbose`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compath::LogLevel;
    ///
    /// assert_eq!(LogLevel::parse("Verbose").unwrap(), LogLevel::Verbose);
    /// assert!(LogLevel::parse("loud").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "quiet" => Ok(Self::Quiet),
            "normal" => Ok(Self::Normal),
            "verbose" => Ok(Self::Verbose),
            _ => Err(format!("invalid log level: {s}")),
        }
    }
}

/// A stderr logger filtered by [`LogLevel`].
///
/// # Examples
///
/// ```
/// use compath::{Logger, LogLevel};
///
/// let logger = Logger::new(LogLevel::Normal);
/// logger.warn("printed");
/// logger.info("suppressed until verbose");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Creates a logger with the given level.
    #[must_use]
    pub const fn new(level: LogLevel) -> Self {
        Self { level }
    }

    /// Returns the current log level.
    #[must_use]
    pub const fn level(&self) -> LogLevel {
        self.level
    }

    /// Whether info-level messages are printed.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.level >= LogLevel::Verbose
    }

    /// Logs an error message (Normal and above).
    pub fn error(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("ERROR: {message}");
        }
    }

    /// Logs a warning message (Normal and above).
    pub fn warn(&self, message: &str) {
        if self.level >= LogLevel::Normal {
            eprintln!("WARNING: {message}");
        }
    }

    /// Logs an informational message (Verbose only).
    ///
    /// Info lines are printed bare since they are meant for people reading
    /// job output.
    pub fn info(&self, message: &str) {
        if self.is_verbose() {
            eprintln!("{message}");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::Normal)
    }
}

/// Builds a logger from CLI flags and the environment.
///
/// Precedence:
/// 1. `verbose` / `quiet` flags (`verbose` wins if both are set)
/// 2. `COMPATH_LOG_MODE`
/// 3. Normal
///
/// # Examples
///
/// ```
/// use compath::{init_logger, LogLevel};
///
/// assert_eq!(init_logger(true, false).level(), LogLevel::Verbose);
/// assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
/// ```
#[must_use]
pub fn init_logger(verbose: bool, quiet: bool) -> Logger {
    if verbose {
        return Logger::new(LogLevel::Verbose);
    }
    if quiet {
        return Logger::new(LogLevel::Quiet);
    }

    env::var(LOG_MODE_VAR)
        .ok()
        .and_then(|value| LogLevel::parse(&value).ok())
        .map_or_else(Logger::default, Logger::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct LogModeGuard(Option<String>);

    impl LogModeGuard {
        fn set(value: Option<&str>) -> Self {
            let saved = env::var(LOG_MODE_VAR).ok();
            match value {
                Some(v) => env::set_var(LOG_MODE_VAR, v),
                None => env::remove_var(LOG_MODE_VAR),
            }
            Self(saved)
        }
    }

    impl Drop for LogModeGuard {
        fn drop(&mut self) {
            match self.0.take() {
                Some(v) => env::set_var(LOG_MODE_VAR, v),
                None => env::remove_var(LOG_MODE_VAR),
            }
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Quiet.to_string(), "quiet");
        assert_eq!(LogLevel::Normal.to_string(), "normal");
        assert_eq!(LogLevel::Verbose.to_string(), "verbose");
    }

    #[test]
    fn test_log_level_parse() {
        assert_eq!(LogLevel::parse("QUIET").unwrap(), LogLevel::Quiet);
        assert_eq!(LogLevel::parse("normal").unwrap(), LogLevel::Normal);
        assert!(LogLevel::parse("").is_err());
    }

    #[test]
    fn test_logger_default_is_normal() {
        let logger = Logger::default();
        assert_eq!(logger.level(), LogLevel::Normal);
        assert!(!logger.is_verbose());
    }

    #[test]
    fn test_init_logger_verbose_takes_precedence() {
        assert_eq!(init_logger(true, true).level(), LogLevel::Verbose);
    }

    #[test]
    #[serial]
    fn test_init_logger_defaults() {
        let _guard = LogModeGuard::set(None);
        assert_eq!(init_logger(false, false).level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_from_env() {
        let _guard = LogModeGuard::set(Some("verbose"));
        assert_eq!(init_logger(false, false).level(), LogLevel::Verbose);
    }

    #[test]
    #[serial]
    fn test_init_logger_env_invalid_fallback() {
        let _guard = LogModeGuard::set(Some("chatty"));
        assert_eq!(init_logger(false, false).level(), LogLevel::Normal);
    }

    #[test]
    #[serial]
    fn test_init_logger_cli_overrides_env() {
        let _guard = LogModeGuard::set(Some("verbose"));
        assert_eq!(init_logger(false, true).level(), LogLevel::Quiet);
    }
}
