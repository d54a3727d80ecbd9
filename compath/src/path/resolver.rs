//! COM path resolution.
//!
//! This module provides the [`Resolver`], the entry point that turns a
//! [`ResolutionRequest`] into an absolute directory.

use std::fmt;
use std::path::PathBuf;

use crate::config::{
    ConfigValidator, ProcessEnvironment, ResolverConfig, COMROOT_VAR, ENVIR_PLACEHOLDER,
};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::path::candidates::{CandidateListBuilder, FsProbe, PathProbe};
use crate::path::matcher::find_best_match;
use crate::path::parts::{parse_request, PathComponents};

/// Whether a request reads existing data or names a directory to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// A COMIN directory, searched for across all sources.
    #[default]
    Incoming,
    /// A COMOUT directory, always placed under `$COMROOT`.
    Outgoing,
}

/// One resolution request.
///
/// # Examples
///
/// ```
/// use compath::{Direction, Environment, ResolutionRequest};
///
/// let request = ResolutionRequest::new("gfs/v16.3/gfs.20230101")
///     .with_environment(Environment::Para)
///     .outgoing();
/// assert_eq!(request.direction, Direction::Outgoing);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// The relative COM path.
    pub relative_path: String,
    /// Explicit environment; takes precedence over every other source.
    pub environment: Option<Environment>,
    /// Incoming or outgoing.
    pub direction: Direction,
}

impl ResolutionRequest {
    /// An incoming request for `relative_path` (surrounding whitespace is
    /// ignored).
    pub fn new(relative_path: impl Into<String>) -> Self {
        let relative_path: String = relative_path.into();
        Self {
            relative_path: relative_path.trim().to_string(),
            environment: None,
            direction: Direction::Incoming,
        }
    }

    /// Set an explicit environment.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Ask for a COMOUT directory.
    #[must_use]
    pub fn outgoing(mut self) -> Self {
        self.direction = Direction::Outgoing;
        self
    }
}

/// Where a resolved path came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSource {
    /// `$COMROOT` joined with the request (outgoing only).
    ComRoot,
    /// A `$COMPATH` entry.
    ComPathVariable,
    /// An entry of the COM paths list at this location.
    ListFile(PathBuf),
    /// The only mount on which the directory exists.
    FilesystemProbe,
}

impl fmt::Display for ResolutionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComRoot => {
                write!(f, "COMOUT path found using ${COMROOT_VAR} environment variable")
            }
            Self::ComPathVariable => write!(f, "COMIN path found in $COMPATH environment variable"),
            Self::ListFile(path) => write!(f, "COMIN path found in {}", path.display()),
            Self::FilesystemProbe => {
                write!(f, "COMIN path found searching through the system COM paths")
            }
        }
    }
}

/// A successfully resolved request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    path: String,
    source: ResolutionSource,
    environment: Environment,
}

impl Resolution {
    /// The absolute directory.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The source that produced it.
    #[must_use]
    pub fn source(&self) -> &ResolutionSource {
        &self.source
    }

    /// The environment the request was resolved under.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Consume the resolution, returning the path.
    #[must_use]
    pub fn into_path(self) -> String {
        self.path
    }
}

/// Resolves relative COM paths.
///
/// Incoming requests try, in order: `$COMPATH` (ignoring environment tags),
/// the COM paths list of the request's environment, and finally a probe of
/// every aliased mount, which only succeeds when exactly one mount holds
/// the directory.
///
/// # Examples
///
/// ```
/// use compath::config::{ProcessEnvironment, ResolverConfig};
/// use compath::{Logger, ResolutionRequest, Resolver};
///
/// let config = ResolverConfig { system_marker: None, ..Default::default() };
/// let process = ProcessEnvironment::default().with_comroot("/out/root");
/// let resolver = Resolver::new(config, process, Logger::default()).unwrap();
///
/// let request = ResolutionRequest::new("gfs/v16.2/gfs.20230101").outgoing();
/// let resolved = resolver.resolve(&request).unwrap();
/// assert_eq!(resolved.path(), "/out/root/gfs/v16.2/gfs.20230101");
/// ```
pub struct Resolver {
    config: ResolverConfig,
    process: ProcessEnvironment,
    logger: Logger,
    probe: Box<dyn PathProbe>,
}

impl fmt::Debug for Resolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("config", &self.config)
            .field("process", &self.process)
            .field("logger", &self.logger)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Create a resolver probing the real filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the configuration is invalid, or
    /// [`Error::SystemNotDetected`] if the configured system marker does not
    /// exist.
    pub fn new(
        config: ResolverConfig,
        process: ProcessEnvironment,
        logger: Logger,
    ) -> Result<Self> {
        ConfigValidator::validate(&config)?;
        if let Some(marker) = &config.system_marker {
            if !marker.exists() {
                return Err(Error::SystemNotDetected {
                    path: marker.clone(),
                });
            }
        }

        Ok(Self {
            config,
            process,
            logger,
            probe: Box::new(FsProbe),
        })
    }

    /// Replace the filesystem probe used as the last resort.
    #[must_use]
    pub fn with_probe(mut self, probe: Box<dyn PathProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Resolve one request.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedRequest`] if the relative path is not a COM path
    /// - [`Error::MissingRequiredEnvironment`] for an outgoing request
    ///   without `$COMROOT`
    /// - [`Error::NoMatchFound`] if no source yields a directory
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<Resolution> {
        let parts = parse_request(&request.relative_path)?;
        let environment = Environment::effective(
            request.environment,
            parts.environment(),
            self.process.envir.as_deref(),
            &self.logger,
        );
        log::debug!("resolving {} under {environment}", parts.source_path());

        let (found, source) = match request.direction {
            Direction::Outgoing => (self.outgoing(&parts)?, ResolutionSource::ComRoot),
            Direction::Incoming => {
                self.incoming(&parts, environment)
                    .ok_or_else(|| Error::NoMatchFound {
                        path: parts.source_path().to_string(),
                    })?
            }
        };

        self.logger.info(&source.to_string());
        Ok(Resolution {
            path: self.finish(&found, environment),
            source,
            environment,
        })
    }

    fn outgoing(&self, parts: &PathComponents) -> Result<String> {
        let root = self
            .process
            .comroot
            .as_deref()
            .ok_or_else(|| Error::MissingRequiredEnvironment {
                variable: COMROOT_VAR.to_string(),
            })?;
        Ok(format!(
            "{}/{}",
            root.trim_end_matches('/'),
            parts.source_path().trim_start_matches('/')
        ))
    }

    fn incoming(
        &self,
        parts: &PathComponents,
        environment: Environment,
    ) -> Option<(String, ResolutionSource)> {
        let builder = CandidateListBuilder::new(&self.config, &self.logger);

        if let Some(compath) = self.process.compath.as_deref() {
            let candidates = builder.from_variable(compath);
            if let Some(found) = find_best_match(parts, &candidates, false) {
                return Some((found, ResolutionSource::ComPathVariable));
            }
        }

        let list_path = self.config.list_path(environment);
        match builder.from_list_file(&list_path) {
            Ok(candidates) => {
                if let Some(found) = find_best_match(parts, &candidates, true) {
                    return Some((found, ResolutionSource::ListFile(list_path)));
                }
            }
            Err(e) => {
                log::debug!("{e}");
                self.logger.warn(&format!(
                    "Could not find the {environment} COM paths list at {}",
                    list_path.display()
                ));
            }
        }

        let mut existing =
            builder.probe_mounts(&parts.relative_path(), environment, self.probe.as_ref());
        match existing.len() {
            1 => existing.pop().map(|found| (found, ResolutionSource::FilesystemProbe)),
            0 => None,
            _ => {
                self.logger
                    .warn(&Error::AmbiguousProbeMatch { paths: existing }.to_string());
                None
            }
        }
    }

    /// Expand a leading alias, then fill in the environment.
    fn finish(&self, found: &str, environment: Environment) -> String {
        self.config
            .expand_alias(found)
            .replace(ENVIR_PLACEHOLDER, environment.as_str())
    }
}
