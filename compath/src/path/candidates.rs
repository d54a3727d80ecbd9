//! Candidate directory lists.
//!
//! Three sources feed the matcher, in decreasing precedence:
//!
//! 1. `$COMPATH`, a `:`/`,`-separated list of directories.
//! 2. The per-environment COM paths list, one directory per line.
//! 3. The mounts behind the alias table, probed on disk.
//!
//! The first two produce parsed candidate records; the probe produces the
//! existing physical paths directly.

use std::fs;
use std::path::Path;

use crate::config::{ResolverConfig, ENVIR_PLACEHOLDER};
use crate::environment::Environment;
use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::path::parts::{parse_candidate, PathComponents};

/// Environment tags recognized inside `$COMPATH` entries.
const COMPATH_TIERS: [Environment; 3] = [Environment::Prod, Environment::Para, Environment::Test];

/// Answers whether a path exists.
#[cfg_attr(test, mockall::automock)]
pub trait PathProbe {
    /// Whether `path` exists.
    fn exists(&self, path: &Path) -> bool;
}

/// [`PathProbe`] backed by the real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

impl PathProbe for FsProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Builds candidate lists for one resolution request.
#[derive(Debug, Clone, Copy)]
pub struct CandidateListBuilder<'a> {
    config: &'a ResolverConfig,
    logger: &'a Logger,
}

impl<'a> CandidateListBuilder<'a> {
    /// Create a builder over `config`, reporting through `logger`.
    #[must_use]
    pub fn new(config: &'a ResolverConfig, logger: &'a Logger) -> Self {
        Self { config, logger }
    }

    /// Candidates from a `$COMPATH` value.
    ///
    /// Entries written with an alias are expanded to their mount. The first
    /// `prod`, `para` or `test` directory anywhere in the variable is its
    /// tier: it fills the `<envir>` placeholder of every entry, and a tier
    /// directory directly after `com` is dropped from each entry. Without a
    /// tier the placeholders are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use compath::config::ResolverConfig;
    /// use compath::path::candidates::CandidateListBuilder;
    /// use compath::Logger;
    ///
    /// let config = ResolverConfig::default();
    /// let logger = Logger::default();
    /// let builder = CandidateListBuilder::new(&config, &logger);
    ///
    /// let list = builder.from_variable("/comh1/para/gfs/v16.3 : /data/nam/v4.2/");
    /// assert_eq!(list[0].source_path(), "/lfs/h1/ops/para/com/gfs/v16.3");
    /// assert_eq!(list[1].source_path(), "/data/nam/v4.2");
    /// ```
    #[must_use]
    pub fn from_variable(&self, value: &str) -> Vec<PathComponents> {
        let tier = variable_tier(value);
        value
            .split([':', ','])
            .map(|piece| piece.trim().trim_end_matches('/'))
            .filter(|piece| !piece.is_empty())
            .map(|piece| {
                let expanded = self.config.expand_alias(piece);
                match tier {
                    Some(tier) => self.parse_logged(&fill_tier(&expanded, tier)),
                    None => self.parse_logged(&expanded),
                }
            })
            .collect()
    }

    /// Candidates from a COM paths list file.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigurationUnavailable`] if the file cannot be
    /// read. Callers treat this as an empty source.
    pub fn from_list_file(&self, path: &Path) -> Result<Vec<PathComponents>> {
        let contents =
            fs::read_to_string(path).map_err(|source| Error::ConfigurationUnavailable {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| line.trim_end_matches('/'))
            .filter(|line| !line.is_empty())
            .map(|line| self.parse_logged(line))
            .collect())
    }

    /// Existing directories formed by appending `relative` to each mount.
    ///
    /// Mounts are tried in alias-table order, each distinct target once.
    pub fn probe_mounts(
        &self,
        relative: &str,
        envir: Environment,
        probe: &dyn PathProbe,
    ) -> Vec<String> {
        self.config
            .mount_templates()
            .into_iter()
            .map(|template| {
                let mount = template.replace(ENVIR_PLACEHOLDER, envir.as_str());
                format!("{mount}/{relative}")
            })
            .filter(|full| {
                let found = probe.exists(Path::new(full));
                log::debug!("probe {full}: {}", if found { "found" } else { "absent" });
                found
            })
            .collect()
    }

    fn parse_logged(&self, entry: &str) -> PathComponents {
        let parts = parse_candidate(entry);
        if parts.is_path_only() {
            self.logger.warn(&format!(
                "A member of the COM path list ({entry}) is not formatted correctly"
            ));
        }
        parts
    }
}

fn as_tier(segment: &str) -> Option<Environment> {
    COMPATH_TIERS.into_iter().find(|tier| tier.as_str() == segment)
}

/// The first `prod`/`para`/`test` directory of a `$COMPATH` value.
///
/// Only directories with a `/` on both sides count.
fn variable_tier(value: &str) -> Option<Environment> {
    let segments: Vec<&str> = value.split('/').collect();
    segments
        .iter()
        .take(segments.len().saturating_sub(1))
        .skip(1)
        .find_map(|segment| as_tier(segment))
}

/// Drop tier directories that follow `com`, then fill in `<envir>`.
fn fill_tier(entry: &str, tier: Environment) -> String {
    let segments: Vec<&str> = entry.split('/').collect();
    let kept: Vec<&str> = segments
        .iter()
        .enumerate()
        .filter(|&(index, segment)| {
            let after_com = index > 0 && segments[index - 1] == "com";
            let interior = index + 1 < segments.len();
            !(after_com && interior && as_tier(segment).is_some())
        })
        .map(|(_, segment)| *segment)
        .collect();
    kept.join("/").replace(ENVIR_PLACEHOLDER, tier.as_str())
}
