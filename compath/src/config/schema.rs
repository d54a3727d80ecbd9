//! Configuration schema definitions.
//!
//! Everything that differs between deployments lives here: the alias table
//! mapping short COM prefixes to real mounts, the location of the
//! per-environment COM paths list, and the marker that identifies the
//! production system.

use std::borrow::Cow;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::environment::Environment;

/// Placeholder replaced by the environment name in templates.
pub const ENVIR_PLACEHOLDER: &str = "<envir>";

/// A short path prefix standing in for a real COM mount.
///
/// # Examples
///
/// ```
/// use compath::config::ComAlias;
/// use compath::Environment;
///
/// let alias = ComAlias::new("/comh1", "/lfs/h1/ops/<envir>/com");
/// assert_eq!(alias.target_for(Environment::Para), "/lfs/h1/ops/para/com");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ComAlias {
    /// The short prefix, e.g. `/comh1`.
    pub alias: String,
    /// The mount template it stands for; may contain `<envir>`.
    pub target: String,
}

impl ComAlias {
    /// Create an alias entry.
    pub fn new(alias: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            alias: alias.into(),
            target: target.into(),
        }
    }

    /// The target with the environment filled in.
    #[must_use]
    pub fn target_for(&self, envir: Environment) -> String {
        self.target.replace(ENVIR_PLACEHOLDER, envir.as_str())
    }

    /// The remainder of `path` after this alias, if `path` starts with it.
    fn strip_from<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.alias.as_str())?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }
}

/// Complete resolver configuration.
///
/// Every field has a default, so an empty YAML document is valid.
///
/// # Examples
///
/// ```
/// use compath::config::ResolverConfig;
///
/// let config: ResolverConfig = serde_yaml::from_str("system_marker: null").unwrap();
/// assert_eq!(config.aliases.len(), 2);
/// assert!(config.system_marker.is_none());
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields, default)]
pub struct ResolverConfig {
    /// Alias table, consulted in order.
    pub aliases: Vec<ComAlias>,

    /// Location template of the COM paths list; may contain `<envir>` and a
    /// leading `~`.
    pub compaths_list: String,

    /// Path that must exist for resolution to make sense on this system.
    pub system_marker: Option<PathBuf>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            aliases: vec![
                ComAlias::new("/comh1", "/lfs/h1/ops/<envir>/com"),
                ComAlias::new("/comh2", "/lfs/h2/ops/<envir>/com"),
            ],
            compaths_list: "/lfs/h1/ops/<envir>/config/compaths.list".to_string(),
            system_marker: Some(PathBuf::from("/lfs/h1")),
        }
    }
}

impl ResolverConfig {
    /// Location of the COM paths list for `envir`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compath::config::ResolverConfig;
    /// use compath::Environment;
    /// use std::path::Path;
    ///
    /// let config = ResolverConfig::default();
    /// assert_eq!(
    ///     config.list_path(Environment::Test),
    ///     Path::new("/lfs/h1/ops/test/config/compaths.list")
    /// );
    /// ```
    #[must_use]
    pub fn list_path(&self, envir: Environment) -> PathBuf {
        let filled = self.compaths_list.replace(ENVIR_PLACEHOLDER, envir.as_str());
        match (filled.strip_prefix("~/"), home::home_dir()) {
            (Some(rest), Some(home)) => home.join(rest),
            _ => PathBuf::from(filled),
        }
    }

    /// Replace a leading alias with its mount template.
    ///
    /// Only the first matching alias is applied, and only when it is
    /// followed by `/` or ends the path. Paths already in mount form come
    /// back unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use compath::config::ResolverConfig;
    ///
    /// let config = ResolverConfig::default();
    /// assert_eq!(config.expand_alias("/comh2/gfs/v16.3"), "/lfs/h2/ops/<envir>/com/gfs/v16.3");
    /// assert_eq!(config.expand_alias("/comh1x/gfs"), "/comh1x/gfs");
    /// ```
    #[must_use]
    pub fn expand_alias<'a>(&self, path: &'a str) -> Cow<'a, str> {
        self.aliases
            .iter()
            .find_map(|alias| {
                alias
                    .strip_from(path)
                    .map(|rest| Cow::Owned(format!("{}{rest}", alias.target)))
            })
            .unwrap_or(Cow::Borrowed(path))
    }

    /// Distinct alias targets in table order.
    #[must_use]
    pub fn mount_templates(&self) -> Vec<&str> {
        let mut templates: Vec<&str> = Vec::with_capacity(self.aliases.len());
        for alias in &self.aliases {
            if !templates.contains(&alias.target.as_str()) {
                templates.push(&alias.target);
            }
        }
        templates
    }
}
