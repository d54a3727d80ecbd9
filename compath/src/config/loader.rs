//! Configuration file loading.

use std::fs;
use std::path::Path;

use crate::config::schema::ResolverConfig;
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};

/// Loads a [`ResolverConfig`] from YAML.
///
/// # Examples
///
/// ```no_run
/// use compath::config::ConfigLoader;
/// use std::path::Path;
///
/// let config = ConfigLoader::load(Some(Path::new("/etc/compath.yaml"))).unwrap();
/// println!("{} aliases", config.aliases.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate the configuration at `path`, or fall back to the
    /// built-in defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid YAML, or
    /// fails validation.
    pub fn load(path: Option<&Path>) -> Result<ResolverConfig> {
        let config = match path {
            Some(path) => Self::load_file(path)?,
            None => ResolverConfig::default(),
        };
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Load and parse a YAML configuration file without validating it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<ResolverConfig> {
        let contents = fs::read_to_string(path).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Failed to read configuration file: {e}"),
        })?;

        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }
}
