//! Configuration validation.

use std::collections::HashSet;

use crate::config::schema::{ResolverConfig, ENVIR_PLACEHOLDER};
use crate::error::{Error, Result};

/// Validates a [`ResolverConfig`].
///
/// # Examples
///
/// ```
/// use compath::config::{ConfigValidator, ResolverConfig};
///
/// ConfigValidator::validate(&ResolverConfig::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn validate(config: &ResolverConfig) -> Result<()> {
        let mut seen = HashSet::new();
        for (index, alias) in config.aliases.iter().enumerate() {
            let field = format!("aliases[{index}]");
            Self::validate_absolute(&format!("{field}.alias"), &alias.alias)?;
            Self::validate_absolute(&format!("{field}.target"), &alias.target)?;

            if alias.alias.ends_with('/') {
                return Err(Error::Validation {
                    field: format!("{field}.alias"),
                    message: "Alias must not end with '/'".into(),
                });
            }
            if alias.alias.contains(ENVIR_PLACEHOLDER) {
                return Err(Error::Validation {
                    field: format!("{field}.alias"),
                    message: format!("Alias cannot contain {ENVIR_PLACEHOLDER}"),
                });
            }
            if !seen.insert(alias.alias.as_str()) {
                return Err(Error::Validation {
                    field: format!("{field}.alias"),
                    message: format!("Duplicate alias '{}'", alias.alias),
                });
            }
        }

        if config.compaths_list.trim().is_empty() {
            return Err(Error::Validation {
                field: "compaths_list".into(),
                message: "Cannot be empty".into(),
            });
        }

        Ok(())
    }

    fn validate_absolute(field: &str, value: &str) -> Result<()> {
        if value.starts_with('/') && value.len() > 1 {
            Ok(())
        } else {
            Err(Error::Validation {
                field: field.into(),
                message: format!("'{value}' must be an absolute path"),
            })
        }
    }
}
