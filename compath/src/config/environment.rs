//! Process variables consumed during resolution.
//!
//! The variables are read once into a [`ProcessEnvironment`] so the resolver
//! itself never touches global state.

use std::env;

/// Colon- or comma-separated list of COM directories to search first.
pub const COMPATH_VAR: &str = "COMPATH";

/// Root directory for outgoing (COMOUT) paths.
pub const COMROOT_VAR: &str = "COMROOT";

/// Default environment name.
pub const ENVIR_VAR: &str = "envir";

/// Snapshot of the variables the resolver reads.
///
/// # Examples
///
/// ```
/// use compath::config::ProcessEnvironment;
///
/// let process = ProcessEnvironment::default()
///     .with_comroot("/lfs/h1/ops/prod/com")
///     .with_envir("para");
/// assert_eq!(process.comroot.as_deref(), Some("/lfs/h1/ops/prod/com"));
/// assert!(process.compath.is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessEnvironment {
    /// `$COMPATH`; an empty value counts as unset.
    pub compath: Option<String>,
    /// `$COMROOT`.
    pub comroot: Option<String>,
    /// `$envir`.
    pub envir: Option<String>,
}

impl ProcessEnvironment {
    /// Read the variables from the current process.
    #[must_use]
    pub fn from_process() -> Self {
        Self {
            compath: env::var(COMPATH_VAR).ok().filter(|v| !v.is_empty()),
            comroot: env::var(COMROOT_VAR).ok(),
            envir: env::var(ENVIR_VAR).ok(),
        }
    }

    /// Set `$COMPATH`.
    #[must_use]
    pub fn with_compath(mut self, value: impl Into<String>) -> Self {
        self.compath = Some(value.into());
        self
    }

    /// Set `$COMROOT`.
    #[must_use]
    pub fn with_comroot(mut self, value: impl Into<String>) -> Self {
        self.comroot = Some(value.into());
        self
    }

    /// Set `$envir`.
    #[must_use]
    pub fn with_envir(mut self, value: impl Into<String>) -> Self {
        self.envir = Some(value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    /// Sets variables for one test and restores them afterwards.
    struct EnvGuard(Vec<(&'static str, Option<String>)>);

    impl EnvGuard {
        fn set(pairs: &[(&'static str, Option<&str>)]) -> Self {
            let saved = pairs
                .iter()
                .map(|(key, value)| {
                    let old = env::var(key).ok();
                    match value {
                        Some(v) => env::set_var(key, v),
                        None => env::remove_var(key),
                    }
                    (*key, old)
                })
                .collect();
            Self(saved)
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, old) in self.0.drain(..) {
                match old {
                    Some(v) => env::set_var(key, v),
                    None => env::remove_var(key),
                }
            }
        }
    }

    #[test]
    #[serial]
    fn test_from_process_reads_all_variables() {
        let _guard = EnvGuard::set(&[
            (COMPATH_VAR, Some("/comh1/gfs/v16.3")),
            (COMROOT_VAR, Some("/out/root")),
            (ENVIR_VAR, Some("test")),
        ]);
        let process = ProcessEnvironment::from_process();
        assert_eq!(process.compath.as_deref(), Some("/comh1/gfs/v16.3"));
        assert_eq!(process.comroot.as_deref(), Some("/out/root"));
        assert_eq!(process.envir.as_deref(), Some("test"));
    }

    #[test]
    #[serial]
    fn test_from_process_empty_compath_is_unset() {
        let _guard = EnvGuard::set(&[(COMPATH_VAR, Some("")), (COMROOT_VAR, None)]);
        let process = ProcessEnvironment::from_process();
        assert!(process.compath.is_none());
        assert!(process.comroot.is_none());
    }
}
