//! Common test utilities for CLI integration tests.
//!
//! Every command runs with the COM variables cleared and `--config`
//! pointing at a configuration whose mounts and COM paths lists live in a
//! temporary directory.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Process variables the resolver reads.
const COM_VARIABLES: [&str; 5] = [
    "COMPATH",
    "COMROOT",
    "envir",
    "COMPATH_CONFIG",
    "COMPATH_LOG_MODE",
];

/// Test environment with an isolated COM layout.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the generated configuration file
    pub config_path: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment.
    ///
    /// The configuration maps `/coma` and `/comb` to `h1/<envir>/com` and
    /// `h2/<envir>/com` under the temporary directory, and reads COM paths
    /// lists from `lists/<envir>.list`.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let config_path = temp_path.join("compath.yaml");

        let root = temp_path.display();
        fs::write(
            &config_path,
            format!(
                "aliases:\n\
                 \x20 - alias: /coma\n    target: {root}/h1/<envir>/com\n\
                 \x20 - alias: /comb\n    target: {root}/h2/<envir>/com\n\
                 compaths_list: {root}/lists/<envir>.list\n\
                 system_marker: null\n"
            ),
        )
        .expect("Failed to write config");

        Self {
            temp_dir,
            temp_path,
            config_path,
        }
    }

    /// Command with only the compath binary and a clean environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("compath").expect("Failed to find compath binary");
        for variable in COM_VARIABLES {
            cmd.env_remove(variable);
        }
        cmd
    }

    /// Command with `--config` pre-configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--config").arg(&self.config_path);
        cmd
    }

    /// Get the temp path.
    pub fn path(&self) -> &Path {
        &self.temp_path
    }

    /// Root of the COM mount `h1` or `h2` for `envir`.
    pub fn mount(&self, name: &str, envir: &str) -> PathBuf {
        self.temp_path.join(name).join(envir).join("com")
    }

    /// Create `relative` under a mount and return its path.
    pub fn create_com_dir(&self, mount: &str, envir: &str, relative: &str) -> PathBuf {
        let path = self.mount(mount, envir).join(relative);
        fs::create_dir_all(&path).expect("Failed to create COM directory");
        path
    }

    /// Write the COM paths list for `envir`.
    pub fn write_list(&self, envir: &str, contents: &str) -> PathBuf {
        let dir = self.temp_path.join("lists");
        fs::create_dir_all(&dir).expect("Failed to create list directory");
        let path = dir.join(format!("{envir}.list"));
        fs::write(&path, contents).expect("Failed to write list");
        path
    }
}

/// Run a command and return its trimmed stdout, asserting success.
#[allow(dead_code)]
pub fn stdout_of(mut cmd: Command) -> String {
    let output = cmd.output().expect("Failed to run compath");
    assert!(
        output.status.success(),
        "compath failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout)
        .expect("Invalid UTF-8 in output")
        .trim()
        .to_string()
}
