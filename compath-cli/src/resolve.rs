//! Resolution of the command-line request.

use crate::cli::Cli;
use crate::error::CliError;
use compath::config::ConfigLoader;
use compath::{Logger, ProcessEnvironment, Resolver};
use std::io::{self, Write};

/// Resolve the request described by `cli` and print the path on stdout.
pub fn execute(cli: &Cli, logger: Logger) -> Result<(), CliError> {
    let path = resolve(cli, ProcessEnvironment::from_process(), logger)?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{path}")?;
    stdout.flush()?;
    Ok(())
}

/// Resolve the request described by `cli` against a process snapshot.
pub fn resolve(cli: &Cli, process: ProcessEnvironment, logger: Logger) -> Result<String, CliError> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    let resolver = Resolver::new(config, process, logger)?;
    let resolution = resolver.resolve(&cli.request())?;
    Ok(resolution.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use compath::LogLevel;
    use std::fs;
    use tempfile::TempDir;

    fn quiet() -> Logger {
        Logger::new(LogLevel::Quiet)
    }

    fn config_file(dir: &TempDir) -> String {
        let path = dir.path().join("compath.yaml");
        fs::write(
            &path,
            format!(
                "compaths_list: {}/<envir>.list\nsystem_marker: null\n",
                dir.path().display()
            ),
        )
        .unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_resolve_from_list() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("para.list"), "/mnt/a/gfs/v16.3\n").unwrap();
        let config = config_file(&dir);

        let cli = Cli::try_parse_from([
            "compath",
            "--config",
            &config,
            "-e",
            "para",
            "gfs/v16.3/gfs",
        ])
        .unwrap();
        let path = resolve(&cli, ProcessEnvironment::default(), quiet()).unwrap();
        assert_eq!(path, "/mnt/a/gfs/v16.3/gfs");
    }

    #[test]
    fn test_resolve_outgoing() {
        let dir = TempDir::new().unwrap();
        let config = config_file(&dir);

        let cli =
            Cli::try_parse_from(["compath", "--config", &config, "-o", "gfs/v16.3/gfs"]).unwrap();
        let process = ProcessEnvironment::default().with_comroot("/out");
        let path = resolve(&cli, process, quiet()).unwrap();
        assert_eq!(path, "/out/gfs/v16.3/gfs");
    }

    #[test]
    fn test_missing_config_file() {
        let cli = Cli::try_parse_from([
            "compath",
            "--config",
            "/nonexistent/compath.yaml",
            "gfs/v16.3",
        ])
        .unwrap();
        let err = resolve(&cli, ProcessEnvironment::default(), quiet()).unwrap_err();
        assert!(matches!(err, CliError::Library(compath::Error::Validation { .. })));
    }
}
