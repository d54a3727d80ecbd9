//! CLI structure and argument definitions.

use clap::Parser;
use compath::{Environment, ResolutionRequest};
use std::path::PathBuf;

/// Resolve a relative COM path to an absolute directory.
#[derive(Parser, Debug)]
#[command(name = "compath")]
#[command(version, about = "Resolve relative COM paths", long_about = None)]
pub struct Cli {
    /// Resolve a COMOUT directory under $COMROOT
    #[arg(short, long)]
    pub out: bool,

    /// Environment to resolve under, overriding the path and $envir
    #[arg(short, long, value_enum, value_name = "ENVIR")]
    pub envir: Option<Environment>,

    /// Report which source produced the path
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress warnings
    #[arg(short, long)]
    pub quiet: bool,

    /// Resolver configuration file (YAML)
    #[arg(long, value_name = "PATH", env = "COMPATH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Relative COM path, e.g. gfs/v16.3/gfs.20230101
    #[arg(value_name = "RELPATH")]
    pub relpath: String,
}

impl Cli {
    /// The resolution request described by the arguments.
    pub fn request(&self) -> ResolutionRequest {
        let mut request = ResolutionRequest::new(self.relpath.as_str());
        if let Some(envir) = self.envir {
            request = request.with_environment(envir);
        }
        if self.out {
            request = request.outgoing();
        }
        request
    }
}
