//! Main entry point for the compath CLI.
//!
//! Prints the absolute directory for one relative COM path:
//! - incoming (default): searched in `$COMPATH`, the COM paths list and the
//!   system mounts
//! - outgoing (`--out`): placed under `$COMROOT`

mod cli;
mod error;
mod resolve;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let logger = compath::init_logger(cli.verbose, cli.quiet);

    match resolve::execute(&cli, logger) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            logger.error(&e.to_string());
            std::process::exit(e.exit_code());
        }
    }
}
