//! Build script for compath-cli.
//!
//! Generates the compath.1 man page in OUT_DIR using clap_mangen.
//!
//! The command structure is rebuilt here since build scripts cannot depend
//! on the crate being built.

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::fs;
use std::path::PathBuf;

/// Keep in sync with src/cli.rs.
fn build_cli() -> Command {
    Command::new("compath")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Resolve relative COM paths")
        .long_about(
            "Resolve a relative COM path such as gfs/v16.3/gfs.20230101 to an absolute \
             directory, searching $COMPATH, the COM paths list of the environment and \
             the system COM mounts",
        )
        .arg(
            Arg::new("out")
                .short('o')
                .long("out")
                .help("Resolve a COMOUT directory under $COMROOT")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("envir")
                .short('e')
                .long("envir")
                .help("Environment to resolve under, overriding the path and $envir")
                .value_name("ENVIR")
                .value_parser(["prod", "para", "test", "canned"]),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Report which source produced the path")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Suppress warnings")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Resolver configuration file (YAML)")
                .value_name("PATH")
                .env("COMPATH_CONFIG"),
        )
        .arg(
            Arg::new("relpath")
                .help("Relative COM path, e.g. gfs/v16.3/gfs.20230101")
                .value_name("RELPATH")
                .required(true),
        )
}

fn main() {
    let out_dir = PathBuf::from(std::env::var("OUT_DIR").unwrap());
    let man_dir = out_dir.join("man");
    fs::create_dir_all(&man_dir).unwrap();

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();
    man.render(&mut buffer).unwrap();

    fs::write(man_dir.join("compath.1"), buffer).unwrap();

    println!("cargo:rerun-if-changed=src/cli.rs");
}
