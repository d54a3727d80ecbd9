//! Relative COM path parsing, matching and resolution.
//!
//! A relative COM path names a versioned data directory by convention:
//!
//! ```text
//! [envir/][com/]NET/vX.Y[/RUN[.PDY]][/anything/else]
//! ```
//!
//! Resolution happens in three stages:
//!
//! - [`parts`] splits a request or a candidate directory into a
//!   [`PathComponents`] record.
//! - [`candidates`] builds candidate lists from `$COMPATH`, the COM paths
//!   list of the request's environment, and the mounts behind the alias
//!   table.
//! - [`matcher`] relaxes the comparison one component at a time until a
//!   candidate fits, then extends it with the rest of the request.
//!
//! [`Resolver`] ties the stages together.
//!
//! # Examples
//!
//! ```
//! use compath::path::matcher::find_best_match;
//! use compath::path::parts::{parse_candidate, parse_request};
//!
//! let request = parse_request("gfs/v16.3/gfs.20230101/atmos").unwrap();
//! let candidates = vec![
//!     parse_candidate("/mnt/a/nam/v4.2"),
//!     parse_candidate("/mnt/b/gfs/v16.3"),
//! ];
//!
//! let found = find_best_match(&request, &candidates, true);
//! assert_eq!(found.as_deref(), Some("/mnt/b/gfs/v16.3/gfs.20230101/atmos"));
//! ```

pub mod candidates;
pub mod matcher;
pub mod parts;
pub mod resolver;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use candidates::{CandidateListBuilder, FsProbe, PathProbe};
pub use parts::{Field, PathComponents};
pub use resolver::{Direction, Resolution, ResolutionRequest, ResolutionSource, Resolver};
