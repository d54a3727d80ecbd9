//! Parsing of COM paths into their named parts.
//!
//! A COM path has the shape
//! `[<envir>/][com/]<NET>/<version>[/<RUN>[.<PDY>]]`, optionally followed by
//! an arbitrary tail. Two grammars share one assembly routine:
//!
//! - [`parse_request`] validates a caller-supplied relative path. Network and
//!   version are mandatory and anything after the run segment is kept as a
//!   tail.
//! - [`parse_candidate`] reads an absolute directory taken from `$COMPATH` or
//!   a COM paths list. Any filesystem prefix is allowed, every part after the
//!   network is optional, and a line that does not fit at all still yields a
//!   path-only record instead of an error.
//!
//! # Examples
//!
//! ```
//! use compath::path::parts::{parse_candidate, parse_request};
//! use compath::Environment;
//!
//! let request = parse_request("test/gfs/v16.3.7/gfs.2023010100/atmos").unwrap();
//! assert_eq!(request.environment(), Some(Environment::Test));
//! assert_eq!(request.version(), Some("v16.3"));
//! assert_eq!(request.date(), Some("2023010100"));
//! assert_eq!(request.tail(), Some("/atmos"));
//!
//! let candidate = parse_candidate("/lfs/h1/ops/prod/com/gfs/v16.3");
//! assert_eq!(candidate.environment(), Some(Environment::Prod));
//! assert_eq!(candidate.network(), Some("gfs"));
//! assert_eq!(candidate.run(), None);
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::environment::Environment;
use crate::error::{Error, Result};

/// Literal segment that may follow the environment tag.
const COM_SEGMENT: &str = "com";

/// Accepted length of the date qualifier of a run segment.
const DATE_DIGITS: std::ops::RangeInclusive<usize> = 8..=16;

/// The structured parts that participate in matching, least specific first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Model or network name (`$NET`).
    Network,
    /// Version directory (`v16.3`).
    Version,
    /// Run name (`$RUN`).
    Run,
    /// Run date (`$PDY`, optionally with cycle).
    Date,
}

impl Field {
    /// All fields in specificity order.
    pub const SPECIFICITY: [Self; 4] = [Self::Network, Self::Version, Self::Run, Self::Date];

    /// Separator written before this field when a path is rebuilt.
    #[must_use]
    pub const fn separator(self) -> char {
        match self {
            Self::Date => '.',
            Self::Network | Self::Version | Self::Run => '/',
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Network => "NET",
            Self::Version => "version",
            Self::Run => "RUN",
            Self::Date => "PDY",
        };
        f.write_str(name)
    }
}

/// A parsed COM path.
///
/// Records are immutable once built. `date` is only ever set together with
/// `run`, and `run` only together with `version`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathComponents {
    environment: Option<Environment>,
    network: Option<String>,
    version: Option<String>,
    run: Option<String>,
    date: Option<String>,
    tail: Option<String>,
    source_path: String,
}

impl PathComponents {
    /// A record that carries nothing but its source text.
    #[must_use]
    pub fn path_only(source_path: impl Into<String>) -> Self {
        Self {
            source_path: source_path.into(),
            ..Self::default()
        }
    }

    /// Environment tag embedded in the path.
    #[must_use]
    pub fn environment(&self) -> Option<Environment> {
        self.environment
    }

    /// Network name.
    #[must_use]
    pub fn network(&self) -> Option<&str> {
        self.network.as_deref()
    }

    /// Version directory.
    #[must_use]
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Run name.
    #[must_use]
    pub fn run(&self) -> Option<&str> {
        self.run.as_deref()
    }

    /// Run date.
    #[must_use]
    pub fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    /// Trailing suffix after the run segment, including its leading `/`.
    #[must_use]
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// The text these components were parsed from.
    ///
    /// For requests this is the path after version truncation.
    #[must_use]
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Value of one structured field.
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&str> {
        match field {
            Field::Network => self.network(),
            Field::Version => self.version(),
            Field::Run => self.run(),
            Field::Date => self.date(),
        }
    }

    /// Whether parsing failed and only the source text is known.
    #[must_use]
    pub fn is_path_only(&self) -> bool {
        self.network.is_none()
    }

    /// Number of structured fields populated.
    #[must_use]
    pub fn specificity(&self) -> usize {
        Field::SPECIFICITY
            .iter()
            .filter(|f| self.field(**f).is_some())
            .count()
    }

    /// Rebuild `NET/version[/RUN[.PDY]][tail]` without environment or `com`.
    ///
    /// # Examples
    ///
    /// ```
    /// use compath::path::parts::parse_request;
    ///
    /// let parts = parse_request("prod/com/gfs/v16.3/gdas.20230101/00").unwrap();
    /// assert_eq!(parts.relative_path(), "gfs/v16.3/gdas.20230101/00");
    /// ```
    #[must_use]
    pub fn relative_path(&self) -> String {
        let mut out = String::new();
        for field in Field::SPECIFICITY {
            if let Some(value) = self.field(field) {
                if !out.is_empty() {
                    out.push(field.separator());
                }
                out.push_str(value);
            }
        }
        if let Some(tail) = self.tail() {
            out.push_str(tail);
        }
        out
    }
}

/// Borrowed captures shared by both grammars before they become a record.
#[derive(Debug, Default, Clone, Copy)]
struct Captures<'a> {
    environment: Option<Environment>,
    network: &'a str,
    version: Option<&'a str>,
    run: Option<&'a str>,
    date: Option<&'a str>,
    tail: Option<&'a str>,
}

impl Captures<'_> {
    fn with_environment(mut self, environment: Option<Environment>) -> Self {
        self.environment = environment;
        self
    }

    fn into_components(self, source_path: &str) -> PathComponents {
        PathComponents {
            environment: self.environment,
            network: Some(self.network.to_string()),
            version: self.version.map(str::to_string),
            run: self.run.map(str::to_string),
            date: self.date.map(str::to_string),
            tail: self.tail.map(str::to_string),
            source_path: source_path.to_string(),
        }
    }
}

/// Parse a caller-supplied relative COM path.
///
/// Version numbers are truncated with [`truncate_versions`] first.
///
/// # Errors
///
/// Returns [`Error::MalformedRequest`] if the path lacks a network name and
/// a version directory, or does not otherwise follow the convention.
///
/// # Examples
///
/// ```
/// use compath::path::parts::parse_request;
///
/// let parts = parse_request("gfs/v16.3/gfs.t00z").unwrap();
/// assert_eq!(parts.run(), None);
/// assert_eq!(parts.tail(), Some("/gfs.t00z"));
///
/// assert!(parse_request("gfs/16.3").is_err());
/// ```
pub fn parse_request(path: &str) -> Result<PathComponents> {
    let normalized = truncate_versions(path);
    let body = normalized.strip_prefix('/').unwrap_or(&normalized);

    with_prefix_alternatives(body, request_core)
        .map(|captures| captures.into_components(&normalized))
        .ok_or_else(|| Error::MalformedRequest {
            path: path.to_string(),
        })
}

/// Parse an absolute directory drawn from a candidate source.
///
/// The leftmost position from which the remaining segments form a COM path
/// wins; everything before it is treated as a mount prefix. A path that
/// never fits yields [`PathComponents::path_only`].
#[must_use]
pub fn parse_candidate(path: &str) -> PathComponents {
    let segments: Vec<&str> = path.split('/').collect();

    (0..segments.len())
        .filter(|&start| !segments[start].is_empty())
        .find_map(|start| {
            let rest = segments[start..].join("/");
            with_prefix_alternatives(&rest, candidate_core)
                .map(|captures| captures.into_components(path))
        })
        .unwrap_or_else(|| PathComponents::path_only(path))
}

/// Truncate every `/v<major>.<minor>…` version segment to `v<major>.<minor>`.
///
/// Only the digits and dots directly after the minor number are dropped, so
/// `v1.2.3rc` becomes `v1.2rc`. A version in the first segment (with no
/// preceding `/`) is left alone.
///
/// # Examples
///
/// ```
/// use compath::path::parts::truncate_versions;
///
/// assert_eq!(truncate_versions("gfs/v1.2.3.4/gfs"), "gfs/v1.2/gfs");
/// assert_eq!(truncate_versions("gfs/v16.3"), "gfs/v16.3");
/// ```
#[must_use]
pub fn truncate_versions(path: &str) -> String {
    path.split('/')
        .enumerate()
        .map(|(index, segment)| {
            if index == 0 {
                Cow::Borrowed(segment)
            } else {
                truncate_version_segment(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn truncate_version_segment(segment: &str) -> Cow<'_, str> {
    let Some(head) = version_head_len(segment) else {
        return Cow::Borrowed(segment);
    };
    let rest = segment[head..].trim_start_matches(|c: char| c.is_ascii_digit() || c == '.');
    if rest.len() + head == segment.len() {
        Cow::Borrowed(segment)
    } else {
        Cow::Owned(format!("{}{rest}", &segment[..head]))
    }
}

/// Length of the `v<digits>.<digits>` head of a segment, if it has one.
fn version_head_len(segment: &str) -> Option<usize> {
    let rest = segment.strip_prefix('v')?;
    let major = rest.bytes().take_while(u8::is_ascii_digit).count();
    if major == 0 {
        return None;
    }
    let rest = rest[major..].strip_prefix('.')?;
    let minor = rest.bytes().take_while(u8::is_ascii_digit).count();
    (minor > 0).then_some(1 + major + 1 + minor)
}

fn is_version(segment: &str) -> bool {
    version_head_len(segment).is_some()
}

fn is_word(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

/// Split a run segment into its name and optional date.
fn parse_run(segment: &str) -> Option<(&str, Option<&str>)> {
    if is_word(segment) {
        return Some((segment, None));
    }
    let (run, date) = segment.split_once('.')?;
    let is_date = DATE_DIGITS.contains(&date.len()) && date.bytes().all(|b| b.is_ascii_digit());
    (is_word(run) && is_date).then_some((run, Some(date)))
}

/// Try `core` after every reading of the optional `<envir>/` and `com/`
/// prefixes, preferring the readings that consume them.
fn with_prefix_alternatives<'a>(
    body: &'a str,
    core: fn(&'a str) -> Option<Captures<'a>>,
) -> Option<Captures<'a>> {
    let tagged = body.split_once('/').and_then(|(segment, rest)| {
        Environment::from_segment(segment).map(|environment| (Some(environment), rest))
    });

    tagged
        .into_iter()
        .chain(std::iter::once((None, body)))
        .flat_map(|(environment, rest)| {
            let without_com = rest
                .strip_prefix(COM_SEGMENT)
                .and_then(|r| r.strip_prefix('/'))
                .map(|r| (environment, r));
            without_com.into_iter().chain(std::iter::once((environment, rest)))
        })
        .find_map(|(environment, rest)| core(rest).map(|c| c.with_environment(environment)))
}

/// `NET/version[/RUN[.PDY]][/tail]`, anchored at both ends.
fn request_core(text: &str) -> Option<Captures<'_>> {
    let (network, rest) = text.split_once('/')?;
    if !is_word(network) {
        return None;
    }

    let (version, remainder) = match rest.split_once('/') {
        Some((version, remainder)) => (version, Some(remainder)),
        None => (rest, None),
    };
    if !is_version(version) {
        return None;
    }

    let mut captures = Captures {
        network,
        version: Some(version),
        ..Captures::default()
    };

    let Some(remainder) = remainder else {
        return Some(captures);
    };
    if remainder.is_empty() {
        return None;
    }

    // The tail keeps its leading slash, which sits just before `remainder`.
    let tail_from = |offset: usize| &text[text.len() - remainder.len() + offset - 1..];

    let (segment, after) = match remainder.split_once('/') {
        Some((segment, after)) => (segment, Some(after)),
        None => (remainder, None),
    };
    match (parse_run(segment), after) {
        (Some((run, date)), None) => {
            captures.run = Some(run);
            captures.date = date;
        }
        (Some((run, date)), Some(after)) if !after.is_empty() => {
            captures.run = Some(run);
            captures.date = date;
            captures.tail = Some(tail_from(segment.len() + 1));
        }
        _ => captures.tail = Some(tail_from(0)),
    }
    Some(captures)
}

/// `NET[/version[/RUN[.PDY]]]`, anchored at both ends.
fn candidate_core(text: &str) -> Option<Captures<'_>> {
    let segments: Vec<&str> = text.split('/').collect();
    let (network, version, run) = match segments.as_slice() {
        [network] => (*network, None, None),
        [network, version] => (*network, Some(*version), None),
        [network, version, run] => (*network, Some(*version), Some(parse_run(run)?)),
        _ => return None,
    };
    if !is_word(network) || !version.map_or(true, is_version) {
        return None;
    }

    Some(Captures {
        network,
        version,
        run: run.map(|(name, _)| name),
        date: run.and_then(|(_, date)| date),
        ..Captures::default()
    })
}
