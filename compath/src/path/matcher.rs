//! Progressive matching of a request against candidate directories.
//!
//! The request is first compared on all of its structured fields. When no
//! candidate agrees on every one of them, the most specific field is dropped
//! and the comparison repeats, down to the network name alone. The winning
//! candidate is then extended with the request fields it did not cover.
//!
//! A candidate that contradicts the request on a field is removed for the
//! rest of the search: agreeing on fewer fields never makes up for a
//! disagreement on a coarser one. A candidate that merely lacks a field stays
//! in the running for the coarser levels.

use std::ops::ControlFlow;

use crate::path::parts::{Field, PathComponents};

/// How one candidate fares at one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verdict {
    /// Every compared field agrees.
    Eligible,
    /// The candidate does not carry this field; retry at a coarser level.
    Absent,
    /// The candidate carries a different value; drop it.
    Conflict,
}

/// Find the candidate that best matches `request` and build the full path.
///
/// Candidates are considered in list order and the first eligible one at
/// the most specific level wins. With `environment_sensitive` set, a
/// candidate whose environment tag differs from the request's tag is
/// rejected; otherwise environment tags are ignored.
///
/// # Examples
///
/// ```
/// use compath::path::matcher::find_best_match;
/// use compath::path::parts::{parse_candidate, parse_request};
///
/// let request = parse_request("gfs/v16.3/gfs.20230101/atmos").unwrap();
/// let candidates = vec![
///     parse_candidate("/mnt/a/nam/v4.2"),
///     parse_candidate("/mnt/b/gfs/v16.3"),
/// ];
///
/// let found = find_best_match(&request, &candidates, true);
/// assert_eq!(found.as_deref(), Some("/mnt/b/gfs/v16.3/gfs.20230101/atmos"));
/// ```
#[must_use]
pub fn find_best_match(
    request: &PathComponents,
    candidates: &[PathComponents],
    environment_sensitive: bool,
) -> Option<String> {
    let specificity = request.specificity();
    let mut remaining = without_extra_fields(request, candidates);

    for level in (1..=specificity).rev() {
        let fields = &Field::SPECIFICITY[..level];
        match scan_level(request, remaining, fields, environment_sensitive) {
            ControlFlow::Break(winner) => {
                log::debug!(
                    "matched {} at level {level} of {specificity}",
                    winner.source_path()
                );
                return Some(extend(request, winner, level, specificity));
            }
            ControlFlow::Continue(survivors) => remaining = survivors,
        }
    }

    None
}

/// Drop candidates that are qualified by a field the request leaves out.
fn without_extra_fields<'a>(
    request: &PathComponents,
    candidates: &'a [PathComponents],
) -> Vec<&'a PathComponents> {
    candidates
        .iter()
        .filter(|candidate| {
            Field::SPECIFICITY
                .iter()
                .all(|&field| request.field(field).is_some() || candidate.field(field).is_none())
        })
        .collect()
}

/// Look for a winner among `remaining`, or return the candidates that may
/// still match at a coarser level.
fn scan_level<'a>(
    request: &PathComponents,
    remaining: Vec<&'a PathComponents>,
    fields: &[Field],
    environment_sensitive: bool,
) -> ControlFlow<&'a PathComponents, Vec<&'a PathComponents>> {
    remaining
        .into_iter()
        .try_fold(Vec::new(), |mut survivors, candidate| {
            match judge(request, candidate, fields, environment_sensitive) {
                Verdict::Eligible => return ControlFlow::Break(candidate),
                Verdict::Absent => survivors.push(candidate),
                Verdict::Conflict => {
                    log::debug!("pruned candidate {}", candidate.source_path());
                }
            }
            ControlFlow::Continue(survivors)
        })
}

fn judge(
    request: &PathComponents,
    candidate: &PathComponents,
    fields: &[Field],
    environment_sensitive: bool,
) -> Verdict {
    if environment_sensitive {
        if let (Some(wanted), Some(found)) = (request.environment(), candidate.environment()) {
            if wanted != found {
                return Verdict::Conflict;
            }
        }
    }

    for &field in fields {
        match candidate.field(field) {
            None => return Verdict::Absent,
            Some(value) if Some(value) != request.field(field) => return Verdict::Conflict,
            Some(_) => {}
        }
    }
    Verdict::Eligible
}

/// Append the request fields finer than `level`, then the request tail.
fn extend(
    request: &PathComponents,
    candidate: &PathComponents,
    level: usize,
    specificity: usize,
) -> String {
    let mut path = candidate.source_path().to_string();
    for &field in &Field::SPECIFICITY[level..specificity] {
        if let Some(value) = request.field(field) {
            path.push(field.separator());
            path.push_str(value);
        }
    }
    if let Some(tail) = request.tail() {
        path.push_str(tail);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::parts::{parse_candidate, parse_request};

    fn candidates(paths: &[&str]) -> Vec<PathComponents> {
        paths.iter().map(|p| parse_candidate(p)).collect()
    }

    fn best(request: &str, paths: &[&str], sensitive: bool) -> Option<String> {
        let request = parse_request(request).unwrap();
        find_best_match(&request, &candidates(paths), sensitive)
    }

    #[test]
    fn test_exact_match_at_full_depth() {
        let found = best(
            "gfs/v16.3/gfs.20230101",
            &["/mnt/a/gfs/v16.3", "/mnt/b/gfs/v16.3/gfs.20230101"],
            true,
        );
        assert_eq!(found.as_deref(), Some("/mnt/b/gfs/v16.3/gfs.20230101"));
    }

    #[test]
    fn test_version_level_match_appends_run_and_date() {
        let found = best("test/gfs/v16.2/gfs.2023010100", &["/mnt/a/gfs/v16.2"], true);
        assert_eq!(found.as_deref(), Some("/mnt/a/gfs/v16.2/gfs.2023010100"));
    }

    #[test]
    fn test_network_level_match_appends_version() {
        let found = best("gfs/v16.3/gdas", &["/lfs/h1/ops/prod/com/gfs"], true);
        assert_eq!(found.as_deref(), Some("/lfs/h1/ops/prod/com/gfs/v16.3/gdas"));
    }

    #[test]
    fn test_run_level_match_appends_date() {
        let found = best("gfs/v16.3/gdas.20230101", &["/d/gfs/v16.3/gdas"], true);
        assert_eq!(found.as_deref(), Some("/d/gfs/v16.3/gdas.20230101"));
    }

    #[test]
    fn test_tail_appended_verbatim() {
        let found = best("gfs/v16.3/gfs.20230101/atmos/00", &["/d/gfs/v16.3"], true);
        assert_eq!(found.as_deref(), Some("/d/gfs/v16.3/gfs.20230101/atmos/00"));
    }

    #[test]
    fn test_run_qualified_candidate_rejected_for_unqualified_request() {
        let found = best("gfs/v16.2", &["/mnt/b/gfs/v16.2/gfs.20230101"], false);
        assert_eq!(found, None);
    }

    #[test]
    fn test_date_qualified_candidate_rejected_for_run_only_request() {
        let found = best(
            "gfs/v16.2/gfs",
            &["/d/gfs/v16.2/gfs.20230101", "/e/gfs/v16.2"],
            false,
        );
        assert_eq!(found.as_deref(), Some("/e/gfs/v16.2/gfs"));
    }

    #[test]
    fn test_first_listed_wins_ties() {
        let found = best("gfs/v16.3", &["/first/gfs/v16.3", "/second/gfs/v16.3"], true);
        assert_eq!(found.as_deref(), Some("/first/gfs/v16.3"));
    }

    #[test]
    fn test_more_specific_level_beats_list_order() {
        let found = best(
            "gfs/v16.3/gdas",
            &["/coarse/gfs/v16.3", "/fine/gfs/v16.3/gdas"],
            true,
        );
        assert_eq!(found.as_deref(), Some("/fine/gfs/v16.3/gdas"));
    }

    #[test]
    fn test_conflicting_run_is_not_salvaged_at_coarser_level() {
        let found = best("gfs/v16.3/gdas", &["/x/gfs/v16.3/gfs"], true);
        assert_eq!(found, None);
    }

    #[test]
    fn test_conflicting_version_never_matches() {
        let found = best("gfs/v16.3", &["/x/gfs/v16.2"], true);
        assert_eq!(found, None);
    }

    #[test]
    fn test_path_only_candidates_are_inert() {
        let found = best("gfs/v16.3", &["/data/gfs.t00z", "/y/gfs/v16.3"], true);
        assert_eq!(found.as_deref(), Some("/y/gfs/v16.3"));
    }

    #[test]
    fn test_environment_sensitive_rejects_other_tier() {
        let found = best("para/gfs/v16.3", &["/lfs/h1/ops/prod/com/gfs/v16.3"], true);
        assert_eq!(found, None);
    }

    #[test]
    fn test_environment_insensitive_accepts_other_tier() {
        let found = best("para/gfs/v16.3", &["/lfs/h1/ops/prod/com/gfs/v16.3"], false);
        assert_eq!(found.as_deref(), Some("/lfs/h1/ops/prod/com/gfs/v16.3"));
    }

    #[test]
    fn test_untagged_candidate_matches_tagged_request() {
        let found = best("para/gfs/v16.3", &["/mnt/gfs/v16.3"], true);
        assert_eq!(found.as_deref(), Some("/mnt/gfs/v16.3"));
    }

    #[test]
    fn test_empty_candidate_list() {
        assert_eq!(best("gfs/v16.3", &[], true), None);
    }
}
