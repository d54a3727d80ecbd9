//! Property-based tests for COM path parsing and matching.

use super::matcher::find_best_match;
use super::parts::{parse_candidate, parse_request, truncate_versions};
use proptest::prelude::*;

// Network and run names never collide with an environment tag or `com`.
fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{1,8}".prop_filter("reserved segment", |name| {
        !matches!(name.as_str(), "prod" | "para" | "test" | "canned" | "com")
    })
}

fn version_strategy() -> impl Strategy<Value = String> {
    (1u32..40, 0u32..20).prop_map(|(major, minor)| format!("v{major}.{minor}"))
}

fn date_strategy() -> impl Strategy<Value = String> {
    "[0-9]{8,16}"
}

fn tail_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-z0-9_]{1,8}", 1..4).prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // Parsing then rebuilding a full request reproduces it
    #[test]
    fn request_round_trip(
        net in name_strategy(),
        version in version_strategy(),
        run in name_strategy(),
        date in date_strategy(),
        tail in tail_strategy(),
    ) {
        let path = format!("{net}/{version}/{run}.{date}{tail}");
        let parts = parse_request(&path).unwrap();
        prop_assert_eq!(parts.relative_path(), path);
    }

    // Extra version groups never change what the request parses to
    #[test]
    fn truncated_versions_parse_identically(
        net in name_strategy(),
        version in version_strategy(),
        extra in prop::collection::vec(0u32..100, 1..4),
        run in name_strategy(),
    ) {
        let suffix: String = extra.iter().map(|n| format!(".{n}")).collect();
        let short = parse_request(&format!("{net}/{version}/{run}")).unwrap();
        let long = parse_request(&format!("{net}/{version}{suffix}/{run}")).unwrap();
        prop_assert_eq!(short.relative_path(), long.relative_path());
        prop_assert_eq!(
            truncate_versions(&format!("{net}/{version}{suffix}")),
            format!("{net}/{version}")
        );
    }

    // Two equally eligible candidates: the earlier one wins
    #[test]
    fn earlier_candidate_wins_ties(
        net in name_strategy(),
        version in version_strategy(),
        first in name_strategy(),
        second in name_strategy(),
    ) {
        let request = parse_request(&format!("{net}/{version}")).unwrap();
        let candidates = vec![
            parse_candidate(&format!("/{first}/a/{net}/{version}")),
            parse_candidate(&format!("/{second}/b/{net}/{version}")),
        ];
        let found = find_best_match(&request, &candidates, true);
        prop_assert_eq!(found, Some(format!("/{first}/a/{net}/{version}")));
    }

    // A NET/version request never lands on a run-qualified directory
    #[test]
    fn version_request_skips_run_candidates(
        net in name_strategy(),
        version in version_strategy(),
        run in name_strategy(),
        date in prop::option::of(date_strategy()),
    ) {
        let run_segment = match &date {
            Some(date) => format!("{run}.{date}"),
            None => run.clone(),
        };
        let request = parse_request(&format!("{net}/{version}")).unwrap();
        let candidates = vec![parse_candidate(&format!("/mnt/{net}/{version}/{run_segment}"))];
        prop_assert_eq!(find_best_match(&request, &candidates, true), None);
    }
}
