//! Property-based tests for path handling.
//!
//! Note: The normalize module already has property tests for normalization.
//! This module focuses on textual resolution and relative paths.

use super::normalize::normalize;
use super::relationship::relative_path;
use super::resolver::{resolve_segments, PathResolver};
use super::types::Convention;
use proptest::prelude::*;

// Strategy for generating path-like strings
fn path_component_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9_-]{1,20}"
}

fn absolute_path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(path_component_strategy(), 1..8)
        .prop_map(|parts| format!("/{}", parts.join("/")))
}

fn dotted_segments_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just(".".to_string()),
            Just("..".to_string()),
            path_component_strategy(),
        ],
        0..10,
    )
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        max_shrink_iters: 2000,
        .. ProptestConfig::default()
    })]

    // Normalization of an already clean absolute path is the identity
    #[test]
    fn normalize_clean_path_unchanged(path in absolute_path_strategy()) {
        prop_assert_eq!(normalize(&path), path);
    }

    // Textual resolution never leaves "." or ".." segments behind
    #[test]
    fn resolved_segments_are_plain(parts in dotted_segments_strategy()) {
        let resolved = resolve_segments(&format!("/{}", parts.join("/")), Convention::Posix);
        prop_assert!(resolved.starts_with('/'));
        for segment in resolved.split('/') {
            prop_assert_ne!(segment, ".");
            prop_assert_ne!(segment, "..");
        }
    }

    // Textual resolution is idempotent
    #[test]
    fn resolve_segments_idempotent(parts in dotted_segments_strategy()) {
        let once = resolve_segments(&format!("/{}", parts.join("/")), Convention::Posix);
        prop_assert_eq!(resolve_segments(&once, Convention::Posix), once.clone());
    }

    // A path relative to itself is "."
    #[test]
    fn relative_path_reflexive(path in absolute_path_strategy()) {
        prop_assert_eq!(relative_path(&path, &path, Convention::Posix, false), ".");
    }

    // Resolving a relative path against its anchor leads back to the target
    #[test]
    fn relativize_then_resolve_round_trips(
        target in absolute_path_strategy(),
        anchor in absolute_path_strategy(),
    ) {
        let target = format!(r"C:{}", target.replace('/', "\\"));
        let anchor = format!(r"C:{}", anchor.replace('/', "\\"));
        let resolver = PathResolver::new().with_convention(Convention::Windows);

        let rel = resolver.relativize(&target, Some(&anchor)).unwrap();
        let back = resolver.resolve(&rel, Some(&anchor)).unwrap();
        prop_assert_eq!(back, target);
    }
}
