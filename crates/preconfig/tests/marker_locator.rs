//! Integration tests for the marker locator.

use preconfig::parser::{Delimiters, ParseError, locate_markers, locate_markers_with};

fn pairs(content: &str) -> Vec<(usize, usize)> {
    locate_markers(content)
        .unwrap()
        .iter()
        .map(|marker| (marker.open, marker.close))
        .collect()
}

// =============================================================================
// Basic location
// =============================================================================

#[test]
fn plain_text_has_no_markers() {
    assert_eq!(pairs("abc"), vec![]);
}

#[test]
fn empty_input_has_no_markers() {
    assert_eq!(pairs(""), vec![]);
}

#[test]
fn single_marker() {
    assert_eq!(pairs("a${b}c"), vec![(1, 4)]);
}

#[test]
fn sibling_markers_sorted_by_opening() {
    assert_eq!(pairs("${a}${b}"), vec![(0, 3), (4, 7)]);
}

#[test]
fn nested_markers_include_inner_pairs() {
    assert_eq!(pairs("a${${b}}c"), vec![(1, 7), (3, 6)]);
}

// =============================================================================
// Escapes
// =============================================================================

#[test]
fn escaped_opening_and_closing_yield_nothing() {
    assert_eq!(pairs(r"\${a\}"), vec![]);
}

#[test]
fn escaped_delimiters_around_a_real_pair() {
    assert_eq!(pairs(r"\${a${b}\}"), vec![(4, 7)]);
}

#[test]
fn double_backslash_keeps_the_marker_live() {
    // Two backslashes escape each other, not the marker.
    assert_eq!(pairs(r"\\${a}"), vec![(2, 5)]);
}

#[test]
fn escaped_closing_is_skipped_when_pairing() {
    assert_eq!(pairs(r"${a\}b}"), vec![(0, 6)]);
}

#[test]
fn escape_parity_alternates() {
    assert_eq!(pairs(r"\${a}"), vec![]);
    assert_eq!(pairs(r"\\${a}"), vec![(2, 5)]);
    assert_eq!(pairs(r"\\\${a}"), vec![]);
}

// =============================================================================
// Unmatched delimiters
// =============================================================================

#[test]
fn unmatched_opening_is_fatal() {
    let error = locate_markers("a${b").unwrap_err();
    assert!(matches!(error, ParseError::UnmatchedOpening { offset: 1 }));
    assert_eq!(error.to_string(), "missing closing for the opening at 1");
}

#[test]
fn unmatched_closing_is_ignored() {
    assert_eq!(pairs("a}b"), vec![]);
    assert_eq!(pairs("a}${b}"), vec![(2, 5)]);
}

#[test]
fn deepest_unmatched_opening_is_reported() {
    // Openings pair right to left, so the rightmost failure surfaces.
    let error = locate_markers("${a${b").unwrap_err();
    assert!(matches!(error, ParseError::UnmatchedOpening { offset: 3 }));
}

#[test]
fn inner_pair_is_claimed_before_the_outer_opening() {
    let error = locate_markers("${a${b}").unwrap_err();
    assert!(matches!(error, ParseError::UnmatchedOpening { offset: 0 }));
}

// =============================================================================
// Configurable delimiters
// =============================================================================

#[test]
fn round_brackets_pair_by_nesting() {
    let markers = locate_markers_with(
        "f(a,(b))",
        Delimiters {
            opening: "(",
            closing: ")",
        },
    )
    .unwrap();
    let pairs: Vec<(usize, usize)> = markers.iter().map(|m| (m.open, m.close)).collect();
    assert_eq!(pairs, vec![(1, 7), (4, 6)]);
}

#[test]
fn round_brackets_honor_escapes() {
    let markers = locate_markers_with(
        r"(a\)b)",
        Delimiters {
            opening: "(",
            closing: ")",
        },
    )
    .unwrap();
    let pairs: Vec<(usize, usize)> = markers.iter().map(|m| (m.open, m.close)).collect();
    assert_eq!(pairs, vec![(0, 5)]);
}
