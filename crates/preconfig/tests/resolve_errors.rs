//! Tests for resolve-time error kinds and message formatting.

use preconfig::{ResolveError, Template, params};

fn resolve_err(template: &str) -> ResolveError {
    Template::new(template, ".")
        .unwrap()
        .resolve(&params! {})
        .unwrap_err()
}

// =============================================================================
// Argument arity
// =============================================================================

#[test]
fn missing_argument_reports_the_count() {
    let error = resolve_err("${base64encode}");
    assert!(matches!(
        error,
        ResolveError::ArgumentCount {
            expected: 1,
            got: 0,
            ..
        }
    ));
    assert_eq!(
        error.to_string(),
        "source 'base64encode' expects 1 argument(s), got 0"
    );
}

#[test]
fn extra_arguments_report_the_count() {
    let error = resolve_err("${file(a,b)}");
    assert!(matches!(
        error,
        ResolveError::ArgumentCount {
            expected: 1,
            got: 2,
            ..
        }
    ));
}

#[test]
fn empty_argument_list_on_a_zero_argument_source_is_rejected() {
    let error = resolve_err("${para():x}");
    assert!(matches!(error, ResolveError::UnexpectedArguments { .. }));
    assert_eq!(error.to_string(), "source 'para' takes no arguments");
}

#[test]
fn any_argument_on_a_zero_argument_source_is_rejected() {
    let error = resolve_err("${env(HOME):x}");
    assert!(matches!(error, ResolveError::UnexpectedArguments { .. }));
}

// =============================================================================
// Path arity
// =============================================================================

#[test]
fn required_path_missing() {
    let error = resolve_err("${para}");
    assert!(matches!(error, ResolveError::MissingPath { .. }));
    assert_eq!(error.to_string(), "source 'para' requires a path");
}

#[test]
fn forbidden_path_present() {
    let error = resolve_err("${base64encode(v):x}");
    assert!(matches!(error, ResolveError::UnexpectedPath { .. }));
    assert_eq!(
        error.to_string(),
        "source 'base64encode' does not accept a path"
    );
}

#[test]
fn empty_but_present_path_satisfies_a_required_path() {
    // `${para:}` is well-formed; the empty lookup just never resolves.
    let error = resolve_err("${para:}");
    assert!(matches!(error, ResolveError::Unresolvable { .. }));
}

// =============================================================================
// Unresolvable references
// =============================================================================

#[test]
fn unknown_source_is_unresolvable() {
    let error = resolve_err("${mystery:path}");
    match error {
        ResolveError::Unresolvable { ref segments } => {
            assert_eq!(segments, &vec!["${mystery:path}".to_string()]);
        }
        ref other => panic!("expected unresolvable, got {other}"),
    }
    assert_eq!(
        error.to_string(),
        "unresolvable references:\n- ${mystery:path}"
    );
}

#[test]
fn every_stalled_segment_is_listed() {
    let error = resolve_err("${para:a} and ${para:b}");
    assert_eq!(
        error.to_string(),
        "unresolvable references:\n- ${para:a}\n- ${para:b}"
    );
}
