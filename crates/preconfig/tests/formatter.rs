//! Tests for post-resolution output formatting.

use preconfig::format::{FormatError, OutputFormat, reformat};

// =============================================================================
// Text passthrough
// =============================================================================

#[test]
fn text_target_returns_content_unchanged() {
    assert_eq!(
        reformat("anything at all", OutputFormat::Text).unwrap(),
        "anything at all"
    );
    assert_eq!(
        reformat(r#"{"a":1}"#, OutputFormat::Text).unwrap(),
        r#"{"a":1}"#
    );
}

// =============================================================================
// JSON target
// =============================================================================

#[test]
fn json_input_pretty_prints() {
    let output = reformat(r#"{"name":"demo"}"#, OutputFormat::Json).unwrap();
    assert_eq!(output, "{\n  \"name\": \"demo\"\n}");
}

#[test]
fn yaml_input_converts_to_json() {
    let output = reformat("name: demo\n", OutputFormat::Json).unwrap();
    assert_eq!(output, "{\n  \"name\": \"demo\"\n}");
}

#[test]
fn plain_text_cannot_become_json() {
    let error = reformat("just words", OutputFormat::Json).unwrap_err();
    assert!(matches!(
        error,
        FormatError::TextContent {
            target: OutputFormat::Json
        }
    ));
    assert_eq!(error.to_string(), "cannot format plain text content as json");
}

// =============================================================================
// YAML target
// =============================================================================

#[test]
fn json_input_converts_to_yaml() {
    let output = reformat(r#"{"name":"demo"}"#, OutputFormat::Yaml).unwrap();
    assert_eq!(output, "name: demo\n");
}

#[test]
fn multi_document_streams_stay_multi_document() {
    let output = reformat("---\na: 1\n---\nb: 2\n", OutputFormat::Yaml).unwrap();
    assert_eq!(output, "a: 1\n---\nb: 2\n");
}

#[test]
fn plain_text_cannot_become_yaml() {
    let error = reformat("just words", OutputFormat::Yaml).unwrap_err();
    assert!(matches!(
        error,
        FormatError::TextContent {
            target: OutputFormat::Yaml
        }
    ));
}
