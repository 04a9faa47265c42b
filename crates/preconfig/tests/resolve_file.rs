//! End-to-end tests for the `file` source.

use std::fs;

use preconfig::{ResolveError, Template, params};
use tempfile::TempDir;

fn resolve_in(dir: &TempDir, template: &str) -> Result<String, ResolveError> {
    Template::new(template, dir.path()).unwrap().resolve(&params! {})
}

// =============================================================================
// Reading and indexing
// =============================================================================

#[test]
fn file_contents_substitute_in_place() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("value.txt"), "value").unwrap();

    assert_eq!(resolve_in(&dir, "x=${file(value.txt)}").unwrap(), "x=value");
}

#[test]
fn file_with_a_path_indexes_structured_content() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"key":"value"}"#).unwrap();

    assert_eq!(
        resolve_in(&dir, "${file(config.json):key}").unwrap(),
        "value"
    );
}

#[test]
fn file_with_a_path_indexes_yaml_content() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.yaml"), "port: 8080\n").unwrap();

    assert_eq!(
        resolve_in(&dir, "${file(config.yaml):port}").unwrap(),
        "8080"
    );
}

#[test]
fn included_files_are_templates_with_the_same_parameters() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("greeting.txt"), "hello ${para:name}").unwrap();

    let template = Template::new("${file(greeting.txt)}", dir.path()).unwrap();
    assert_eq!(
        template.resolve(&params! { "name" => "demo" }).unwrap(),
        "hello demo"
    );
}

#[test]
fn nested_includes_resolve_relative_to_their_own_file() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub/outer.txt"), "${file(inner.txt)}").unwrap();
    fs::write(dir.path().join("sub/inner.txt"), "deep").unwrap();

    assert_eq!(resolve_in(&dir, "${file(sub/outer.txt)}").unwrap(), "deep");
}

#[test]
fn file_name_built_from_a_parameter() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a.txt"), "chosen").unwrap();

    let template = Template::new("${file(${para:which})}", dir.path()).unwrap();
    assert_eq!(
        template.resolve(&params! { "which" => "a.txt" }).unwrap(),
        "chosen"
    );
}

// =============================================================================
// Failure modes
// =============================================================================

#[test]
fn missing_file_fails_hard() {
    let dir = TempDir::new().unwrap();
    let error = resolve_in(&dir, "${file(absent.txt)}").unwrap_err();
    assert!(matches!(error, ResolveError::FileNotFound { .. }));
    assert!(error.to_string().starts_with("file not found: "));
    assert!(error.to_string().contains("absent.txt"));
}

#[test]
fn path_into_plain_text_file_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("notes.txt"), "just words").unwrap();

    let error = resolve_in(&dir, "${file(notes.txt):key}").unwrap_err();
    assert!(matches!(error, ResolveError::PathOnText));
    assert_eq!(
        error.to_string(),
        "cannot resolve a path for a non-json/yaml content"
    );
}

#[test]
fn missing_key_in_an_included_file_is_unresolvable() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"key":"value"}"#).unwrap();

    let error = resolve_in(&dir, "${file(config.json):other}").unwrap_err();
    assert!(matches!(error, ResolveError::Unresolvable { .. }));
}
