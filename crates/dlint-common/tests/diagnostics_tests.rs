//! Tests for diagnostic formatting and message templates.

use super::diagnostics::*;

#[test]
fn test_format_message_substitutes_named_data() {
    let message = format_message(
        "The class {{ name }} is stateless.",
        &[("name", "Foo".to_string())],
    );
    assert_eq!(message, "The class Foo is stateless.");
}

#[test]
fn test_format_message_ignores_inner_whitespace() {
    let message = format_message("<{{Button}}> in {{  ButtonGroup }}", &[
        ("Button", "Btn"),
        ("ButtonGroup", "Group"),
    ]);
    assert_eq!(message, "<Btn> in Group");
}

#[test]
fn test_format_message_keeps_unknown_placeholders() {
    let data: &[(&str, &str)] = &[];
    assert_eq!(
        format_message("missing {{ thing }} here", data),
        "missing {{ thing }} here"
    );
}

#[test]
fn test_format_message_unbalanced_braces() {
    let message = format_message("open {{ name but never closed", &[("name", "x")]);
    assert_eq!(message, "open {{ name but never closed");
}

#[test]
fn test_format_message_without_placeholders_is_identity() {
    let template =
        "A Promise was found that appears to not have resolve or reject invoked on all code paths";
    let data: &[(&str, &str)] = &[];
    assert_eq!(format_message(template, data), template);
}

#[test]
fn test_severity_names_and_ordering() {
    assert_eq!(DiagnosticSeverity::Error.to_string(), "error");
    assert_eq!(DiagnosticSeverity::Warning.to_string(), "warning");
    assert!(DiagnosticSeverity::Error.is_error());
    assert!(DiagnosticSeverity::Warning.is_warning());
    assert!(DiagnosticSeverity::Warning < DiagnosticSeverity::Error);
}

#[test]
fn test_diagnostic_compact_format() {
    let diagnostic = Diagnostic {
        rule: "promise-must-complete".to_string(),
        severity: DiagnosticSeverity::Error,
        file: "app.js".to_string(),
        start: 12,
        length: 8,
        line: 1,
        column: 13,
        message: "boom".to_string(),
    };
    assert_eq!(
        diagnostic.to_string(),
        "app.js:1:13: error [promise-must-complete] boom"
    );
}

#[test]
fn test_diagnostic_serializes_severity_lowercase() {
    let diagnostic = Diagnostic {
        rule: "r".to_string(),
        severity: DiagnosticSeverity::Warning,
        file: "f.js".to_string(),
        start: 0,
        length: 1,
        line: 1,
        column: 1,
        message: "m".to_string(),
    };
    let json = serde_json::to_value(&diagnostic).unwrap();
    assert_eq!(json["severity"], "warning");
    assert_eq!(json["line"], 1);
}
