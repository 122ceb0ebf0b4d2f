//! Diagnostic Infrastructure
//!
//! Rules never build `Diagnostic` values directly. They report a node, a
//! message template and named substitution data; the linter resolves the
//! node to a location and renders the template with [`format_message`].
//!
//! Templates use the `{{ name }}` placeholder syntax. Whitespace inside the
//! braces is ignored, and placeholders without a matching entry are left in
//! the output untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Diagnostic Severity
// =============================================================================

/// The severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    /// An error (fails the run)
    Error = 2,
    /// A warning
    Warning = 1,
}

impl DiagnosticSeverity {
    /// Get the severity name for display.
    pub fn name(&self) -> &'static str {
        match self {
            DiagnosticSeverity::Error => "error",
            DiagnosticSeverity::Warning => "warning",
        }
    }

    /// Check if this is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, DiagnosticSeverity::Error)
    }

    /// Check if this is a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, DiagnosticSeverity::Warning)
    }
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Default for DiagnosticSeverity {
    fn default() -> Self {
        DiagnosticSeverity::Error
    }
}

// =============================================================================
// Diagnostic
// =============================================================================

/// A rendered lint diagnostic with location and severity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Name of the rule that produced this diagnostic
    pub rule: String,
    pub severity: DiagnosticSeverity,
    /// The file containing the diagnostic
    pub file: String,
    /// Start offset of the reported node
    pub start: u32,
    /// Length of the reported node's span
    pub length: u32,
    /// 1-indexed line
    pub line: u32,
    /// 1-indexed column
    pub column: u32,
    /// The message with all placeholders substituted
    pub message: String,
}

impl Diagnostic {
    /// Format the diagnostic in a compact single-line form.
    ///
    /// Returns a string like: "file.js:1:13: error [promise-must-complete] message"
    pub fn format_compact(&self) -> String {
        format!(
            "{}:{}:{}: {} [{}] {}",
            self.file, self.line, self.column, self.severity, self.rule, self.message
        )
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_compact())
    }
}

// =============================================================================
// Message Templates
// =============================================================================

/// Substitute `{{ name }}` placeholders in `template` with values from `data`.
///
/// Unknown placeholders and unbalanced braces are copied through verbatim.
pub fn format_message<K, V>(template: &str, data: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        result.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let Some(close) = after_open.find("}}") else {
            result.push_str(&rest[open..]);
            return result;
        };

        let term = after_open[..close].trim();
        let value = if term.is_empty() || term.contains(['{', '}']) {
            None
        } else {
            data.iter()
                .find(|(key, _)| key.as_ref() == term)
                .map(|(_, value)| value.as_ref())
        };

        match value {
            Some(value) => result.push_str(value),
            None => result.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after_open[close + 2..];
    }

    result.push_str(rest);
    result
}
