//! Rendering of lint results for the terminal and for tooling.

use colored::Colorize;
use dlint_common::{Diagnostic, DiagnosticSeverity};
use dlint_rules::RuleRegistry;
use serde::Serialize;

use crate::args::OutputFormat;
use crate::driver::{LintRun, LintedFile, LoadFailure};

pub struct Reporter {
    color: bool,
    format: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    diagnostics: Vec<&'a Diagnostic>,
    failures: Vec<JsonFailure>,
    error_count: usize,
    warning_count: usize,
}

#[derive(Serialize)]
struct JsonFailure {
    path: String,
    message: String,
}

impl Reporter {
    pub fn new(color: bool, format: OutputFormat) -> Self {
        Reporter { color, format }
    }

    pub fn render(&self, run: &LintRun) -> String {
        match self.format {
            OutputFormat::Pretty => self.render_pretty(run),
            OutputFormat::Compact => render_compact(run),
            OutputFormat::Json => render_json(run),
        }
    }

    fn render_pretty(&self, run: &LintRun) -> String {
        let mut blocks = Vec::new();
        for failure in &run.failures {
            blocks.push(self.format_failure(failure));
        }
        for file in &run.files {
            for diagnostic in &file.diagnostics {
                blocks.push(self.format_diagnostic(file, diagnostic));
            }
        }

        let mut out = blocks.join("\n\n");
        let errors = run.error_count();
        let warnings = run.warning_count();
        if errors + warnings > 0 {
            out.push_str("\n\n");
            out.push_str(&self.format_summary(errors, warnings));
        }
        out
    }

    pub fn format_diagnostic(&self, file: &LintedFile, diagnostic: &Diagnostic) -> String {
        let mut output = format!(
            "{}:{}:{} - {} {}: {}",
            diagnostic.file,
            diagnostic.line,
            diagnostic.column,
            self.format_severity(diagnostic.severity),
            self.format_rule(&diagnostic.rule),
            diagnostic.message
        );

        if let Some(snippet) = self.format_snippet(file.source.as_deref(), diagnostic) {
            output.push_str(&snippet);
        }
        output
    }

    /// Source line of the diagnostic with its span underlined:
    ///
    /// ```text
    ///     1   new Promise(() => {})
    ///                     ~~~~~~~~
    /// ```
    ///
    /// The underline stops at the end of the first line.
    fn format_snippet(&self, source: Option<&str>, diagnostic: &Diagnostic) -> Option<String> {
        let source = source?;
        if diagnostic.length == 0 {
            return None;
        }
        let line_idx = diagnostic.line.checked_sub(1)? as usize;
        let line_text = source.lines().nth(line_idx)?;

        let first = diagnostic.column.saturating_sub(1);
        let last = first + diagnostic.length;
        let mut underline = String::new();
        let mut column = 0u32;
        for ch in line_text.chars() {
            if column >= last {
                break;
            }
            let mark = if column < first { ' ' } else { '~' };
            if ch == '\t' {
                underline.extend(std::iter::repeat_n(mark, 4));
            } else {
                underline.push(mark);
            }
            column += ch.len_utf16() as u32;
        }
        if !underline.contains('~') {
            underline.push('~');
        }

        let underline = if self.color {
            underline.red().to_string()
        } else {
            underline
        };
        Some(format!(
            "\n  {:>3}   {}\n       {}",
            diagnostic.line,
            line_text.replace('\t', "    "),
            underline
        ))
    }

    fn format_failure(&self, failure: &LoadFailure) -> String {
        format!(
            "{} - {}: {}",
            failure.path.display(),
            self.format_severity(DiagnosticSeverity::Error),
            failure.message
        )
    }

    fn format_summary(&self, errors: usize, warnings: usize) -> String {
        let summary = format!(
            "Found {} {} and {} {}.",
            errors,
            plural(errors, "error"),
            warnings,
            plural(warnings, "warning")
        );
        if self.color {
            summary.bold().to_string()
        } else {
            summary
        }
    }

    fn format_severity(&self, severity: DiagnosticSeverity) -> String {
        let label = severity.name();
        if !self.color {
            return label.to_string();
        }
        match severity {
            DiagnosticSeverity::Error => label.red().bold().to_string(),
            DiagnosticSeverity::Warning => label.yellow().bold().to_string(),
        }
    }

    fn format_rule(&self, rule: &str) -> String {
        if self.color {
            rule.bright_blue().to_string()
        } else {
            rule.to_string()
        }
    }

    /// `--list-rules` output: one line per rule, recommended rules marked.
    pub fn render_rule_list(&self, registry: &RuleRegistry) -> String {
        let width = registry.iter().map(|rule| rule.meta().name.len()).max().unwrap_or(0);
        let mut lines = Vec::new();
        for rule in registry.iter() {
            let meta = rule.meta();
            let marker = if meta.recommended { "*" } else { " " };
            let name = format!("{:<width$}", meta.name, width = width);
            let name = if self.color {
                name.bright_blue().to_string()
            } else {
                name
            };
            lines.push(format!(
                "{} {}  {}  {}",
                marker, name, meta.category, meta.description
            ));
        }
        lines.push(String::new());
        lines.push("* enabled by the recommended preset".to_string());
        lines.join("\n")
    }
}

fn render_compact(run: &LintRun) -> String {
    let failures = run
        .failures
        .iter()
        .map(|failure| format!("{}: error {}", failure.path.display(), failure.message));
    let diagnostics = run.diagnostics().map(Diagnostic::format_compact);
    failures.chain(diagnostics).collect::<Vec<_>>().join("\n")
}

fn render_json(run: &LintRun) -> String {
    let report = JsonReport {
        diagnostics: run.diagnostics().collect(),
        failures: run
            .failures
            .iter()
            .map(|failure| JsonFailure {
                path: failure.path.display().to_string(),
                message: failure.message.clone(),
            })
            .collect(),
        error_count: run.error_count(),
        warning_count: run.warning_count(),
    };
    serde_json::to_string_pretty(&report).unwrap_or_default()
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
