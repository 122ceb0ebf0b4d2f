//! Runs enabled rules over a program and renders their reports.

use dlint_common::{Diagnostic, DiagnosticSeverity, format_message};
use dlint_syntax::{HandlerRegistry, Program, traverse};
use tracing::{debug, debug_span};

use crate::context::{LintReport, RuleContext};
use crate::registry::RuleRegistry;
use crate::rule::{Rule, RuleSeverity};

/// A rule together with the severity it reports at.
#[derive(Clone, Copy)]
pub struct EnabledRule {
    pub rule: &'static dyn Rule,
    pub severity: DiagnosticSeverity,
}

/// Lints programs with a fixed set of rules.
#[derive(Clone, Default)]
pub struct Linter {
    rules: Vec<EnabledRule>,
}

impl Linter {
    /// Build a linter from configured rules; rules set to `off` are dropped.
    pub fn new<I>(rules: I) -> Linter
    where
        I: IntoIterator<Item = (&'static dyn Rule, RuleSeverity)>,
    {
        let rules = rules
            .into_iter()
            .filter_map(|(rule, severity)| {
                severity
                    .diagnostic_severity()
                    .map(|severity| EnabledRule { rule, severity })
            })
            .collect();
        Linter { rules }
    }

    /// A linter running the `recommended` preset.
    pub fn recommended() -> Linter {
        Linter::new(RuleRegistry::builtin().recommended())
    }

    pub fn rules(&self) -> &[EnabledRule] {
        &self.rules
    }

    /// Lint one program. Each rule gets its own traversal.
    ///
    /// Diagnostics are sorted by position, then by rule name.
    pub fn lint(&self, program: &Program) -> Vec<Diagnostic> {
        let _span = debug_span!("lint", file = %program.file_name).entered();
        let mut diagnostics = Vec::new();

        for enabled in &self.rules {
            let meta = enabled.rule.meta();
            let mut cx = RuleContext::new(&program.arena, &program.file_name, meta, enabled.severity);
            let mut registry = HandlerRegistry::new();
            enabled.rule.create(&mut registry);
            traverse(&program.arena, program.root, &mut registry, &mut cx);

            let reports = cx.into_reports();
            debug!(rule = meta.name, reports = reports.len(), "rule finished");
            diagnostics.extend(
                reports
                    .into_iter()
                    .map(|report| to_diagnostic(program, meta.name, enabled.severity, report)),
            );
        }

        diagnostics.sort_by(|a, b| {
            (a.line, a.column, a.start, &a.rule).cmp(&(b.line, b.column, b.start, &b.rule))
        });
        diagnostics
    }
}

fn to_diagnostic(
    program: &Program,
    rule: &str,
    severity: DiagnosticSeverity,
    report: LintReport,
) -> Diagnostic {
    let (start, end) = program.arena.pos_end(report.node).unwrap_or((0, 0));
    // 1-indexed for display; unknown positions fall back to the file start
    let (line, column) = program
        .position_of(report.node)
        .map(|pos| (pos.line + 1, pos.character + 1))
        .unwrap_or((1, 1));

    Diagnostic {
        rule: rule.to_string(),
        severity,
        file: program.file_name.clone(),
        start,
        length: end.saturating_sub(start),
        line,
        column,
        message: format_message(report.message, &report.data),
    }
}
