//! Per-file rule state and report collection.

use dlint_common::DiagnosticSeverity;
use dlint_syntax::{NodeArena, NodeIndex};

use crate::rule::RuleMeta;

/// A violation recorded by a rule, before location lookup and templating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LintReport {
    pub node: NodeIndex,
    /// Message template with `{{ name }}` placeholders
    pub message: &'static str,
    pub data: Vec<(String, String)>,
}

/// State handed to a rule's handlers while one file is traversed.
pub struct RuleContext<'c> {
    arena: &'c NodeArena,
    file_name: &'c str,
    meta: &'static RuleMeta,
    severity: DiagnosticSeverity,
    reports: Vec<LintReport>,
}

impl<'c> RuleContext<'c> {
    pub fn new(
        arena: &'c NodeArena,
        file_name: &'c str,
        meta: &'static RuleMeta,
        severity: DiagnosticSeverity,
    ) -> Self {
        RuleContext {
            arena,
            file_name,
            meta,
            severity,
            reports: Vec::new(),
        }
    }

    #[inline]
    pub fn arena(&self) -> &'c NodeArena {
        self.arena
    }

    #[inline]
    pub fn file_name(&self) -> &'c str {
        self.file_name
    }

    #[inline]
    pub fn rule_name(&self) -> &'static str {
        self.meta.name
    }

    #[inline]
    pub fn severity(&self) -> DiagnosticSeverity {
        self.severity
    }

    /// Report a violation at `node`.
    pub fn report(&mut self, node: NodeIndex, message: &'static str) {
        self.report_with_data(node, message, Vec::new());
    }

    /// Report a violation whose message has `{{ name }}` placeholders.
    pub fn report_with_data(
        &mut self,
        node: NodeIndex,
        message: &'static str,
        data: Vec<(String, String)>,
    ) {
        tracing::debug!(rule = self.meta.name, node = node.0, "report");
        self.reports.push(LintReport {
            node,
            message,
            data,
        });
    }

    pub fn reports(&self) -> &[LintReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<LintReport> {
        self.reports
    }
}
