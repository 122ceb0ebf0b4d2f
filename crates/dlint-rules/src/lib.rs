//! Rules for the dlint plugin.
//!
//! This crate provides:
//! - The completion analyzer (`CompletionAnalyzer`), which decides whether a
//!   block calls one of a set of completion functions on every path
//! - The `Rule` trait, the built-in rule table and the `Linter` that runs
//!   rules over a loaded program

pub mod completion;
pub use completion::{CompletionAnalyzer, CompletionIdentifierSet, CompletionResult};

pub mod context;
pub use context::{LintReport, RuleContext};

pub mod rule;
pub use rule::{InvalidSeverity, Rule, RuleCategory, RuleMeta, RuleSeverity};

pub mod rules;

pub mod registry;
pub use registry::{PLUGIN_PREFIX, RuleRegistry};

pub mod linter;
pub use linter::{EnabledRule, Linter};

#[cfg(test)]
#[path = "../tests/support.rs"]
mod support;
#[cfg(test)]
#[path = "../tests/completion_tests.rs"]
mod completion_tests;
#[cfg(test)]
#[path = "../tests/promise_must_complete_tests.rs"]
mod promise_must_complete_tests;
#[cfg(test)]
#[path = "../tests/linter_tests.rs"]
mod linter_tests;
