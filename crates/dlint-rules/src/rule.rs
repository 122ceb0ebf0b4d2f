//! Rule trait and metadata.

use std::fmt;
use std::str::FromStr;

use dlint_common::DiagnosticSeverity;
use dlint_syntax::HandlerRegistry;
use serde::Serialize;

use crate::context::RuleContext;

/// Documentation category of a rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum RuleCategory {
    #[serde(rename = "Possible Errors")]
    PossibleErrors,
    #[serde(rename = "Best Practices")]
    BestPractices,
    #[serde(rename = "Stylistic Issues")]
    StylisticIssues,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RuleCategory::PossibleErrors => "Possible Errors",
            RuleCategory::BestPractices => "Best Practices",
            RuleCategory::StylisticIssues => "Stylistic Issues",
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of a rule.
#[derive(Debug, Serialize)]
pub struct RuleMeta {
    /// Name without the plugin prefix (`promise-must-complete`)
    pub name: &'static str,
    pub description: &'static str,
    pub category: RuleCategory,
    /// Enabled as an error by the `recommended` preset
    pub recommended: bool,
}

/// A lint rule.
///
/// `create` registers traversal handlers for one file. Handlers receive the
/// file's [`RuleContext`] as traversal state and report through it. Rules
/// hold no mutable state, so one instance serves every file and thread.
pub trait Rule: Send + Sync {
    fn meta(&self) -> &'static RuleMeta;

    fn create<'r, 'c>(&'r self, registry: &mut HandlerRegistry<'r, RuleContext<'c>>);
}

/// Configured severity of a rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleSeverity {
    #[default]
    Off,
    Warn,
    Error,
}

impl RuleSeverity {
    /// Numeric level as used in config files (`0`, `1`, `2`).
    pub fn from_level(level: u64) -> Option<RuleSeverity> {
        match level {
            0 => Some(RuleSeverity::Off),
            1 => Some(RuleSeverity::Warn),
            2 => Some(RuleSeverity::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RuleSeverity::Off => "off",
            RuleSeverity::Warn => "warn",
            RuleSeverity::Error => "error",
        }
    }

    /// The diagnostic severity for an enabled rule, `None` when off.
    pub fn diagnostic_severity(self) -> Option<DiagnosticSeverity> {
        match self {
            RuleSeverity::Off => None,
            RuleSeverity::Warn => Some(DiagnosticSeverity::Warning),
            RuleSeverity::Error => Some(DiagnosticSeverity::Error),
        }
    }
}

impl fmt::Display for RuleSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a severity that is neither a known name nor level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InvalidSeverity(pub String);

impl fmt::Display for InvalidSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid severity `{}` (expected off, warn, error, 0, 1 or 2)",
            self.0
        )
    }
}

impl std::error::Error for InvalidSeverity {}

impl FromStr for RuleSeverity {
    type Err = InvalidSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "off" => Ok(RuleSeverity::Off),
            "warn" | "warning" => Ok(RuleSeverity::Warn),
            "error" => Ok(RuleSeverity::Error),
            other => other
                .parse::<u64>()
                .ok()
                .and_then(RuleSeverity::from_level)
                .ok_or_else(|| InvalidSeverity(s.to_string())),
        }
    }
}
