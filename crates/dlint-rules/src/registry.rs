//! Table of built-in rules.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

use crate::rule::{Rule, RuleSeverity};
use crate::rules::PromiseMustComplete;

/// Prefix under which the plugin's rules are configured (`desktop/<name>`).
pub const PLUGIN_PREFIX: &str = "desktop/";

static PROMISE_MUST_COMPLETE: PromiseMustComplete = PromiseMustComplete;

static BUILTIN: Lazy<RuleRegistry> = Lazy::new(|| {
    let mut registry = RuleRegistry::default();
    registry.register(&PROMISE_MUST_COMPLETE);
    registry
});

/// Rules addressable by name.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<&'static dyn Rule>,
    by_name: FxHashMap<&'static str, usize>,
}

impl RuleRegistry {
    /// The registry of every built-in rule.
    pub fn builtin() -> &'static RuleRegistry {
        &BUILTIN
    }

    pub fn register(&mut self, rule: &'static dyn Rule) {
        let name = rule.meta().name;
        match self.by_name.get(name) {
            Some(&slot) => self.rules[slot] = rule,
            None => {
                self.by_name.insert(name, self.rules.len());
                self.rules.push(rule);
            }
        }
    }

    /// Look up a rule, with or without the `desktop/` prefix.
    pub fn get(&self, name: &str) -> Option<&'static dyn Rule> {
        let name = name.strip_prefix(PLUGIN_PREFIX).unwrap_or(name);
        self.by_name.get(name).map(|&slot| self.rules[slot])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &'static dyn Rule> + '_ {
        self.rules.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The `recommended` preset: every recommended rule as an error.
    pub fn recommended(&self) -> Vec<(&'static dyn Rule, RuleSeverity)> {
        self.iter()
            .filter(|rule| rule.meta().recommended)
            .map(|rule| (rule, RuleSeverity::Error))
            .collect()
    }
}
