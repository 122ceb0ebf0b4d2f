//! `.dlintrc.json` loading and rule resolution.
//!
//! ```json
//! {
//!   "extends": "recommended",
//!   "rules": { "promise-must-complete": ["warn", { "ignored": true }] }
//! }
//! ```
//!
//! Without a config file the recommended set is enabled. A config file
//! without `extends` starts from an empty set. `--rule` overrides are
//! applied last.

use dlint_rules::{InvalidSeverity, Rule, RuleRegistry, RuleSeverity};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = ".dlintrc.json";

/// Preset names accepted by `extends`.
const RECOMMENDED_PRESETS: &[&str] = &["recommended", "plugin:desktop/recommended"];

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LintConfig {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub rules: IndexMap<String, RuleSetting>,
}

/// A rule entry: a severity, or an array whose first element is the
/// severity and whose remaining elements are rule options.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RuleSetting {
    Name(String),
    Level(u64),
    WithOptions(Vec<Value>),
}

impl RuleSetting {
    pub fn severity(&self) -> Result<RuleSeverity, InvalidSeverity> {
        match self {
            RuleSetting::Name(name) => name.parse(),
            RuleSetting::Level(level) => {
                RuleSeverity::from_level(*level).ok_or_else(|| InvalidSeverity(level.to_string()))
            }
            RuleSetting::WithOptions(values) => {
                let first = values
                    .first()
                    .ok_or_else(|| InvalidSeverity("[]".to_string()))?;
                if values.len() > 1 {
                    debug!(options = values.len() - 1, "ignoring rule options");
                }
                match first {
                    Value::String(name) => name.parse(),
                    Value::Number(n) => n
                        .as_u64()
                        .and_then(RuleSeverity::from_level)
                        .ok_or_else(|| InvalidSeverity(n.to_string())),
                    other => Err(InvalidSeverity(other.to_string())),
                }
            }
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    UnknownPreset(String),
    UnknownRule(String),
    InvalidSeverity {
        rule: String,
        value: String,
    },
    /// A `--rule` argument without `=`.
    MalformedOverride(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse {}: {}", path.display(), source)
            }
            ConfigError::UnknownPreset(name) => write!(f, "unknown preset '{}' in extends", name),
            ConfigError::UnknownRule(name) => write!(f, "unknown rule '{}'", name),
            ConfigError::InvalidSeverity { rule, value } => write!(
                f,
                "invalid severity '{}' for rule '{}' (expected off, warn, error or 0-2)",
                value, rule
            ),
            ConfigError::MalformedOverride(arg) => {
                write!(f, "invalid --rule '{}' (expected NAME=SEVERITY)", arg)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub fn parse_config(source: &str) -> Result<LintConfig, serde_json::Error> {
    serde_json::from_str(source)
}

pub fn load_config(path: &Path) -> Result<LintConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Nearest `.dlintrc.json` in `cwd` or one of its ancestors.
pub fn find_config(cwd: &Path) -> Option<PathBuf> {
    cwd.ancestors()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|candidate| candidate.is_file())
}

/// Enabled rules after applying the preset, the config's rule table and
/// the command-line overrides, in that order. Rules set to off are kept
/// here; the linter drops them.
pub fn resolve_rules(
    config: Option<&LintConfig>,
    overrides: &[String],
    registry: &RuleRegistry,
) -> Result<Vec<(&'static dyn Rule, RuleSeverity)>, ConfigError> {
    let mut enabled: IndexMap<&'static str, (&'static dyn Rule, RuleSeverity)> = IndexMap::new();

    let preset = match config {
        None => Some("recommended"),
        Some(config) => config.extends.as_deref(),
    };
    if let Some(preset) = preset {
        if !RECOMMENDED_PRESETS.contains(&preset) {
            return Err(ConfigError::UnknownPreset(preset.to_string()));
        }
        for (rule, severity) in registry.recommended() {
            enabled.insert(rule.meta().name, (rule, severity));
        }
    }

    if let Some(config) = config {
        for (name, setting) in &config.rules {
            let rule = lookup(registry, name)?;
            let severity = setting
                .severity()
                .map_err(|InvalidSeverity(value)| ConfigError::InvalidSeverity {
                    rule: name.clone(),
                    value,
                })?;
            enabled.insert(rule.meta().name, (rule, severity));
        }
    }

    for arg in overrides {
        let (name, value) = arg
            .split_once('=')
            .ok_or_else(|| ConfigError::MalformedOverride(arg.clone()))?;
        let name = name.trim();
        let rule = lookup(registry, name)?;
        let severity = value
            .trim()
            .parse()
            .map_err(|InvalidSeverity(value)| ConfigError::InvalidSeverity {
                rule: name.to_string(),
                value,
            })?;
        enabled.insert(rule.meta().name, (rule, severity));
    }

    Ok(enabled.into_values().collect())
}

fn lookup(registry: &RuleRegistry, name: &str) -> Result<&'static dyn Rule, ConfigError> {
    registry
        .get(name)
        .ok_or_else(|| ConfigError::UnknownRule(name.to_string()))
}
