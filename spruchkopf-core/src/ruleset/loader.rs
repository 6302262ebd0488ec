//! Rule set loading
//!
//! Builds [`RulesetModule`]s from rule files, strings and the embedded rule
//! sets. Every problem is reported here; a returned module is fully compiled.

use super::config::RulesetConfig;
use super::normalize::Normalizer;
use super::{Rule, RulesetModule};
use crate::error::RulesetError;
use crate::pattern::Pattern;
use std::path::Path;

/// Embedded rule sets: name → TOML source
pub const BUILTIN_RULESETS: &[(&str, &str)] = &[(
    "german-legal",
    include_str!("../../rules/german_legal.toml"),
)];

impl RulesetModule {
    /// Load a rule file; `.json` files are parsed as JSON, all others as TOML
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RulesetError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| RulesetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let name = path.display().to_string();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        tracing::debug!(path = %name, json = is_json, "loading rule file");
        if is_json {
            Self::from_json_str(&content, &name)
        } else {
            Self::from_toml_str(&content, &name)
        }
    }

    /// Parse a TOML rule set; `origin` is used in error messages
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, RulesetError> {
        let config: RulesetConfig = toml::from_str(source).map_err(|source| RulesetError::Toml {
            name: origin.to_string(),
            source,
        })?;
        Self::from_config(&config)
    }

    /// Parse a JSON rule set; `origin` is used in error messages
    pub fn from_json_str(source: &str, origin: &str) -> Result<Self, RulesetError> {
        let config: RulesetConfig =
            serde_json::from_str(source).map_err(|source| RulesetError::Json {
                name: origin.to_string(),
                source,
            })?;
        Self::from_config(&config)
    }

    /// Load an embedded rule set by name
    pub fn builtin(name: &str) -> Result<Self, RulesetError> {
        let (_, source) = BUILTIN_RULESETS
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .ok_or_else(|| RulesetError::UnknownRuleset(name.to_string()))?;
        Self::from_toml_str(source, name)
    }

    /// Names of the embedded rule sets
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_RULESETS.iter().map(|(name, _)| *name)
    }

    /// Compile a parsed configuration
    pub fn from_config(config: &RulesetConfig) -> Result<Self, RulesetError> {
        config.validate()?;

        let mut rules = Vec::new();
        for (class, entries) in config.rules.iter() {
            for (idx, entry) in entries.iter().enumerate() {
                let rule_name = entry.display_name(class, idx);
                let rule_location = format!("{class}/{rule_name}");

                let mut patterns = Vec::with_capacity(entry.patterns.len());
                for (p_idx, raw_pattern) in entry.patterns.iter().enumerate() {
                    let pattern_location = format!("{rule_location}/pattern {p_idx}");
                    let constraints = raw_pattern
                        .iter()
                        .enumerate()
                        .map(|(c_idx, raw)| {
                            raw.to_constraint(&format!("{pattern_location}/constraint {c_idx}"))
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    let pattern = Pattern::of_constraints(constraints).map_err(|source| {
                        RulesetError::InvalidPattern {
                            location: pattern_location.clone(),
                            source,
                        }
                    })?;
                    patterns.push(pattern);
                }

                let mut rule = Rule::new(class, rule_name, entry.priority, patterns)
                    .with_attributes(entry.attributes.clone());
                if let Some(raw) = &entry.normalize {
                    let normalizer: Normalizer =
                        raw.parse().map_err(|reason| RulesetError::InvalidRule {
                            location: rule_location.clone(),
                            reason,
                        })?;
                    rule = rule.with_normalizer(normalizer);
                }
                rules.push(rule);
            }
        }

        if rules.is_empty() {
            tracing::warn!(ruleset = %config.metadata.name, "rule set defines no rules");
        }
        tracing::debug!(
            ruleset = %config.metadata.name,
            rules = rules.len(),
            "compiled rule set"
        );

        let module = RulesetModule::new(config.metadata.name.as_str(), rules);
        Ok(match &config.metadata.description {
            Some(description) => module.with_description(description.as_str()),
            None => module,
        })
    }
}
