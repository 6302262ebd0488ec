//! Rule set source selection for the CLI

use crate::error::CliError;
use anyhow::Result;
use spruchkopf_core::RulesetModule;
use std::path::PathBuf;

/// Name of the rule set used when nothing else is configured
pub const DEFAULT_RULESET: &str = "german-legal";

/// Where the extraction rules come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesSource {
    /// Rule set embedded in the library
    BuiltIn(String),
    /// TOML or JSON rule file
    External(PathBuf),
}

impl RulesSource {
    /// Pick a source: an explicit file wins over a named rule set, which
    /// wins over the configured default
    pub fn resolve(
        file: Option<PathBuf>,
        builtin: Option<String>,
        configured_file: Option<PathBuf>,
        configured_builtin: &str,
    ) -> Self {
        match (file, builtin, configured_file) {
            (Some(path), _, _) => RulesSource::External(path),
            (None, Some(name), _) => RulesSource::BuiltIn(name),
            (None, None, Some(path)) => RulesSource::External(path),
            (None, None, None) => RulesSource::BuiltIn(configured_builtin.to_string()),
        }
    }

    /// Get the display name for the rules source
    pub fn display_name(&self) -> String {
        match self {
            RulesSource::BuiltIn(name) => format!("Built-in: {name}"),
            RulesSource::External(path) => format!("External: {}", path.display()),
        }
    }

    /// Load and compile the rule set
    pub fn load(&self) -> Result<RulesetModule> {
        let module = match self {
            RulesSource::BuiltIn(name) => RulesetModule::builtin(name),
            RulesSource::External(path) => RulesetModule::from_file(path),
        }
        .map_err(|e| CliError::RulesError(e.to_string()))?;

        log::info!(
            "Loaded rule set '{}' ({} rules) from {}",
            module.name(),
            module.rule_count(),
            self.display_name()
        );
        Ok(module)
    }
}

impl Default for RulesSource {
    fn default() -> Self {
        RulesSource::BuiltIn(DEFAULT_RULESET.to_string())
    }
}
