//! List command implementation

use super::ListCommands;
use crate::output::OutputFormat;
use crate::rules_source::RulesSource;
use anyhow::Result;
use clap::{Args, ValueEnum};
use spruchkopf_core::RulesetModule;
use std::path::PathBuf;

/// Arguments for `list classes`
#[derive(Debug, Args)]
pub struct ClassesArgs {
    /// Rule file to inspect
    #[arg(short, long, value_name = "FILE", conflicts_with = "ruleset")]
    pub rules: Option<PathBuf>,

    /// Built-in rule set to inspect
    #[arg(long, value_name = "NAME")]
    pub ruleset: Option<String>,
}

/// Execute a list subcommand
pub fn execute(subcommand: &ListCommands) -> Result<()> {
    match subcommand {
        ListCommands::Rulesets => {
            println!("Built-in rule sets:");
            for name in RulesetModule::builtin_names() {
                let module = RulesetModule::builtin(name)?;
                match module.description() {
                    Some(description) => println!("  {name:<16} {description}"),
                    None => println!("  {name}"),
                }
            }
        }
        ListCommands::Classes(args) => {
            let source = match (&args.rules, &args.ruleset) {
                (Some(path), _) => RulesSource::External(path.clone()),
                (None, Some(name)) => RulesSource::BuiltIn(name.clone()),
                (None, None) => RulesSource::default(),
            };
            let module = source.load()?;
            println!("Extraction classes in '{}':", module.name());
            for class in module.classes() {
                let rules: Vec<&str> = module
                    .rules()
                    .iter()
                    .filter(|r| r.class() == class)
                    .map(|r| r.name())
                    .collect();
                println!("  {class:<16} {}", rules.join(", "));
            }
        }
        ListCommands::Formats => {
            println!("Output formats:");
            for format in OutputFormat::value_variants() {
                if let Some(value) = format.to_possible_value() {
                    let help = value.get_help().map(|h| h.to_string()).unwrap_or_default();
                    println!("  {:<10} {help}", value.get_name());
                }
            }
        }
    }
    Ok(())
}
