//! CLI command implementations

use clap::Subcommand;

pub mod generate_rules;
pub mod list;
pub mod process;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract legal entities from text files
    Process(process::ProcessArgs),

    /// Check that a rule file loads
    Validate(validate::ValidateArgs),

    /// Write a starter rule file
    GenerateRules(generate_rules::GenerateRulesArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List built-in rule sets
    Rulesets,

    /// List the extraction classes of a rule set
    Classes(list::ClassesArgs),

    /// List available output formats
    Formats,
}
