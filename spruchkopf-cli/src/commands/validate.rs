//! Validate command implementation

use anyhow::Result;
use clap::Args;
use spruchkopf_core::RulesetModule;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the rule file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub rules: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating rule file: {}", self.rules.display());

        match RulesetModule::from_file(&self.rules) {
            Ok(module) => {
                println!("✓ Rule file is valid!");
                println!("  Rule set: {}", module.name());
                if let Some(description) = module.description() {
                    println!("  Description: {description}");
                }
                println!("  Rules: {}", module.rule_count());
                for class in module.classes() {
                    let count = module.rules().iter().filter(|r| r.class() == class).count();
                    println!("  - {class}: {count} rule(s)");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Rule file is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
