//! Generate rules command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-rules command
#[derive(Debug, Args)]
pub struct GenerateRulesArgs {
    /// Name of the new rule set
    #[arg(short, long, value_name = "NAME", required = true)]
    pub name: String,

    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateRulesArgs {
    /// Execute the generate-rules command
    pub fn execute(&self) -> Result<()> {
        println!("Generating rule file template...");
        println!("  Rule set: {}", self.name);
        println!("  Output file: {}", self.output.display());

        std::fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Rule file template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the rule file to add your extraction classes");
        println!("2. Validate your rules:");
        println!("   spruchkopf validate --rules {}", self.output.display());
        println!("3. Use them for processing:");
        println!(
            "   spruchkopf process -i input.txt --rules {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template rule file content
    fn generate_template(&self) -> String {
        format!(
            r#"# Rule set {name}
#
# Each [[rules.<class>]] entry adds one rule to an extraction class.
# A pattern is a list of token constraints; a rule may list several
# alternative patterns, tried in order. When extractions overlap, the
# higher priority wins, then the earlier start, then the longer match.
#
# Constraints:
#   "text"                    exact token text
#   {{ LOWER = "bgh" }}         lower-cased token text
#   {{ REGEX = '\d{{4}}' }}       regex that must match the whole token
#   {{ IN = ["AG", "LG"] }}     token text is one of the values
#   {{ IS_DIGIT = true }}, {{ IS_ALPHA = true }}, {{ IS_TITLE = true }}
#   {{ SHAPE = "dd.dd.dddd" }}  X upper, x lower, d digit, others literal
#   {{ NEWLINE = true }}        a line break
#   {{ ANY_TO_END = true }}     every remaining token, across line breaks
# Modifiers:
#   OP = "?"          constraint is optional
#   GREEDY = true     one or more tokens, longest first
#   CAPTURE = "name"  store the matched text as attribute "name"
#
# Normalizers: german_date, uppercase, collapse_whitespace

[metadata]
name = "{name}"
description = "Custom extraction rules"

[[rules.court]]
name = "local_court"
priority = 20
attributes = {{ level = "regional" }}
patterns = [
  [ {{ IN = ["AG", "LG", "OLG"], CAPTURE = "court_type" }}, {{ IS_TITLE = true, CAPTURE = "location" }} ],
]

[[rules.date]]
name = "numeric_date"
priority = 10
normalize = "german_date"
patterns = [
  [ {{ REGEX = '\d{{1,2}}', CAPTURE = "day" }}, ".", {{ REGEX = '\d{{1,2}}', CAPTURE = "month" }}, ".", {{ SHAPE = "dddd", CAPTURE = "year" }} ],
]
"#,
            name = self.name
        )
    }
}
