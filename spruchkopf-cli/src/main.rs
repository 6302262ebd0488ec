//! spruchkopf command-line entry point

use anyhow::Result;
use clap::Parser;
use spruchkopf_cli::commands::{list, Commands};

/// Rule-based entity extraction for German legal documents
#[derive(Debug, Parser)]
#[command(name = "spruchkopf", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::GenerateRules(args) => args.execute(),
        Commands::List { subcommand } => list::execute(&subcommand),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process_command() {
        let cli = Cli::try_parse_from(["spruchkopf", "process", "-i", "a.txt", "-f", "json"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Process(_)));
    }
}
