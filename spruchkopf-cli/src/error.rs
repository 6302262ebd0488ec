//! Error handling for the CLI application

use std::fmt;

/// CLI-specific failures that are not library errors
#[derive(Debug)]
pub enum CliError {
    /// No input matched the given patterns
    NoInput(String),
    /// Invalid file pattern
    InvalidPattern(String),
    /// CLI configuration problem
    ConfigError(String),
    /// Rule set could not be loaded
    RulesError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NoInput(what) => write!(f, "No files found matching {what}"),
            CliError::InvalidPattern(pattern) => write!(f, "Invalid file pattern: {pattern}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
            CliError::RulesError(msg) => write!(f, "Rule set error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            CliError::NoInput("'*.txt'".to_string()).to_string(),
            "No files found matching '*.txt'"
        );
        assert_eq!(
            CliError::InvalidPattern("[invalid".to_string()).to_string(),
            "Invalid file pattern: [invalid"
        );
        assert_eq!(
            CliError::ConfigError("unknown format 'xml'".to_string()).to_string(),
            "Configuration error: unknown format 'xml'"
        );
        assert!(CliError::RulesError("x".to_string())
            .to_string()
            .starts_with("Rule set error:"));
    }

    #[test]
    fn test_converts_into_anyhow() {
        let failure: CliResult<()> = Err(CliError::ConfigError("bad".to_string()).into());
        let err = failure.unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
        assert_eq!(err.to_string(), "Configuration error: bad");
    }
}
