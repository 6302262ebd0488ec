//! Layered error types
//!
//! Load-time problems are reported as [`RulesetError`], construction problems
//! of hand-built patterns as [`PatternError`]. Matching itself never fails.

use thiserror::Error;

/// Errors raised while assembling constraints and patterns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// A pattern needs at least one constraint
    #[error("pattern must contain at least one constraint")]
    EmptyPattern,

    /// A regex constraint could not be compiled
    #[error("invalid regex '{pattern}': {reason}")]
    InvalidRegex {
        /// The regex source as written in the rule
        pattern: String,
        /// Compiler message
        reason: String,
    },

    /// An `IN` constraint without members can never match
    #[error("IN constraint must list at least one value")]
    EmptyMembership,
}

/// Errors raised while loading a rule set
#[derive(Error, Debug)]
pub enum RulesetError {
    /// The rule file could not be read
    #[error("failed to read rule file '{path}': {source}")]
    Io {
        /// Path of the rule file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The rule file is not valid TOML
    #[error("failed to parse TOML rule set '{name}': {source}")]
    Toml {
        /// Rule set name or path
        name: String,
        /// Parser error
        #[source]
        source: toml::de::Error,
    },

    /// The rule file is not valid JSON
    #[error("failed to parse JSON rule set '{name}': {source}")]
    Json {
        /// Rule set name or path
        name: String,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// A constraint definition is malformed
    #[error("invalid constraint in {location}: {reason}")]
    InvalidConstraint {
        /// `class/rule/pattern/constraint` position
        location: String,
        /// What is wrong with it
        reason: String,
    },

    /// A pattern could not be built
    #[error("invalid pattern in {location}: {source}")]
    InvalidPattern {
        /// `class/rule/pattern` position
        location: String,
        /// Construction error
        #[source]
        source: PatternError,
    },

    /// A rule entry is malformed
    #[error("invalid rule {location}: {reason}")]
    InvalidRule {
        /// `class/rule` position
        location: String,
        /// What is wrong with it
        reason: String,
    },

    /// No embedded rule set with that name
    #[error("unknown built-in rule set: {0}")]
    UnknownRuleset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_display() {
        assert_eq!(
            PatternError::EmptyPattern.to_string(),
            "pattern must contain at least one constraint"
        );
        let err = PatternError::InvalidRegex {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert_eq!(err.to_string(), "invalid regex '(': unclosed group");
    }

    #[test]
    fn test_ruleset_error_carries_location() {
        let err = RulesetError::InvalidConstraint {
            location: "date/date_long/pattern 0/constraint 2".to_string(),
            reason: "unknown constraint key 'FOO'".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("date/date_long/pattern 0/constraint 2"));
        assert!(msg.contains("FOO"));
    }
}
