//! Token patterns

use crate::constraint::TokenConstraint;
use crate::error::PatternError;
use std::fmt;

/// An ordered, non-empty sequence of constraints
#[derive(Debug, Clone)]
pub struct Pattern {
    constraints: Vec<TokenConstraint>,
}

impl Pattern {
    /// Build a pattern; fails only when `constraints` is empty
    pub fn of_constraints(constraints: Vec<TokenConstraint>) -> Result<Self, PatternError> {
        if constraints.is_empty() {
            return Err(PatternError::EmptyPattern);
        }
        Ok(Self { constraints })
    }

    /// The constraints in order
    pub fn constraints(&self) -> &[TokenConstraint] {
        &self.constraints
    }

    /// Number of constraints
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// Always false for a constructed pattern
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Capture names declared by this pattern, in order
    pub fn capture_names(&self) -> impl Iterator<Item = &str> {
        self.constraints.iter().filter_map(|c| c.capture_name())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, constraint) in self.constraints.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{constraint}")?;
        }
        Ok(())
    }
}
