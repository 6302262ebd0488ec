//! Per-token predicates
//!
//! A [`TokenConstraint`] pairs exactly one [`Predicate`] with a
//! [`Quantifier`] and an optional capture name. Constraints are built once
//! when a pattern is assembled and evaluated many times afterwards.

use crate::error::PatternError;
use crate::token::Token;
use regex::Regex;
use std::collections::HashSet;
use std::fmt;

/// The test a constraint applies to a single token
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Exact, case-sensitive text
    Text(String),
    /// Lowercased token text equals the (lowercased) value
    Lower(String),
    /// Whole-token regex match
    Regex(AnchoredRegex),
    /// Case-sensitive membership
    In(HashSet<String>),
    /// All characters are digits
    IsDigit,
    /// All characters are letters
    IsAlpha,
    /// Title-case word
    IsTitle,
    /// Shape signature equals the value
    Shape(String),
    /// The newline token
    Newline,
    /// Any token, newlines included
    AnyToEnd,
}

impl Predicate {
    /// Evaluate against one token
    pub fn matches(&self, token: &Token) -> bool {
        match self {
            Predicate::Text(value) => token.text() == value,
            Predicate::Lower(value) => token.lower() == value,
            Predicate::Regex(re) => re.is_match(token.text()),
            Predicate::In(values) => values.contains(token.text()),
            Predicate::IsDigit => token.is_digit(),
            Predicate::IsAlpha => token.is_alpha(),
            Predicate::IsTitle => token.is_title(),
            Predicate::Shape(shape) => token.shape() == shape,
            Predicate::Newline => token.is_newline(),
            Predicate::AnyToEnd => true,
        }
    }

    /// Key used for this predicate in rule files
    pub fn key(&self) -> &'static str {
        match self {
            Predicate::Text(_) => "TEXT",
            Predicate::Lower(_) => "LOWER",
            Predicate::Regex(_) => "REGEX",
            Predicate::In(_) => "IN",
            Predicate::IsDigit => "IS_DIGIT",
            Predicate::IsAlpha => "IS_ALPHA",
            Predicate::IsTitle => "IS_TITLE",
            Predicate::Shape(_) => "SHAPE",
            Predicate::Newline => "NEWLINE",
            Predicate::AnyToEnd => "ANY_TO_END",
        }
    }
}

/// A regex that must match the entire token text
#[derive(Debug, Clone)]
pub struct AnchoredRegex {
    source: String,
    compiled: Regex,
}

impl AnchoredRegex {
    /// Compile `source`, wrapped in `^(?:...)$`
    pub fn new(source: &str) -> Result<Self, PatternError> {
        let compiled =
            Regex::new(&format!("^(?:{source})$")).map_err(|e| PatternError::InvalidRegex {
                pattern: source.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            source: source.to_string(),
            compiled,
        })
    }

    /// The regex as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whole-string match
    pub fn is_match(&self, text: &str) -> bool {
        self.compiled.is_match(text)
    }
}

/// How many tokens a constraint consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quantifier {
    /// Exactly one token
    #[default]
    One,
    /// Zero or one token (`"?"`)
    Optional,
    /// One or more tokens, as many as possible
    Greedy,
}

/// One element of a [`Pattern`](crate::Pattern)
#[derive(Debug, Clone)]
pub struct TokenConstraint {
    predicate: Predicate,
    quantifier: Quantifier,
    capture: Option<String>,
}

impl TokenConstraint {
    /// Wrap a predicate with the default quantifier
    pub fn new(predicate: Predicate) -> Self {
        let quantifier = match predicate {
            Predicate::AnyToEnd => Quantifier::Greedy,
            _ => Quantifier::One,
        };
        Self {
            predicate,
            quantifier,
            capture: None,
        }
    }

    /// `TEXT(value)`
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Predicate::Text(value.into()))
    }

    /// `LOWER(value)`; the value is lowercased here
    pub fn lower(value: impl AsRef<str>) -> Self {
        Self::new(Predicate::Lower(value.as_ref().to_lowercase()))
    }

    /// `REGEX(pattern)`
    pub fn regex(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self::new(Predicate::Regex(AnchoredRegex::new(pattern)?)))
    }

    /// `IN(values)`
    pub fn one_of<I, S>(values: I) -> Result<Self, PatternError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: HashSet<String> = values.into_iter().map(Into::into).collect();
        if set.is_empty() {
            return Err(PatternError::EmptyMembership);
        }
        Ok(Self::new(Predicate::In(set)))
    }

    /// `IS_DIGIT`
    pub fn is_digit() -> Self {
        Self::new(Predicate::IsDigit)
    }

    /// `IS_ALPHA`
    pub fn is_alpha() -> Self {
        Self::new(Predicate::IsAlpha)
    }

    /// `IS_TITLE`
    pub fn is_title() -> Self {
        Self::new(Predicate::IsTitle)
    }

    /// `SHAPE(signature)`
    pub fn shape(signature: impl Into<String>) -> Self {
        Self::new(Predicate::Shape(signature.into()))
    }

    /// `NEWLINE`
    pub fn newline() -> Self {
        Self::new(Predicate::Newline)
    }

    /// `ANY_TO_END`
    pub fn any_to_end() -> Self {
        Self::new(Predicate::AnyToEnd)
    }

    /// Make the constraint optional
    pub fn optional(self) -> Self {
        self.with_quantifier(Quantifier::Optional)
    }

    /// Let the constraint consume a run of matching tokens
    pub fn greedy(self) -> Self {
        self.with_quantifier(Quantifier::Greedy)
    }

    /// Set the quantifier explicitly
    pub fn with_quantifier(mut self, quantifier: Quantifier) -> Self {
        self.quantifier = quantifier;
        self
    }

    /// Record the consumed tokens under `name`
    pub fn capture(mut self, name: impl Into<String>) -> Self {
        self.capture = Some(name.into());
        self
    }

    /// The predicate
    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// The quantifier
    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Capture name, if any
    pub fn capture_name(&self) -> Option<&str> {
        self.capture.as_deref()
    }

    /// Evaluate the predicate against one token
    #[inline]
    pub fn matches(&self, token: &Token) -> bool {
        self.predicate.matches(token)
    }
}

impl fmt::Display for TokenConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.predicate {
            Predicate::Text(v) | Predicate::Lower(v) | Predicate::Shape(v) => {
                write!(f, "{}({v:?})", self.predicate.key())?
            }
            Predicate::Regex(re) => write!(f, "REGEX({:?})", re.as_str())?,
            Predicate::In(values) => {
                let mut sorted: Vec<&String> = values.iter().collect();
                sorted.sort();
                write!(f, "IN({sorted:?})")?
            }
            other => write!(f, "{}", other.key())?,
        }
        match self.quantifier {
            Quantifier::Optional => write!(f, "?"),
            Quantifier::Greedy if !matches!(self.predicate, Predicate::AnyToEnd) => {
                write!(f, "+")
            }
            _ => Ok(()),
        }
    }
}
