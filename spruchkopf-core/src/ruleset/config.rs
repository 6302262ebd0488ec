//! Rule file schema and validation
//!
//! This module defines the TOML/JSON schema for rule sets and turns the
//! loosely typed constraint tables into [`TokenConstraint`] values.

use crate::constraint::{Quantifier, TokenConstraint};
use crate::error::RulesetError;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Root rule set configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RulesetConfig {
    /// Name and description of the rule set
    pub metadata: Metadata,
    /// Extraction classes with their rule entries, in file order
    #[serde(default)]
    pub rules: RuleClasses,
}

/// Rule set metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    /// Rule set name, used in logs and annotations
    pub name: String,
    /// Free-form description shown by `list` and `validate`
    #[serde(default)]
    pub description: Option<String>,
}

/// Extraction class → rule entries, kept in declaration order
///
/// Rules run in this order, so it decides between candidates that tie on
/// priority, start and length.
#[derive(Debug, Clone, Default)]
pub struct RuleClasses(Vec<(String, Vec<RuleConfig>)>);

impl RuleClasses {
    /// Classes and their entries in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleConfig])> {
        self.0
            .iter()
            .map(|(class, entries)| (class.as_str(), entries.as_slice()))
    }

    /// Entries of one class
    pub fn get(&self, class: &str) -> Option<&[RuleConfig]> {
        self.iter()
            .find(|(name, _)| *name == class)
            .map(|(_, entries)| entries)
    }

    /// Number of classes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no class is declared
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RuleClasses {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (class, entries) in &self.0 {
            map.serialize_entry(class, entries)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RuleClasses {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ClassesVisitor;

        impl<'de> Visitor<'de> for ClassesVisitor {
            type Value = RuleClasses;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a table of extraction classes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RuleClasses, A::Error> {
                let mut classes: Vec<(String, Vec<RuleConfig>)> = Vec::new();
                while let Some((class, entries)) = access.next_entry::<String, Vec<RuleConfig>>()? {
                    if classes.iter().any(|(seen, _)| *seen == class) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate extraction class '{class}'"
                        )));
                    }
                    classes.push((class, entries));
                }
                Ok(RuleClasses(classes))
            }
        }

        deserializer.deserialize_map(ClassesVisitor)
    }
}

/// One rule entry of an extraction class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Defaults to `<class>#<n>`
    #[serde(default)]
    pub name: Option<String>,
    /// Higher wins when extractions overlap
    #[serde(default)]
    pub priority: i32,
    /// Alternative constraint sequences, tried in order
    pub patterns: Vec<Vec<ConstraintConfig>>,
    /// Attributes copied onto every extraction of this rule
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    /// Value normaliser applied after captures are collected
    #[serde(default)]
    pub normalize: Option<String>,
}

/// A constraint as written in a rule file
///
/// Either a bare string (exact text) or a table with one predicate key and
/// optional `OP`, `GREEDY` and `CAPTURE` modifiers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConstraintConfig {
    /// Exact token text
    Text(String),
    /// Predicate key plus modifiers
    Table(BTreeMap<String, Value>),
}

const MODIFIER_KEYS: &[&str] = &["OP", "GREEDY", "CAPTURE"];

impl RulesetConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), RulesetError> {
        if self.metadata.name.trim().is_empty() {
            return Err(RulesetError::InvalidRule {
                location: "metadata".to_string(),
                reason: "rule set name must not be empty".to_string(),
            });
        }

        for (class, entries) in self.rules.iter() {
            if class.trim().is_empty() {
                return Err(RulesetError::InvalidRule {
                    location: "rules".to_string(),
                    reason: "extraction class name must not be empty".to_string(),
                });
            }
            for (idx, entry) in entries.iter().enumerate() {
                if entry.patterns.is_empty() {
                    return Err(RulesetError::InvalidRule {
                        location: format!("{class}/{}", entry.display_name(class, idx)),
                        reason: "rule declares no patterns".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl RuleConfig {
    /// Name used in annotations and error messages
    pub fn display_name(&self, class: &str, idx: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("{class}#{}", idx + 1))
    }
}

impl ConstraintConfig {
    /// Build the constraint, reporting problems against `location`
    pub fn to_constraint(&self, location: &str) -> Result<TokenConstraint, RulesetError> {
        let table = match self {
            ConstraintConfig::Text(text) => return Ok(TokenConstraint::text(text.as_str())),
            ConstraintConfig::Table(table) => table,
        };
        let invalid = |reason: String| RulesetError::InvalidConstraint {
            location: location.to_string(),
            reason,
        };

        let mut predicates = Vec::new();
        for key in table.keys() {
            if MODIFIER_KEYS.contains(&key.as_str()) {
                continue;
            }
            if !is_predicate_key(key) {
                return Err(invalid(format!("unknown constraint key '{key}'")));
            }
            predicates.push(key.as_str());
        }
        let key = match predicates.as_slice() {
            [key] => *key,
            [] => return Err(invalid("no predicate key given".to_string())),
            many => {
                return Err(invalid(format!(
                    "exactly one predicate key allowed, found {}",
                    many.join(", ")
                )))
            }
        };
        let value = &table[key];

        let constraint = match key {
            "TEXT" => TokenConstraint::text(expect_str(key, value).map_err(invalid)?),
            "LOWER" => TokenConstraint::lower(expect_str(key, value).map_err(invalid)?),
            "SHAPE" => TokenConstraint::shape(expect_str(key, value).map_err(invalid)?),
            "REGEX" => TokenConstraint::regex(expect_str(key, value).map_err(invalid)?)
                .map_err(|e| invalid(e.to_string()))?,
            "IN" => {
                let values = expect_str_list(key, value).map_err(invalid)?;
                TokenConstraint::one_of(values).map_err(|e| invalid(e.to_string()))?
            }
            flag => {
                expect_true(flag, value).map_err(invalid)?;
                match flag {
                    "IS_DIGIT" => TokenConstraint::is_digit(),
                    "IS_ALPHA" => TokenConstraint::is_alpha(),
                    "IS_TITLE" => TokenConstraint::is_title(),
                    "NEWLINE" => TokenConstraint::newline(),
                    _ => TokenConstraint::any_to_end(),
                }
            }
        };

        let constraint = match quantifier(table).map_err(invalid)? {
            Some(Quantifier::Optional) if key == "ANY_TO_END" => {
                return Err(invalid("ANY_TO_END cannot be optional".to_string()))
            }
            Some(q) => constraint.with_quantifier(q),
            None => constraint,
        };

        match table.get("CAPTURE") {
            None => Ok(constraint),
            Some(Value::String(name)) if !name.is_empty() => Ok(constraint.capture(name.as_str())),
            Some(_) => Err(invalid("CAPTURE must be a non-empty string".to_string())),
        }
    }
}

fn is_predicate_key(key: &str) -> bool {
    matches!(
        key,
        "TEXT"
            | "LOWER"
            | "REGEX"
            | "IN"
            | "IS_DIGIT"
            | "IS_ALPHA"
            | "IS_TITLE"
            | "SHAPE"
            | "NEWLINE"
            | "ANY_TO_END"
    )
}

fn expect_str<'a>(key: &str, value: &'a Value) -> Result<&'a str, String> {
    value
        .as_str()
        .ok_or_else(|| format!("{key} expects a string"))
}

fn expect_str_list(key: &str, value: &Value) -> Result<Vec<String>, String> {
    let items = value
        .as_array()
        .ok_or_else(|| format!("{key} expects a list of strings"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| format!("{key} expects a list of strings"))
        })
        .collect()
}

fn expect_true(key: &str, value: &Value) -> Result<(), String> {
    match value {
        Value::Bool(true) => Ok(()),
        _ => Err(format!("{key} must be set to true")),
    }
}

fn quantifier(table: &BTreeMap<String, Value>) -> Result<Option<Quantifier>, String> {
    let optional = match table.get("OP") {
        None => false,
        Some(Value::String(op)) if op == "?" => true,
        Some(other) => return Err(format!("unsupported quantifier {other}, expected \"?\"")),
    };
    let greedy = match table.get("GREEDY") {
        None => false,
        Some(Value::Bool(flag)) => *flag,
        Some(_) => return Err("GREEDY must be a boolean".to_string()),
    };
    match (optional, greedy) {
        (true, true) => Err("OP and GREEDY cannot be combined".to_string()),
        (true, false) => Ok(Some(Quantifier::Optional)),
        (false, true) => Ok(Some(Quantifier::Greedy)),
        (false, false) => Ok(None),
    }
}
