//! Rule sets: named extraction rules applied to tagged text
//!
//! A [`RulesetModule`] is built once from a rule file (or an embedded rule
//! set) and is immutable afterwards, so one instance can serve any number of
//! threads. Each call to [`RulesetModule::process_tag`] tokenizes the tag
//! text once, runs every rule over the tokens and hands the candidates to the
//! caller's [`ExtractionContext`], which resolves overlaps.

pub(crate) mod config;
pub(crate) mod loader;
pub(crate) mod normalize;

pub use config::{ConstraintConfig, Metadata, RuleClasses, RuleConfig, RulesetConfig};
pub use loader::BUILTIN_RULESETS;
pub use normalize::Normalizer;

use crate::extraction::{CharInterval, Extraction, ExtractionContext};
use crate::matcher::{Match, PatternMatcher};
use crate::pattern::Pattern;
use crate::tag::TagData;
use crate::tokenizer::Tokenizer;
use std::collections::BTreeMap;

/// One compiled rule of an extraction class
#[derive(Debug, Clone)]
pub struct Rule {
    class: String,
    name: String,
    priority: i32,
    matcher: PatternMatcher,
    attributes: BTreeMap<String, String>,
    normalizer: Option<Normalizer>,
}

impl Rule {
    /// Create a rule from already built patterns
    pub fn new(
        class: impl Into<String>,
        name: impl Into<String>,
        priority: i32,
        patterns: Vec<Pattern>,
    ) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            priority,
            matcher: PatternMatcher::new(patterns),
            attributes: BTreeMap::new(),
            normalizer: None,
        }
    }

    /// Static attributes added to every extraction
    pub fn with_attributes(mut self, attributes: BTreeMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Normaliser applied to every extraction
    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Extraction class
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Rule name used in annotations
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Priority for overlap resolution
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Alternative patterns in order
    pub fn patterns(&self) -> &[Pattern] {
        self.matcher.patterns()
    }

    fn to_extraction(&self, m: Match, locator: &str) -> Extraction {
        let mut attributes = self.attributes.clone();
        for capture in &m.captures {
            attributes.insert(capture.name.clone(), capture.text.clone());
        }
        if let Some(normalizer) = self.normalizer {
            normalizer.apply(&m.text, &mut attributes);
        }

        let mut extraction = Extraction::new(
            self.class.as_str(),
            m.text,
            CharInterval::new(m.start, m.end),
            self.priority,
        )
        .with_annotation(format!("{} @ {locator}", self.name));
        extraction.attributes = attributes;
        extraction
    }
}

/// A loaded, immutable set of extraction rules
#[derive(Debug, Clone)]
pub struct RulesetModule {
    name: String,
    description: Option<String>,
    rules: Vec<Rule>,
    tokenizer: Tokenizer,
}

impl RulesetModule {
    /// Assemble a module from compiled rules
    pub fn new(name: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            name: name.into(),
            description: None,
            rules,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Use a differently configured tokenizer
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Rule set name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Optional description from the rule file
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// All rules in evaluation order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Distinct extraction classes, sorted
    pub fn classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = self.rules.iter().map(Rule::class).collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Run every rule over `tag` and add the results to `context`
    ///
    /// Returns how many extractions were accepted.
    pub fn process_tag<T: TagData + ?Sized>(
        &self,
        tag: &T,
        context: &mut ExtractionContext,
    ) -> usize {
        let text = tag.text();
        if text.is_empty() {
            return 0;
        }

        let tokens = self.tokenizer.tokenize(text);
        let locator = tag.locator();
        let candidates: Vec<Extraction> = self
            .rules
            .iter()
            .flat_map(|rule| {
                rule.matcher
                    .find_in_tokens(text, &tokens)
                    .into_iter()
                    .map(|m| rule.to_extraction(m, &locator))
                    .collect::<Vec<_>>()
            })
            .collect();

        let offered = candidates.len();
        let accepted = context.add_all(candidates);
        tracing::debug!(
            ruleset = %self.name,
            tag = %locator,
            tokens = tokens.len(),
            offered,
            accepted,
            "processed tag"
        );
        accepted
    }

    /// Convenience wrapper for a single text
    pub fn process_text(&self, text: &str) -> Vec<Extraction> {
        let mut context = ExtractionContext::new();
        self.process_tag(text, &mut context);
        context.into_extractions()
    }

    /// One context per tag, processed in parallel
    #[cfg(feature = "parallel")]
    pub fn process_batch<T: TagData + Sync>(&self, tags: &[T]) -> Vec<ExtractionContext> {
        use rayon::prelude::*;

        tags.par_iter().map(|tag| self.process_one(tag)).collect()
    }

    /// One context per tag
    #[cfg(not(feature = "parallel"))]
    pub fn process_batch<T: TagData + Sync>(&self, tags: &[T]) -> Vec<ExtractionContext> {
        tags.iter().map(|tag| self.process_one(tag)).collect()
    }

    fn process_one<T: TagData>(&self, tag: &T) -> ExtractionContext {
        let mut context = ExtractionContext::new();
        self.process_tag(tag, &mut context);
        context
    }
}
