//! Rule-based entity extraction for German legal documents
//!
//! This crate recognises structured legal entities (courts, document types,
//! decision dates, file numbers) in short text fragments such as the header
//! lines of case-law documents. It is built from three layers:
//!
//! - **Tokenizer**: splits text into positioned [`Token`]s with derived
//!   lexical properties (case, digits, shape signature)
//! - **Pattern matching**: a [`Pattern`] is a sequence of [`TokenConstraint`]s
//!   with optional and greedy quantifiers; the [`PatternMatcher`] finds
//!   non-overlapping matches with backtracking
//! - **Rule sets**: a [`RulesetModule`] loads named extraction rules from
//!   TOML or JSON, applies them to tagged text and collects [`Extraction`]s
//!   in an [`ExtractionContext`] that resolves overlaps by priority
//!
//! # Example
//!
//! ```rust
//! use spruchkopf_core::{ExtractionContext, RulesetModule, TextLine};
//!
//! let rules = RulesetModule::builtin("german-legal").unwrap();
//! let line = TextLine::new(1, "BGH, Beschluss vom 24. Dezember 2023 - II ZR 1/22");
//!
//! let mut context = ExtractionContext::new();
//! rules.process_tag(&line, &mut context);
//!
//! let date = context.first("date").unwrap();
//! assert_eq!(date.extraction_text, "24. Dezember 2023");
//! assert_eq!(date.attribute("iso_date"), Some("2023-12-24"));
//! assert_eq!(context.first("file_number").unwrap().extraction_text, "II ZR 1/22");
//! ```

#![warn(missing_docs)]

pub mod constraint;
pub mod error;
pub mod extraction;
pub mod matcher;
pub mod pattern;
pub mod ruleset;
pub mod tag;
pub mod token;
pub mod tokenizer;

pub use constraint::{AnchoredRegex, Predicate, Quantifier, TokenConstraint};
pub use error::{PatternError, RulesetError};
pub use extraction::{CharInterval, Extraction, ExtractionContext};
pub use matcher::{match_at, Capture, Match, PatternHit, PatternMatcher};
pub use pattern::Pattern;
pub use ruleset::{Normalizer, Rule, RulesetModule};
pub use tag::{TagData, TextLine};
pub use token::Token;
pub use tokenizer::{tokenize, Tokenizer};
