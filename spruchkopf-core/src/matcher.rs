//! Token-level pattern matching
//!
//! [`PatternMatcher`] scans a token stream left to right. At every token it
//! tries its patterns in order; the first pattern that matches there wins and
//! scanning resumes after the consumed tokens, so matches of one run never
//! overlap.
//!
//! Inside a pattern, optional and greedy constraints are matched by a small
//! backtracking search over `(constraint, token)` positions: the longest
//! choice is tried first and shorter ones only when the rest of the pattern
//! cannot complete.

use crate::constraint::{Quantifier, TokenConstraint};
use crate::pattern::Pattern;
use crate::token::Token;
use crate::tokenizer::tokenize;
use smallvec::SmallVec;
use std::ops::Range;

/// A named sub-span recorded by a capturing constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Capture name from the constraint
    pub name: String,
    /// Character offset of the first captured character
    pub start: usize,
    /// Character offset one past the last captured character
    pub end: usize,
    /// Captured source text
    pub text: String,
}

/// One pattern matched against a contiguous token run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// Character offset of the first matched token
    pub start: usize,
    /// Character offset one past the last matched token
    pub end: usize,
    /// Source text between `start` and `end`
    pub text: String,
    /// Index range of the matched tokens
    pub tokens: Range<usize>,
    /// Which of the matcher's patterns produced this match
    pub pattern_index: usize,
    /// Named captures, in constraint order
    pub captures: SmallVec<[Capture; 4]>,
}

impl Match {
    /// Look up a capture by name
    pub fn capture(&self, name: &str) -> Option<&Capture> {
        self.captures.iter().find(|c| c.name == name)
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-length match (never produced by the matcher)
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Runs a list of alternative patterns over text
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    patterns: Vec<Pattern>,
}

impl PatternMatcher {
    /// Create a matcher; patterns are tried in the order given
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// The patterns in priority order
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Tokenize `text` and return all matches by ascending start
    pub fn find(&self, text: &str) -> Vec<Match> {
        let tokens = tokenize(text);
        self.find_in_tokens(text, &tokens)
    }

    /// Match against tokens previously produced from `text`
    pub fn find_in_tokens(&self, text: &str, tokens: &[Token]) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let hit = self.patterns.iter().enumerate().find_map(|(idx, pattern)| {
                match_at(pattern, tokens, i).map(|hit| (idx, pattern, hit))
            });

            match hit {
                Some((pattern_index, pattern, hit)) => {
                    let captures = collect_captures(pattern, &hit, text, tokens);
                    i = hit.tokens.end;
                    matches.push(hit.into_match(text, tokens, pattern_index, captures));
                }
                None => i += 1,
            }
        }

        matches
    }
}

/// Result of matching one pattern at one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternHit {
    /// Consumed token range (never empty)
    pub tokens: Range<usize>,
    /// Token range consumed by each constraint, in pattern order
    pub consumed: Vec<Range<usize>>,
}

impl PatternHit {
    fn into_match(
        self,
        text: &str,
        tokens: &[Token],
        pattern_index: usize,
        captures: SmallVec<[Capture; 4]>,
    ) -> Match {
        let first = &tokens[self.tokens.start];
        let last = &tokens[self.tokens.end - 1];
        Match {
            start: first.start(),
            end: last.end(),
            text: text[first.byte_range().start..last.byte_range().end].to_string(),
            tokens: self.tokens,
            pattern_index,
            captures,
        }
    }
}

/// Try `pattern` starting exactly at token `start`
///
/// Returns `None` when the pattern fails or would consume no tokens.
pub fn match_at(pattern: &Pattern, tokens: &[Token], start: usize) -> Option<PatternHit> {
    let mut consumed = Vec::with_capacity(pattern.len());
    let end = search(pattern.constraints(), tokens, 0, start, &mut consumed)?;
    if end == start {
        return None;
    }
    Some(PatternHit {
        tokens: start..end,
        consumed,
    })
}

fn search(
    constraints: &[TokenConstraint],
    tokens: &[Token],
    ci: usize,
    ti: usize,
    consumed: &mut Vec<Range<usize>>,
) -> Option<usize> {
    let Some(constraint) = constraints.get(ci) else {
        return Some(ti);
    };
    let holds = |idx: usize| tokens.get(idx).is_some_and(|t| constraint.matches(t));

    match constraint.quantifier() {
        Quantifier::One => {
            if holds(ti) {
                return descend(constraints, tokens, ci, ti..ti + 1, consumed);
            }
            None
        }
        Quantifier::Optional => {
            if holds(ti) {
                if let Some(end) = descend(constraints, tokens, ci, ti..ti + 1, consumed) {
                    return Some(end);
                }
            }
            descend(constraints, tokens, ci, ti..ti, consumed)
        }
        Quantifier::Greedy => {
            let mut run = ti;
            while holds(run) {
                run += 1;
            }
            (ti + 1..=run)
                .rev()
                .find_map(|stop| descend(constraints, tokens, ci, ti..stop, consumed))
        }
    }
}

fn descend(
    constraints: &[TokenConstraint],
    tokens: &[Token],
    ci: usize,
    taken: Range<usize>,
    consumed: &mut Vec<Range<usize>>,
) -> Option<usize> {
    let next = taken.end;
    consumed.push(taken);
    let result = search(constraints, tokens, ci + 1, next, consumed);
    if result.is_none() {
        consumed.pop();
    }
    result
}

/// Fill in captures for a match produced from `pattern`
fn collect_captures(
    pattern: &Pattern,
    hit: &PatternHit,
    text: &str,
    tokens: &[Token],
) -> SmallVec<[Capture; 4]> {
    pattern
        .constraints()
        .iter()
        .zip(&hit.consumed)
        .filter_map(|(constraint, range)| {
            let name = constraint.capture_name()?;
            if range.is_empty() {
                return None;
            }
            let first = &tokens[range.start];
            let last = &tokens[range.end - 1];
            Some(Capture {
                name: name.to_string(),
                start: first.start(),
                end: last.end(),
                text: text[first.byte_range().start..last.byte_range().end].to_string(),
            })
        })
        .collect()
}
