//! German-oriented word tokenizer
//!
//! Splits text into words, numbers, punctuation and newline tokens:
//!
//! - whitespace separates tokens and is dropped, except `\n`, which becomes a
//!   token of its own;
//! - letters and digits form words, a hyphen between two word characters
//!   stays inside the word (`Sachsen-Anhalt`);
//! - every other character is a one-character token (`Tenor:` gives
//!   `Tenor` and `:`);
//! - a period after a one- or two-digit number that is followed by
//!   whitespace or the end of text stays on the number (`24. Dezember`),
//!   which is how German writes ordinal days and months.
//!
//! Tokenization cannot fail. Offsets always refer to the input string.

use crate::token::Token;

/// Maximum digit count for a number that takes an ordinal period
const MAX_ORDINAL_DIGITS: usize = 2;

/// Word tokenizer
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer {
    ordinal_periods: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Create a tokenizer with the default German rules
    pub fn new() -> Self {
        Self {
            ordinal_periods: true,
        }
    }

    /// Keep periods after short numbers attached (default `true`)
    pub fn with_ordinal_periods(mut self, enabled: bool) -> Self {
        self.ordinal_periods = enabled;
        self
    }

    /// Split `text` into tokens in source order
    pub fn tokenize(&self, text: &str) -> Vec<Token> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let byte_at = |idx: usize| chars.get(idx).map_or(text.len(), |&(b, _)| b);
        let mut tokens = Vec::new();
        let mut i = 0;

        while i < chars.len() {
            let ch = chars[i].1;

            if ch == '\n' {
                tokens.push(Token::new("\n", i, byte_at(i)..byte_at(i + 1)));
                i += 1;
                continue;
            }

            if ch.is_whitespace() {
                i += 1;
                continue;
            }

            if !is_word_char(ch) {
                let (start, end) = (byte_at(i), byte_at(i + 1));
                tokens.push(Token::new(&text[start..end], i, start..end));
                i += 1;
                continue;
            }

            let start = i;
            i += 1;
            while i < chars.len() {
                let c = chars[i].1;
                if is_word_char(c) {
                    i += 1;
                } else if c == '-'
                    && is_word_char(chars[i - 1].1)
                    && chars.get(i + 1).is_some_and(|&(_, n)| is_word_char(n))
                {
                    i += 2;
                } else {
                    break;
                }
            }

            if self.ordinal_periods && takes_ordinal_period(&chars, start, i) {
                i += 1;
            }

            let (b_start, b_end) = (byte_at(start), byte_at(i));
            tokens.push(Token::new(&text[b_start..b_end], start, b_start..b_end));
        }

        tracing::trace!(count = tokens.len(), "tokenized text");
        tokens
    }
}

/// Tokenize with the default rules
pub fn tokenize(text: &str) -> Vec<Token> {
    Tokenizer::new().tokenize(text)
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

fn takes_ordinal_period(chars: &[(usize, char)], start: usize, end: usize) -> bool {
    let len = end - start;
    if len == 0 || len > MAX_ORDINAL_DIGITS {
        return false;
    }
    if !chars[start..end].iter().all(|&(_, c)| c.is_ascii_digit()) {
        return false;
    }
    if chars.get(end).map(|&(_, c)| c) != Some('.') {
        return false;
    }
    chars
        .get(end + 1)
        .map_or(true, |&(_, next)| next.is_whitespace())
}
