//! Positioned tokens with derived lexical properties

use std::ops::Range;

/// A token produced by the [`Tokenizer`](crate::Tokenizer)
///
/// `start` and `end` are character (Unicode scalar) offsets into the source
/// text, half-open. The byte range of the same span is kept alongside so the
/// source can be sliced without re-walking it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    text: String,
    start: usize,
    end: usize,
    bytes: Range<usize>,
    lower: String,
    shape: String,
    is_alpha: bool,
    is_digit: bool,
    is_title: bool,
}

impl Token {
    /// Create a token from its source slice and offsets
    pub fn new(text: &str, start: usize, bytes: Range<usize>) -> Self {
        let end = start + text.chars().count();
        Self {
            text: text.to_string(),
            start,
            end,
            bytes,
            lower: text.to_lowercase(),
            shape: shape_of(text),
            is_alpha: is_alpha_word(text),
            is_digit: !text.is_empty() && text.chars().all(char::is_numeric),
            is_title: is_title_word(text),
        }
    }

    /// Token text as it appears in the source
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Character offset of the first character
    pub fn start(&self) -> usize {
        self.start
    }

    /// Character offset one past the last character
    pub fn end(&self) -> usize {
        self.end
    }

    /// Byte range in the source
    pub fn byte_range(&self) -> Range<usize> {
        self.bytes.clone()
    }

    /// Lowercased text
    pub fn lower(&self) -> &str {
        &self.lower
    }

    /// Character-class signature, e.g. `Xxxxx` or `dddd`
    pub fn shape(&self) -> &str {
        &self.shape
    }

    /// All characters are letters (internal hyphens allowed)
    pub fn is_alpha(&self) -> bool {
        self.is_alpha
    }

    /// All characters are digits
    pub fn is_digit(&self) -> bool {
        self.is_digit
    }

    /// First character uppercase, remaining letters lowercase
    pub fn is_title(&self) -> bool {
        self.is_title
    }

    /// The synthetic line-break token
    pub fn is_newline(&self) -> bool {
        self.text == "\n"
    }
}

/// Map letters to `X`/`x`, digits to `d`, keep everything else.
pub fn shape_of(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if ch.is_numeric() {
                'd'
            } else if ch.is_uppercase() {
                'X'
            } else if ch.is_alphabetic() {
                'x'
            } else {
                ch
            }
        })
        .collect()
}

fn is_alpha_word(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return false;
    }
    chars.iter().enumerate().all(|(i, &ch)| {
        ch.is_alphabetic()
            || (ch == '-'
                && i > 0
                && i + 1 < chars.len()
                && chars[i - 1].is_alphabetic()
                && chars[i + 1].is_alphabetic())
    })
}

fn is_title_word(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|ch| !ch.is_uppercase()),
        _ => false,
    }
}
