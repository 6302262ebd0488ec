//! Tagged text units handed to a rule set

/// A piece of text with a position used for provenance
pub trait TagData {
    /// The text to scan
    fn text(&self) -> &str;

    /// Human-readable position, e.g. `line 3`
    fn locator(&self) -> String;
}

/// One numbered line of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    /// 1-based line number
    pub index: usize,
    /// Line content without the line break
    pub text: String,
}

impl TextLine {
    /// Create a line
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// Split a document into numbered lines
    pub fn from_document(document: &str) -> Vec<TextLine> {
        document
            .lines()
            .enumerate()
            .map(|(i, line)| TextLine::new(i + 1, line))
            .collect()
    }
}

impl TagData for TextLine {
    fn text(&self) -> &str {
        &self.text
    }

    fn locator(&self) -> String {
        format!("line {}", self.index)
    }
}

impl TagData for str {
    fn text(&self) -> &str {
        self
    }

    fn locator(&self) -> String {
        "text".to_string()
    }
}

impl TagData for String {
    fn text(&self) -> &str {
        self
    }

    fn locator(&self) -> String {
        "text".to_string()
    }
}
