//! Output formatting module

use anyhow::Result;
use serde::Serialize;
use spruchkopf_core::Extraction;
use std::collections::BTreeMap;
use std::io::Write;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single extraction
    fn format_extraction(&mut self, record: &ExtractionRecord) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// One extraction per line, tab separated
    Text,
    /// JSON array of extraction records
    Json,
    /// Markdown table
    Markdown,
}

/// One extraction with the input position it came from
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionRecord {
    /// Input name
    pub source: String,
    /// 1-based line number; absent when whole documents are processed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// The extraction itself
    #[serde(flatten)]
    pub extraction: Extraction,
}

impl ExtractionRecord {
    /// `source:line` or just `source`
    pub fn location(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{line}", self.source),
            None => self.source.clone(),
        }
    }
}

/// Build the formatter for `format`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    include_attributes: bool,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(writer, include_attributes)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer, include_attributes)),
    }
}

/// `key=value` pairs joined with `, `
pub(crate) fn attribute_list(attributes: &BTreeMap<String, String>) -> String {
    attributes
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Make a possibly multi-line extraction text printable on one line
pub(crate) fn single_line(text: &str) -> String {
    text.replace('\r', "").replace('\n', "\\n")
}


#[cfg(test)]
mod tests {
    use super::test_support::{record, SharedBuffer};
    use super::*;

    #[test]
    fn test_location() {
        assert_eq!(record("court", "BGH", 0, Some(3)).location(), "header.txt:3");
        assert_eq!(record("court", "BGH", 0, None).location(), "header.txt");
    }

    #[test]
    fn test_record_json_is_flat() {
        let json = serde_json::to_value(record("court", "BGH", 0, Some(1))).unwrap();
        assert_eq!(json["source"], "header.txt");
        assert_eq!(json["line"], 1);
        assert_eq!(json["extraction_class"], "court");
        assert_eq!(json["char_interval"]["start_pos"], 0);

        let json = serde_json::to_value(record("court", "BGH", 0, None)).unwrap();
        assert!(json.get("line").is_none());
    }

    #[test]
    fn test_create_formatter_for_each_format() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Markdown] {
            let buffer = SharedBuffer::default();
            let mut formatter = create_formatter(format, Box::new(buffer.clone()), true, false);
            formatter
                .format_extraction(&record("court", "BGH", 0, Some(1)))
                .unwrap();
            formatter.finish().unwrap();
            assert!(buffer.contents().contains("BGH"), "{format:?}");
        }
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("OLG\r\nKARLSRUHE"), "OLG\\nKARLSRUHE");
    }
}
