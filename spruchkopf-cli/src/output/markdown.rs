//! Markdown output formatter

use super::{attribute_list, single_line, ExtractionRecord, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Markdown formatter - outputs extractions as a table
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    include_attributes: bool,
    extraction_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W, include_attributes: bool) -> Self {
        Self {
            writer,
            include_attributes,
            extraction_count: 0,
        }
    }

    fn write_header(&mut self) -> Result<()> {
        if self.include_attributes {
            writeln!(self.writer, "| # | Location | Span | Class | Text | Attributes |")?;
            writeln!(self.writer, "|---|---|---|---|---|---|")?;
        } else {
            writeln!(self.writer, "| # | Location | Span | Class | Text |")?;
            writeln!(self.writer, "|---|---|---|---|---|")?;
        }
        Ok(())
    }
}

fn cell(text: &str) -> String {
    single_line(text).replace('|', "\\|")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_extraction(&mut self, record: &ExtractionRecord) -> Result<()> {
        if self.extraction_count == 0 {
            self.write_header()?;
        }
        self.extraction_count += 1;

        let e = &record.extraction;
        write!(
            self.writer,
            "| {} | {} | {}-{} | {} | {} |",
            self.extraction_count,
            cell(&record.location()),
            e.char_interval.start_pos,
            e.char_interval.end_pos,
            e.extraction_class,
            cell(&e.extraction_text)
        )?;
        if self.include_attributes {
            write!(self.writer, " {} |", cell(&attribute_list(&e.attributes)))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total extractions: {}*", self.extraction_count)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::record;

    #[test]
    fn test_table_rows_and_footer() {
        let mut formatter = MarkdownFormatter::new(Vec::new(), true);
        formatter
            .format_extraction(&record("court", "BGH", 0, Some(1)))
            .unwrap();
        formatter
            .format_extraction(&record("file_number", "II ZR 1/22", 30, Some(1)))
            .unwrap();
        formatter.finish().unwrap();

        let out = String::from_utf8(formatter.writer).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "| # | Location | Span | Class | Text | Attributes |");
        assert_eq!(
            lines[2],
            "| 1 | header.txt:1 | 0-3 | court | BGH | level=federal |"
        );
        assert!(lines[3].starts_with("| 2 | header.txt:1 | 30-40 | file_number | II ZR 1/22 |"));
        assert!(out.ends_with("---\n*Total extractions: 2*\n"));
    }

    #[test]
    fn test_empty_table() {
        let mut formatter = MarkdownFormatter::new(Vec::new(), false);
        formatter.finish().unwrap();
        let out = String::from_utf8(formatter.writer).unwrap();
        assert_eq!(out, "\n---\n*Total extractions: 0*\n");
    }
}
