//! Plain text output formatter

use super::{attribute_list, single_line, ExtractionRecord, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// Plain text formatter - one tab-separated extraction per line
///
/// `location  start-end  class  text  [attributes]`
pub struct TextFormatter<W: Write> {
    writer: W,
    include_attributes: bool,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W, include_attributes: bool) -> Self {
        Self {
            writer,
            include_attributes,
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_extraction(&mut self, record: &ExtractionRecord) -> Result<()> {
        let e = &record.extraction;
        write!(
            self.writer,
            "{}\t{}-{}\t{}\t{}",
            record.location(),
            e.char_interval.start_pos,
            e.char_interval.end_pos,
            e.extraction_class,
            single_line(&e.extraction_text)
        )?;
        if self.include_attributes && !e.attributes.is_empty() {
            write!(self.writer, "\t{}", attribute_list(&e.attributes))?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
