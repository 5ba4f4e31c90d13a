//! Document emission seam.
//!
//! The report assembler produces a [`ReportDocument`](crate::report::ReportDocument);
//! renderers in `evalsheet-report` implement [`DocumentWriter`] to turn it
//! into bytes.

/// Sink for the primitive document operations, called in document order.
pub trait DocumentWriter {
    /// A heading. Level 1 is the document title, level 2 a section.
    fn heading(&mut self, level: u8, text: &str);

    /// One paragraph of plain text.
    fn paragraph(&mut self, text: &str);

    /// A grid table: one header row and any number of body rows.
    fn table(&mut self, header: &[String], rows: &[Vec<String>]);

    /// A blank separator line.
    fn spacer(&mut self);
}

/// A writer that records the calls it receives, one line per call.
///
/// Useful for asserting on document structure without a renderer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OutlineWriter {
    pub lines: Vec<String>,
}

impl DocumentWriter for OutlineWriter {
    fn heading(&mut self, level: u8, text: &str) {
        self.lines.push(format!("h{level} {text}"));
    }

    fn paragraph(&mut self, text: &str) {
        self.lines.push(format!("p {text}"));
    }

    fn table(&mut self, header: &[String], rows: &[Vec<String>]) {
        self.lines
            .push(format!("table {} x {}", rows.len(), header.len()));
    }

    fn spacer(&mut self) {
        self.lines.push("spacer".to_string());
    }
}
