//! Markdown report renderer.

use evalsheet_core::report::ReportDocument;
use evalsheet_core::traits::DocumentWriter;

fn escape_cell(s: &str) -> String {
    s.replace('|', "\\|").replace('\n', " ")
}

#[derive(Debug, Default)]
pub struct MarkdownWriter {
    out: String,
}

impl MarkdownWriter {
    pub fn into_string(self) -> String {
        self.out
    }
}

impl DocumentWriter for MarkdownWriter {
    fn heading(&mut self, level: u8, text: &str) {
        let hashes = "#".repeat(level.clamp(1, 6) as usize);
        self.out.push_str(&format!("{hashes} {text}\n\n"));
    }

    fn paragraph(&mut self, text: &str) {
        self.out.push_str(text);
        self.out.push_str("\n\n");
    }

    fn table(&mut self, header: &[String], rows: &[Vec<String>]) {
        let cells: Vec<String> = header.iter().map(|h| escape_cell(h)).collect();
        self.out.push_str(&format!("| {} |\n", cells.join(" | ")));
        self.out
            .push_str(&format!("|{}\n", "---|".repeat(header.len().max(1))));
        for row in rows {
            let cells: Vec<String> = row.iter().map(|c| escape_cell(c)).collect();
            self.out.push_str(&format!("| {} |\n", cells.join(" | ")));
        }
        self.out.push('\n');
    }

    fn spacer(&mut self) {
        self.out.push_str("---\n\n");
    }
}

pub fn generate_markdown(doc: &ReportDocument) -> String {
    let mut writer = MarkdownWriter::default();
    doc.emit(&mut writer);
    writer.into_string()
}
