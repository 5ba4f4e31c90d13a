//! HTML report renderer.
//!
//! Produces a self-contained HTML file with all CSS/JS inlined.

use evalsheet_core::report::ReportDocument;
use evalsheet_core::traits::DocumentWriter;

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Collects the document body as HTML.
#[derive(Debug, Default)]
pub struct HtmlWriter {
    body: String,
    tables: usize,
}

impl HtmlWriter {
    pub fn into_body(self) -> String {
        self.body
    }
}

impl DocumentWriter for HtmlWriter {
    fn heading(&mut self, level: u8, text: &str) {
        let level = level.clamp(1, 6);
        self.body
            .push_str(&format!("<h{level}>{}</h{level}>\n", html_escape(text)));
    }

    fn paragraph(&mut self, text: &str) {
        self.body
            .push_str(&format!("<p class=\"meta\">{}</p>\n", html_escape(text)));
    }

    fn table(&mut self, header: &[String], rows: &[Vec<String>]) {
        let id = format!("t{}", self.tables);
        self.tables += 1;

        self.body.push_str(&format!("<table id=\"{id}\">\n<thead><tr>"));
        for (col, cell) in header.iter().enumerate() {
            self.body.push_str(&format!(
                "<th onclick=\"sortTable('{id}', {col})\">{}</th>",
                html_escape(cell)
            ));
        }
        self.body.push_str("</tr></thead>\n<tbody>\n");
        for row in rows {
            self.body.push_str("<tr>");
            for cell in row {
                let class = judgment_class(cell);
                if class.is_empty() {
                    self.body.push_str(&format!("<td>{}</td>", html_escape(cell)));
                } else {
                    self.body.push_str(&format!(
                        "<td class=\"{class}\">{}</td>",
                        html_escape(cell)
                    ));
                }
            }
            self.body.push_str("</tr>\n");
        }
        self.body.push_str("</tbody>\n</table>\n");
    }

    fn spacer(&mut self) {
        self.body.push_str("<hr>\n");
    }
}

fn judgment_class(cell: &str) -> &'static str {
    match cell {
        "APROBADO" => "approved",
        "NO APROBADO" => "not-approved",
        "POR EVALUAR" => "pending",
        _ => "",
    }
}

/// Generate a complete HTML page for a report document.
pub fn generate_html(doc: &ReportDocument) -> String {
    let mut writer = HtmlWriter::default();
    doc.emit(&mut writer);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!(
        "<title>{} - {}</title>\n",
        html_escape(&doc.title),
        html_escape(&doc.file_stem)
    ));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(&writer.into_body());
    html.push_str("<script>\n");
    html.push_str(JS);
    html.push_str("</script>\n");
    html.push_str("</body>\n</html>");
    html
}

const CSS: &str = r#"
:root { --bg: #fff; --fg: #1a1a1a; --border: #e5e7eb; --approved: #dcfce7; --not-approved: #fde2e2; --pending: #fef9c3; }
@media (prefers-color-scheme: dark) {
  :root { --bg: #111827; --fg: #f9fafb; --border: #374151; --approved: #064e3b; --not-approved: #7f1d1d; --pending: #713f12; }
}
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; margin: 0; padding: 2rem; background: var(--bg); color: var(--fg); }
h1, h2 { margin-top: 2rem; }
.meta { color: #6b7280; margin: 0.25rem 0; }
table { border-collapse: collapse; width: 100%; margin: 1rem 0; }
th, td { border: 1px solid var(--border); padding: 0.5rem 1rem; text-align: left; }
th { background: var(--border); cursor: pointer; }
.approved { background: var(--approved); }
.not-approved { background: var(--not-approved); }
.pending { background: var(--pending); }
hr { border: none; border-top: 1px solid var(--border); margin: 1.5rem 0; }
"#;

const JS: &str = r#"
function sortTable(id, col) {
  const table = document.getElementById(id);
  const tbody = table.querySelector('tbody');
  const rows = Array.from(tbody.querySelectorAll('tr'));
  const asc = table.dataset.sortCol == col && table.dataset.sortDir == 'asc' ? false : true;
  rows.sort((a, b) => {
    const va = a.cells[col].textContent;
    const vb = b.cells[col].textContent;
    const na = Number(va), nb = Number(vb);
    const cmp = !isNaN(na) && !isNaN(nb) ? na - nb : va.localeCompare(vb);
    return asc ? cmp : -cmp;
  });
  table.dataset.sortCol = col;
  table.dataset.sortDir = asc ? 'asc' : 'desc';
  rows.forEach(r => tbody.appendChild(r));
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures;

    #[test]
    fn html_is_complete_page() {
        let html = generate_html(&fixtures::summary());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.ends_with("</html>"));
        assert!(html.contains("<h1>Competency summary by trainee</h1>"));
        assert!(html.contains("<th onclick=\"sortTable('t0', 4)\">Total</th>"));
        assert!(html.contains("<td>Ana Pérez</td><td>1</td><td>1</td><td>0</td><td>2</td>"));
    }

    #[test]
    fn html_escapes_cell_text() {
        let html = generate_html(&fixtures::cohort_detail());
        assert!(html.contains("Comp &lt;1&gt;"));
        assert!(!html.contains("Comp <1>"));
    }

    #[test]
    fn detail_sections_get_their_own_tables() {
        let html = generate_html(&fixtures::cohort_detail());
        assert!(html.contains("<h2>Ana Pérez</h2>"));
        assert!(html.contains("<h2>Luis Rojas</h2>"));
        assert!(html.contains("id=\"t1\""));
        assert!(html.contains("<td class=\"not-approved\">NO APROBADO</td>"));
    }

    #[test]
    fn escape_quotes() {
        assert_eq!(html_escape("a\"b'c&"), "a&quot;b&#x27;c&amp;");
    }
}
