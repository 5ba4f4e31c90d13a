//! evalsheet-report: render assembled report documents to bytes.
//!
//! Every renderer works in memory; [`write_report`] is the only function
//! that touches the file system.

pub mod chart;
pub mod html;
pub mod markdown;

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use evalsheet_core::report::ReportDocument;

/// Output document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Html,
    #[serde(rename = "md")]
    Markdown,
    Json,
}

impl Format {
    pub fn extension(self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Markdown => "md",
            Format::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Format {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "html" | "htm" => Ok(Format::Html),
            "md" | "markdown" => Ok(Format::Markdown),
            "json" => Ok(Format::Json),
            other => anyhow::bail!("unknown output format '{other}' (expected html, md or json)"),
        }
    }
}

/// Render a document into an in-memory buffer.
pub fn render(doc: &ReportDocument, format: Format) -> Result<Vec<u8>> {
    let bytes = match format {
        Format::Html => html::generate_html(doc).into_bytes(),
        Format::Markdown => markdown::generate_markdown(doc).into_bytes(),
        Format::Json => serde_json::to_vec_pretty(doc).context("failed to serialize report")?,
    };
    Ok(bytes)
}

/// `<file stem>.<extension>` for a rendered document.
pub fn file_name(doc: &ReportDocument, format: Format) -> String {
    format!("{}.{}", doc.file_stem, format.extension())
}

/// Render a document and write it into `dir`, returning the written path.
pub fn write_report(doc: &ReportDocument, format: Format, dir: &Path) -> Result<PathBuf> {
    let bytes = render(doc, format)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    let path = dir.join(file_name(doc, format));
    std::fs::write(&path, bytes)
        .with_context(|| format!("failed to write report to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::NaiveDate;
    use evalsheet_core::model::{CohortMetadata, EvaluationRecord, Judgment};
    use evalsheet_core::report::{build_detail, build_summary, DetailSelector, ReportDocument};

    pub fn metadata() -> CohortMetadata {
        CohortMetadata {
            cohort_id: "2758473".into(),
            program_name: "ANALISIS Y DESARROLLO DE SOFTWARE".into(),
            status: "EN EJECUCION".into(),
            start_date: NaiveDate::from_ymd_opt(2023, 4, 17).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 16).unwrap(),
        }
    }

    pub fn records() -> Vec<EvaluationRecord> {
        vec![
            EvaluationRecord::new("Ana", "Pérez", "Comp <1>", "RA1", Judgment::Approved),
            EvaluationRecord::new("Ana", "Pérez", "Comp2", "RA2", Judgment::Pending),
            EvaluationRecord::new("Luis", "Rojas", "Comp <1>", "RA1", Judgment::NotApproved),
        ]
    }

    fn now() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 0)
            .unwrap()
    }

    pub fn summary() -> ReportDocument {
        build_summary(&metadata(), &records(), now())
    }

    pub fn cohort_detail() -> ReportDocument {
        build_detail(&metadata(), &records(), &DetailSelector::Cohort, now())
    }
}
