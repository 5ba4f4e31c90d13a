//! Report document assembly.
//!
//! Both builders are pure functions of metadata, a record view, and the
//! generation timestamp; rendering to bytes happens in `evalsheet-report`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::model::{CohortMetadata, EvaluationRecord, TraineeKey};
use crate::statistics::{group_by_trainee, summarize_by_trainee};
use crate::traits::DocumentWriter;

pub const SUMMARY_TITLE: &str = "Competency summary by trainee";
pub const DETAIL_TITLE: &str = "Evaluation judgments report";

/// Which document a [`ReportDocument`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// One row per trainee with judgment counts.
    Summary,
    /// One section for a single selected trainee.
    TraineeDetail,
    /// One section per trainee in the view.
    CohortDetail,
}

/// A grid of text cells with a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<S: Into<String>>(header: impl IntoIterator<Item = S>) -> Self {
        Self {
            header: header.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Section heading; `None` for a bare table.
    pub heading: Option<String>,
    pub table: Table,
    /// Followed by a blank separator line.
    pub separated: bool,
}

/// An assembled report, ready for any [`DocumentWriter`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub kind: ReportKind,
    pub title: String,
    /// Output file name without extension.
    pub file_stem: String,
    pub generated_at: NaiveDateTime,
    pub preamble: Vec<String>,
    pub sections: Vec<Section>,
}

impl ReportDocument {
    /// Drive `writer` through the document in order.
    pub fn emit(&self, writer: &mut dyn DocumentWriter) {
        writer.heading(1, &self.title);
        for line in &self.preamble {
            writer.paragraph(line);
        }
        writer.spacer();

        for section in &self.sections {
            if let Some(heading) = &section.heading {
                writer.heading(2, heading);
            }
            writer.table(&section.table.header, &section.table.rows);
            if section.separated {
                writer.spacer();
            }
        }
    }
}

/// Which trainees a detail document covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailSelector {
    Trainee(TraineeKey),
    Cohort,
}

/// Replace whitespace and path separators so the value is safe in a file name.
pub fn file_safe(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| {
            if c.is_whitespace() || matches!(c, '/' | '\\' | ':') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

pub fn summary_file_stem(metadata: &CohortMetadata) -> String {
    format!("resumen_aprendices_{}", file_safe(&metadata.cohort_id))
}

pub fn detail_file_stem(metadata: &CohortMetadata, selector: &DetailSelector) -> String {
    let cohort = file_safe(&metadata.cohort_id);
    match selector {
        DetailSelector::Trainee(key) => format!("reporte_{}_{cohort}", file_safe(&key.full_name())),
        DetailSelector::Cohort => format!("reporte_completo_ficha_{cohort}"),
    }
}

/// Build the per-trainee summary table document.
///
/// The `Other` column appears only when some trainee has an unrecognised
/// judgment.
pub fn build_summary<'a, I>(
    metadata: &CohortMetadata,
    records: I,
    generated_at: NaiveDateTime,
) -> ReportDocument
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let rows = summarize_by_trainee(records);
    let with_other = rows.iter().any(|r| r.other > 0);

    let mut header = vec!["Trainee", "Pending", "Approved", "NotApproved"];
    if with_other {
        header.push("Other");
    }
    header.push("Total");

    let mut table = Table::new(header);
    for row in &rows {
        let mut cells = vec![
            row.trainee.full_name(),
            row.pending.to_string(),
            row.approved.to_string(),
            row.not_approved.to_string(),
        ];
        if with_other {
            cells.push(row.other.to_string());
        }
        cells.push(row.total.to_string());
        table.push_row(cells);
    }

    ReportDocument {
        kind: ReportKind::Summary,
        title: SUMMARY_TITLE.to_string(),
        file_stem: summary_file_stem(metadata),
        generated_at,
        preamble: vec![
            format!(
                "Cohort: {} - Program: {}",
                metadata.cohort_id, metadata.program_name
            ),
            format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M")),
        ],
        sections: vec![Section {
            heading: None,
            table,
            separated: false,
        }],
    }
}

/// Build the judgments detail document.
///
/// An empty view, or a selected trainee with no records in it, yields a
/// document with zero sections.
pub fn build_detail<'a, I>(
    metadata: &CohortMetadata,
    records: I,
    selector: &DetailSelector,
    generated_at: NaiveDateTime,
) -> ReportDocument
where
    I: IntoIterator<Item = &'a EvaluationRecord>,
{
    let mut preamble = vec![
        format!("Cohort: {}", metadata.cohort_id),
        format!("Program: {}", metadata.program_name),
        format!("Status: {}", metadata.status),
    ];

    let (kind, sections) = match selector {
        DetailSelector::Trainee(key) => {
            preamble.push(format!("Trainee: {}", key.full_name()));
            let matching: Vec<&EvaluationRecord> =
                records.into_iter().filter(|r| r.belongs_to(key)).collect();
            let sections = if matching.is_empty() {
                Vec::new()
            } else {
                vec![Section {
                    heading: Some(key.full_name()),
                    table: judgment_table(&matching),
                    separated: false,
                }]
            };
            (ReportKind::TraineeDetail, sections)
        }
        DetailSelector::Cohort => {
            let sections = group_by_trainee(records)
                .into_iter()
                .map(|(key, group)| Section {
                    heading: Some(key.full_name()),
                    table: judgment_table(&group),
                    separated: true,
                })
                .collect();
            (ReportKind::CohortDetail, sections)
        }
    };

    preamble.push(format!(
        "Report date: {}",
        generated_at.format("%d/%m/%Y %H:%M")
    ));

    ReportDocument {
        kind,
        title: DETAIL_TITLE.to_string(),
        file_stem: detail_file_stem(metadata, selector),
        generated_at,
        preamble,
        sections,
    }
}

fn judgment_table(records: &[&EvaluationRecord]) -> Table {
    let mut table = Table::new(["Competency", "LearningOutcome", "Judgment"]);
    for record in records {
        table.push_row(vec![
            record.competency.clone(),
            record.learning_outcome.clone(),
            record.judgment.label().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter;
    use crate::model::Judgment;
    use crate::traits::OutlineWriter;
    use chrono::NaiveDate;

    fn metadata() -> CohortMetadata {
        CohortMetadata {
            cohort_id: "2758473".into(),
            program_name: "ANALISIS Y DESARROLLO DE SOFTWARE".into(),
            status: "EN EJECUCION".into(),
            start_date: NaiveDate::from_ymd_opt(2023, 4, 17).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 16).unwrap(),
        }
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(14, 7, 0)
            .unwrap()
    }

    fn records() -> Vec<EvaluationRecord> {
        vec![
            EvaluationRecord::new("A", "B", "Comp1", "RA1", Judgment::Approved),
            EvaluationRecord::new("A", "B", "Comp2", "RA2", Judgment::Pending),
            EvaluationRecord::new("C", "D", "Comp1", "RA1", Judgment::NotApproved),
        ]
    }

    #[test]
    fn summary_has_exact_header_and_rows() {
        let doc = build_summary(&metadata(), &records(), now());
        assert_eq!(doc.kind, ReportKind::Summary);
        assert_eq!(doc.title, SUMMARY_TITLE);
        assert_eq!(doc.file_stem, "resumen_aprendices_2758473");
        assert_eq!(
            doc.preamble,
            vec![
                "Cohort: 2758473 - Program: ANALISIS Y DESARROLLO DE SOFTWARE",
                "Generated: 2024-03-05 14:07",
            ]
        );
        assert_eq!(doc.sections.len(), 1);
        let table = &doc.sections[0].table;
        assert_eq!(
            table.header,
            vec!["Trainee", "Pending", "Approved", "NotApproved", "Total"]
        );
        assert_eq!(
            table.rows,
            vec![
                vec!["A B", "1", "1", "0", "2"],
                vec!["C D", "0", "0", "1", "1"],
            ]
        );
    }

    #[test]
    fn summary_adds_other_column_when_needed() {
        let mut records = records();
        records.push(EvaluationRecord::new("C", "D", "Comp2", "RA2", Judgment::Other("APLAZADO".into())));
        let doc = build_summary(&metadata(), &records, now());
        let table = &doc.sections[0].table;
        assert_eq!(
            table.header,
            vec!["Trainee", "Pending", "Approved", "NotApproved", "Other", "Total"]
        );
        assert_eq!(table.rows[1], vec!["C D", "0", "0", "1", "1", "2"]);
    }

    #[test]
    fn single_trainee_detail() {
        let key = TraineeKey::new("A", "B");
        let doc = build_detail(&metadata(), &records(), &DetailSelector::Trainee(key), now());
        assert_eq!(doc.kind, ReportKind::TraineeDetail);
        assert_eq!(doc.file_stem, "reporte_A_B_2758473");
        assert!(doc.preamble.contains(&"Trainee: A B".to_string()));
        assert_eq!(doc.preamble.last().unwrap(), "Report date: 05/03/2024 14:07");
        assert_eq!(doc.sections.len(), 1);
        let section = &doc.sections[0];
        assert_eq!(section.heading.as_deref(), Some("A B"));
        assert_eq!(section.table.header, vec!["Competency", "LearningOutcome", "Judgment"]);
        assert_eq!(
            section.table.rows,
            vec![
                vec!["Comp1", "RA1", "APROBADO"],
                vec!["Comp2", "RA2", "POR EVALUAR"],
            ]
        );
    }

    #[test]
    fn cohort_detail_has_one_separated_section_per_trainee() {
        let doc = build_detail(&metadata(), &records(), &DetailSelector::Cohort, now());
        assert_eq!(doc.kind, ReportKind::CohortDetail);
        assert_eq!(doc.file_stem, "reporte_completo_ficha_2758473");
        assert!(!doc.preamble.iter().any(|l| l.starts_with("Trainee:")));
        let headings: Vec<_> = doc.sections.iter().map(|s| s.heading.clone().unwrap()).collect();
        assert_eq!(headings, vec!["A B", "C D"]);
        assert!(doc.sections.iter().all(|s| s.separated));
        assert_eq!(doc.sections[1].table.rows, vec![vec!["Comp1", "RA1", "NO APROBADO"]]);
    }

    #[test]
    fn empty_view_detail_has_zero_sections() {
        let records = records();
        let view = filter(&records, None, Some("Comp9"));
        let doc = build_detail(&metadata(), &view, &DetailSelector::Cohort, now());
        assert!(doc.sections.is_empty());

        let doc = build_detail(
            &metadata(),
            &view,
            &DetailSelector::Trainee(TraineeKey::new("A", "B")),
            now(),
        );
        assert!(doc.sections.is_empty());
    }

    #[test]
    fn file_stems_are_file_safe() {
        let mut meta = metadata();
        meta.cohort_id = "27/58 473".into();
        let key = TraineeKey::new("Ana María", "Pérez");
        assert_eq!(
            detail_file_stem(&meta, &DetailSelector::Trainee(key)),
            "reporte_Ana_María_Pérez_27_58_473"
        );
    }

    #[test]
    fn emit_walks_document_in_order() {
        let doc = build_detail(&metadata(), &records(), &DetailSelector::Cohort, now());
        let mut outline = OutlineWriter::default();
        doc.emit(&mut outline);
        assert_eq!(
            outline.lines,
            vec![
                "h1 Evaluation judgments report",
                "p Cohort: 2758473",
                "p Program: ANALISIS Y DESARROLLO DE SOFTWARE",
                "p Status: EN EJECUCION",
                "p Report date: 05/03/2024 14:07",
                "spacer",
                "h2 A B",
                "table 2 x 3",
                "spacer",
                "h2 C D",
                "table 1 x 3",
                "spacer",
            ]
        );
    }

    #[test]
    fn assembly_is_deterministic() {
        let records = records();
        let a = build_summary(&metadata(), &records, now());
        let b = build_summary(&metadata(), &records, now());
        assert_eq!(a, b);
    }
}
