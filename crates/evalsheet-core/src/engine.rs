//! One loaded evaluation sheet and the pipeline entry points over it.
//!
//! Loading runs the metadata extractor and record loader on the same grid.
//! Everything after loading borrows the records; nothing is cached.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;

use crate::config::SheetLayout;
use crate::error::SheetResult;
use crate::filter::{FilterSelection, RecordView};
use crate::loader::load_records;
use crate::metadata::extract_metadata;
use crate::model::{CohortMetadata, EvaluationRecord};
use crate::report::{build_detail, build_summary, DetailSelector, ReportDocument};
use crate::sheet::Grid;
use crate::statistics::{aggregate, cohort_overview, AggregationResult, CohortOverview};
use crate::workbook::read_workbook;

/// A validated sheet: cohort metadata plus every evaluation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationSheet {
    pub metadata: CohortMetadata,
    pub records: Vec<EvaluationRecord>,
}

/// Extract metadata and records from an in-memory grid.
pub fn load_sheet(grid: &Grid, layout: &SheetLayout) -> SheetResult<EvaluationSheet> {
    let metadata = extract_metadata(grid, layout)?;
    let records = load_records(grid, layout)?;
    tracing::debug!(
        cohort = %metadata.cohort_id,
        records = records.len(),
        "sheet loaded"
    );
    Ok(EvaluationSheet { metadata, records })
}

/// Read a spreadsheet file and load it.
pub fn load_file(path: &Path, layout: &SheetLayout) -> Result<EvaluationSheet> {
    let grid = read_workbook(path)?;
    let sheet =
        load_sheet(&grid, layout).with_context(|| format!("invalid sheet {}", path.display()))?;
    Ok(sheet)
}

impl EvaluationSheet {
    /// Records matching `selection`, in sheet order.
    pub fn view(&self, selection: &FilterSelection) -> RecordView<'_> {
        selection.apply(&self.records)
    }

    pub fn aggregate(&self, selection: &FilterSelection) -> AggregationResult {
        aggregate(&self.view(selection))
    }

    pub fn overview(&self) -> CohortOverview {
        cohort_overview(&self.records)
    }

    pub fn summary_document(
        &self,
        selection: &FilterSelection,
        generated_at: NaiveDateTime,
    ) -> ReportDocument {
        build_summary(&self.metadata, &self.view(selection), generated_at)
    }

    pub fn detail_document(
        &self,
        selection: &FilterSelection,
        selector: &DetailSelector,
        generated_at: NaiveDateTime,
    ) -> ReportDocument {
        build_detail(&self.metadata, &self.view(selection), selector, generated_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;
    use crate::model::{JudgmentCategory, TraineeKey};
    use crate::sheet::{Cell, CellRef};
    use chrono::NaiveDate;

    fn export_grid() -> Grid {
        let mut grid = Grid::new();
        grid.set(CellRef::new(2, 2), Cell::Text("2758473".into()));
        grid.set(CellRef::new(5, 2), Cell::Text("ADSO".into()));
        grid.set(CellRef::new(6, 2), Cell::Text("EN EJECUCION".into()));
        grid.set(CellRef::new(7, 2), Cell::Text("2023-04-17".into()));
        grid.set(CellRef::new(8, 2), Cell::Text("2025-10-16".into()));
        let header = [
            "Nombre",
            "Apellidos",
            "Competencia",
            "Resultado de Aprendizaje",
            "Juicio de Evaluación",
        ];
        let body = [
            ["A", "B", "Comp1", "RA1", "APROBADO"],
            ["A", "B", "Comp2", "RA2", "POR EVALUAR"],
            ["C", "D", "Comp1", "RA1", "NO APROBADO"],
        ];
        for (c, label) in header.iter().enumerate() {
            grid.set(CellRef::new(12, c), Cell::from(*label));
        }
        for (r, row) in body.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                grid.set(CellRef::new(13 + r, c), Cell::from(*value));
            }
        }
        grid
    }

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn loads_metadata_and_records() {
        let sheet = load_sheet(&export_grid(), &SheetLayout::default()).unwrap();
        assert_eq!(sheet.metadata.cohort_id, "2758473");
        assert_eq!(sheet.records.len(), 3);
        assert_eq!(
            sheet.overview(),
            CohortOverview {
                records: 3,
                trainees: 2,
                competencies: 2
            }
        );
    }

    #[test]
    fn metadata_errors_surface_first() {
        let mut grid = export_grid();
        grid.set(CellRef::new(7, 2), Cell::Text("soon".into()));
        let err = load_sheet(&grid, &SheetLayout::default()).unwrap_err();
        assert!(matches!(err, SheetError::MalformedMetadata { .. }));
    }

    #[test]
    fn pipeline_filter_aggregate_report() {
        let sheet = load_sheet(&export_grid(), &SheetLayout::default()).unwrap();
        let selection = FilterSelection::all().with_competency("Comp1");
        let result = sheet.aggregate(&selection);
        assert_eq!(result.total, 2);
        assert_eq!(result.count(JudgmentCategory::Approved), 1);

        let doc = sheet.summary_document(&selection, now());
        assert_eq!(doc.sections[0].table.rows.len(), 2);

        let key = TraineeKey::new("C", "D");
        let doc = sheet.detail_document(
            &FilterSelection::all(),
            &DetailSelector::Trainee(key),
            now(),
        );
        assert_eq!(doc.sections.len(), 1);
        assert_eq!(doc.file_stem, "reporte_C_D_2758473");
    }

    #[test]
    fn load_file_reads_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.csv");
        let mut text = String::new();
        for row in 0..export_grid().height() {
            let cells: Vec<String> = export_grid()
                .row(row)
                .unwrap_or(&[])
                .iter()
                .map(Cell::text)
                .collect();
            text.push_str(&cells.join(","));
            text.push('\n');
        }
        std::fs::write(&path, text).unwrap();
        let sheet = load_file(&path, &SheetLayout::default()).unwrap();
        assert_eq!(sheet.records.len(), 3);
        assert_eq!(sheet.metadata.end_date, NaiveDate::from_ymd_opt(2025, 10, 16).unwrap());
    }
}
