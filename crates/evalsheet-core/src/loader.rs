//! Evaluation record loading from the tabular body below the header block.
//!
//! Header labels are resolved once into a [`ColumnMap`]; every row read after
//! that goes through canonical [`Field`] names.

use std::fmt;

use crate::config::{ColumnLabels, SheetLayout};
use crate::error::{SheetError, SheetResult};
use crate::model::{EvaluationRecord, Judgment};
use crate::sheet::{Cell, Grid};

/// Canonical names of the required data columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Competency,
    LearningOutcome,
    Judgment,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Competency,
        Field::LearningOutcome,
        Field::Judgment,
    ];

    /// The configured header label for this field.
    pub fn label(self, labels: &ColumnLabels) -> &str {
        match self {
            Field::FirstName => &labels.first_name,
            Field::LastName => &labels.last_name,
            Field::Competency => &labels.competency,
            Field::LearningOutcome => &labels.learning_outcome,
            Field::Judgment => &labels.judgment,
        }
    }

    fn slot(self) -> usize {
        match self {
            Field::FirstName => 0,
            Field::LastName => 1,
            Field::Competency => 2,
            Field::LearningOutcome => 3,
            Field::Judgment => 4,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Competency => "competency",
            Field::LearningOutcome => "learning_outcome",
            Field::Judgment => "judgment",
        };
        f.write_str(name)
    }
}

/// Validated mapping from canonical field to column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    indices: [usize; 5],
}

fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

impl ColumnMap {
    /// Resolve every required label against a header row.
    ///
    /// Labels match after trimming, case-insensitively; the first matching
    /// column wins. All absent labels are reported together.
    pub fn resolve(header: &[Cell], labels: &ColumnLabels) -> SheetResult<Self> {
        let header: Vec<String> = header.iter().map(|c| normalize_label(&c.text())).collect();

        let mut indices = [0usize; 5];
        let mut missing = Vec::new();

        for field in Field::ALL {
            let wanted = normalize_label(field.label(labels));
            match header.iter().position(|h| *h == wanted) {
                Some(index) => indices[field.slot()] = index,
                None => missing.push(field.label(labels).to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(SheetError::MissingColumns { columns: missing });
        }

        Ok(Self { indices })
    }

    pub fn index(&self, field: Field) -> usize {
        self.indices[field.slot()]
    }

    fn text(&self, row: &[Cell], field: Field) -> String {
        row.get(self.index(field)).map(Cell::text).unwrap_or_default()
    }

    fn is_blank(&self, row: &[Cell]) -> bool {
        Field::ALL
            .iter()
            .all(|&f| row.get(self.index(f)).map_or(true, Cell::is_empty))
    }
}

/// Load every evaluation record below the header block.
///
/// Rows whose required cells are all empty are skipped. Rows with an
/// unrecognised judgment are kept as [`Judgment::Other`].
pub fn load_records(grid: &Grid, layout: &SheetLayout) -> SheetResult<Vec<EvaluationRecord>> {
    let header_index = layout.header_rows;
    let header = grid.row(header_index).ok_or(SheetError::EmptyInput {
        header_rows: layout.header_rows,
    })?;

    let columns = ColumnMap::resolve(header, &layout.columns)?;

    let mut records = Vec::new();
    let mut blank_rows = 0usize;

    for index in (header_index + 1)..grid.height() {
        let Some(row) = grid.row(index) else {
            continue;
        };
        if columns.is_blank(row) {
            blank_rows += 1;
            continue;
        }

        let judgment = Judgment::parse(&columns.text(row, Field::Judgment));
        if let Judgment::Other(label) = &judgment {
            tracing::warn!(row = index + 1, "unrecognised judgment '{label}', counted as other");
        }

        records.push(EvaluationRecord {
            first_name: columns.text(row, Field::FirstName),
            last_name: columns.text(row, Field::LastName),
            competency: columns.text(row, Field::Competency),
            learning_outcome: columns.text(row, Field::LearningOutcome),
            judgment,
        });
    }

    if records.is_empty() {
        return Err(SheetError::EmptyInput {
            header_rows: layout.header_rows,
        });
    }

    tracing::debug!(
        records = records.len(),
        blank_rows,
        "loaded evaluation records"
    );

    Ok(records)
}
