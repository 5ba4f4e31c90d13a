//! Cohort metadata extraction from the fixed-position header block.

use chrono::{Days, NaiveDate, NaiveDateTime};

use crate::config::SheetLayout;
use crate::error::{SheetError, SheetResult};
use crate::model::CohortMetadata;
use crate::sheet::{Cell, CellRef, Grid};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Largest serial Excel accepts (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Read the cohort metadata cells named by `layout`.
pub fn extract_metadata(grid: &Grid, layout: &SheetLayout) -> SheetResult<CohortMetadata> {
    let cohort_id = grid.cell(layout.cohort_id).text();
    if cohort_id.is_empty() {
        return Err(SheetError::MalformedMetadata {
            cell: layout.cohort_id,
            field: "cohort id",
            message: "cohort identifier is empty".into(),
        });
    }

    let program_name = grid.cell(layout.program_name).text();
    let status = grid.cell(layout.status).text();
    let start_date = date_at(grid, layout.start_date, "start date")?;
    let end_date = date_at(grid, layout.end_date, "end date")?;

    if end_date < start_date {
        tracing::warn!(
            cohort = %cohort_id,
            "cohort end date {end_date} is before start date {start_date}"
        );
    }

    Ok(CohortMetadata {
        cohort_id,
        program_name,
        status,
        start_date,
        end_date,
    })
}

fn date_at(grid: &Grid, position: CellRef, field: &'static str) -> SheetResult<NaiveDate> {
    parse_date_cell(grid.cell(position)).map_err(|message| SheetError::MalformedMetadata {
        cell: position,
        field,
        message,
    })
}

/// Interpret a cell as a calendar date.
///
/// Accepts native date cells, Excel serial numbers (1900 date system), and
/// the common textual forms found in exports.
pub fn parse_date_cell(cell: &Cell) -> Result<NaiveDate, String> {
    match cell {
        Cell::DateTime(dt) => Ok(dt.date()),
        Cell::Number(n) => from_excel_serial(*n),
        Cell::Text(s) => parse_date_text(s.trim()),
        Cell::Empty => Err("cell is empty".into()),
        Cell::Bool(b) => Err(format!("expected a date, found boolean {b}")),
    }
}

fn parse_date_text(s: &str) -> Result<NaiveDate, String> {
    if s.is_empty() {
        return Err("cell is empty".into());
    }
    if let Some(date) = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
    {
        return Ok(date);
    }
    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Ok(dt.date());
    }
    if let Ok(serial) = s.parse::<f64>() {
        return from_excel_serial(serial);
    }
    Err(format!("cannot parse '{s}' as a date"))
}

fn from_excel_serial(serial: f64) -> Result<NaiveDate, String> {
    if !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return Err(format!("{serial} is not a valid spreadsheet date serial"));
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_days(Days::new(serial.floor() as u64)))
        .ok_or_else(|| format!("{serial} is not a valid spreadsheet date serial"))
}
