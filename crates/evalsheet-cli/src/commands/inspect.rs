//! The `evalsheet inspect` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Color, Table};

use evalsheet_core::model::CohortStatus;

pub fn execute(file: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let (_, sheet) = super::load(&file, config_path.as_deref())?;
    let metadata = &sheet.metadata;
    let overview = sheet.overview();

    let status_color = match metadata.status_kind() {
        CohortStatus::Active => Color::Green,
        CohortStatus::Finished => Color::Blue,
        CohortStatus::Other => Color::Yellow,
    };

    let mut table = Table::new();
    table.set_header(vec!["Cohort", "Program", "Status", "Trainees", "Competencies", "Start", "End"]);
    table.add_row(vec![
        Cell::new(&metadata.cohort_id),
        Cell::new(&metadata.program_name),
        Cell::new(format!("{} ({})", metadata.status, metadata.status_kind())).fg(status_color),
        Cell::new(overview.trainees),
        Cell::new(overview.competencies),
        Cell::new(metadata.start_date.format("%d/%m/%y")),
        Cell::new(metadata.end_date.format("%d/%m/%y")),
    ]);

    println!("{table}");
    println!("{} evaluation records", overview.records);
    Ok(())
}
