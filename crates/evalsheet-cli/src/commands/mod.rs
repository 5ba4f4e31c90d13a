//! Subcommand implementations and the helpers they share.

pub mod init;
pub mod inspect;
pub mod list;
pub mod report;
pub mod stats;
pub mod summary;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use chrono::NaiveDateTime;

use evalsheet_core::config::{load_config_from, EvalsheetConfig};
use evalsheet_core::filter::matching_trainees;
use evalsheet_core::model::TraineeKey;
use evalsheet_core::report::ReportDocument;
use evalsheet_core::{load_file, EvaluationSheet, FilterSelection};
use evalsheet_report::{render, write_report, Format};

/// Load config and the sheet at `file`.
pub fn load(file: &Path, config_path: Option<&Path>) -> Result<(EvalsheetConfig, EvaluationSheet)> {
    let config = load_config_from(config_path)?;
    let sheet = load_file(file, &config.layout)?;
    tracing::info!(
        cohort = %sheet.metadata.cohort_id,
        records = sheet.records.len(),
        "loaded {}",
        file.display()
    );
    Ok((config, sheet))
}

/// Resolve a typed trainee name, pointing at `evalsheet list` when it matches nobody.
///
/// A name that matches several first/last name splits is rejected.
pub fn resolve_trainee(sheet: &EvaluationSheet, file: &Path, name: &str) -> Result<TraineeKey> {
    let mut matches = matching_trainees(&sheet.records, name);
    match matches.len() {
        0 => bail!(
            "no trainee named '{name}' in cohort {}; run `evalsheet list --file {}` to see valid names",
            sheet.metadata.cohort_id,
            file.display()
        ),
        1 => Ok(matches.remove(0)),
        _ => {
            let candidates: Vec<String> = matches
                .iter()
                .map(|key| format!("'{}' / '{}'", key.first_name, key.last_name))
                .collect();
            bail!(
                "trainee name '{name}' is ambiguous in cohort {}: matches {} (first name / last name)",
                sheet.metadata.cohort_id,
                candidates.join(", ")
            )
        }
    }
}

pub fn selection(
    sheet: &EvaluationSheet,
    file: &Path,
    trainee: Option<&str>,
    competency: Option<String>,
) -> Result<FilterSelection> {
    let mut selection = FilterSelection::all();
    if let Some(name) = trainee {
        selection = selection.with_trainee(resolve_trainee(sheet, file, name)?);
    }
    if let Some(competency) = competency {
        selection = selection.with_competency(competency);
    }
    Ok(selection)
}

pub fn output_format(arg: Option<&str>, config: &EvalsheetConfig) -> Result<Format> {
    arg.unwrap_or(config.output.format.as_str()).parse()
}

pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Print `doc` to stdout, or write it under the output directory.
pub fn export(
    doc: &ReportDocument,
    format: Format,
    output: Option<PathBuf>,
    stdout: bool,
    config: &EvalsheetConfig,
) -> Result<()> {
    if stdout {
        let bytes = render(doc, format)?;
        println!("{}", String::from_utf8_lossy(&bytes));
        return Ok(());
    }

    let dir = output.unwrap_or_else(|| config.output.dir.clone());
    let path = write_report(doc, format, &dir)?;
    tracing::info!(sections = doc.sections.len(), "exported {}", path.display());
    println!("Report written to: {}", path.display());
    Ok(())
}
