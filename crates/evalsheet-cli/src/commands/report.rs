//! The `evalsheet report` command.

use std::path::PathBuf;

use anyhow::Result;

use evalsheet_core::report::DetailSelector;

pub fn execute(
    file: PathBuf,
    trainee: Option<String>,
    competency: Option<String>,
    format: Option<String>,
    output: Option<PathBuf>,
    stdout: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, sheet) = super::load(&file, config_path.as_deref())?;
    let format = super::output_format(format.as_deref(), &config)?;
    let selection = super::selection(&sheet, &file, trainee.as_deref(), competency)?;

    let selector = match &selection.trainee {
        Some(key) => DetailSelector::Trainee(key.clone()),
        None => DetailSelector::Cohort,
    };

    let doc = sheet.detail_document(&selection, &selector, super::now());
    if doc.sections.is_empty() {
        tracing::warn!("no records match the selection; the report has no sections");
    }
    super::export(&doc, format, output, stdout, &config)
}
