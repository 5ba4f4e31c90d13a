//! The `evalsheet summary` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(
    file: PathBuf,
    competency: Option<String>,
    format: Option<String>,
    output: Option<PathBuf>,
    stdout: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let (config, sheet) = super::load(&file, config_path.as_deref())?;
    let format = super::output_format(format.as_deref(), &config)?;
    let selection = super::selection(&sheet, &file, None, competency)?;

    let doc = sheet.summary_document(&selection, super::now());
    super::export(&doc, format, output, stdout, &config)
}
