//! The `evalsheet list` command.

use std::path::PathBuf;

use anyhow::Result;

use evalsheet_core::filter::{competency_options, trainee_options};

pub fn execute(file: PathBuf, trainee: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let (_, sheet) = super::load(&file, config_path.as_deref())?;
    let selection = super::selection(&sheet, &file, trainee.as_deref(), None)?;

    let trainees = trainee_options(&sheet.records);
    println!("Trainees ({}):", trainees.len());
    for key in &trainees {
        println!("  {key}");
    }

    let view = sheet.view(&selection);
    let competencies = competency_options(&view);
    match &selection.trainee {
        Some(key) => println!("\nCompetencies for {key} ({}):", competencies.len()),
        None => println!("\nCompetencies ({}):", competencies.len()),
    }
    for competency in &competencies {
        println!("  {competency}");
    }

    Ok(())
}
