//! The `evalsheet init` command.

use std::path::Path;

use anyhow::{Context, Result};

pub fn execute() -> Result<()> {
    let path = Path::new("evalsheet.toml");
    if path.exists() {
        println!("evalsheet.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG).context("failed to write evalsheet.toml")?;
        println!("Created evalsheet.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust [layout] if your export places the metadata cells elsewhere");
    println!("  2. Run: evalsheet inspect --file <sheet.xlsx>");
    println!("  3. Run: evalsheet summary --file <sheet.xlsx>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# evalsheet configuration

[layout]
# Rows above the data header row.
header_rows = 12
cohort_id = "C3"
program_name = "C6"
status = "C7"
start_date = "C8"
end_date = "C9"

[layout.columns]
first_name = "Nombre"
last_name = "Apellidos"
competency = "Competencia"
learning_outcome = "Resultado de Aprendizaje"
judgment = "Juicio de Evaluación"

[output]
dir = "./evalsheet-reports"
# html, md or json
format = "html"
"#;
