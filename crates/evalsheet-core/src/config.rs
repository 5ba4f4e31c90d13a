//! Sheet layout and tool configuration.
//!
//! The defaults match the evaluation export format: five metadata cells in
//! column C, twelve header rows, and Spanish column labels.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::sheet::CellRef;

/// Where the metadata cells and the data header live in a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetLayout {
    /// Rows to skip before the data header row.
    #[serde(default = "default_header_rows")]
    pub header_rows: usize,
    #[serde(default = "default_cohort_id")]
    pub cohort_id: CellRef,
    #[serde(default = "default_program_name")]
    pub program_name: CellRef,
    #[serde(default = "default_status")]
    pub status: CellRef,
    #[serde(default = "default_start_date")]
    pub start_date: CellRef,
    #[serde(default = "default_end_date")]
    pub end_date: CellRef,
    /// Data column header labels.
    #[serde(default)]
    pub columns: ColumnLabels,
}

fn default_header_rows() -> usize {
    12
}
fn default_cohort_id() -> CellRef {
    CellRef::new(2, 2)
}
fn default_program_name() -> CellRef {
    CellRef::new(5, 2)
}
fn default_status() -> CellRef {
    CellRef::new(6, 2)
}
fn default_start_date() -> CellRef {
    CellRef::new(7, 2)
}
fn default_end_date() -> CellRef {
    CellRef::new(8, 2)
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            header_rows: default_header_rows(),
            cohort_id: default_cohort_id(),
            program_name: default_program_name(),
            status: default_status(),
            start_date: default_start_date(),
            end_date: default_end_date(),
            columns: ColumnLabels::default(),
        }
    }
}

/// Header labels of the required data columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnLabels {
    #[serde(default = "default_first_name")]
    pub first_name: String,
    #[serde(default = "default_last_name")]
    pub last_name: String,
    #[serde(default = "default_competency")]
    pub competency: String,
    #[serde(default = "default_learning_outcome")]
    pub learning_outcome: String,
    #[serde(default = "default_judgment")]
    pub judgment: String,
}

fn default_first_name() -> String {
    "Nombre".to_string()
}
fn default_last_name() -> String {
    "Apellidos".to_string()
}
fn default_competency() -> String {
    "Competencia".to_string()
}
fn default_learning_outcome() -> String {
    "Resultado de Aprendizaje".to_string()
}
fn default_judgment() -> String {
    "Juicio de Evaluación".to_string()
}

impl Default for ColumnLabels {
    fn default() -> Self {
        Self {
            first_name: default_first_name(),
            last_name: default_last_name(),
            competency: default_competency(),
            learning_outcome: default_learning_outcome(),
            judgment: default_judgment(),
        }
    }
}

/// Output settings for exported documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    /// Default document format name (`html`, `md`, `json`).
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./evalsheet-reports")
}
fn default_format() -> String {
    "html".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            format: default_format(),
        }
    }
}

/// Top-level evalsheet configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalsheetConfig {
    #[serde(default)]
    pub layout: SheetLayout,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `evalsheet.toml` in the current directory
/// 2. `~/.config/evalsheet/config.toml`
///
/// Environment variable override: `EVALSHEET_OUTPUT_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<EvalsheetConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("evalsheet.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => EvalsheetConfig::default(),
    };

    if let Ok(dir) = std::env::var("EVALSHEET_OUTPUT_DIR") {
        if !dir.is_empty() {
            config.output.dir = PathBuf::from(dir);
        }
    }

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<EvalsheetConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("evalsheet"))
}
