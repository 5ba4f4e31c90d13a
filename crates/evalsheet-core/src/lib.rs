//! evalsheet-core: evaluation sheet loading, aggregation, and report assembly.
//!
//! This crate defines the sheet grid and record model, the metadata and
//! record loaders, the filter and aggregation engines, and the report
//! documents that the rest of evalsheet renders.

pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod loader;
pub mod metadata;
pub mod model;
pub mod report;
pub mod sheet;
pub mod statistics;
pub mod traits;
pub mod workbook;

pub use engine::{load_file, load_sheet, EvaluationSheet};
pub use error::{SheetError, SheetResult};
pub use filter::FilterSelection;
