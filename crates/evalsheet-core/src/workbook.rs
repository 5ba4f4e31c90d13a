//! Spreadsheet file reading into a [`Grid`].

use std::path::Path;

use anyhow::{bail, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};

use crate::sheet::{Cell, CellRef, Grid};

const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "xlsb", "ods"];

/// Read the first worksheet of a workbook, or a CSV file, into a grid.
///
/// Cell positions are absolute: a sheet whose used range starts below `A1`
/// keeps its offset.
pub fn read_workbook(path: &Path) -> Result<Grid> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let grid = if extension == "csv" {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
        read_csv_str(text).with_context(|| format!("failed to parse CSV {}", path.display()))?
    } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        read_first_sheet(path)?
    } else {
        bail!(
            "unsupported file type '{}' (expected csv, {})",
            path.display(),
            WORKBOOK_EXTENSIONS.join(", ")
        );
    };

    tracing::debug!(rows = grid.height(), "read {}", path.display());
    Ok(grid)
}

fn read_first_sheet(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let Some(first) = sheet_names.first() else {
        bail!("workbook {} contains no sheets", path.display());
    };

    let range = workbook
        .worksheet_range(first)
        .with_context(|| format!("failed to read sheet '{first}' in {}", path.display()))?;

    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
    let mut grid = Grid::new();
    for (r, row) in range.rows().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let cell = convert(value);
            if cell.is_empty() {
                continue;
            }
            let position = CellRef::new(row_offset as usize + r, col_offset as usize + c);
            grid.set(position, cell);
        }
    }
    Ok(grid)
}

fn convert(value: &Data) -> Cell {
    match value {
        Data::Empty => Cell::Empty,
        Data::String(s) if s.trim().is_empty() => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => Cell::DateTime(datetime),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
    }
}

/// Parse CSV text into a grid.
///
/// Rows are placed by source line, so blank lines keep their place in the
/// grid. Line breaks inside quoted fields do not advance the row.
pub fn read_csv_str(text: &str) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let bytes = text.as_bytes();
    let mut grid = Grid::new();
    let mut embedded_breaks = 0usize;
    for (index, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("invalid CSV record {}", index + 1))?;
        let start = record
            .position()
            .map_or(0, |p| record_start(bytes, p.byte() as usize));
        let row = line_breaks(&bytes[..start]) - embedded_breaks;

        for (col, field) in record.iter().enumerate() {
            embedded_breaks += line_breaks(field.as_bytes());
            if !field.trim().is_empty() {
                grid.set(CellRef::new(row, col), Cell::Text(field.to_string()));
            }
        }
    }
    Ok(grid)
}

/// First byte of the record, past any blank lines the reader skipped over.
fn record_start(bytes: &[u8], from: usize) -> usize {
    let from = from.min(bytes.len());
    let skipped = bytes[from..]
        .iter()
        .take_while(|&&b| b == b'\n' || b == b'\r')
        .count();
    from + skipped
}

fn line_breaks(bytes: &[u8]) -> usize {
    bytes.iter().filter(|&&b| b == b'\n').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rows_keep_positions() {
        let grid = read_csv_str("a,b\n,,x\n\nlast\n").unwrap();
        assert_eq!(grid.cell(CellRef::new(0, 1)), &Cell::Text("b".into()));
        assert_eq!(grid.cell(CellRef::new(1, 2)), &Cell::Text("x".into()));
        assert!(grid.cell(CellRef::new(1, 0)).is_empty());
        assert!(grid.cell(CellRef::new(2, 0)).is_empty());
        assert_eq!(grid.cell(CellRef::new(3, 0)), &Cell::Text("last".into()));
    }

    #[test]
    fn csv_consecutive_blank_lines_are_counted() {
        let grid = read_csv_str("a\n\n\nz\n").unwrap();
        assert_eq!(grid.height(), 4);
        assert_eq!(grid.cell(CellRef::new(3, 0)).text(), "z");

        let grid = read_csv_str("\r\n\r\nid,2758473\r\n\r\nend\r\n").unwrap();
        assert_eq!(grid.cell(CellRef::new(2, 1)).text(), "2758473");
        assert_eq!(grid.cell(CellRef::new(4, 0)).text(), "end");
    }

    #[test]
    fn csv_blank_line_after_multiline_field() {
        let grid = read_csv_str("\"two\nlines\",x\n\nnext\n").unwrap();
        assert_eq!(grid.cell(CellRef::new(0, 1)).text(), "x");
        assert_eq!(grid.cell(CellRef::new(2, 0)).text(), "next");
    }

    #[test]
    fn csv_multiline_field_occupies_one_row() {
        let grid = read_csv_str("\"two\nlines\",x\nnext\n").unwrap();
        assert_eq!(grid.cell(CellRef::new(0, 0)).text(), "two\nlines");
        assert_eq!(grid.cell(CellRef::new(1, 0)).text(), "next");
    }

    #[test]
    fn csv_quoted_fields() {
        let grid = read_csv_str("\"Perez, Ana\",\"POR EVALUAR\"\n").unwrap();
        assert_eq!(grid.cell(CellRef::new(0, 0)).text(), "Perez, Ana");
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = read_workbook(Path::new("sheet.pdf")).unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(read_workbook(Path::new("/no/such/sheet.xlsx")).is_err());
        assert!(read_workbook(Path::new("/no/such/sheet.csv")).is_err());
    }

    #[test]
    fn converts_calamine_values() {
        assert_eq!(convert(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(convert(&Data::String("  ".into())), Cell::Empty);
        assert_eq!(convert(&Data::Bool(true)), Cell::Bool(true));
        assert_eq!(
            convert(&Data::DateTimeIso("2024-01-15".into())),
            Cell::Text("2024-01-15".into())
        );
    }
}
