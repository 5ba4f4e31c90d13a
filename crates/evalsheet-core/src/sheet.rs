//! Raw sheet model: a 2-D grid of cells addressed by absolute position.
//!
//! Both the metadata extractor and the record loader read from the same
//! [`Grid`], regardless of whether it came from a workbook or a CSV export.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl Cell {
    /// Returns `true` for empty cells and whitespace-only text.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Render the cell as trimmed display text.
    ///
    /// Integral numbers render without a fractional part so identifiers stored
    /// as numbers (`2758473.0`) read back as `2758473`.
    pub fn text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.trim().to_string(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Cell::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
            Cell::DateTime(dt) => {
                if dt.time() == NaiveTime::MIN {
                    dt.format("%Y-%m-%d").to_string()
                } else {
                    dt.format("%Y-%m-%d %H:%M:%S").to_string()
                }
            }
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }
}

/// A 0-based `(row, col)` cell position, displayed in A1 notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CellRef {
    pub row: usize,
    pub col: usize,
}

impl CellRef {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

fn column_letters(col: usize) -> String {
    let mut letters = String::new();
    let mut n = col + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.insert(0, char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row + 1)
    }
}

impl FromStr for CellRef {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| format!("invalid cell reference: '{s}'"))?;
        let (letters, digits) = s.split_at(split);

        if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!("invalid cell reference: '{s}'"));
        }

        let col = letters
            .chars()
            .map(|c| c.to_ascii_uppercase() as usize - 'A' as usize + 1)
            .try_fold(0usize, |acc, d| acc.checked_mul(26)?.checked_add(d))
            .ok_or_else(|| format!("invalid cell reference: '{s}' (column out of range)"))?
            - 1;

        let row: usize = digits
            .parse()
            .map_err(|_| format!("invalid cell reference: '{s}'"))?;
        if row == 0 {
            return Err(format!("invalid cell reference: '{s}' (rows start at 1)"));
        }

        Ok(CellRef::new(row - 1, col))
    }
}

impl TryFrom<String> for CellRef {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CellRef> for String {
    fn from(cell: CellRef) -> Self {
        cell.to_string()
    }
}

static EMPTY: Cell = Cell::Empty;

/// A sheet as a grid of cells. Rows may have different lengths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Build a grid from plain strings; empty strings become empty cells.
    pub fn from_strings<R, S>(rows: impl IntoIterator<Item = R>) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(|s| Cell::from(s.as_ref())).collect())
            .collect();
        Self { rows }
    }

    /// Number of rows, including trailing rows that are present but empty.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// The cell at `position`; out-of-range positions read as [`Cell::Empty`].
    pub fn cell(&self, position: CellRef) -> &Cell {
        self.rows
            .get(position.row)
            .and_then(|r| r.get(position.col))
            .unwrap_or(&EMPTY)
    }

    /// Place a cell, growing the grid as needed.
    pub fn set(&mut self, position: CellRef, cell: Cell) {
        if self.rows.len() <= position.row {
            self.rows.resize_with(position.row + 1, Vec::new);
        }
        let row = &mut self.rows[position.row];
        if row.len() <= position.col {
            row.resize_with(position.col + 1, Cell::default);
        }
        row[position.col] = cell;
    }
}
