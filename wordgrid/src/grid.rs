use once_cell::sync::Lazy;
use regex::Regex;

use crate::cell::{Cell, DIRECTIONS};
use crate::errors::{SolverError, SolverResult};
use crate::splitter::SymbolSplitter;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("static regex"));

/// Immutable board of symbols.
///
/// Rows may have different lengths. The board always has at least one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    /// Creates a grid from already split rows
    pub fn new<R, S>(rows: R) -> SolverResult<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();
        if rows.is_empty() {
            return Err(SolverError::EmptyGrid);
        }
        Ok(Self { rows })
    }

    /// Parses board text, one row per non-blank line.
    ///
    /// A line with inner whitespace is read as whitespace-separated symbols
    /// (`Q U A` or `QU I T`); any other line goes through `splitter`.
    pub fn parse(text: &str, splitter: &SymbolSplitter) -> SolverResult<Self> {
        let rows: Vec<Vec<String>> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| {
                if WHITESPACE.is_match(line) {
                    WHITESPACE.split(line).map(String::from).collect()
                } else {
                    splitter.split(line)
                }
            })
            .collect();

        if rows.is_empty() {
            return Err(SolverError::invalid_board("board text has no rows"));
        }
        Self::new(rows)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Upper bound on the length of a word that can appear on the board,
    /// taken as `row_count * first_row_len`
    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.row_len(0)
    }

    pub fn in_bounds(&self, row: usize, column: usize) -> bool {
        column < self.row_len(row)
    }

    /// Symbol at `(row, column)`, or `None` off the board
    pub fn symbol_at(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
    }

    pub fn symbol(&self, cell: Cell) -> Option<&str> {
        self.symbol_at(cell.row, cell.column)
    }

    /// In-bounds neighbors of `cell` in compass order
    pub fn neighbors(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS
            .into_iter()
            .filter_map(move |d| cell.step(d))
            .filter(move |n| self.in_bounds(n.row, n.column))
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, r)| (0..r.len()).map(move |column| Cell::new(row, column)))
    }

    /// Number of cells actually present, counting jagged rows exactly
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest row length, used to size visited-state buffers
    pub fn max_row_len(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Renders the board as space separated rows
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join(" "))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns a copy with every symbol uppercased
    pub fn to_uppercase(&self) -> Self {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|s| s.to_uppercase()).collect())
                .collect(),
        }
    }
}
