/// This module implements the two per-cell search algorithms that the solver
/// runs over every board position.
///
/// # Straight-Line vs Free-Roaming
///
/// Both algorithms start from one cell and follow the prefix tree outward,
/// abandoning a path the moment no dictionary word continues it:
///
/// 1. **Straight-line search** ([`straight`]) walks each of the eight compass
///    directions without turning, the way words hide in a classic word-search
///    puzzle. Directions are independent, so no visited-state is needed.
///
/// 2. **Free-roaming search** ([`roaming`]) is Boggle: every step may go to any
///    of the eight neighbors, but a cell can be used at most once per path.
///    It is a depth-first backtracking walk over a visited grid and a working
///    path buffer, both owned by a [`RoamingWalk`].
///
/// # Sharing State Between Cells
///
/// The prefix tree and the grid are read-only during a search and are shared
/// freely. The visited grid is not: a [`CellSearcher`] owns one, and every
/// concurrently running scan needs its own searcher.
///
/// ```rust,ignore
/// let mut searcher = CellSearcher::new(SearchMode::FreeRoaming, &grid);
/// for cell in grid.cells() {
///     searcher.search_from(&trie, &grid, cell, &found);
/// }
/// ```
pub mod roaming;
pub mod straight;

pub use roaming::RoamingWalk;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::cell::Cell;
use crate::errors::SolverError;
use crate::grid::Grid;
use crate::results::FoundMap;
use crate::trie::PrefixTree;

/// Adjacency rule used to spell words on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Contiguous straight lines in any of the eight directions
    #[default]
    #[serde(alias = "word_search", alias = "word-search")]
    StraightLine,
    /// Any 8-connected path that never reuses a cell
    #[serde(alias = "boggle")]
    FreeRoaming,
}

impl FromStr for SearchMode {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "straight-line" | "straight" | "word-search" => Ok(Self::StraightLine),
            "free-roaming" | "roaming" | "boggle" => Ok(Self::FreeRoaming),
            other => Err(SolverError::config_error(format!(
                "Unknown search mode '{}', expected word-search or boggle",
                other
            ))),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StraightLine => write!(f, "word-search"),
            Self::FreeRoaming => write!(f, "boggle"),
        }
    }
}

/// Runs the selected algorithm from one starting cell at a time.
///
/// Holds whatever mutable state the algorithm needs between cells, so one
/// searcher can serve a whole sequential scan.
#[derive(Debug)]
pub enum CellSearcher {
    StraightLine,
    FreeRoaming(RoamingWalk),
}

impl CellSearcher {
    pub fn new(mode: SearchMode, grid: &Grid) -> Self {
        match mode {
            SearchMode::StraightLine => Self::StraightLine,
            SearchMode::FreeRoaming => Self::FreeRoaming(RoamingWalk::new(grid)),
        }
    }

    /// Records every match starting at `start`, returning how many paths
    /// were recorded
    pub fn search_from(
        &mut self,
        trie: &PrefixTree,
        grid: &Grid,
        start: Cell,
        found: &FoundMap,
    ) -> usize {
        match self {
            Self::StraightLine => straight::search_from(trie, grid, start, found),
            Self::FreeRoaming(walk) => walk.search_from(trie, grid, start, found),
        }
    }
}
