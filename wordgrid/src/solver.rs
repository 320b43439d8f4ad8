//! The solver facade.
//!
//! A [`Solver`] owns a board and the settings that shape a search; every
//! `find_*` call builds a fresh prefix tree from the words it is given,
//! scans every cell and hands back the matches. Nothing is cached between
//! calls, so two calls with different word sets never see each other's
//! matches.
//!
//! Three scans are available:
//!
//! - [`Solver::find_many`] walks the cells in row-major order on the calling
//!   thread, so matches come back in discovery order.
//! - [`Solver::find_many_parallel`] splits the cells into chunks on the rayon
//!   pool.
//! - [`Solver::find_many_async`] turns each cell into a blocking task and
//!   runs them through [`scatter_gather`] with a bounded number in flight.
//!
//! All three find the same set of paths; only the cross-cell order differs.

use rayon::prelude::*;
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::cell::{Cell, CellSequence};
use crate::config::SolverConfig;
use crate::errors::{SolverError, SolverResult};
use crate::grid::Grid;
use crate::results::{FoundMap, SearchOutput};
use crate::scheduler::{scatter_gather, TaskErrorHandler};
use crate::search::{CellSearcher, SearchMode};
use crate::splitter::SymbolSplitter;
use crate::trie::PrefixTree;

const UNBOUNDED: NonZeroUsize = NonZeroUsize::MAX;

/// Finds dictionary words on a fixed board
#[derive(Clone)]
pub struct Solver {
    grid: Arc<Grid>,
    mode: SearchMode,
    splitter: SymbolSplitter,
    max_concurrency: NonZeroUsize,
    thread_count: NonZeroUsize,
    error_handler: Option<TaskErrorHandler<usize>>,
}

impl fmt::Debug for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Solver")
            .field("rows", &self.grid.row_count())
            .field("mode", &self.mode)
            .field("splitter", &self.splitter)
            .field("max_concurrency", &self.max_concurrency)
            .field("thread_count", &self.thread_count)
            .field("error_handler", &self.error_handler.is_some())
            .finish()
    }
}

impl Solver {
    pub fn new(grid: Grid, mode: SearchMode) -> Self {
        Self {
            grid: Arc::new(grid),
            mode,
            splitter: SymbolSplitter::default(),
            max_concurrency: UNBOUNDED,
            thread_count: NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN),
            error_handler: None,
        }
    }

    /// Builds a solver straight from rows of symbols; fails on zero rows
    pub fn from_rows<R, S>(rows: R, mode: SearchMode) -> SolverResult<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Ok(Self::new(Grid::new(rows)?, mode))
    }

    /// Straight-line solver, as in a printed word-search puzzle
    pub fn word_search<R, S>(rows: R) -> SolverResult<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(rows, SearchMode::StraightLine)
    }

    /// Free-roaming solver, as in Boggle
    pub fn boggle<R, S>(rows: R) -> SolverResult<Self>
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_rows(rows, SearchMode::FreeRoaming)
    }

    /// Builds a solver over `grid` using the mode, splitter and limits in
    /// `config`
    pub fn from_config(grid: Grid, config: &SolverConfig) -> SolverResult<Self> {
        Ok(Self::new(grid, config.mode)
            .with_splitter(config.splitter()?)
            .with_max_concurrency(config.max_concurrency.unwrap_or(UNBOUNDED))
            .with_thread_count(config.thread_count))
    }

    pub fn with_splitter(mut self, splitter: SymbolSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Caps the number of per-cell tasks in flight during async searches
    pub fn with_max_concurrency(mut self, max_concurrency: NonZeroUsize) -> Self {
        self.max_concurrency = max_concurrency;
        self
    }

    pub fn with_thread_count(mut self, thread_count: NonZeroUsize) -> Self {
        self.thread_count = thread_count;
        self
    }

    /// Installs a handler for failed per-cell tasks in async searches.
    ///
    /// The handler receives the error and the index of the failed cell in
    /// row-major order, and returns the path count to report for that cell.
    /// Without a handler the first failure fails the whole search.
    ///
    /// A per-cell search never returns an error of its own, so the handler
    /// only sees [`SolverError::TaskPanicked`] from a task that panicked.
    pub fn with_error_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(SolverError, usize) -> usize + Send + Sync + 'static,
    {
        self.error_handler = Some(Arc::new(handler));
        self
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn splitter(&self) -> &SymbolSplitter {
        &self.splitter
    }

    pub fn max_concurrency(&self) -> NonZeroUsize {
        self.max_concurrency
    }

    pub fn thread_count(&self) -> NonZeroUsize {
        self.thread_count
    }

    fn build_trie<I, S>(&self, words: I) -> PrefixTree
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        PrefixTree::build(words, &self.splitter, self.grid.cell_count())
    }

    /// Every path spelling `word`, in discovery order
    pub fn find_one(&self, word: &str) -> Vec<CellSequence> {
        self.find_many([word]).take(word)
    }

    /// Every path spelling any of `words`, scanning cells in row-major order
    pub fn find_many<I, S>(&self, words: I) -> SearchOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trie = self.build_trie(words);
        if trie.is_empty() {
            debug!("No searchable words, skipping the scan");
            return SearchOutput::new();
        }
        info!(
            "Starting {} search for {} words over {} cells",
            self.mode,
            trie.word_count(),
            self.grid.len()
        );

        let found = FoundMap::new();
        let mut searcher = CellSearcher::new(self.mode, &self.grid);
        for cell in self.grid.cells() {
            searcher.search_from(&trie, &self.grid, cell, &found);
        }

        let output = found.into_output();
        log_complete(&output);
        output
    }

    /// Same matches as [`Solver::find_many`], with cells split into chunks
    /// across the rayon pool. Cross-cell order is not preserved.
    pub fn find_many_parallel<I, S>(&self, words: I) -> SearchOutput
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trie = self.build_trie(words);
        if trie.is_empty() {
            debug!("No searchable words, skipping the scan");
            return SearchOutput::new();
        }

        let cells: Vec<Cell> = self.grid.cells().collect();
        let thread_count = self.thread_count.get();
        let chunk_size = (cells.len() / thread_count).clamp(1, 256);
        info!(
            "Starting parallel {} search for {} words over {} cells (chunk size {})",
            self.mode,
            trie.word_count(),
            cells.len(),
            chunk_size
        );

        let found = FoundMap::new();
        cells.par_chunks(chunk_size).for_each(|chunk| {
            // Each chunk gets its own visited state
            let mut searcher = CellSearcher::new(self.mode, &self.grid);
            for &cell in chunk {
                searcher.search_from(&trie, &self.grid, cell, &found);
            }
        });

        let output = found.into_output();
        log_complete(&output);
        output
    }

    /// Async form of [`Solver::find_one`]
    pub async fn find_one_async(&self, word: &str) -> SolverResult<Vec<CellSequence>> {
        Ok(self.find_many_async([word]).await?.take(word))
    }

    /// Async form of [`Solver::find_many`].
    ///
    /// Each cell becomes one blocking task; at most `max_concurrency` run at
    /// once. A panicking task goes to the error handler when one is
    /// installed, otherwise the call fails with that task's error.
    pub async fn find_many_async<I, S>(&self, words: I) -> SolverResult<SearchOutput>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trie = self.build_trie(words);
        if trie.is_empty() {
            debug!("No searchable words, skipping the scan");
            return Ok(SearchOutput::new());
        }
        info!(
            "Starting async {} search for {} words over {} cells (max in flight {})",
            self.mode,
            trie.word_count(),
            self.grid.len(),
            self.max_concurrency
        );

        let trie = Arc::new(trie);
        let found = Arc::new(FoundMap::new());
        let mode = self.mode;

        let tasks: Vec<_> = self
            .grid
            .cells()
            .map(|cell| {
                let trie = Arc::clone(&trie);
                let grid = Arc::clone(&self.grid);
                let found = Arc::clone(&found);
                move || -> SolverResult<usize> {
                    let mut searcher = CellSearcher::new(mode, &grid);
                    Ok(searcher.search_from(&trie, &grid, cell, &found))
                }
            })
            .collect();

        let per_cell = scatter_gather(tasks, self.max_concurrency, self.error_handler.as_ref()).await?;
        debug!(
            "{} of {} cells produced matches",
            per_cell.iter().filter(|&&n| n > 0).count(),
            per_cell.len()
        );

        let output = match Arc::try_unwrap(found) {
            Ok(found) => found.into_output(),
            Err(shared) => shared.snapshot(),
        };
        log_complete(&output);
        Ok(output)
    }
}

fn log_complete(output: &SearchOutput) {
    info!(
        "Search complete. Found {} words ({} paths)",
        output.words_found(),
        output.total_paths
    );
}
