pub mod cell;
pub mod config;
pub mod errors;
pub mod generator;
pub mod grid;
pub mod results;
pub mod scheduler;
pub mod search;
pub mod solver;
pub mod splitter;
pub mod trie;
pub mod words;

pub use cell::{Cell, CellSequence, Direction, DIRECTIONS};
pub use config::{CliOverrides, SolverConfig};
pub use errors::{SolverError, SolverResult};
pub use generator::{generate, GeneratedPuzzle};
pub use grid::Grid;
pub use results::{FoundMap, SearchOutput};
pub use scheduler::{scatter_gather, TaskErrorHandler};
pub use search::SearchMode;
pub use solver::Solver;
pub use splitter::SymbolSplitter;
pub use trie::PrefixTree;
pub use words::{format_word_list, parse_word_list};
