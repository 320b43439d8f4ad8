/// This module defines the error types for wordgrid.
///
/// # Error Taxonomy
///
/// Only two kinds of failure ever reach a caller of the solver:
///
/// 1. **Construction errors** are raised when a solver is built over a grid
///    without rows. They are not recoverable; the caller has to supply a
///    valid grid.
///
/// 2. **Task errors** are raised by the asynchronous scan when a per-cell task
///    fails and no error handler was installed. The first such error fails the
///    whole call.
///
/// Words that are empty or longer than the board are not errors at all. They
/// are dropped while the prefix tree is built and simply never match.
///
/// The remaining variants belong to the surfaces around the solver: board
/// parsing, configuration loading and the command line.
///
/// ```rust,ignore
/// match Solver::word_search(rows) {
///     Ok(solver) => // search,
///     Err(SolverError::EmptyGrid) => // ask for a real board,
///     Err(e) => // anything else
/// }
/// ```
use thiserror::Error;

/// Result type for solver operations
pub type SolverResult<T> = Result<T, SolverError>;

/// Errors that can occur while building or running a solver
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Invalid grid: grid must have at least one row")]
    EmptyGrid,
    #[error("Invalid board: {0}")]
    InvalidBoard(String),
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Search task {index} failed: {message}")]
    TaskFailed { index: usize, message: String },
    #[error("Search task {index} panicked: {message}")]
    TaskPanicked { index: usize, message: String },
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl SolverError {
    pub fn invalid_board(msg: impl Into<String>) -> Self {
        Self::InvalidBoard(msg.into())
    }

    pub fn invalid_pattern(pattern: impl Into<String>) -> Self {
        Self::InvalidPattern(pattern.into())
    }

    pub fn task_failed(index: usize, message: impl Into<String>) -> Self {
        Self::TaskFailed {
            index,
            message: message.into(),
        }
    }

    pub fn task_panicked(index: usize, message: impl Into<String>) -> Self {
        Self::TaskPanicked {
            index,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Index of the per-cell task this error came from, if any
    pub fn task_index(&self) -> Option<usize> {
        match self {
            Self::TaskFailed { index, .. } | Self::TaskPanicked { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for SolverError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SolverError::invalid_board("no rows");
        assert!(matches!(err, SolverError::InvalidBoard(_)));

        let err = SolverError::invalid_pattern("(");
        assert!(matches!(err, SolverError::InvalidPattern(_)));

        let err = SolverError::task_failed(3, "boom");
        assert!(matches!(err, SolverError::TaskFailed { index: 3, .. }));

        let err = SolverError::task_panicked(7, "boom");
        assert!(matches!(err, SolverError::TaskPanicked { index: 7, .. }));

        let err = SolverError::config_error("Missing required field");
        assert!(matches!(err, SolverError::ConfigError(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SolverError::EmptyGrid.to_string(),
            "Invalid grid: grid must have at least one row"
        );

        let err = SolverError::task_failed(2, "disk on fire");
        assert_eq!(err.to_string(), "Search task 2 failed: disk on fire");

        let err = SolverError::config_error("Missing required field".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing required field"
        );
    }

    #[test]
    fn test_task_index() {
        assert_eq!(SolverError::task_failed(4, "x").task_index(), Some(4));
        assert_eq!(SolverError::task_panicked(9, "x").task_index(), Some(9));
        assert_eq!(SolverError::EmptyGrid.task_index(), None);
    }
}
