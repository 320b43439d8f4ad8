use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::errors::SolverResult;
use crate::search::SearchMode;
use crate::splitter::SymbolSplitter;

/// Configuration for a solver run.
///
/// # Configuration Locations
///
/// The configuration can be loaded from multiple locations in order of precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.wordgrid.yaml` in the current directory
/// 3. Global `$HOME/.config/wordgrid/config.yaml`
///
/// # Configuration Format
///
/// ```yaml
/// # Adjacency rule: straight_line (word-search) or free_roaming (boggle)
/// mode: free_roaming
///
/// # Maximum number of per-cell tasks in flight for async searches
/// # Omit for no limit
/// max_concurrency: 64
///
/// # Worker threads for parallel searches (default: CPU cores)
/// thread_count: 4
///
/// # Regex describing multi-letter symbols, e.g. Boggle's QU tile
/// split_pattern: "QU"
///
/// # Uppercase the board and the words before searching
/// uppercase: true
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
///
/// # CLI Integration
///
/// When using the CLI, command-line arguments take precedence over config file values.
/// The merging behavior is defined in the `merge_with_cli` method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Adjacency rule for spelling words
    #[serde(default)]
    pub mode: SearchMode,

    /// Upper bound on concurrently running per-cell tasks
    /// If None, every task may run at once
    #[serde(default)]
    pub max_concurrency: Option<NonZeroUsize>,

    /// Number of threads to use for parallel searching
    /// Defaults to number of CPU cores if not specified
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Regex matching multi-character symbols
    #[serde(default)]
    pub split_pattern: Option<String>,

    /// Whether to uppercase board symbols and words
    #[serde(default)]
    pub uppercase: bool,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            max_concurrency: None,
            thread_count: default_thread_count(),
            split_pattern: None,
            uppercase: false,
            log_level: default_log_level(),
        }
    }
}

impl SolverConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SolverResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from a specific file
    pub fn load_from(config_path: Option<&Path>) -> SolverResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            dirs::config_dir().map(|p| p.join("wordgrid/config.yaml")),
            Some(PathBuf::from(".wordgrid.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges CLI arguments with configuration file values
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if let Some(mode) = cli.mode {
            self.mode = mode;
        }
        if cli.max_concurrency.is_some() {
            self.max_concurrency = cli.max_concurrency;
        }
        if let Some(threads) = cli.thread_count {
            self.thread_count = threads;
        }
        if cli.split_pattern.is_some() {
            self.split_pattern = cli.split_pattern;
        }
        if cli.uppercase {
            self.uppercase = true;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }

    /// Builds the symbol splitter described by `split_pattern`
    pub fn splitter(&self) -> SolverResult<SymbolSplitter> {
        match &self.split_pattern {
            Some(pattern) => SymbolSplitter::pattern(pattern),
            None => Ok(SymbolSplitter::Chars),
        }
    }
}

/// Values given on the command line; `None` leaves the file value alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<SearchMode>,
    pub max_concurrency: Option<NonZeroUsize>,
    pub thread_count: Option<NonZeroUsize>,
    pub split_pattern: Option<String>,
    pub uppercase: bool,
    pub log_level: Option<String>,
}
