use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wordgrid::{
    format_word_list, generate, parse_word_list, CellSequence, CliOverrides, Grid, SearchMode,
    SearchOutput, Solver, SolverConfig,
};

const BOARD_FILE: &str = "word-search-board.txt";
const WORDS_FILE: &str = "word-search-words.txt";
const WORDS_PER_ROW: usize = 7;
const BOARD_DISPLAY_THRESHOLD: usize = 20;
const WORDS_DISPLAY_THRESHOLD: usize = 300;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
struct SolveArgs {
    /// Board file, one row per line
    #[arg(short = 'b', long)]
    board: PathBuf,

    /// Word list file, one word per line or comma separated
    #[arg(short = 'w', long)]
    words: PathBuf,

    /// Adjacency rule (word-search|boggle)
    #[arg(short = 'm', long)]
    mode: Option<SearchMode>,

    /// Run one task per cell on the async scheduler
    #[arg(long = "async")]
    run_async: bool,

    /// Split the cells across worker threads
    #[arg(long, conflicts_with = "run_async")]
    parallel: bool,

    /// Maximum number of per-cell tasks in flight with --async
    #[arg(long)]
    max_concurrency: Option<NonZeroUsize>,

    /// Number of threads to use with --parallel
    #[arg(short = 'j', long)]
    threads: Option<NonZeroUsize>,

    /// Regex matching multi-letter symbols (e.g. QU)
    #[arg(long)]
    split_pattern: Option<String>,

    /// Uppercase the board and the words before searching
    #[arg(short = 'u', long)]
    uppercase: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show only statistics, not paths
    #[arg(short, long)]
    stats: bool,

    /// Configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the words of a word list on a board
    Solve(Box<SolveArgs>),

    /// Generate a word-search puzzle from a vocabulary
    Generate {
        /// Board width and height
        #[arg(short = 'n', long, default_value = "20")]
        size: usize,

        /// Vocabulary file, one word per line or comma separated
        #[arg(short = 'w', long)]
        words: PathBuf,

        /// Seed for a reproducible puzzle
        #[arg(long)]
        seed: Option<u64>,

        /// Directory receiving the board and word files
        #[arg(short, long, default_value = "out")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    run()
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => solve(*args),
        Commands::Generate {
            size,
            words,
            seed,
            out_dir,
        } => {
            let config = SolverConfig::load()?;
            init_logging(&config.log_level);
            generate_puzzle(size, &words, seed, &out_dir)
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {} {}", what, path.display()))
}

fn solve(args: SolveArgs) -> Result<()> {
    let config = SolverConfig::load_from(args.config.as_deref())?.merge_with_cli(CliOverrides {
        mode: args.mode,
        max_concurrency: args.max_concurrency,
        thread_count: args.threads,
        split_pattern: args.split_pattern,
        uppercase: args.uppercase,
        log_level: args.log_level,
    });
    init_logging(&config.log_level);

    let splitter = config.splitter()?;
    let mut grid = Grid::parse(&read_file(&args.board, "board")?, &splitter)?;
    let mut words = parse_word_list(&read_file(&args.words, "word list")?);
    if config.uppercase {
        grid = grid.to_uppercase();
        words = words.iter().map(|w| w.to_uppercase()).collect();
    }
    info!(
        "Loaded {} board with {} rows and {} words",
        config.mode,
        grid.row_count(),
        words.len()
    );

    let solver = Solver::from_config(grid, &config)?;
    let start = Instant::now();
    let output = if args.run_async {
        let runtime = tokio::runtime::Runtime::new()?;
        runtime.block_on(solver.find_many_async(&words))?
    } else if args.parallel {
        solver.find_many_parallel(&words)
    } else {
        solver.find_many(&words)
    };
    let elapsed = start.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_search_results(&output, &words, args.stats, elapsed);
    }
    Ok(())
}

fn format_path(path: &CellSequence) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" -> ")
}

fn print_search_results(output: &SearchOutput, words: &[String], stats_only: bool, elapsed: Duration) {
    if !stats_only {
        for (word, paths) in &output.words {
            println!("{}", word.blue().bold());
            for path in paths {
                println!("  {}", format_path(path).green());
            }
        }

        let missing: BTreeSet<&str> = words
            .iter()
            .map(String::as_str)
            .filter(|w| !output.contains(w))
            .collect();
        if !missing.is_empty() {
            println!(
                "\n{} {}",
                "Not found:".yellow(),
                missing.into_iter().collect::<Vec<_>>().join(", ")
            );
        }
        println!();
    }

    println!(
        "Found {} words ({} paths) in {}",
        output.words_found(),
        output.total_paths,
        format_elapsed(elapsed)
    );
}

/// Formats `elapsed` to whole microseconds; sub-microsecond noise only
/// clutters the summary
fn format_elapsed(elapsed: Duration) -> String {
    let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
    humantime::format_duration(Duration::from_micros(micros)).to_string()
}

fn generate_puzzle(size: usize, words: &Path, seed: Option<u64>, out_dir: &Path) -> Result<()> {
    let vocabulary = parse_word_list(&read_file(words, "vocabulary")?);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let puzzle = generate(size, &vocabulary, &mut rng)?;

    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;
    let board_text = puzzle.grid.to_text();
    fs::write(out_dir.join(BOARD_FILE), &board_text)?;
    fs::write(
        out_dir.join(WORDS_FILE),
        format_word_list(&puzzle.words, WORDS_PER_ROW, puzzle.max_word_len),
    )?;

    println!("Board {}x{}:", size, size);
    if size <= BOARD_DISPLAY_THRESHOLD {
        println!("{}\n", board_text);
    }
    println!("Words (count = {}):", puzzle.words.len());
    if puzzle.words.len() <= WORDS_DISPLAY_THRESHOLD {
        for row in puzzle.words.chunks(WORDS_PER_ROW) {
            let row: Vec<String> = row
                .iter()
                .map(|w| format!("{:<width$}", w, width = puzzle.max_word_len))
                .collect();
            println!("{}", row.join("      ").trim_end());
        }
    }
    println!(
        "\nWrote {} and {} to {}",
        BOARD_FILE,
        WORDS_FILE,
        out_dir.display().to_string().blue()
    );
    Ok(())
}
