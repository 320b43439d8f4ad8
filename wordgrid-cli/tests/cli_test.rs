use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use tempfile::{tempdir, TempDir};

fn create_test_files(dir: &TempDir, files: &[(&str, &str)]) -> Result<()> {
    for (name, content) in files {
        let file_path = dir.path().join(name);
        let mut file = File::create(file_path)?;
        writeln!(file, "{}", content)?;
    }
    Ok(())
}

fn wordgrid(dir: &TempDir) -> Result<Command> {
    let mut cmd = Command::cargo_bin("wordgrid-cli")?;
    cmd.current_dir(dir.path()).env("NO_COLOR", "1").env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn test_solve_word_search() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[("board.txt", "C A T\nX O X\nX X W"), ("words.txt", "CAT\nCOW\nDOG")],
    )?;

    wordgrid(&dir)?
        .args(["solve", "-b", "board.txt", "-w", "words.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CAT"))
        .stdout(predicate::str::contains("(0,0) -> (0,1) -> (0,2)"))
        .stdout(predicate::str::contains("COW"))
        .stdout(predicate::str::contains("Not found: DOG"))
        .stdout(predicate::str::contains("Found 2 words (2 paths)"));
    Ok(())
}

#[test]
fn test_solve_boggle_async() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[("board.txt", "CA\nXT"), ("words.txt", "'CAT', 'TAC', 'ACT',")],
    )?;

    // Straight lines cannot turn, so only the boggle run finds ACT
    wordgrid(&dir)?
        .args(["solve", "-b", "board.txt", "-w", "words.txt", "-m", "word-search"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 words"));

    wordgrid(&dir)?
        .args([
            "solve",
            "-b",
            "board.txt",
            "-w",
            "words.txt",
            "--mode",
            "boggle",
            "--async",
            "--max-concurrency",
            "2",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 words (3 paths)"));
    Ok(())
}

#[test]
fn test_solve_json_output() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("board.txt", "SEA"), ("words.txt", "sea\nsun")])?;

    let output = wordgrid(&dir)?
        .args(["solve", "-b", "board.txt", "-w", "words.txt", "--uppercase", "--json"])
        .output()?;
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["total_paths"], 1);
    assert_eq!(json["words"]["SEA"][0][2]["column"], 2);
    assert!(json["words"].get("SUN").is_none());
    Ok(())
}

#[test]
fn test_solve_with_config_file() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[
            ("board.txt", "QUIT\nABCD"),
            ("small.txt", "QUIT"),
            ("words.txt", "QUIT"),
            ("solver.yaml", "mode: boggle\nsplit_pattern: \"QU\"\nthread_count: 2"),
        ],
    )?;

    wordgrid(&dir)?
        .args([
            "solve", "-b", "board.txt", "-w", "words.txt", "-c", "solver.yaml", "--parallel", "-s",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 words (1 paths)"));

    // Three tiles hold only three of QUIT's four letters
    wordgrid(&dir)?
        .args(["solve", "-b", "small.txt", "-w", "words.txt", "-c", "solver.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not found: QUIT"))
        .stdout(predicate::str::contains("Found 0 words (0 paths)"));
    Ok(())
}

#[test]
fn test_solve_missing_board() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("words.txt", "CAT")])?;

    wordgrid(&dir)?
        .args(["solve", "-b", "nope.txt", "-w", "words.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read board"));
    Ok(())
}

#[test]
fn test_solve_blank_board() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(&dir, &[("board.txt", "\n  \n"), ("words.txt", "CAT")])?;

    wordgrid(&dir)?
        .args(["solve", "-b", "board.txt", "-w", "words.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid board"));
    Ok(())
}

#[test]
fn test_generate_then_solve() -> Result<()> {
    let dir = tempdir()?;
    create_test_files(
        &dir,
        &[("vocabulary.txt", "river\nstone\nharbor\nbeacon\nlantern\nmeadow")],
    )?;

    wordgrid(&dir)?
        .args(["generate", "-n", "10", "-w", "vocabulary.txt", "--seed", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Board 10x10:"))
        .stdout(predicate::str::contains("Words (count = 6):"));

    let board = fs::read_to_string(dir.path().join("out/word-search-board.txt"))?;
    assert_eq!(board.lines().count(), 10);
    let words = fs::read_to_string(dir.path().join("out/word-search-words.txt"))?;
    assert!(words.contains("'HARBOR'"));
    assert!(words.ends_with(','));

    wordgrid(&dir)?
        .args([
            "solve",
            "-b",
            "out/word-search-board.txt",
            "-w",
            "out/word-search-words.txt",
            "--stats",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 6 words"));
    Ok(())
}
