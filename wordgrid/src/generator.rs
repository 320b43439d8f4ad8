//! Word-search puzzle generation.
//!
//! Words are dropped onto an empty square board at random positions, trying
//! the compass directions in random order. A placement is accepted when every
//! cell it covers is empty or already holds the same letter, so words may
//! cross. A word that fits nowhere is left out.
//! Whatever is left empty is filled with random letters `A`..=`Z`.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

use crate::cell::{Cell, Direction, DIRECTIONS};
use crate::errors::{SolverError, SolverResult};
use crate::grid::Grid;

/// A generated board together with the words hidden in it
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    pub grid: Grid,
    /// Placed words, sorted
    pub words: Vec<String>,
    /// Length of the longest placed word
    pub max_word_len: usize,
}

type Board = Vec<Vec<Option<char>>>;

/// Generates a `size` x `size` puzzle hiding as many of `vocabulary` as fit
pub fn generate<I, S, R>(size: usize, vocabulary: I, rng: &mut R) -> SolverResult<GeneratedPuzzle>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    if size == 0 {
        return Err(SolverError::invalid_board("board size must be at least 1"));
    }

    let mut vocabulary: Vec<String> = vocabulary
        .into_iter()
        .map(|w| w.as_ref().trim().to_uppercase())
        .filter(|w| !w.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    vocabulary.shuffle(rng);

    let mut board: Board = vec![vec![None; size]; size];
    let mut positions: Vec<Cell> = (0..size)
        .flat_map(|row| (0..size).map(move |column| Cell::new(row, column)))
        .collect();
    let mut directions = DIRECTIONS;
    let mut words = Vec::new();
    let mut max_word_len = 0;

    for word in vocabulary {
        let letters: Vec<char> = word.chars().collect();
        if letters.len() > size {
            continue;
        }
        positions.shuffle(rng);
        let placement = positions.iter().find_map(|&start| {
            directions.shuffle(rng);
            directions
                .iter()
                .find(|&&direction| can_place(&board, &letters, start, direction))
                .map(|&direction| (start, direction))
        });
        if let Some((start, direction)) = placement {
            place(&mut board, &letters, start, direction);
            max_word_len = max_word_len.max(letters.len());
            words.push(word);
        }
    }

    let rows = board.into_iter().map(|row| {
        row.into_iter()
            .map(|slot| slot.unwrap_or_else(|| rng.gen_range('A'..='Z')).to_string())
            .collect::<Vec<_>>()
    });
    let grid = Grid::new(rows.collect::<Vec<_>>())?;

    words.sort();
    debug!("Generated {}x{} puzzle with {} words", size, size, words.len());

    Ok(GeneratedPuzzle {
        grid,
        words,
        max_word_len,
    })
}

fn cells_along(start: Cell, direction: Direction, len: usize) -> impl Iterator<Item = Option<Cell>> {
    (0..len).scan(Some(start), move |cell, i| {
        let current = if i == 0 {
            *cell
        } else {
            cell.and_then(|c| c.step(direction))
        };
        *cell = current;
        Some(current)
    })
}

fn can_place(board: &Board, letters: &[char], start: Cell, direction: Direction) -> bool {
    cells_along(start, direction, letters.len())
        .zip(letters)
        .all(|(cell, &letter)| {
            cell.and_then(|c| board.get(c.row).and_then(|row| row.get(c.column)))
                .is_some_and(|slot| slot.is_none() || *slot == Some(letter))
        })
}

fn place(board: &mut Board, letters: &[char], start: Cell, direction: Direction) {
    for (cell, &letter) in cells_along(start, direction, letters.len())
        .flatten()
        .zip(letters)
    {
        board[cell.row][cell.column] = Some(letter);
    }
}
