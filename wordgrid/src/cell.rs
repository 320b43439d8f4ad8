use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the board.
///
/// Cells are plain values: two cells with the same coordinates compare and
/// hash equal, and copying one into a path costs two words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub column: usize,
}

impl Cell {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Moves one step in `direction`, or `None` when the step would leave the
    /// non-negative quadrant. Upper bounds are the grid's business.
    pub fn step(self, direction: Direction) -> Option<Cell> {
        let row = self.row.checked_add_signed(direction.d_row)?;
        let column = self.column.checked_add_signed(direction.d_col)?;
        Some(Cell { row, column })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row, self.column)
    }
}

/// A path through the grid, earliest cell first
pub type CellSequence = Vec<Cell>;

/// A unit step between neighboring cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Direction {
    pub d_row: isize,
    pub d_col: isize,
}

impl Direction {
    pub const fn new(d_row: isize, d_col: isize) -> Self {
        Self { d_row, d_col }
    }
}

/// The eight compass directions, row delta major
pub const DIRECTIONS: [Direction; 8] = [
    Direction::new(-1, -1),
    Direction::new(-1, 0),
    Direction::new(-1, 1),
    Direction::new(0, -1),
    Direction::new(0, 1),
    Direction::new(1, -1),
    Direction::new(1, 0),
    Direction::new(1, 1),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_equal_cells_hash_identically() {
        let mut seen = HashSet::new();
        seen.insert(Cell::new(2, 3));
        assert!(seen.contains(&Cell::from((2, 3))));
        assert!(!seen.contains(&Cell::new(3, 2)));
    }

    #[test]
    fn test_step_stops_at_origin() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.step(Direction::new(-1, 0)), None);
        assert_eq!(origin.step(Direction::new(0, -1)), None);
        assert_eq!(origin.step(Direction::new(1, 1)), Some(Cell::new(1, 1)));
    }

    #[test]
    fn test_directions_are_distinct_unit_steps() {
        let unique: HashSet<_> = DIRECTIONS.iter().collect();
        assert_eq!(unique.len(), 8);
        for d in DIRECTIONS {
            assert!(d.d_row.abs() <= 1 && d.d_col.abs() <= 1);
            assert!(d != Direction::new(0, 0));
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Cell::new(4, 11).to_string(), "(4,11)");
    }
}
