use tracing::trace;

use crate::cell::{Cell, CellSequence};
use crate::grid::Grid;
use crate::results::FoundMap;
use crate::trie::{NodeId, PrefixTree};

/// Backtracking state for free-roaming search.
///
/// `visited` and `path` are pushed and popped in lockstep, so after every
/// call to [`RoamingWalk::search_from`] both are back to empty and the walk
/// can be reused for the next starting cell. A walk must never be shared
/// between two searches running at the same time.
#[derive(Debug, Clone)]
pub struct RoamingWalk {
    visited: Vec<bool>,
    rows: usize,
    stride: usize,
    path: CellSequence,
}

impl RoamingWalk {
    /// Sizes the walk for `grid`. The visited grid itself is allocated on
    /// the first start cell that matches a dictionary prefix.
    pub fn new(grid: &Grid) -> Self {
        Self {
            visited: Vec::new(),
            rows: grid.row_count(),
            stride: grid.max_row_len(),
            path: Vec::new(),
        }
    }

    fn index(&self, cell: Cell) -> usize {
        cell.row * self.stride + cell.column
    }

    /// Records every simple path from `start` that spells a word
    pub fn search_from(
        &mut self,
        trie: &PrefixTree,
        grid: &Grid,
        start: Cell,
        found: &FoundMap,
    ) -> usize {
        let Some(first) = grid
            .symbol(start)
            .and_then(|symbol| trie.child(trie.root(), symbol))
        else {
            return 0;
        };
        if self.visited.is_empty() {
            self.visited = vec![false; self.rows * self.stride];
        }

        let recorded = self.visit(trie, grid, first, start, found);

        debug_assert!(self.path.is_empty());
        debug_assert!(!self.visited.iter().any(|&v| v));
        if recorded > 0 {
            trace!("Free-roaming search from {} recorded {} paths", start, recorded);
        }
        recorded
    }

    fn visit(
        &mut self,
        trie: &PrefixTree,
        grid: &Grid,
        node: NodeId,
        cell: Cell,
        found: &FoundMap,
    ) -> usize {
        let mut recorded = 0;

        if let Some(word) = trie.word_at(node) {
            self.path.push(cell);
            found.record(word, &self.path);
            self.path.pop();
            recorded += 1;
        }
        if !trie.is_branching(node) {
            return recorded;
        }

        let index = self.index(cell);
        self.visited[index] = true;
        self.path.push(cell);

        for next in grid.neighbors(cell) {
            if self.visited[self.index(next)] {
                continue;
            }
            if let Some(child) = grid.symbol(next).and_then(|s| trie.child(node, s)) {
                recorded += self.visit(trie, grid, child, next, found);
            }
        }

        self.path.pop();
        self.visited[index] = false;
        recorded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::SearchOutput;
    use crate::splitter::SymbolSplitter;
    use std::collections::HashSet;

    fn scan(rows: &[&str], words: &[&str]) -> SearchOutput {
        let grid = Grid::new(rows.iter().map(|r| r.chars().map(String::from))).unwrap();
        let trie = PrefixTree::build(words, &SymbolSplitter::Chars, grid.cell_count());
        let found = FoundMap::new();
        let mut walk = RoamingWalk::new(&grid);
        for cell in grid.cells() {
            walk.search_from(&trie, &grid, cell, &found);
        }
        found.into_output()
    }

    fn cells(coords: &[(usize, usize)]) -> Vec<Cell> {
        coords.iter().map(|&c| Cell::from(c)).collect()
    }

    #[test]
    fn test_turning_paths() {
        let output = scan(&["AB", "CE"], &["ABE", "ECAB"]);
        assert_eq!(output.paths("ABE"), &[cells(&[(0, 0), (0, 1), (1, 1)])]);
        assert_eq!(
            output.paths("ECAB"),
            &[cells(&[(1, 1), (1, 0), (0, 0), (0, 1)])]
        );
    }

    #[test]
    fn test_no_cell_reuse() {
        // ABA would need the single A twice
        let output = scan(&["AB", "XY"], &["ABA", "AB"]);
        assert!(!output.contains("ABA"));
        assert_eq!(output.paths("AB"), &[cells(&[(0, 0), (0, 1)])]);
    }

    #[test]
    fn test_all_simple_paths_of_uniform_board() {
        let output = scan(&["AA", "AA"], &["AAA"]);
        // 4 starts * 3 second cells * 2 third cells
        assert_eq!(output.paths("AAA").len(), 24);
        for path in output.paths("AAA") {
            let distinct: HashSet<_> = path.iter().collect();
            assert_eq!(distinct.len(), path.len());
        }
    }

    #[test]
    fn test_single_symbol_word() {
        let output = scan(&["XA"], &["A"]);
        assert_eq!(output.paths("A"), &[cells(&[(0, 1)])]);
    }

    #[test]
    fn test_walk_is_clean_after_each_start() {
        let grid = Grid::new(vec![vec!["A", "B"], vec!["B", "A"]]).unwrap();
        let trie = PrefixTree::build(["ABAB"], &SymbolSplitter::Chars, grid.cell_count());
        let found = FoundMap::new();
        let mut walk = RoamingWalk::new(&grid);
        let first = walk.search_from(&trie, &grid, Cell::new(0, 0), &found);
        assert!(walk.path.is_empty());
        assert!(walk.visited.iter().all(|v| !v));
        let again = walk.search_from(&trie, &grid, Cell::new(0, 0), &found);
        assert_eq!(first, again);
        assert_eq!(first, 2);
    }

    #[test]
    fn test_jagged_grid_indexes() {
        let output = scan(&["ABC", "D"], &["CBAD", "DB", "DC"]);
        assert_eq!(
            output.paths("CBAD"),
            &[cells(&[(0, 2), (0, 1), (0, 0), (1, 0)])]
        );
        assert_eq!(output.paths("DB"), &[cells(&[(1, 0), (0, 1)])]);
        assert!(!output.contains("DC"));
    }
}
