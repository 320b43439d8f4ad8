use tracing::trace;

use crate::cell::{Cell, DIRECTIONS};
use crate::grid::Grid;
use crate::results::FoundMap;
use crate::trie::PrefixTree;

/// Records every word spelled in a straight line from `start`.
///
/// A word made of the starting symbol alone is recorded once with the
/// one-cell path before any direction is walked. Each direction then extends
/// the path until it leaves the board or the prefix tree runs out.
pub fn search_from(trie: &PrefixTree, grid: &Grid, start: Cell, found: &FoundMap) -> usize {
    let Some(first) = grid
        .symbol(start)
        .and_then(|symbol| trie.child(trie.root(), symbol))
    else {
        return 0;
    };

    let mut recorded = 0;
    let mut path = vec![start];

    if let Some(word) = trie.word_at(first) {
        found.record(word, &path);
        recorded += 1;
    }
    if !trie.is_branching(first) {
        return recorded;
    }

    for direction in DIRECTIONS {
        path.truncate(1);
        let mut node = first;
        let mut cell = start;

        while let Some(next) = cell
            .step(direction)
            .filter(|n| grid.in_bounds(n.row, n.column))
        {
            let Some(child) = grid.symbol(next).and_then(|s| trie.child(node, s)) else {
                break;
            };
            path.push(next);
            node = child;
            cell = next;

            if let Some(word) = trie.word_at(node) {
                found.record(word, &path);
                recorded += 1;
            }
        }
    }

    if recorded > 0 {
        trace!("Straight-line search from {} recorded {} paths", start, recorded);
    }
    recorded
}
