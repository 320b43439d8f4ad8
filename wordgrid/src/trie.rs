use std::collections::HashMap;
use tracing::debug;

use crate::splitter::SymbolSplitter;

/// Handle to a node inside a [`PrefixTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<String, NodeId>,
}

/// Prefix tree over grid symbols.
///
/// Nodes live in a flat arena and refer to each other by [`NodeId`]. The
/// association from a terminal node back to the whole word it spells is kept
/// in a separate map, so the tree itself only ever stores split symbols.
///
/// A tree is built for one search call and is read-only afterwards, which is
/// what lets concurrent per-cell tasks share it behind an `Arc`.
#[derive(Debug)]
pub struct PrefixTree {
    nodes: Vec<TrieNode>,
    words: HashMap<NodeId, String>,
}

const ROOT: NodeId = NodeId(0);

impl PrefixTree {
    /// Builds a tree from `words`.
    ///
    /// Empty words and words with more characters than `cell_count` are
    /// skipped before splitting. A multi-letter symbol still counts each of
    /// its characters, so the board size bounds the text, not the tiles.
    pub fn build<I, S>(words: I, splitter: &SymbolSplitter, cell_count: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree = Self {
            nodes: vec![TrieNode::default()],
            words: HashMap::new(),
        };
        let mut rejected = 0usize;

        for word in words {
            let word = word.as_ref();
            if word.is_empty() || word.chars().count() > cell_count {
                rejected += 1;
                continue;
            }
            let symbols = splitter.split(word);
            if symbols.is_empty() {
                rejected += 1;
                continue;
            }
            let terminal = tree.insert(symbols);
            tree.words.entry(terminal).or_insert_with(|| word.to_string());
        }

        debug!(
            "Built prefix tree: {} words, {} nodes, {} rejected (cell count {})",
            tree.words.len(),
            tree.nodes.len(),
            rejected,
            cell_count
        );
        tree
    }

    fn insert(&mut self, symbols: Vec<String>) -> NodeId {
        let mut current = ROOT;
        for symbol in symbols {
            let existing = self.nodes[current.0].children.get(&symbol).copied();
            current = match existing {
                Some(child) => child,
                None => {
                    let child = NodeId(self.nodes.len());
                    self.nodes.push(TrieNode::default());
                    self.nodes[current.0].children.insert(symbol, child);
                    child
                }
            };
        }
        current
    }

    /// The empty prefix
    pub fn root(&self) -> NodeId {
        ROOT
    }

    /// Child of `node` along `symbol`, if any word continues that way
    pub fn child(&self, node: NodeId, symbol: &str) -> Option<NodeId> {
        self.nodes[node.0].children.get(symbol).copied()
    }

    /// True when at least one word extends past `node`
    pub fn is_branching(&self, node: NodeId) -> bool {
        !self.nodes[node.0].children.is_empty()
    }

    /// The whole word terminating at `node`
    pub fn word_at(&self, node: NodeId) -> Option<&str> {
        self.words.get(&node).map(String::as_str)
    }

    /// Number of distinct words accepted into the tree
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn walk(tree: &PrefixTree, symbols: &[&str]) -> Option<NodeId> {
        symbols
            .iter()
            .try_fold(tree.root(), |node, s| tree.child(node, s))
    }

    #[test]
    fn test_shared_prefixes_share_nodes() {
        let tree = PrefixTree::build(["CAT", "CAR", "CART"], &SymbolSplitter::Chars, 100);
        assert_eq!(tree.word_count(), 3);
        // root, C, A, T, R, T
        assert_eq!(tree.node_count(), 6);

        let car = walk(&tree, &["C", "A", "R"]).unwrap();
        assert_eq!(tree.word_at(car), Some("CAR"));
        assert!(tree.is_branching(car));

        let cat = walk(&tree, &["C", "A", "T"]).unwrap();
        assert_eq!(tree.word_at(cat), Some("CAT"));
        assert!(!tree.is_branching(cat));

        let ca = walk(&tree, &["C", "A"]).unwrap();
        assert_eq!(tree.word_at(ca), None);
        assert!(walk(&tree, &["C", "O"]).is_none());
    }

    #[test]
    fn test_length_filter() {
        let tree = PrefixTree::build(["", "ABCDE", "ABCD", "A"], &SymbolSplitter::Chars, 4);
        assert_eq!(tree.word_count(), 2);
        assert!(walk(&tree, &["A", "B", "C", "D", "E"]).is_none());
        let abcd = walk(&tree, &["A", "B", "C", "D"]).unwrap();
        assert_eq!(tree.word_at(abcd), Some("ABCD"));
    }

    #[test]
    fn test_all_rejected_is_empty() {
        let tree = PrefixTree::build(["TOOLONG", ""], &SymbolSplitter::Chars, 3);
        assert!(tree.is_empty());
        assert!(!tree.is_branching(tree.root()));
    }

    #[test]
    fn test_duplicates_merge() {
        let tree = PrefixTree::build(["DOG", "DOG"], &SymbolSplitter::Chars, 9);
        assert_eq!(tree.word_count(), 1);
        assert_eq!(tree.node_count(), 4);
    }

    #[test]
    fn test_multi_symbol_words_keep_original_text() {
        let splitter = SymbolSplitter::pattern("QU").unwrap();
        let tree = PrefixTree::build(["QUIT"], &splitter, 4);
        let node = walk(&tree, &["QU", "I", "T"]).unwrap();
        assert_eq!(tree.word_at(node), Some("QUIT"));
        assert!(tree.child(tree.root(), "Q").is_none());
    }

    #[test]
    fn test_length_filter_counts_characters() {
        let splitter = SymbolSplitter::pattern("QU").unwrap();
        // three symbols, four characters
        let tree = PrefixTree::build(["QUIT", "QUI"], &splitter, 3);
        assert_eq!(tree.word_count(), 1);
        assert!(walk(&tree, &["QU", "I", "T"]).is_none());
        let qui = walk(&tree, &["QU", "I"]).unwrap();
        assert_eq!(tree.word_at(qui), Some("QUI"));
    }
}
