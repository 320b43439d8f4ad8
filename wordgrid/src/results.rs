/// This module implements the result types of a grid search.
///
/// # Aggregation Under Concurrency
///
/// Every search variant writes its matches into one [`FoundMap`]. In the
/// asynchronous and parallel scans many per-cell tasks write at the same time,
/// so the map is a `DashMap`: each `record` call takes the shard lock for its
/// word, appends, and releases it. Appends to the same word's list therefore
/// never interleave, while writes for different words rarely contend.
///
/// In .NET the same job would fall to a `ConcurrentDictionary` holding lists
/// that still need their own lock:
/// ```csharp
/// found.GetOrAdd(word, _ => new List<Cell[]>());
/// lock (found[word]) { found[word].Add(path.ToArray()); }
/// ```
///
/// In Rust the entry guard *is* the lock, and the borrow checker refuses to
/// let the list escape it:
/// ```rust,ignore
/// found.entry(word).or_default().push(path.to_vec());
/// ```
///
/// Once the scan is over the map is drained into a [`SearchOutput`], a plain
/// ordered map that callers can sort, format or serialize as they like.
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::cell::{Cell, CellSequence};

/// Concurrent word -> paths accumulator shared by the per-cell searches
#[derive(Debug, Default)]
pub struct FoundMap {
    found: DashMap<String, Vec<CellSequence>>,
}

impl FoundMap {
    pub fn new() -> Self {
        Default::default()
    }

    /// Appends an independent copy of `path` to the list for `word`
    pub fn record(&self, word: &str, path: &[Cell]) {
        match self.found.get_mut(word) {
            Some(mut paths) => paths.push(path.to_vec()),
            None => self
                .found
                .entry(word.to_string())
                .or_default()
                .push(path.to_vec()),
        }
    }

    /// Number of distinct words matched so far
    pub fn len(&self) -> usize {
        self.found.len()
    }

    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }

    /// Drains the accumulator into a search output
    pub fn into_output(self) -> SearchOutput {
        let mut output = SearchOutput::new();
        for (word, paths) in self.found {
            output.insert(word, paths);
        }
        output
    }

    /// Copies the current contents into a search output without consuming
    /// the accumulator
    pub fn snapshot(&self) -> SearchOutput {
        let mut output = SearchOutput::new();
        for entry in self.found.iter() {
            output.insert(entry.key().clone(), entry.value().clone());
        }
        output
    }
}

/// Final result of a multi-word search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutput {
    /// Paths found per matched word; words without a match are absent
    pub words: BTreeMap<String, Vec<CellSequence>>,
    /// Total number of paths across all words
    pub total_paths: usize,
}

impl SearchOutput {
    /// Creates a new empty search output
    pub fn new() -> Self {
        Default::default()
    }

    fn insert(&mut self, word: String, paths: Vec<CellSequence>) {
        self.total_paths += paths.len();
        self.words.entry(word).or_default().extend(paths);
    }

    /// Number of words with at least one path
    pub fn words_found(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Paths for `word`, empty when it was not found
    pub fn paths(&self, word: &str) -> &[CellSequence] {
        self.words.get(word).map_or(&[], Vec::as_slice)
    }

    /// Removes and returns the paths for `word`
    pub fn take(&mut self, word: &str) -> Vec<CellSequence> {
        let paths = self.words.remove(word).unwrap_or_default();
        self.total_paths -= paths.len();
        paths
    }

    /// Merges another search output into this one
    pub fn merge(&mut self, other: SearchOutput) {
        for (word, paths) in other.words {
            self.insert(word, paths);
        }
    }
}
