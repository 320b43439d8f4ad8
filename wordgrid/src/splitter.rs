use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

use crate::errors::{SolverError, SolverResult};

static PATTERN_CACHE: Lazy<DashMap<String, Arc<Regex>>> = Lazy::new(DashMap::new);

type SplitFn = dyn Fn(&str) -> Vec<String> + Send + Sync;

/// Turns a word (or a board row) into grid symbols.
///
/// A symbol is the atomic unit stored in one cell. Most boards hold one
/// character per cell, but some games use multi-letter tiles such as `QU`.
#[derive(Clone, Default)]
pub enum SymbolSplitter {
    /// One symbol per `char`
    #[default]
    Chars,
    /// Every regex match is one symbol; characters between matches become
    /// single-character symbols
    Pattern(Arc<Regex>),
    /// Caller-supplied splitting function
    Custom(Arc<SplitFn>),
}

impl SymbolSplitter {
    /// Creates a regex-based splitter, reusing compiled patterns across calls
    pub fn pattern(pattern: &str) -> SolverResult<Self> {
        if let Some(entry) = PATTERN_CACHE.get(pattern) {
            return Ok(Self::Pattern(entry.clone()));
        }
        let regex = Regex::new(pattern)
            .map_err(|e| SolverError::invalid_pattern(format!("{}: {}", pattern, e)))?;
        let regex = Arc::new(regex);
        PATTERN_CACHE.insert(pattern.to_string(), regex.clone());
        Ok(Self::Pattern(regex))
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> Vec<String> + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(f))
    }

    /// Splits `text` into symbols
    pub fn split(&self, text: &str) -> Vec<String> {
        match self {
            Self::Chars => text.chars().map(String::from).collect(),
            Self::Pattern(regex) => {
                let mut symbols = Vec::new();
                let mut last = 0;
                for m in regex.find_iter(text) {
                    if m.start() == m.end() {
                        continue;
                    }
                    symbols.extend(text[last..m.start()].chars().map(String::from));
                    symbols.push(m.as_str().to_string());
                    last = m.end();
                }
                symbols.extend(text[last..].chars().map(String::from));
                symbols
            }
            Self::Custom(f) => f(text),
        }
    }
}

impl fmt::Debug for SymbolSplitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chars => write!(f, "Chars"),
            Self::Pattern(regex) => f.debug_tuple("Pattern").field(&regex.as_str()).finish(),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chars_splitter() {
        let splitter = SymbolSplitter::default();
        assert_eq!(splitter.split("CAT"), vec!["C", "A", "T"]);
        assert!(splitter.split("").is_empty());
    }

    #[test]
    fn test_pattern_splitter_keeps_unmatched_chars() {
        let splitter = SymbolSplitter::pattern("QU").unwrap();
        assert_eq!(splitter.split("QUIT"), vec!["QU", "I", "T"]);
        assert_eq!(splitter.split("AQUA"), vec!["A", "QU", "A"]);
        assert_eq!(splitter.split("ZZ"), vec!["Z", "Z"]);
    }

    #[test]
    fn test_pattern_splitter_ignores_empty_matches() {
        let splitter = SymbolSplitter::pattern("X*").unwrap();
        assert_eq!(splitter.split("AXXB"), vec!["A", "XX", "B"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let result = SymbolSplitter::pattern("(unclosed");
        assert!(matches!(result, Err(SolverError::InvalidPattern(_))));
    }

    #[test]
    fn test_pattern_cache_reuses_regex() {
        let first = SymbolSplitter::pattern("TH|QU").unwrap();
        let second = SymbolSplitter::pattern("TH|QU").unwrap();
        match (first, second) {
            (SymbolSplitter::Pattern(a), SymbolSplitter::Pattern(b)) => {
                assert!(Arc::ptr_eq(&a, &b))
            }
            _ => panic!("expected pattern splitters"),
        }
    }

    #[test]
    fn test_custom_splitter() {
        let splitter = SymbolSplitter::custom(|s| s.split('-').map(String::from).collect());
        assert_eq!(splitter.split("AB-C"), vec!["AB", "C"]);
        assert_eq!(format!("{:?}", splitter), "Custom(..)");
    }
}
