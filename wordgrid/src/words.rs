use once_cell::sync::Lazy;
use regex::Regex;

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[,\r\n]+").expect("static regex"));

/// Parses a word list.
///
/// Accepts one word per line, comma separated words, or the quoted
/// `'WORD',  'OTHER',` layout the generator writes. Blank entries are dropped;
/// duplicates are kept since the prefix tree merges them anyway.
pub fn parse_word_list(text: &str) -> Vec<String> {
    SEPARATORS
        .split(text)
        .map(|entry| entry.trim().trim_matches(|c: char| c == '\'' || c == '"').trim())
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Formats words the way [`parse_word_list`] reads them back, `per_row`
/// quoted words to a line, each padded to `width` characters
pub fn format_word_list(words: &[String], per_row: usize, width: usize) -> String {
    let rows: Vec<String> = words
        .chunks(per_row.max(1))
        .map(|chunk| {
            chunk
                .iter()
                .map(|w| format!("{:<width$}", format!("'{}'", w), width = width + 2))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .collect();
    if rows.is_empty() {
        return String::new();
    }
    format!("{},", rows.join(",\n"))
}
