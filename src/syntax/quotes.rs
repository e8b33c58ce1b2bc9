//! Quote-pair heuristics
//!
//! Variable classification does not tokenize strings. Instead every `'`
//! and `"` on the line is collected in order and paired up left to right
//! (first with second, third with fourth, ...). A range that touches the
//! inside of a pair is treated as string content.

/// Byte offsets of every quote character in `text`, in order
pub fn quote_positions(text: &str) -> Vec<usize> {
    text.char_indices()
        .filter(|&(_, c)| c == '\'' || c == '"')
        .map(|(i, _)| i)
        .collect()
}

/// Consecutive quote positions paired as `(open, close)`
///
/// A trailing unmatched quote is left out.
pub fn quote_pairs(text: &str) -> Vec<(usize, usize)> {
    quote_positions(text)
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect()
}

/// Whether `[start, end)` begins or ends inside any of `pairs`
pub fn in_quotes(pairs: &[(usize, usize)], start: usize, end: usize) -> bool {
    pairs
        .iter()
        .any(|&(open, close)| (open <= start && start < close) || (open < end && end <= close))
}

/// Offset below which variable recoloring is suppressed on a line
///
/// It sits just past the line's second quote character, or at zero when
/// the line holds fewer than two quotes.
pub fn highlight_floor(text: &str) -> usize {
    quote_positions(text).get(1).map_or(0, |&second| second + 1)
}

/// Simple quoted runs, left to right
///
/// A run opens at a quote character and closes at the next occurrence of
/// the same character. Escapes and nesting are not considered, and an
/// unclosed quote produces no run.
pub fn quoted_runs(text: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut pos = 0;
    while let Some(found) = text[pos..].find(['\'', '"']) {
        let start = pos + found;
        let quote = &text[start..start + 1];
        match text[start + 1..].find(quote) {
            Some(len) => {
                let end = start + 1 + len + 1;
                runs.push((start, end));
                pos = end;
            }
            None => pos = start + 1,
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quoted_runs() {
        assert_eq!(quoted_runs(r#"a = "x" + 'y'"#), vec![(4, 7), (10, 13)]);
        assert_eq!(quoted_runs(r#"say("it's")"#), vec![(4, 10)]);
        assert!(quoted_runs("x = 'open").is_empty());
        assert_eq!(quoted_runs(r#"'abc "d""#), vec![(5, 8)]);
        assert_eq!(quoted_runs(r#"s = """#), vec![(4, 6)]);
    }

    #[test]
    fn test_positions_and_pairs() {
        let text = r#"a = "x" + 'y' + ""#;
        assert_eq!(quote_positions(text), vec![4, 6, 10, 12, 16]);
        assert_eq!(quote_pairs(text), vec![(4, 6), (10, 12)]);
    }

    #[test]
    fn test_in_quotes() {
        let text = r#"msg = "count = 5""#;
        let pairs = quote_pairs(text);
        assert!(!in_quotes(&pairs, 0, 3));
        assert!(in_quotes(&pairs, 7, 12));
    }

    #[test]
    fn test_highlight_floor() {
        assert_eq!(highlight_floor("x = 1"), 0);
        assert_eq!(highlight_floor(r#"x = "open"#), 0);
        assert_eq!(highlight_floor(r#"x = "ab" + y"#), 8);
        assert_eq!(highlight_floor(r#"print('a', "b")"#), 9);
    }

    #[test]
    fn test_floor_counts_bytes() {
        // "é" is two bytes
        assert_eq!(highlight_floor("é = 'a'"), 8);
    }
}
