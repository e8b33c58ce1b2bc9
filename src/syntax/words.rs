//! Word scanning helpers
//!
//! A word is a maximal run of identifier characters (`_` or alphanumeric),
//! the same runs a regex `\b\w+\b` would find.

fn is_word_char(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Every word in `text` with its byte offset, left to right
pub fn words(text: &str) -> Vec<(usize, &str)> {
    let mut found = Vec::new();
    let mut start: Option<usize> = None;
    for (i, c) in text.char_indices() {
        match (start, is_word_char(c)) {
            (None, true) => start = Some(i),
            (Some(s), false) => {
                found.push((s, &text[s..i]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        found.push((s, &text[s..]));
    }
    found
}

/// Words that can name a Python variable (no leading digit)
pub fn identifiers(text: &str) -> impl Iterator<Item = (usize, &str)> {
    words(text)
        .into_iter()
        .filter(|(_, word)| !word.starts_with(|c: char| c.is_ascii_digit()))
}

/// Offsets of every whole-word occurrence of `needle`
///
/// `needle` may contain non-word characters (such as the dots of
/// `os.path`); only its two ends are checked for word boundaries.
pub fn occurrences<'a>(text: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut next_allowed = 0;
    text.match_indices(needle)
        .map(|(i, _)| i)
        .filter(move |&i| {
            if needle.is_empty() || i < next_allowed {
                return false;
            }
            let before = text[..i].chars().next_back();
            let after = text[i + needle.len()..].chars().next();
            let bounded = !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char);
            if bounded {
                next_allowed = i + needle.len();
            }
            bounded
        })
}

/// Offset of the first whole-word occurrence of `needle`
pub fn find_word(text: &str, needle: &str) -> Option<usize> {
    occurrences(text, needle).next()
}
