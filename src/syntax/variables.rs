//! Variable declaration registry and classifier
//!
//! A variable's declaration line is the first line on which the session
//! saw it assigned. Later assignments never move it.

use std::collections::HashMap;

use super::category::StyleCategory;
use super::quotes::{highlight_floor, in_quotes, quote_pairs};
use super::span::SpanSet;
use super::words::{identifiers, words};

/// 1-based line number
pub type LineNumber = usize;

/// Session-lifetime map from variable name to declaration line
#[derive(Debug, Default, Clone)]
pub struct VariableRegistry {
    lines: HashMap<String, LineNumber>,
}

impl VariableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` as declared on `line` unless it is already known.
    ///
    /// Returns true when a new entry was created.
    pub fn record(&mut self, name: &str, line: LineNumber) -> bool {
        if self.lines.contains_key(name) {
            return false;
        }
        tracing::trace!(name, line, "variable declared");
        self.lines.insert(name.to_string(), line);
        true
    }

    /// Declaration line of `name`
    pub fn declaration_line(&self, name: &str) -> Option<LineNumber> {
        self.lines.get(name).copied()
    }

    /// All entries, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&str, LineNumber)> {
        self.lines.iter().map(|(name, line)| (name.as_str(), *line))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Lexical declaration scan: every `name =` outside quotes
///
/// Each match is recorded in the registry (first write wins) and, when
/// it starts at or past the line's highlight floor, styled as a
/// declaration. `name ==` is a comparison and does not match.
pub fn scan_declarations(text: &str, line: LineNumber, registry: &mut VariableRegistry, spans: &mut SpanSet) {
    let pairs = quote_pairs(text);
    let floor = highlight_floor(text);

    for (start, name) in identifiers(text) {
        let end = start + name.len();
        let after = text[end..].trim_start();
        if !after.starts_with('=') || after.starts_with("==") {
            continue;
        }
        if in_quotes(&pairs, start, end) {
            continue;
        }

        registry.record(name, line);
        if start >= floor {
            spans.push(start, end, StyleCategory::VariableDeclaration);
        }
    }
}

/// Usage pass: style every known variable on the line
///
/// On the name's declaration line the occurrence is a declaration; on
/// any other line it is a usage, provided it lies at or past the
/// highlight floor. Occurrences inside a quoted pair are never styled.
pub fn classify_usages(text: &str, line: LineNumber, registry: &VariableRegistry, spans: &mut SpanSet) {
    if registry.is_empty() {
        return;
    }
    let pairs = quote_pairs(text);
    let floor = highlight_floor(text);

    for (start, word) in words(text) {
        let Some(declared) = registry.declaration_line(word) else {
            continue;
        };
        let end = start + word.len();
        if in_quotes(&pairs, start, end) {
            continue;
        }

        if declared == line {
            spans.push(start, end, StyleCategory::VariableDeclaration);
        } else if start >= floor {
            spans.push(start, end, StyleCategory::VariableUsage);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::span::StyleSpan;

    fn declare(text: &str, line: LineNumber, registry: &mut VariableRegistry) -> Vec<StyleSpan> {
        let mut spans = SpanSet::new(text.len());
        scan_declarations(text, line, registry, &mut spans);
        spans.resolve()
    }

    fn usages(text: &str, line: LineNumber, registry: &VariableRegistry) -> Vec<StyleSpan> {
        let mut spans = SpanSet::new(text.len());
        classify_usages(text, line, registry, &mut spans);
        spans.resolve()
    }

    #[test]
    fn test_first_write_wins() {
        let mut registry = VariableRegistry::new();
        assert!(registry.record("x", 2));
        assert!(!registry.record("x", 5));
        assert_eq!(registry.declaration_line("x"), Some(2));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_scan_records_and_styles() {
        let mut registry = VariableRegistry::new();
        let spans = declare("total = a + b", 3, &mut registry);
        assert_eq!(spans, vec![StyleSpan::new(0, 5, StyleCategory::VariableDeclaration)]);
        assert_eq!(registry.declaration_line("total"), Some(3));
    }

    #[test]
    fn test_scan_skips_quoted_and_comparisons() {
        let mut registry = VariableRegistry::new();
        declare(r#"msg = "count = 5""#, 1, &mut registry);
        assert_eq!(registry.declaration_line("msg"), Some(1));
        assert_eq!(registry.declaration_line("count"), None);

        declare("if a == b: pass", 2, &mut registry);
        assert_eq!(registry.declaration_line("a"), None);

        declare("f(key=1)", 3, &mut registry);
        assert_eq!(registry.declaration_line("key"), Some(3));
    }

    #[test]
    fn test_scan_below_floor_records_without_styling() {
        let mut registry = VariableRegistry::new();
        let spans = declare(r#"y = "a" + 'b'; z = 1"#, 4, &mut registry);
        assert_eq!(registry.declaration_line("y"), Some(4));
        assert_eq!(registry.declaration_line("z"), Some(4));
        assert_eq!(spans, vec![StyleSpan::new(15, 16, StyleCategory::VariableDeclaration)]);
    }

    #[test]
    fn test_usage_on_declaration_line_and_elsewhere() {
        let mut registry = VariableRegistry::new();
        registry.record("x", 2);

        assert_eq!(usages("x = x + 1", 2, &registry), vec![
            StyleSpan::new(0, 1, StyleCategory::VariableDeclaration),
            StyleSpan::new(4, 5, StyleCategory::VariableDeclaration),
        ]);
        assert_eq!(usages("print(x)", 3, &registry), vec![StyleSpan::new(6, 7, StyleCategory::VariableUsage)]);
        assert!(usages("xs = 1", 3, &registry).is_empty());
    }

    #[test]
    fn test_usage_respects_floor_and_quotes() {
        let mut registry = VariableRegistry::new();
        registry.record("x", 1);

        // Inside the quoted pair: never styled
        assert!(usages(r#"print("x")"#, 2, &registry).is_empty());
        // Before the floor on a non-declaration line: unstyled
        assert!(usages(r#"x, "a", "b""#, 2, &registry).is_empty());
        // Past the floor: usage
        assert_eq!(
            usages(r#"s = "a" + x"#, 2, &registry),
            vec![StyleSpan::new(10, 11, StyleCategory::VariableUsage)]
        );
        // Declaration line ignores the floor
        assert_eq!(
            usages(r#"x, "a", "b""#, 1, &registry),
            vec![StyleSpan::new(0, 1, StyleCategory::VariableDeclaration)]
        );
    }
}
