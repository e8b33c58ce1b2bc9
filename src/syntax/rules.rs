//! Lexical pattern rules
//!
//! This module defines the regex rules that classify keywords and
//! builtin calls. Rules are pure: they read the line and the static
//! tables and nothing else.

use regex::Regex;

use super::category::StyleCategory;
use super::span::SpanSet;

/// A single-line pattern rule
///
/// Matches a regex pattern left to right and assigns a category to the
/// styled capture group of every non-overlapping match.
#[derive(Debug)]
pub struct PatternRule {
    /// Name for debugging
    pub name: String,
    /// Compiled regex pattern
    pub pattern: Regex,
    /// Category assigned to matches
    pub category: StyleCategory,
    /// Capture group that receives the style (0 = whole match)
    pub group: usize,
}

impl PatternRule {
    /// Create a new pattern rule styling the whole match
    pub fn new(name: &str, pattern: &str, category: StyleCategory) -> Option<Self> {
        Self::with_group(name, pattern, category, 0)
    }

    /// Create a rule styling only capture group `group`
    ///
    /// Trailing context in the pattern (such as a call parenthesis) is
    /// consumed by the match but never styled.
    pub fn with_group(name: &str, pattern: &str, category: StyleCategory, group: usize) -> Option<Self> {
        let regex = Regex::new(pattern).ok()?;
        if group >= regex.captures_len() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            pattern: regex,
            category,
            group,
        })
    }

    /// Byte ranges of the styled group for every match in `text`
    pub fn ranges<'t>(&'t self, text: &'t str) -> impl Iterator<Item = (usize, usize)> + 't {
        self.pattern
            .captures_iter(text)
            .filter_map(move |caps| caps.get(self.group))
            .map(|m| (m.start(), m.end()))
    }

    /// Push a span for every match
    pub fn apply(&self, text: &str, spans: &mut SpanSet) {
        for (start, end) in self.ranges(text) {
            spans.push(start, end, self.category);
        }
    }
}

/// Build a `\b(a|b|c)\b`-style alternation from a word list
fn word_alternation(words: &[String]) -> Option<String> {
    if words.is_empty() {
        return None;
    }
    let escaped: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    Some(escaped.join("|"))
}

/// The ordered lexical rule table: keywords, then builtin calls
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: Vec<PatternRule>,
}

impl RuleTable {
    /// Build the two rule groups from word lists
    pub fn new(keywords: &[String], builtins: &[String]) -> Self {
        let mut table = Self::default();

        if let Some(words) = word_alternation(keywords) {
            let pattern = format!(r"\b(?:{})\b", words);
            if let Some(rule) = PatternRule::new("keyword", &pattern, StyleCategory::Keyword) {
                table.add(rule);
            }
        }

        // The call parenthesis must follow the name directly
        if let Some(words) = word_alternation(builtins) {
            let pattern = format!(r"\b({})\b\(", words);
            if let Some(rule) = PatternRule::with_group("builtin_call", &pattern, StyleCategory::BuiltinCall, 1) {
                table.add(rule);
            }
        }

        table
    }

    /// Append a rule after the existing ones
    pub fn add(&mut self, rule: PatternRule) {
        self.rules.push(rule);
    }

    /// Rules in application order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Apply every rule to `text`
    pub fn apply(&self, text: &str, spans: &mut SpanSet) {
        for rule in &self.rules {
            rule.apply(text, spans);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::python;
    use crate::syntax::span::StyleSpan;

    fn default_table() -> RuleTable {
        RuleTable::new(&python::default_keywords(), &python::default_builtins())
    }

    fn run(table: &RuleTable, text: &str) -> Vec<StyleSpan> {
        let mut spans = SpanSet::new(text.len());
        table.apply(text, &mut spans);
        spans.resolve()
    }

    #[test]
    fn test_pattern_rule_group() {
        let rule = PatternRule::with_group("call", r"\b(\w+)\(", StyleCategory::BuiltinCall, 1).unwrap();
        let ranges: Vec<_> = rule.ranges("a(b(c))").collect();
        assert_eq!(ranges, vec![(0, 1), (2, 3)]);
        assert!(PatternRule::with_group("bad", r"\w+", StyleCategory::Keyword, 2).is_none());
        assert!(PatternRule::new("invalid", r"(", StyleCategory::Keyword).is_none());
    }

    #[test]
    fn test_keywords_are_whole_words() {
        let table = default_table();
        let spans = run(&table, "for item in items: define = classy");
        assert_eq!(
            spans,
            vec![
                StyleSpan::new(0, 3, StyleCategory::Keyword),
                StyleSpan::new(9, 11, StyleCategory::Keyword),
            ]
        );
    }

    #[test]
    fn test_builtin_requires_call() {
        let table = default_table();
        assert!(run(&table, "print = 5").is_empty());
        assert!(run(&table, "print (5)").is_empty());
        assert_eq!(run(&table, "print(5)"), vec![StyleSpan::new(0, 5, StyleCategory::BuiltinCall)]);
    }

    #[test]
    fn test_nested_builtin_calls() {
        let table = default_table();
        let spans = run(&table, "print(len(x))");
        assert_eq!(
            spans,
            vec![
                StyleSpan::new(0, 5, StyleCategory::BuiltinCall),
                StyleSpan::new(6, 9, StyleCategory::BuiltinCall),
            ]
        );
    }

    #[test]
    fn test_empty_tables() {
        let table = RuleTable::new(&[], &[]);
        assert!(table.rules().is_empty());
        assert!(run(&table, "def print(x)").is_empty());
    }
}
