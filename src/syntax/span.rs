//! Style spans and overlap resolution
//!
//! Every pass of the pipeline pushes candidate spans into a [`SpanSet`].
//! Resolution is per byte: the candidate whose category has the highest
//! [`StyleCategory::priority`] wins, and among equal priorities the span
//! pushed last wins.

use super::category::StyleCategory;

/// A classified byte range of one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleSpan {
    /// Byte offset where this span starts (inclusive)
    pub start: usize,
    /// Byte offset where this span ends (exclusive)
    pub end: usize,
    /// Category assigned to the range
    pub category: StyleCategory,
}

impl StyleSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize, category: StyleCategory) -> Self {
        Self { start, end, category }
    }

    /// Check if this span contains a byte position
    pub fn contains(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// Get the length of this span in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if span is empty
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The slice of `text` this span covers
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

/// Candidate spans for one line, in the order the passes produced them
#[derive(Debug, Clone)]
pub struct SpanSet {
    line_len: usize,
    candidates: Vec<StyleSpan>,
}

impl SpanSet {
    /// Create an empty set for a line of `line_len` bytes
    pub fn new(line_len: usize) -> Self {
        Self {
            line_len,
            candidates: Vec::new(),
        }
    }

    /// Add a candidate, clipped to the line. Empty ranges are dropped.
    pub fn push(&mut self, start: usize, end: usize, category: StyleCategory) {
        let end = end.min(self.line_len);
        if start >= end {
            return;
        }
        self.candidates.push(StyleSpan::new(start, end, category));
    }

    /// Number of candidates pushed so far
    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    /// Resolve overlaps and return the winning runs, ordered by offset.
    ///
    /// Adjacent bytes with the same winning category coalesce into one
    /// span. Bytes whose winner is [`StyleCategory::Default`] (or that no
    /// candidate covers) produce no span.
    pub fn resolve(mut self) -> Vec<StyleSpan> {
        self.candidates.sort_by_key(|span| span.category.priority());

        let mut painted: Vec<Option<StyleCategory>> = vec![None; self.line_len];
        for span in &self.candidates {
            for slot in &mut painted[span.start..span.end] {
                *slot = Some(span.category);
            }
        }

        let mut spans: Vec<StyleSpan> = Vec::new();
        for (offset, slot) in painted.into_iter().enumerate() {
            let category = match slot {
                Some(category) if category != StyleCategory::Default => category,
                _ => continue,
            };
            match spans.last_mut() {
                Some(last) if last.end == offset && last.category == category => last.end += 1,
                _ => spans.push(StyleSpan::new(offset, offset + 1, category)),
            }
        }
        spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_contains() {
        let span = StyleSpan::new(5, 10, StyleCategory::Keyword);
        assert!(!span.contains(4));
        assert!(span.contains(5));
        assert!(span.contains(9));
        assert!(!span.contains(10));
        assert_eq!(span.len(), 5);
    }

    #[test]
    fn test_push_clips_to_line() {
        let mut set = SpanSet::new(4);
        set.push(2, 10, StyleCategory::Keyword);
        set.push(6, 8, StyleCategory::Keyword);
        assert_eq!(set.candidate_count(), 1);
        assert_eq!(set.resolve(), vec![StyleSpan::new(2, 4, StyleCategory::Keyword)]);
    }

    #[test]
    fn test_higher_priority_wins_regardless_of_order() {
        let mut set = SpanSet::new(10);
        set.push(0, 10, StyleCategory::VariableUsage);
        set.push(2, 5, StyleCategory::Keyword);
        assert_eq!(set.resolve(), vec![StyleSpan::new(0, 10, StyleCategory::VariableUsage)]);
    }

    #[test]
    fn test_partial_overlap_splits() {
        let mut set = SpanSet::new(10);
        set.push(0, 6, StyleCategory::Keyword);
        set.push(4, 8, StyleCategory::StringLiteral);
        assert_eq!(
            set.resolve(),
            vec![
                StyleSpan::new(0, 4, StyleCategory::Keyword),
                StyleSpan::new(4, 8, StyleCategory::StringLiteral),
            ]
        );
    }

    #[test]
    fn test_equal_priority_last_wins() {
        let mut set = SpanSet::new(3);
        set.push(0, 3, StyleCategory::ResolvedModuleRef);
        set.push(0, 3, StyleCategory::UnresolvedModuleRef);
        assert_eq!(set.resolve(), vec![StyleSpan::new(0, 3, StyleCategory::UnresolvedModuleRef)]);
    }

    #[test]
    fn test_default_produces_no_span() {
        let mut set = SpanSet::new(5);
        set.push(0, 5, StyleCategory::Default);
        assert!(set.resolve().is_empty());
    }
}
