//! Syntax highlighting manager
//!
//! This module provides the SyntaxManager that owns one analysis
//! context per open document and caches the spans of each line.

use std::collections::HashMap;

use crate::config::Config;

use super::engine::{AnalysisContext, Highlighter};
use super::span::StyleSpan;
use super::variables::LineNumber;

/// Host-chosen document key
pub type DocumentId = usize;

/// Per-document span cache, indexed by line number
#[derive(Debug)]
pub struct HighlightCache {
    /// Cached spans per line (None = not computed)
    pub line_spans: Vec<Option<Vec<StyleSpan>>>,
    /// First line that needs recomputation
    pub invalid_from: LineNumber,
}

impl HighlightCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            line_spans: Vec::new(),
            invalid_from: 1,
        }
    }

    /// Invalidate cache from a specific line onwards
    pub fn invalidate_from(&mut self, line: LineNumber) {
        let line = line.max(1);
        self.invalid_from = self.invalid_from.min(line);
        for slot in self.line_spans.iter_mut().skip(line - 1) {
            *slot = None;
        }
    }

    /// Invalidate entire cache
    pub fn invalidate_all(&mut self) {
        self.invalid_from = 1;
        self.line_spans.clear();
    }

    /// Ensure the cache has a slot for every line up to `line_count`
    pub fn ensure_size(&mut self, line_count: usize) {
        if self.line_spans.len() < line_count {
            self.line_spans.resize(line_count, None);
        }
    }

    /// Spans cached for `line`
    pub fn get(&self, line: LineNumber) -> Option<&[StyleSpan]> {
        let idx = line.checked_sub(1)?;
        self.line_spans.get(idx)?.as_deref()
    }

    /// Cache the spans of `line`
    pub fn store(&mut self, line: LineNumber, spans: Vec<StyleSpan>) {
        let Some(idx) = line.checked_sub(1) else {
            return;
        };
        self.ensure_size(line);
        self.line_spans[idx] = Some(spans);
        if self.invalid_from == line {
            self.invalid_from = self.first_missing();
        }
    }

    fn first_missing(&self) -> LineNumber {
        self.line_spans
            .iter()
            .position(Option::is_none)
            .map_or(self.line_spans.len() + 1, |idx| idx + 1)
    }
}

impl Default for HighlightCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Analysis state and cache of one open document
#[derive(Debug, Default)]
pub struct DocumentSession {
    pub context: AnalysisContext,
    pub cache: HighlightCache,
}

impl DocumentSession {
    fn registry_size(&self) -> usize {
        self.context.imports().binding_count() + self.context.variables().len()
    }
}

/// Main syntax highlighting manager
pub struct SyntaxManager {
    highlighter: Highlighter,
    /// Open documents (document id -> session)
    documents: HashMap<DocumentId, DocumentSession>,
    /// Whether syntax highlighting is enabled
    pub enabled: bool,
}

impl SyntaxManager {
    /// Create a manager around a highlighter
    pub fn new(highlighter: Highlighter) -> Self {
        Self {
            highlighter,
            documents: HashMap::new(),
            enabled: true,
        }
    }

    /// Create a manager whose highlighter follows `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(Highlighter::from_config(config))
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Start a session for `doc`. An already open document is left alone.
    pub fn open_document(&mut self, doc: DocumentId) {
        self.documents.entry(doc).or_default();
    }

    /// End the session of `doc`, dropping its registries and cache
    pub fn close_document(&mut self, doc: DocumentId) {
        if self.documents.remove(&doc).is_some() {
            tracing::debug!(doc, "document closed");
        }
    }

    /// Start a new session for `doc` (e.g. after the file was reloaded)
    pub fn reset_document(&mut self, doc: DocumentId) {
        if let Some(session) = self.documents.get_mut(&doc) {
            session.context.reset();
            session.cache.invalidate_all();
        }
    }

    /// Analysis context of an open document
    pub fn context(&self, doc: DocumentId) -> Option<&AnalysisContext> {
        self.documents.get(&doc).map(|session| &session.context)
    }

    /// Number of open documents
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Run the pipeline for one changed line and cache the result
    ///
    /// Opens the document if needed. When the line taught the session
    /// something new, every other cached line is invalidated, since any
    /// of them may refer to it.
    pub fn on_line_changed(&mut self, doc: DocumentId, line: LineNumber, text: &str) -> Vec<StyleSpan> {
        if !self.enabled {
            return Vec::new();
        }

        let session = self.documents.entry(doc).or_default();
        let before = session.registry_size();
        let spans = self.highlighter.on_line_changed(&mut session.context, line, text);
        if session.registry_size() != before {
            tracing::trace!(doc, line, "registries grew, cache invalidated");
            session.cache.invalidate_all();
        }
        session.cache.store(line, spans.clone());
        spans
    }

    /// First render of a whole document: every line in order
    pub fn highlight_text(&mut self, doc: DocumentId, text: &str) -> Vec<Vec<StyleSpan>> {
        text.lines()
            .enumerate()
            .map(|(idx, line)| self.on_line_changed(doc, idx + 1, line))
            .collect()
    }

    /// Spans last computed for a line, if still valid
    pub fn cached_spans(&self, doc: DocumentId, line: LineNumber) -> Option<&[StyleSpan]> {
        if !self.enabled {
            return None;
        }
        self.documents.get(&doc)?.cache.get(line)
    }

    /// First cached line of `doc` that needs recomputation
    pub fn invalid_from(&self, doc: DocumentId) -> Option<LineNumber> {
        self.documents.get(&doc).map(|session| session.cache.invalid_from)
    }

    /// Invalidate cache from a line onwards
    pub fn invalidate_from(&mut self, doc: DocumentId, line: LineNumber) {
        if let Some(session) = self.documents.get_mut(&doc) {
            session.cache.invalidate_from(line);
        }
    }

    /// Toggle syntax highlighting on/off
    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }
}

impl Default for SyntaxManager {
    fn default() -> Self {
        Self::new(Highlighter::default())
    }
}
