//! Highlighting pipeline
//!
//! A [`Highlighter`] holds the static parts of the engine (rule table and
//! module loader) and can serve any number of documents. Everything a
//! document learns while being highlighted lives in its own
//! [`AnalysisContext`], which the caller passes into every run.

use crate::config::Config;

use super::attributes::classify_attributes;
use super::category::StyleCategory;
use super::imports::{classify_modules, ImportRegistry, ModuleLoader};
use super::loader::{ChainLoader, SearchPathLoader, StdlibLoader};
use super::python;
use super::quotes;
use super::rules::RuleTable;
use super::span::{SpanSet, StyleSpan};
use super::structure::{self, Discovery};
use super::variables::{classify_usages, scan_declarations, LineNumber, VariableRegistry};

/// Per-document analysis state
///
/// Both registries only grow while the session lasts. [`reset`] starts
/// a new session.
///
/// [`reset`]: AnalysisContext::reset
#[derive(Debug, Default)]
pub struct AnalysisContext {
    imports: ImportRegistry,
    variables: VariableRegistry,
}

impl AnalysisContext {
    /// Create a context for a fresh session
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything learned so far
    pub fn reset(&mut self) {
        self.imports = ImportRegistry::new();
        self.variables = VariableRegistry::new();
    }

    pub fn imports(&self) -> &ImportRegistry {
        &self.imports
    }

    pub fn variables(&self) -> &VariableRegistry {
        &self.variables
    }
}

/// The line highlighting engine
pub struct Highlighter {
    rules: RuleTable,
    loader: Box<dyn ModuleLoader>,
}

impl Highlighter {
    /// Create a highlighter from a rule table and a module loader
    pub fn new(rules: RuleTable, loader: impl ModuleLoader + 'static) -> Self {
        Self {
            rules,
            loader: Box::new(loader),
        }
    }

    /// Build the rule table and loader chain described by `config`
    pub fn from_config(config: &Config) -> Self {
        let rules = RuleTable::new(&config.keywords(), &config.builtins());

        let mut loader = ChainLoader::new();
        if config.modules.stdlib {
            loader = loader.with(StdlibLoader);
        }
        let roots = config.module_search_paths();
        if !roots.is_empty() {
            tracing::debug!(roots = roots.len(), "module search paths configured");
            loader = loader.with(SearchPathLoader::new(roots));
        }

        Self::new(rules, loader)
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    /// Parse `text` on its own and feed what it declares into `ctx`
    ///
    /// Returns the number of discoveries. A line that does not parse
    /// contributes nothing.
    pub fn commit_discoveries(&self, ctx: &mut AnalysisContext, line: LineNumber, text: &str) -> usize {
        let discoveries = match structure::discover(text) {
            Ok(discoveries) => discoveries,
            Err(err) => {
                tracing::debug!(line, error = %err, "line skipped by structural analysis");
                return 0;
            }
        };

        for discovery in &discoveries {
            match discovery {
                Discovery::Assignment(name) => {
                    ctx.variables.record(name, line);
                }
                Discovery::Import { module, alias } => {
                    ctx.imports.resolve(module, self.loader.as_ref());
                    if let Some(alias) = alias {
                        ctx.imports.bind_alias(alias, module);
                    }
                }
                Discovery::ImportFrom { module } => {
                    ctx.imports.resolve(module, self.loader.as_ref());
                }
            }
        }
        discoveries.len()
    }

    /// Run the full pipeline over one line
    ///
    /// The line's own structural discoveries are committed first, then
    /// every pass contributes candidate spans and the per-category
    /// priorities decide the winner on each byte.
    pub fn on_line_changed(&self, ctx: &mut AnalysisContext, line: LineNumber, text: &str) -> Vec<StyleSpan> {
        let discovered = self.commit_discoveries(ctx, line, text);

        let mut spans = SpanSet::new(text.len());
        self.rules.apply(text, &mut spans);
        classify_modules(text, &ctx.imports, &mut spans);
        classify_attributes(text, &ctx.imports, &mut spans);
        for (start, end) in quotes::quoted_runs(text) {
            spans.push(start, end, StyleCategory::StringLiteral);
        }
        scan_declarations(text, line, &mut ctx.variables, &mut spans);
        classify_usages(text, line, &ctx.variables, &mut spans);

        let candidates = spans.candidate_count();
        let resolved = spans.resolve();
        tracing::trace!(line, discovered, candidates, spans = resolved.len(), "line highlighted");
        resolved
    }

    /// Offset below which variable recoloring is suppressed on `text`
    pub fn highlight_floor(text: &str) -> usize {
        quotes::highlight_floor(text)
    }
}

impl Default for Highlighter {
    /// Built-in keyword and builtin tables, standard-library modules only
    fn default() -> Self {
        let rules = RuleTable::new(&python::default_keywords(), &python::default_builtins());
        Self::new(rules, ChainLoader::new().with(StdlibLoader))
    }
}
