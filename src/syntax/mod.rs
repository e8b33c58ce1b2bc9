//! Python highlighting engine
//!
//! This module classifies spans of each line of a Python document:
//! - Keywords and builtin calls (lexical rules)
//! - Imported module names and module attribute calls
//! - String literals
//! - Variable declarations and usages, tracked across lines

mod attributes;
mod category;
mod engine;
mod imports;
mod loader;
mod manager;
pub mod python;
mod quotes;
mod rules;
mod span;
pub mod structure;
mod style;
mod theme;
mod variables;
mod words;

pub use attributes::classify_attributes;
pub use category::StyleCategory;
pub use engine::{AnalysisContext, Highlighter};
pub use imports::{
    classify_modules, ImportRegistry, LoadError, ModuleHandle, ModuleLoader, ModuleOrigin, ResolutionState,
};
pub use loader::{is_module_name, top_level_bindings, ChainLoader, SearchPathLoader, StdlibLoader};
pub use manager::{DocumentId, DocumentSession, HighlightCache, SyntaxManager};
pub use quotes::{highlight_floor, in_quotes, quote_pairs, quoted_runs};
pub use rules::{PatternRule, RuleTable};
pub use span::{SpanSet, StyleSpan};
pub use style::{Color, Style};
pub use theme::Theme;
pub use variables::{classify_usages, scan_declarations, LineNumber, VariableRegistry};
