//! Import resolution registry
//!
//! Each module name is resolved at most once per session. The outcome,
//! success or failure, is cached for the lifetime of the registry and
//! never re-attempted.

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use regex::Regex;
use thiserror::Error;

use super::category::StyleCategory;
use super::span::SpanSet;

/// Where a resolved module came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOrigin {
    /// The built-in standard-library table
    Stdlib,
    /// A source file found on a search path
    Source(PathBuf),
    /// Provided by a host-specific loader
    External,
}

/// Opaque handle to a loaded module, enumerating its attribute names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
    name: String,
    origin: ModuleOrigin,
    attributes: BTreeSet<String>,
}

impl ModuleHandle {
    /// Create a handle from a name, an origin and attribute names
    pub fn new<I, S>(name: &str, origin: ModuleOrigin, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            origin,
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Module name as imported
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where the module was found
    pub fn origin(&self) -> &ModuleOrigin {
        &self.origin
    }

    /// Whether the module exposes `attribute`
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.attributes.contains(attribute)
    }

}

/// Why a module could not be loaded
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No module named '{0}'")]
    NotFound(String),

    #[error("Invalid module name: {0:?}")]
    InvalidName(String),

    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Loads modules from the host environment
pub trait ModuleLoader {
    /// Attempt to load `name`. May be slow; called at most once per name
    /// per registry.
    fn load(&self, name: &str) -> Result<ModuleHandle, LoadError>;
}

/// Cached outcome of resolving a module name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionState {
    Resolved(ModuleHandle),
    Failed,
}

impl ResolutionState {
    /// Check for the resolved state
    pub fn is_resolved(&self) -> bool {
        matches!(self, ResolutionState::Resolved(_))
    }

    /// The module handle, if resolved
    pub fn handle(&self) -> Option<&ModuleHandle> {
        match self {
            ResolutionState::Resolved(handle) => Some(handle),
            ResolutionState::Failed => None,
        }
    }
}

/// Whole-word matcher for a module name or alias
fn word_pattern(word: &str) -> Option<Regex> {
    match Regex::new(&format!(r"\b{}\b", regex::escape(word))) {
        Ok(pattern) => Some(pattern),
        Err(err) => {
            tracing::warn!(word, error = %err, "no reference pattern");
            None
        }
    }
}

/// Session-lifetime module cache plus alias bindings
#[derive(Debug, Default)]
pub struct ImportRegistry {
    entries: HashMap<String, ResolutionState>,
    /// Alias -> module name, from `import x as y`
    aliases: HashMap<String, String>,
    /// Reference matcher per module name and alias
    patterns: HashMap<String, Regex>,
}

impl ImportRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `name`, consulting `loader` only the first time it is seen
    pub fn resolve(&mut self, name: &str, loader: &dyn ModuleLoader) -> &ResolutionState {
        let patterns = &mut self.patterns;
        self.entries.entry(name.to_string()).or_insert_with(|| {
            patterns.extend(word_pattern(name).map(|pattern| (name.to_string(), pattern)));
            match loader.load(name) {
                Ok(handle) => {
                    tracing::debug!(module = name, origin = ?handle.origin(), "module resolved");
                    ResolutionState::Resolved(handle)
                }
                Err(err) => {
                    tracing::debug!(module = name, error = %err, "module resolution failed");
                    ResolutionState::Failed
                }
            }
        })
    }

    /// Bind `alias` to `module`. The first binding of an alias is kept.
    pub fn bind_alias(&mut self, alias: &str, module: &str) {
        if alias == module {
            return;
        }
        if self.aliases.contains_key(alias) {
            return;
        }
        self.aliases.insert(alias.to_string(), module.to_string());
        if !self.patterns.contains_key(alias) {
            self.patterns.extend(word_pattern(alias).map(|pattern| (alias.to_string(), pattern)));
        }
    }

    /// Cached state for a module name
    pub fn state(&self, name: &str) -> Option<&ResolutionState> {
        self.entries.get(name)
    }

    /// State of the module a word refers to, by module name or alias
    pub fn lookup(&self, word: &str) -> Option<&ResolutionState> {
        self.entries.get(word).or_else(|| {
            self.aliases
                .get(word)
                .and_then(|module| self.entries.get(module))
        })
    }

    /// Every word that refers to a known module, with that module's state
    pub fn references(&self) -> impl Iterator<Item = (&str, &ResolutionState)> {
        let modules = self.entries.iter().map(|(name, state)| (name.as_str(), state));
        let aliases = self.aliases.iter().filter_map(|(alias, module)| {
            self.entries.get(module).map(|state| (alias.as_str(), state))
        });
        modules.chain(aliases)
    }

    /// Number of distinct module names attempted
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Module names plus alias bindings; grows whenever a new word
    /// starts referring to a module
    pub fn binding_count(&self) -> usize {
        self.entries.len() + self.aliases.len()
    }

    /// Check if no module has been attempted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Style every whole-word occurrence of a known module name or alias
///
/// Resolved modules become `ResolvedModuleRef`, failed ones
/// `UnresolvedModuleRef`. References are applied in name order so that
/// overlapping dotted names (`os` inside `os.path`) merge the same way on
/// every run.
pub fn classify_modules(text: &str, imports: &ImportRegistry, spans: &mut SpanSet) {
    let mut references: Vec<_> = imports.references().collect();
    references.sort_by_key(|&(word, _)| word);

    for (word, state) in references {
        let category = if state.is_resolved() {
            StyleCategory::ResolvedModuleRef
        } else {
            StyleCategory::UnresolvedModuleRef
        };
        let Some(pattern) = imports.patterns.get(word) else {
            continue;
        };
        for found in pattern.find_iter(text) {
            spans.push(found.start(), found.end(), category);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Loader that serves a fixed set of modules and records every attempt
    pub(crate) struct FakeLoader {
        modules: Vec<ModuleHandle>,
        pub(crate) attempts: RefCell<Vec<String>>,
    }

    impl FakeLoader {
        pub(crate) fn new(modules: &[(&str, &[&str])]) -> Self {
            Self {
                modules: modules
                    .iter()
                    .map(|(name, attrs)| ModuleHandle::new(name, ModuleOrigin::External, attrs.iter().copied()))
                    .collect(),
                attempts: RefCell::new(Vec::new()),
            }
        }
    }

    impl ModuleLoader for FakeLoader {
        fn load(&self, name: &str) -> Result<ModuleHandle, LoadError> {
            self.attempts.borrow_mut().push(name.to_string());
            self.modules
                .iter()
                .find(|m| m.name() == name)
                .cloned()
                .ok_or_else(|| LoadError::NotFound(name.to_string()))
        }
    }

    #[test]
    fn test_resolve_once_per_name() {
        let loader = FakeLoader::new(&[("m", &["time"])]);
        let mut registry = ImportRegistry::new();

        assert!(registry.resolve("m", &loader).is_resolved());
        assert!(registry.resolve("m", &loader).is_resolved());
        assert!(!registry.resolve("nope", &loader).is_resolved());
        assert!(!registry.resolve("nope", &loader).is_resolved());

        assert_eq!(*loader.attempts.borrow(), vec!["m".to_string(), "nope".to_string()]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_failed_state_is_permanent() {
        let mut registry = ImportRegistry::new();
        let empty = FakeLoader::new(&[]);
        registry.resolve("late", &empty);

        // A loader that would now succeed is never consulted
        let later = FakeLoader::new(&[("late", &[])]);
        assert_eq!(registry.resolve("late", &later), &ResolutionState::Failed);
        assert!(later.attempts.borrow().is_empty());
    }

    #[test]
    fn test_alias_lookup() {
        let loader = FakeLoader::new(&[("numpy", &["array"])]);
        let mut registry = ImportRegistry::new();
        registry.resolve("numpy", &loader);
        registry.bind_alias("np", "numpy");
        registry.bind_alias("np", "other");

        let state = registry.lookup("np").unwrap();
        assert!(state.handle().unwrap().has_attribute("array"));
        assert!(registry.lookup("numpy").is_some());
        assert!(registry.lookup("pd").is_none());

        let mut words: Vec<&str> = registry.references().map(|(word, _)| word).collect();
        words.sort();
        assert_eq!(words, vec!["np", "numpy"]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.binding_count(), 2);
    }

    #[test]
    fn test_classify_modules() {
        use crate::syntax::span::StyleSpan;

        let loader = FakeLoader::new(&[("os", &["getcwd"])]);
        let mut registry = ImportRegistry::new();
        registry.resolve("os", &loader);
        registry.resolve("not_a_real_module_xyz", &loader);

        let text = "os, not_a_real_module_xyz, cos, myos.x";
        let mut spans = SpanSet::new(text.len());
        classify_modules(text, &registry, &mut spans);
        assert_eq!(
            spans.resolve(),
            vec![
                StyleSpan::new(0, 2, StyleCategory::ResolvedModuleRef),
                StyleSpan::new(4, 25, StyleCategory::UnresolvedModuleRef),
            ]
        );
    }
}
