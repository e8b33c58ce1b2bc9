//! Module loaders
//!
//! The engine never executes Python. A module "loads" when it can be
//! found, and its attribute names are read either from the built-in
//! standard-library table or from the top-level bindings of its source.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::imports::{LoadError, ModuleHandle, ModuleLoader, ModuleOrigin};
use super::python;
use super::structure;

/// Attributes every module object carries
const MODULE_DUNDERS: &[&str] = &["__name__", "__file__", "__doc__", "__spec__", "__package__"];

/// Check that `name` is a dotted sequence of identifiers
pub fn is_module_name(name: &str) -> bool {
    !name.is_empty() && name.split('.').all(|part| leading_identifier(part) == Some(part))
}

/// The identifier at the start of `s`, if any
fn leading_identifier(s: &str) -> Option<&str> {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if c == '_' || c.is_alphabetic() => {}
        _ => return None,
    }
    let end = chars
        .find(|&(_, c)| !(c == '_' || c.is_alphanumeric()))
        .map_or(s.len(), |(i, _)| i);
    Some(&s[..end])
}

/// Serves modules from the built-in standard-library table
#[derive(Debug, Default, Clone, Copy)]
pub struct StdlibLoader;

impl ModuleLoader for StdlibLoader {
    fn load(&self, name: &str) -> Result<ModuleHandle, LoadError> {
        let attrs = python::stdlib_attributes(name).ok_or_else(|| LoadError::NotFound(name.to_string()))?;
        Ok(ModuleHandle::new(
            name,
            ModuleOrigin::Stdlib,
            attrs.iter().chain(MODULE_DUNDERS).copied(),
        ))
    }
}

/// Finds `.py` sources and packages under a list of root directories
#[derive(Debug, Default, Clone)]
pub struct SearchPathLoader {
    roots: Vec<PathBuf>,
}

impl SearchPathLoader {
    /// Create a loader searching `roots` in order
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Locate `name` under `root`: a module file or a package directory
    fn locate(root: &Path, name: &str) -> Option<(PathBuf, Option<PathBuf>)> {
        let relative: PathBuf = name.split('.').collect();
        let package = root.join(&relative);
        let init = package.join("__init__.py");
        if init.is_file() {
            return Some((init, Some(package)));
        }
        let file = root.join(relative.with_extension("py"));
        if file.is_file() {
            return Some((file, None));
        }
        None
    }
}

impl ModuleLoader for SearchPathLoader {
    fn load(&self, name: &str) -> Result<ModuleHandle, LoadError> {
        if !is_module_name(name) {
            return Err(LoadError::InvalidName(name.to_string()));
        }

        for root in &self.roots {
            let Some((source_path, package_dir)) = Self::locate(root, name) else {
                continue;
            };

            let source = fs::read_to_string(&source_path).map_err(|source| LoadError::Io {
                path: source_path.clone(),
                source,
            })?;

            let mut attributes = top_level_bindings(&source);
            if let Some(dir) = package_dir {
                attributes.extend(submodule_names(&dir).map_err(|source| LoadError::Io {
                    path: dir.clone(),
                    source,
                })?);
            }
            attributes.extend(MODULE_DUNDERS.iter().map(|s| s.to_string()));

            return Ok(ModuleHandle::new(name, ModuleOrigin::Source(source_path), attributes));
        }

        Err(LoadError::NotFound(name.to_string()))
    }
}

/// Tries each loader in turn; the first success wins
#[derive(Default)]
pub struct ChainLoader {
    loaders: Vec<Box<dyn ModuleLoader>>,
}

impl ChainLoader {
    /// Create an empty chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: append a loader
    pub fn with(mut self, loader: impl ModuleLoader + 'static) -> Self {
        self.loaders.push(Box::new(loader));
        self
    }

    /// Number of loaders in the chain
    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    /// Check if the chain has no loaders
    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl ModuleLoader for ChainLoader {
    fn load(&self, name: &str) -> Result<ModuleHandle, LoadError> {
        if !is_module_name(name) {
            return Err(LoadError::InvalidName(name.to_string()));
        }
        for loader in &self.loaders {
            match loader.load(name) {
                Ok(handle) => return Ok(handle),
                Err(LoadError::NotFound(_)) => continue,
                Err(err) => return Err(err),
            }
        }
        Err(LoadError::NotFound(name.to_string()))
    }
}

/// Names bound at the top level of a Python source file
///
/// Only statements directly under the module are looked at: `def`,
/// `class`, plain, annotated and tuple assignments, and `import` /
/// `from ... import` statements. Regions that fail to parse are skipped.
pub fn top_level_bindings(source: &str) -> Vec<String> {
    let tree = match structure::parse(source) {
        Ok(tree) => tree,
        Err(err) => {
            tracing::debug!(error = %err, "module source not parsed");
            return Vec::new();
        }
    };

    let root = tree.root_node();
    let mut cursor = root.walk();
    let mut names = Vec::new();
    for statement in root.named_children(&mut cursor) {
        let statement = match statement.kind() {
            "decorated_definition" => match statement.child_by_field_name("definition") {
                Some(definition) => definition,
                None => continue,
            },
            _ => statement,
        };

        match statement.kind() {
            "function_definition" | "class_definition" => {
                if let Some(name) = statement.child_by_field_name("name") {
                    names.push(structure::dotted_name(name, source));
                }
            }
            "import_statement" => {
                // `import a.b` binds `a`
                for (module, alias) in structure::import_clauses(statement, source) {
                    names.extend(alias.or_else(|| module.split('.').next().map(str::to_string)));
                }
            }
            "import_from_statement" => {
                let mut clauses = statement.walk();
                for clause in statement.children_by_field_name("name", &mut clauses) {
                    let bound = match clause.kind() {
                        "aliased_import" => clause.child_by_field_name("alias"),
                        _ => Some(clause),
                    };
                    names.extend(bound.map(|node| structure::dotted_name(node, source)));
                }
            }
            "expression_statement" => {
                let mut inner = statement.walk();
                let mut pending: Vec<_> = statement.named_children(&mut inner).collect();
                while let Some(node) = pending.pop() {
                    if node.kind() != "assignment" {
                        continue;
                    }
                    let targets = structure::assignment_names(node, source, true, true);
                    names.extend(targets.into_iter().map(str::to_string));
                    pending.extend(node.child_by_field_name("right"));
                }
            }
            _ => {}
        }
    }

    names
}

/// Submodule and subpackage names inside a package directory
fn submodule_names(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let name = if path.is_dir() && path.join("__init__.py").is_file() {
            path.file_name().and_then(|n| n.to_str()).map(str::to_string)
        } else if path.extension().is_some_and(|ext| ext == "py") {
            path.file_stem().and_then(|n| n.to_str()).map(str::to_string)
        } else {
            None
        };
        if let Some(name) = name.filter(|n| n != "__init__" && is_module_name(n)) {
            names.push(name);
        }
    }
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_module_name() {
        assert!(is_module_name("os"));
        assert!(is_module_name("os.path"));
        assert!(is_module_name("_private.mod2"));
        assert!(!is_module_name(""));
        assert!(!is_module_name("os..path"));
        assert!(!is_module_name("2fast"));
        assert!(!is_module_name("a-b"));
    }

    #[test]
    fn test_stdlib_loader() {
        let handle = StdlibLoader.load("os").unwrap();
        assert!(handle.has_attribute("getcwd"));
        assert!(handle.has_attribute("__name__"));
        assert!(!handle.has_attribute("bogus"));
        assert_eq!(handle.origin(), &ModuleOrigin::Stdlib);
        assert!(matches!(StdlibLoader.load("not_a_real_module_xyz"), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_top_level_bindings() {
        let source = "\
import os, sys as system
from pathlib import Path, PurePath as PP
from x import *
CONSTANT = 3
typed: int = 4
a, b = 1, 2
flag == 3
first = second = 0

@decorated
def wrapped():
    pass

def helper(x):
    inner = 1

async def fetch():
    pass

class Thing:
    attr = 2
";
        let names = top_level_bindings(source);
        for expected in ["os", "system", "Path", "PP", "CONSTANT", "typed", "a", "b", "helper", "fetch", "Thing", "first", "second", "wrapped"] {
            assert!(names.contains(&expected.to_string()), "missing {}", expected);
        }
        for unexpected in ["sys", "PurePath", "*", "flag", "inner", "attr"] {
            assert!(!names.contains(&unexpected.to_string()), "unexpected {}", unexpected);
        }
    }

    #[test]
    fn test_search_path_module_and_package() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("helpers.py"), "def greet():\n    pass\nVERSION = 1\n").unwrap();
        fs::create_dir(dir.path().join("pkg")).unwrap();
        fs::write(dir.path().join("pkg").join("__init__.py"), "from .core import run\n").unwrap();
        fs::write(dir.path().join("pkg").join("core.py"), "def run():\n    pass\n").unwrap();

        let loader = SearchPathLoader::new(vec![dir.path().to_path_buf()]);

        let helpers = loader.load("helpers").unwrap();
        assert!(helpers.has_attribute("greet"));
        assert!(helpers.has_attribute("VERSION"));
        assert!(matches!(helpers.origin(), ModuleOrigin::Source(_)));

        let pkg = loader.load("pkg").unwrap();
        assert!(pkg.has_attribute("run"));
        assert!(pkg.has_attribute("core"));

        let core = loader.load("pkg.core").unwrap();
        assert!(core.has_attribute("run"));

        assert!(matches!(loader.load("missing"), Err(LoadError::NotFound(_))));
        assert!(matches!(loader.load("bad name"), Err(LoadError::InvalidName(_))));
    }

    #[test]
    fn test_chain_loader_order() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("os.py"), "def shadow():\n    pass\n").unwrap();

        let chain = ChainLoader::new()
            .with(StdlibLoader)
            .with(SearchPathLoader::new(vec![dir.path().to_path_buf()]));
        assert_eq!(chain.len(), 2);

        // Stdlib comes first
        let os = chain.load("os").unwrap();
        assert!(os.has_attribute("getcwd"));
        assert!(!os.has_attribute("shadow"));

        assert!(matches!(chain.load("nothing_here"), Err(LoadError::NotFound(_))));
        assert!(ChainLoader::new().load("os").is_err());
    }
}
