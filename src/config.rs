//! Configuration file support
//!
//! Loads settings from ~/.pylight.toml (or %USERPROFILE%\.pylight.toml on Windows)
//!
//! Every section and key is optional.
//!
//! Example:
//! ```toml
//! [highlight]
//! keywords = ["def", "class", "if", "else", "while", "return"]
//! builtins = ["print", "len"]
//!
//! [modules]
//! search_paths = ["/usr/lib/python3/dist-packages"]
//! use_pythonpath = true
//! stdlib = true
//!
//! [theme]
//! keyword = "cyan"
//! variable_usage = "bright_magenta"
//! string = "green italic"
//! ```

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PylightError, Result};
use crate::syntax::{python, Theme};

const CONFIG_FILE: &str = ".pylight.toml";

/// Configuration settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Lexical rule word lists
    pub highlight: HighlightConfig,
    /// Where modules are resolved from
    pub modules: ModulesConfig,
    /// Category name -> color name overrides
    pub theme: HashMap<String, String>,
}

/// `[highlight]` section
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// Replaces the built-in keyword list
    pub keywords: Option<Vec<String>>,
    /// Replaces the built-in builtin-function list
    pub builtins: Option<Vec<String>>,
}

/// `[modules]` section
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Directories searched for `.py` modules and packages
    pub search_paths: Vec<PathBuf>,
    /// Also search the entries of `$PYTHONPATH`
    pub use_pythonpath: bool,
    /// Consult the built-in standard-library table
    pub stdlib: bool,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            search_paths: Vec::new(),
            use_pythonpath: true,
            stdlib: true,
        }
    }
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE))
        }
    }

    /// Load configuration from the default location
    ///
    /// A missing file gives the defaults. So does a file that fails to
    /// load, after a warning.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Config::default();
        };
        if !path.exists() {
            return Config::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "ignoring config file");
                Config::default()
            }
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PylightError::FileNotFound(path.display().to_string()),
            _ => PylightError::Io(err),
        })?;
        let config = Self::parse(&contents).map_err(|source| PylightError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Parse config file contents
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Keyword list for the lexical rules
    pub fn keywords(&self) -> Vec<String> {
        self.highlight.keywords.clone().unwrap_or_else(python::default_keywords)
    }

    /// Builtin-call list for the lexical rules
    pub fn builtins(&self) -> Vec<String> {
        self.highlight.builtins.clone().unwrap_or_else(python::default_builtins)
    }

    /// Module search roots, configured ones first, then `$PYTHONPATH`
    pub fn module_search_paths(&self) -> Vec<PathBuf> {
        self.search_paths_with(std::env::var_os("PYTHONPATH"))
    }

    fn search_paths_with(&self, pythonpath: Option<OsString>) -> Vec<PathBuf> {
        let mut paths = self.modules.search_paths.clone();
        if self.modules.use_pythonpath {
            if let Some(value) = pythonpath {
                paths.extend(std::env::split_paths(&value).filter(|p| !p.as_os_str().is_empty()));
            }
        }
        paths.dedup();
        paths
    }

    /// Theme built from the `[theme]` overrides
    pub fn theme(&self) -> Result<Theme> {
        Theme::from_overrides(&self.theme)
    }
}
