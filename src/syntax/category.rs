//! Style categories for Python highlighting
//!
//! This module defines the closed set of categories the engine assigns
//! to spans, the priority each one carries when spans overlap, and
//! their default visual styles.

use super::style::{Color, Style};

/// Semantic categories a span of a line can be classified as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleCategory {
    /// Language keywords (def, class, if, ...)
    Keyword,
    /// Builtin function name immediately followed by `(`
    BuiltinCall,
    /// Name of an imported module that resolved
    ResolvedModuleRef,
    /// Name of an imported module that failed to resolve
    UnresolvedModuleRef,
    /// `attr` in `module.attr(` where the module has `attr`
    ResolvedAttributeRef,
    /// `attr` in `module.attr(` where the module lacks `attr`
    UnresolvedAttributeRef,
    /// Simple quoted run
    StringLiteral,
    /// Variable on its declaration line
    VariableDeclaration,
    /// Variable used away from its declaration line
    VariableUsage,
    /// Plain text
    Default,
}

impl StyleCategory {
    /// Every category, in declaration order
    pub const ALL: [StyleCategory; 10] = [
        StyleCategory::Keyword,
        StyleCategory::BuiltinCall,
        StyleCategory::ResolvedModuleRef,
        StyleCategory::UnresolvedModuleRef,
        StyleCategory::ResolvedAttributeRef,
        StyleCategory::UnresolvedAttributeRef,
        StyleCategory::StringLiteral,
        StyleCategory::VariableDeclaration,
        StyleCategory::VariableUsage,
        StyleCategory::Default,
    ];

    /// Merge priority: where spans overlap, the higher priority wins
    pub fn priority(&self) -> u8 {
        match self {
            StyleCategory::Default => 0,
            StyleCategory::Keyword | StyleCategory::BuiltinCall => 1,
            StyleCategory::ResolvedModuleRef | StyleCategory::UnresolvedModuleRef => 2,
            StyleCategory::ResolvedAttributeRef | StyleCategory::UnresolvedAttributeRef => 3,
            StyleCategory::StringLiteral => 4,
            StyleCategory::VariableDeclaration => 5,
            StyleCategory::VariableUsage => 6,
        }
    }

    /// Get the default style for this category
    pub fn default_style(&self) -> Style {
        match self {
            StyleCategory::Keyword => Style::fg(Color::Blue).with_bold(),
            StyleCategory::BuiltinCall => Style::fg(Color::Green),
            StyleCategory::ResolvedModuleRef => Style::fg(Color::Blue),
            StyleCategory::UnresolvedModuleRef => Style::fg(Color::Red),
            StyleCategory::ResolvedAttributeRef => Style::fg(Color::Green),
            StyleCategory::UnresolvedAttributeRef => Style::fg(Color::Red).with_underline(),
            StyleCategory::StringLiteral => Style::default(),
            StyleCategory::VariableDeclaration => Style::fg(Color::Yellow),
            StyleCategory::VariableUsage => Style::fg(Color::Magenta),
            StyleCategory::Default => Style::default(),
        }
    }

    /// Config key for this category
    pub fn name(&self) -> &'static str {
        match self {
            StyleCategory::Keyword => "keyword",
            StyleCategory::BuiltinCall => "builtin_call",
            StyleCategory::ResolvedModuleRef => "resolved_module",
            StyleCategory::UnresolvedModuleRef => "unresolved_module",
            StyleCategory::ResolvedAttributeRef => "resolved_attribute",
            StyleCategory::UnresolvedAttributeRef => "unresolved_attribute",
            StyleCategory::StringLiteral => "string",
            StyleCategory::VariableDeclaration => "variable_declaration",
            StyleCategory::VariableUsage => "variable_usage",
            StyleCategory::Default => "default",
        }
    }

    /// Parse a category from its config key (for TOML loading)
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.name() == name)
    }
}
