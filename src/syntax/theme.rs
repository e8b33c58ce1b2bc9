//! Category to style mapping

use std::collections::HashMap;

use crate::error::{PylightError, Result};

use super::category::StyleCategory;
use super::style::{Color, Style};

/// How each category is painted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    styles: HashMap<StyleCategory, Style>,
}

impl Theme {
    /// Default palette, as returned by [`StyleCategory::default_style`]
    pub fn new() -> Self {
        let styles = StyleCategory::ALL
            .iter()
            .map(|&category| (category, category.default_style()))
            .collect();
        Self { styles }
    }

    /// Default palette adjusted from a `category name -> style` table
    ///
    /// A style value is a color name, optionally followed by `bold`,
    /// `italic` or `underline` (`"green italic"`). Attributes are added
    /// to the category's default ones.
    pub fn from_overrides(overrides: &HashMap<String, String>) -> Result<Self> {
        let mut theme = Self::new();
        for (key, value) in overrides {
            let category =
                StyleCategory::from_name(key).ok_or_else(|| PylightError::UnknownCategory(key.clone()))?;
            let style = apply_override(theme.style(category), value)?;
            theme.set(category, style);
        }
        Ok(theme)
    }

    /// Style for a category
    pub fn style(&self, category: StyleCategory) -> Style {
        self.styles.get(&category).copied().unwrap_or_default()
    }

    /// Replace the style of a category
    pub fn set(&mut self, category: StyleCategory, style: Style) {
        self.styles.insert(category, style);
    }
}

fn apply_override(mut style: Style, value: &str) -> Result<Style> {
    for word in value.split_whitespace() {
        style = match word.to_lowercase().as_str() {
            "bold" => style.with_bold(),
            "italic" => style.with_italic(),
            "underline" => style.with_underline(),
            _ => match Color::from_name(word) {
                Some(color) => style.with_fg(color),
                None => return Err(PylightError::InvalidColor(value.to_string())),
            },
        };
    }
    Ok(style)
}

impl Default for Theme {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = Theme::default();
        assert_eq!(theme.style(StyleCategory::VariableUsage).fg, Color::Magenta);
        assert!(theme.style(StyleCategory::StringLiteral).is_default());
    }

    #[test]
    fn test_overrides_keep_attributes() {
        let mut overrides = HashMap::new();
        overrides.insert("keyword".to_string(), "bright-cyan".to_string());
        let theme = Theme::from_overrides(&overrides).unwrap();

        let keyword = theme.style(StyleCategory::Keyword);
        assert_eq!(keyword.fg, Color::BrightCyan);
        assert!(keyword.bold);
        assert_eq!(theme.style(StyleCategory::BuiltinCall).fg, Color::Green);
    }

    #[test]
    fn test_override_attributes() {
        let mut overrides = HashMap::new();
        overrides.insert("string".to_string(), "green italic".to_string());
        overrides.insert("variable_declaration".to_string(), "underline".to_string());
        let theme = Theme::from_overrides(&overrides).unwrap();

        let string = theme.style(StyleCategory::StringLiteral);
        assert_eq!(string.fg, Color::Green);
        assert!(string.italic);
        assert!(!string.bold);

        let declaration = theme.style(StyleCategory::VariableDeclaration);
        assert!(declaration.underline);
        assert_eq!(declaration.fg, StyleCategory::VariableDeclaration.default_style().fg);
    }

    #[test]
    fn test_bad_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("keyword".to_string(), "plaid".to_string());
        assert!(matches!(Theme::from_overrides(&overrides), Err(PylightError::InvalidColor(c)) if c == "plaid"));

        let mut overrides = HashMap::new();
        overrides.insert("keyword".to_string(), "red blinking".to_string());
        assert!(matches!(Theme::from_overrides(&overrides), Err(PylightError::InvalidColor(_))));

        let mut overrides = HashMap::new();
        overrides.insert("comments".to_string(), "red".to_string());
        assert!(matches!(Theme::from_overrides(&overrides), Err(PylightError::UnknownCategory(_))));
    }
}
