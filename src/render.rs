//! Terminal output using crossterm
//!
//! Paints highlighted lines with ANSI attributes, or lists their spans
//! as plain text rows.

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Attribute, Print, SetAttribute, SetBackgroundColor, SetForegroundColor},
};
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::syntax::{Color, Style, StyleSpan, Theme};

/// Map a theme color to a crossterm color
fn term_color(color: Color) -> style::Color {
    match color {
        Color::Default => style::Color::Reset,
        Color::Black => style::Color::Black,
        Color::Red => style::Color::DarkRed,
        Color::Green => style::Color::DarkGreen,
        Color::Yellow => style::Color::DarkYellow,
        Color::Blue => style::Color::DarkBlue,
        Color::Magenta => style::Color::DarkMagenta,
        Color::Cyan => style::Color::DarkCyan,
        Color::White => style::Color::Grey,
        Color::BrightBlack => style::Color::DarkGrey,
        Color::BrightRed => style::Color::Red,
        Color::BrightGreen => style::Color::Green,
        Color::BrightYellow => style::Color::Yellow,
        Color::BrightBlue => style::Color::Blue,
        Color::BrightMagenta => style::Color::Magenta,
        Color::BrightCyan => style::Color::Cyan,
        Color::BrightWhite => style::Color::White,
    }
}

/// Writes styled lines to any output stream
pub struct Renderer<W: Write> {
    out: W,
    theme: Theme,
}

impl<W: Write> Renderer<W> {
    /// Create a renderer painting with `theme`
    pub fn new(out: W, theme: Theme) -> Self {
        Self { out, theme }
    }

    /// Give back the output stream
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Apply a style to the text that follows
    fn set_style(&mut self, style: Style) -> Result<()> {
        if style.fg != Color::Default {
            queue!(self.out, SetForegroundColor(term_color(style.fg)))?;
        }
        if style.bg != Color::Default {
            queue!(self.out, SetBackgroundColor(term_color(style.bg)))?;
        }
        if style.bold {
            queue!(self.out, SetAttribute(Attribute::Bold))?;
        }
        if style.italic {
            queue!(self.out, SetAttribute(Attribute::Italic))?;
        }
        if style.underline {
            queue!(self.out, SetAttribute(Attribute::Underlined))?;
        }
        Ok(())
    }

    /// Reset all attributes
    fn reset_attributes(&mut self) -> Result<()> {
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        Ok(())
    }

    /// Write one line with its spans painted, followed by a newline
    ///
    /// Spans must be sorted and non-overlapping, as the engine returns them.
    pub fn render_line(&mut self, text: &str, spans: &[StyleSpan]) -> Result<()> {
        let mut pos = 0;
        for span in spans {
            if span.start < pos || span.end > text.len() {
                continue;
            }
            let (Some(plain), Some(styled)) = (text.get(pos..span.start), text.get(span.start..span.end)) else {
                continue;
            };
            queue!(self.out, Print(plain))?;

            let style = self.theme.style(span.category);
            if style.is_default() {
                queue!(self.out, Print(styled))?;
            } else {
                self.set_style(style)?;
                queue!(self.out, Print(styled))?;
                self.reset_attributes()?;
            }
            pos = span.end;
        }
        queue!(self.out, Print(text.get(pos..).unwrap_or_default()), Print("\n"))?;
        Ok(())
    }

    /// Write one `line:col category text` row per span
    pub fn list_spans(&mut self, line: usize, text: &str, spans: &[StyleSpan]) -> Result<()> {
        for row in span_rows(line, text, spans) {
            writeln!(self.out, "{}", row)?;
        }
        Ok(())
    }

    /// Flush output buffer
    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// `line:col category text` rows, with 1-based display columns
pub fn span_rows(line: usize, text: &str, spans: &[StyleSpan]) -> Vec<String> {
    spans
        .iter()
        .filter_map(|span| {
            let before = text.get(..span.start)?;
            let styled = text.get(span.start..span.end)?;
            let col = before.width() + 1;
            Some(format!("{}:{} {} {}", line, col, span.category.name(), styled))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::StyleCategory;

    #[test]
    fn test_span_rows_use_display_columns() {
        let text = "名前 = len(x)";
        let start = text.find("len").unwrap();
        let spans = vec![StyleSpan::new(start, start + 3, StyleCategory::BuiltinCall)];

        assert_eq!(span_rows(4, text, &spans), vec!["4:8 builtin_call len".to_string()]);
    }

    #[test]
    fn test_render_plain_text() {
        let mut renderer = Renderer::new(Vec::new(), Theme::default());
        renderer.render_line("x = 1", &[]).unwrap();
        assert_eq!(renderer.into_inner(), b"x = 1\n");
    }

    #[test]
    fn test_render_styled_span() {
        let mut renderer = Renderer::new(Vec::new(), Theme::default());
        let spans = vec![StyleSpan::new(0, 5, StyleCategory::BuiltinCall)];
        renderer.render_line("print(1)", &spans).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.starts_with("\x1b["));
        assert!(out.contains("print"));
        assert!(out.ends_with("(1)\n"));
    }

    #[test]
    fn test_default_styled_span_is_plain() {
        let mut renderer = Renderer::new(Vec::new(), Theme::default());
        let spans = vec![StyleSpan::new(4, 7, StyleCategory::StringLiteral)];
        renderer.render_line("s = 'a'", &spans).unwrap();
        assert_eq!(renderer.into_inner(), b"s = 'a'\n");
    }

    #[test]
    fn test_italic_override() {
        let mut overrides = std::collections::HashMap::new();
        overrides.insert("string".to_string(), "italic".to_string());
        let mut renderer = Renderer::new(Vec::new(), Theme::from_overrides(&overrides).unwrap());
        let spans = vec![StyleSpan::new(4, 7, StyleCategory::StringLiteral)];
        renderer.render_line("s = 'a'", &spans).unwrap();

        let out = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(out.starts_with("s = \x1b[3m'a'"));
    }

    #[test]
    fn test_list_spans() {
        let mut renderer = Renderer::new(Vec::new(), Theme::default());
        let spans = vec![StyleSpan::new(0, 1, StyleCategory::VariableUsage)];
        renderer.list_spans(2, "x", &spans).unwrap();
        assert_eq!(renderer.into_inner(), b"2:1 variable_usage x\n");
    }
}
