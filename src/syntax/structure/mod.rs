//! Best-effort structural analysis of a single line
//!
//! Each line is parsed on its own, as if it were a complete program.
//! That is an approximation with known blind spots: indented lines,
//! block headers without an inline body, decorators, `else`/`except`
//! clauses and statements spanning several lines never parse. A failed
//! parse is not an error for the pipeline; the line simply contributes
//! no discoveries.

mod tree;

use thiserror::Error;

use super::quotes;
use super::words::{find_word, words};

pub use tree::{assignment_names, dotted_name, import_clauses, parse, Preorder};

/// Brackets a line may open before it is rejected outright
pub const MAX_NESTING: usize = 200;

/// Clauses that only continue a compound statement
const ORPHAN_CLAUSES: &[&str] = &["elif", "else", "except", "finally"];

/// Why a line could not be parsed on its own
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected indent")]
    UnexpectedIndent,

    #[error("line continuation")]
    LineContinuation,

    #[error("too many nested brackets")]
    TooDeeplyNested,

    #[error("block header without a body")]
    MissingBlockBody,

    #[error("'{0}' cannot stand on its own")]
    OrphanClause(String),

    #[error("invalid syntax")]
    InvalidSyntax,

    #[error("missing {0:?}")]
    MissingToken(String),

    #[error("Python grammar unavailable")]
    ParserUnavailable,
}

/// A structural parse failure at a byte offset
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {offset}")]
pub struct ParseError {
    pub offset: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(offset: usize, kind: ParseErrorKind) -> Self {
        Self { offset, kind }
    }
}

/// The line up to a comment, with quoted runs left intact
fn code_part(text: &str) -> &str {
    let runs = quotes::quoted_runs(text);
    let hash = text
        .match_indices('#')
        .map(|(i, _)| i)
        .find(|&i| !runs.iter().any(|&(start, end)| start <= i && i < end));
    match hash {
        Some(i) => &text[..i],
        None => text,
    }
}

/// Deepest bracket nesting outside quoted runs
fn nesting_depth(code: &str) -> (usize, usize) {
    let runs = quotes::quoted_runs(code);
    let mut run = runs.iter().peekable();
    let mut depth = 0usize;
    for (i, c) in code.char_indices() {
        while run.next_if(|&&(_, end)| end <= i).is_some() {}
        if run.peek().is_some_and(|&&(start, _)| start <= i) {
            continue;
        }
        match c {
            '(' | '[' | '{' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return (depth, i);
                }
            }
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    (depth, code.len())
}

/// Rejections that need no grammar: the line cannot be a program
///
/// Returns false for a line with no code at all.
fn precheck(text: &str) -> Result<bool, ParseError> {
    let code = code_part(text);
    let trimmed = code.trim_end();
    if trimmed.trim_start().is_empty() {
        return Ok(false);
    }
    if text.starts_with(char::is_whitespace) {
        return Err(ParseError::new(0, ParseErrorKind::UnexpectedIndent));
    }
    if trimmed.ends_with('\\') {
        return Err(ParseError::new(trimmed.len() - 1, ParseErrorKind::LineContinuation));
    }
    let (depth, offset) = nesting_depth(code);
    if depth > MAX_NESTING {
        return Err(ParseError::new(offset, ParseErrorKind::TooDeeplyNested));
    }
    if let Some(&(_, first)) = words(code).first() {
        if ORPHAN_CLAUSES.contains(&first) && code.starts_with(first) {
            return Err(ParseError::new(0, ParseErrorKind::OrphanClause(first.to_string())));
        }
    }
    if trimmed.ends_with(':') {
        return Err(ParseError::new(trimmed.len(), ParseErrorKind::MissingBlockBody));
    }
    Ok(true)
}

/// Something the analyzer learned from a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discovery {
    /// A bare name assigned with `=`
    Assignment(String),
    /// `import module [as alias]`, one per imported name
    Import { module: String, alias: Option<String> },
    /// `from module import ...` (absolute only)
    ImportFrom { module: String },
}

/// Parse `text` and collect its discoveries
///
/// Assignments whose name first occurs inside a quoted run on the line
/// are dropped: there the parse and the raw text disagree about what the
/// name is.
pub fn discover(text: &str) -> Result<Vec<Discovery>, ParseError> {
    if !precheck(text)? {
        return Ok(Vec::new());
    }
    let tree = parse(text)?;
    if tree.root_node().has_error() {
        let (offset, kind) = tree::first_error(&tree).unwrap_or((0, ParseErrorKind::InvalidSyntax));
        return Err(ParseError::new(offset, kind));
    }

    let mut found = Vec::new();
    for node in Preorder::new(&tree) {
        match node.kind() {
            "assignment" => {
                for name in assignment_names(node, text, false, false) {
                    found.push(Discovery::Assignment(name.to_string()));
                }
            }
            "import_statement" => {
                for (module, alias) in import_clauses(node, text) {
                    found.push(Discovery::Import { module, alias });
                }
            }
            "import_from_statement" => {
                if let Some(module) = tree::from_module(node, text) {
                    found.push(Discovery::ImportFrom { module });
                }
            }
            _ => {}
        }
    }

    let pairs = quotes::quote_pairs(text);
    found.retain(|discovery| match discovery {
        Discovery::Assignment(name) => match find_word(text, name) {
            Some(start) => !quotes::in_quotes(&pairs, start, start + name.len()),
            None => true,
        },
        _ => true,
    });
    Ok(found)
}
