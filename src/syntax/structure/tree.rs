//! tree-sitter plumbing shared by the line analyzer and the module loader

use tree_sitter::{Node, Parser, Tree, TreeCursor};

use super::{ParseError, ParseErrorKind};

/// Parse Python source into a concrete syntax tree
///
/// The tree may contain `ERROR` and `MISSING` nodes; callers decide how
/// strict to be about them.
pub fn parse(source: &str) -> Result<Tree, ParseError> {
    let mut parser = Parser::new();
    parser
        .set_language(tree_sitter_python::language())
        .map_err(|_| ParseError::new(0, ParseErrorKind::ParserUnavailable))?;
    parser
        .parse(source, None)
        .ok_or_else(|| ParseError::new(0, ParseErrorKind::ParserUnavailable))
}

/// Depth-first, pre-order walk over every node of a tree
///
/// Driven by a [`TreeCursor`], so nesting depth costs no stack.
pub struct Preorder<'t> {
    cursor: TreeCursor<'t>,
    done: bool,
}

impl<'t> Preorder<'t> {
    pub fn new(tree: &'t Tree) -> Self {
        Self {
            cursor: tree.walk(),
            done: false,
        }
    }
}

impl<'t> Iterator for Preorder<'t> {
    type Item = Node<'t>;

    fn next(&mut self) -> Option<Node<'t>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();
        if !self.cursor.goto_first_child() {
            while !self.cursor.goto_next_sibling() {
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }
        Some(node)
    }
}

/// Source text of a node
pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

/// `a.b.c` for a `dotted_name` node, whatever spacing the source used
pub fn dotted_name(node: Node<'_>, source: &str) -> String {
    if node.kind() != "dotted_name" {
        return text(node, source).to_string();
    }
    let mut cursor = node.walk();
    let parts: Vec<&str> = node
        .named_children(&mut cursor)
        .filter(|part| part.kind() == "identifier")
        .map(|part| text(part, source))
        .collect();
    parts.join(".")
}

/// Module and bound name of each clause of `import a.b as c, d`
///
/// The bound name is the alias when there is one, otherwise `None`.
pub fn import_clauses(node: Node<'_>, source: &str) -> Vec<(String, Option<String>)> {
    let mut cursor = node.walk();
    node.children_by_field_name("name", &mut cursor)
        .filter_map(|clause| match clause.kind() {
            "dotted_name" => Some((dotted_name(clause, source), None)),
            "aliased_import" => {
                let module = clause.child_by_field_name("name")?;
                let alias = clause.child_by_field_name("alias")?;
                Some((dotted_name(module, source), Some(text(alias, source).to_string())))
            }
            _ => None,
        })
        .collect()
}

/// Absolute module of a `from module import ...` statement
///
/// `None` for relative imports.
pub fn from_module(node: Node<'_>, source: &str) -> Option<String> {
    let module = node.child_by_field_name("module_name")?;
    (module.kind() == "dotted_name").then(|| dotted_name(module, source))
}

/// Plain-name targets of an `assignment` node, left of `=`
///
/// `a: int = 1` counts only when `annotated` is set; tuple targets count
/// only when `unpack` is set.
pub fn assignment_names<'s>(node: Node<'_>, source: &'s str, annotated: bool, unpack: bool) -> Vec<&'s str> {
    if !annotated && node.child_by_field_name("type").is_some() {
        return Vec::new();
    }
    let Some(left) = node.child_by_field_name("left") else {
        return Vec::new();
    };
    match left.kind() {
        "identifier" => vec![text(left, source)],
        "pattern_list" | "tuple_pattern" if unpack => {
            let mut cursor = left.walk();
            let names: Vec<Node> = left.named_children(&mut cursor).collect();
            if names.iter().all(|name| name.kind() == "identifier") {
                names.into_iter().map(|name| text(name, source)).collect()
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}

/// Offset of the first `ERROR` or `MISSING` node
pub fn first_error(tree: &Tree) -> Option<(usize, ParseErrorKind)> {
    Preorder::new(tree).find_map(|node| {
        if node.is_missing() {
            Some((node.start_byte(), ParseErrorKind::MissingToken(node.kind().to_string())))
        } else if node.is_error() {
            Some((node.start_byte(), ParseErrorKind::InvalidSyntax))
        } else {
            None
        }
    })
}
