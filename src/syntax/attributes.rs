//! Module-attribute classifier
//!
//! Looks at calls of the form `name.attr(...)` and checks whether `attr`
//! exists on the resolved module bound to `name`. Qualifiers that are not
//! known modules, or whose resolution failed, produce nothing.

use super::category::StyleCategory;
use super::imports::ImportRegistry;
use super::span::SpanSet;
use super::words::words;

/// Whether the word ending at `end` is called: optional spaces then `(`
fn is_called(text: &str, end: usize) -> bool {
    text[end..].trim_start().starts_with('(')
}

/// Style the attribute of every `module.attr(` call on the line
///
/// For a dotted qualifier such as `os.path.join(`, the longest dotted
/// chain known to the registry is used (`os.path`), falling back to the
/// word right before the dot.
pub fn classify_attributes(text: &str, imports: &ImportRegistry, spans: &mut SpanSet) {
    if imports.is_empty() {
        return;
    }
    let found = words(text);

    for (idx, &(start, attr)) in found.iter().enumerate() {
        let end = start + attr.len();
        if idx == 0 || !is_called(text, end) {
            continue;
        }

        // Walk back over `a.b.c.` while each separator is exactly one dot
        let mut first = idx;
        while first > 0 {
            let (prev_start, prev) = found[first - 1];
            let separator = &text[prev_start + prev.len()..found[first].0];
            if separator != "." {
                break;
            }
            first -= 1;
        }
        if first == idx {
            continue;
        }

        let chain_start = found[first].0;
        let (module_start, module) = found[idx - 1];
        let qualifier = &text[chain_start..start - 1];
        let state = imports
            .lookup(qualifier)
            .or_else(|| imports.lookup(&text[module_start..module_start + module.len()]));

        if let Some(handle) = state.and_then(|state| state.handle()) {
            let category = if handle.has_attribute(attr) {
                StyleCategory::ResolvedAttributeRef
            } else {
                StyleCategory::UnresolvedAttributeRef
            };
            spans.push(start, end, category);
        }
    }
}
