//! Best-effort label inference for form fields.
//!
//! A label is resolved by trying each strategy in [`LABEL_STRATEGIES`] in order
//! and keeping the first non-empty answer:
//!
//! 1. a `<label for="...">` anywhere in the document pointing at the field's id,
//! 2. a `<label>` ancestor wrapping the field,
//! 3. the nearest non-blank text node before the field in document order.
//!
//! Labels that are only associated visually (CSS positioning) are not found.

use std::sync::OnceLock;

use scraper::{ElementRef, Html, Node, Selector};

/// A single way of finding a field's label.
pub type LabelStrategy = fn(&Html, ElementRef<'_>) -> Option<String>;

/// Strategies tried by [`resolve_label`], highest priority first.
pub const LABEL_STRATEGIES: &[LabelStrategy] = &[label_for_id, wrapping_label, preceding_text];

/// Elements whose text content is never a label: raw-text containers and the
/// contents of other fields.
const IGNORED_TEXT_PARENTS: &[&str] = &[
    "script", "style", "noscript", "template", "title", "option", "textarea",
];

fn label_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("label").expect("label selector is valid"))
}

/// Resolve a human-readable label for `element`, or `None` if every strategy fails.
pub fn resolve_label(document: &Html, element: ElementRef<'_>) -> Option<String> {
    LABEL_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(document, element))
}

/// `<label for=ID>` matching the element's id.
pub fn label_for_id(document: &Html, element: ElementRef<'_>) -> Option<String> {
    let id = element.value().id()?;
    document
        .select(label_selector())
        .filter(|label| label.value().attr("for") == Some(id))
        .find_map(|label| non_empty(label_text(label)))
}

/// Closest `<label>` ancestor.
pub fn wrapping_label(_document: &Html, element: ElementRef<'_>) -> Option<String> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| ancestor.value().name() == "label")
        .and_then(|label| non_empty(label_text(label)))
}

/// Nearest non-blank text node preceding the element in document order.
pub fn preceding_text(_document: &Html, element: ElementRef<'_>) -> Option<String> {
    let mut current = *element;
    loop {
        // Reverse pre-order: the previous sibling's deepest last descendant,
        // or the parent when there is no previous sibling.
        current = match current.prev_sibling() {
            Some(mut node) => {
                while let Some(child) = node.last_child() {
                    node = child;
                }
                node
            }
            None => current.parent()?,
        };

        let Node::Text(text) = current.value() else {
            continue;
        };
        let ignored = current
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| IGNORED_TEXT_PARENTS.contains(&name));
        if ignored {
            continue;
        }
        if let Some(text) = non_empty(collapse_whitespace(text)) {
            return Some(text);
        }
    }
}

/// Text of a label element, skipping nested option lists and scripts.
fn label_text(label: ElementRef<'_>) -> String {
    let mut raw = String::new();
    for node in label.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let ignored = node
            .parent()
            .and_then(|parent| parent.value().as_element().map(|el| el.name()))
            .is_some_and(|name| IGNORED_TEXT_PARENTS.contains(&name));
        if !ignored {
            raw.push_str(text);
        }
    }
    collapse_whitespace(&raw)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}
