// SPDX-License-Identifier: MPL-2.0
//! Content normalization and insertion.
//!
//! Content is described as text, element handles, lists of either, or
//! callables producing any of these. Everything is normalized to concrete
//! nodes before insertion; strings always become text nodes and are never
//! interpreted as markup.

use std::fmt;
use std::rc::Rc;

use super::{empty, Element};

/// Content accepted by [`append_content`] and [`insert_content`].
#[derive(Clone)]
pub enum Content {
    Text(String),
    Node(Element),
    List(Vec<Content>),
    Deferred(Rc<dyn Fn() -> Content>),
}

impl Content {
    /// Wraps a callable that produces content at insertion time.
    pub fn deferred(f: impl Fn() -> Content + 'static) -> Self {
        Content::Deferred(Rc::new(f))
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Content::Node(el) => f.debug_tuple("Node").field(el).finish(),
            Content::List(items) => f.debug_tuple("List").field(items).finish(),
            Content::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Text(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Text(text)
    }
}

impl From<Element> for Content {
    fn from(el: Element) -> Self {
        Content::Node(el)
    }
}

impl From<Vec<Content>> for Content {
    fn from(items: Vec<Content>) -> Self {
        Content::List(items)
    }
}

/// Flattens content into nodes, dropping blank strings.
pub fn normalize_content(content: Content) -> Vec<Element> {
    let mut nodes = Vec::new();
    collect(content, &mut nodes);
    nodes
}

fn collect(content: Content, nodes: &mut Vec<Element>) {
    match content {
        Content::Text(text) => {
            if text.chars().any(|c| !c.is_whitespace()) {
                nodes.push(Element::text(&text));
            }
        }
        Content::Node(el) => nodes.push(el),
        Content::List(items) => {
            for item in items {
                collect(item, nodes);
            }
        }
        Content::Deferred(produce) => collect(produce(), nodes),
    }
}

/// Appends normalized content to `el`.
pub fn append_content(el: &Element, content: impl Into<Content>) -> &Element {
    for node in normalize_content(content.into()) {
        el.append_child(&node);
    }
    el
}

/// Replaces the children of `el` with normalized content.
pub fn insert_content(el: &Element, content: impl Into<Content>) -> &Element {
    append_content(empty(el), content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_strings_are_dropped() {
        let nodes = normalize_content(Content::List(vec!["  ".into(), "\n".into(), "x".into()]));
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].text_content(), "x");
    }

    #[test]
    fn markup_stays_text() {
        let nodes = normalize_content("<img src=x onerror=alert(1)>".into());
        assert_eq!(nodes.len(), 1);
        assert!(nodes[0].is_text());
    }

    #[test]
    fn deferred_and_nested_lists_are_flattened() {
        let span = Element::new("span");
        let inner = span.clone();
        let content = Content::List(vec![
            Content::deferred(move || Content::Node(inner.clone())),
            Content::List(vec!["a".into(), Content::deferred(|| "b".into())]),
        ]);
        let nodes = normalize_content(content);
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], span);
        assert_eq!(nodes[2].text_content(), "b");
    }

    #[test]
    fn insert_content_replaces_children() {
        let el = Element::new("div");
        append_content(&el, "first");
        insert_content(&el, vec![Content::from("second"), Content::from(Element::new("hr"))]);
        assert_eq!(el.child_nodes().len(), 2);
        assert_eq!(el.text_content(), "second");
    }
}
