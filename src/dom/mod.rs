// SPDX-License-Identifier: MPL-2.0
//! Owned element tree standing in for the host document.
//!
//! Components never touch a browser DOM directly; they call through this
//! module. An [`Element`] is a cheap, reference-counted handle to a node that
//! carries a tag, an id, a class list, attributes, inline style, a rendered
//! size supplied by the host's layout, and an ordered list of child nodes.
//!
//! # Modules
//!
//! - [`data`]: per-element data bag (listener registrations)
//! - [`content`]: content normalization and insertion
//! - [`position`]: element and pointer positions

pub mod content;
pub mod data;
pub mod position;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::{Error, Result};

pub use content::{append_content, insert_content, normalize_content, Content};
pub use data::{clear_data, data_for, data_tag, has_data, ElementData};
pub use position::{find_position, pointer_position, PointerPosition, Position, Rect};

/// Attribute names that are reported as booleans by [`get_attributes`].
const KNOWN_BOOLEAN_ATTRIBUTES: [&str; 5] = ["autoplay", "controls", "loop", "muted", "default"];

#[derive(Debug, Clone, PartialEq)]
enum NodeKind {
    Element { tag: String },
    Text(String),
}

#[derive(Debug)]
struct Node {
    kind: NodeKind,
    id: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    properties: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    offset_width: f64,
    offset_height: f64,
    rect: Option<Rect>,
    children: Vec<Element>,
    parent: Weak<RefCell<Node>>,
    data: Option<ElementData>,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            id: String::new(),
            classes: Vec::new(),
            attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
            style: BTreeMap::new(),
            offset_width: 0.0,
            offset_height: 0.0,
            rect: None,
            children: Vec::new(),
            parent: Weak::new(),
            data: None,
        }
    }
}

/// Handle to a node in the element tree.
///
/// Cloning the handle shares the node. Equality is identity.
#[derive(Clone)]
pub struct Element(Rc<RefCell<Node>>);

/// Non-owning handle to an element.
#[derive(Clone, Default)]
pub struct WeakElement(Weak<RefCell<Node>>);

impl WeakElement {
    /// Returns the element if it is still alive.
    pub fn upgrade(&self) -> Option<Element> {
        self.0.upgrade().map(Element)
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Element {}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        match &node.kind {
            NodeKind::Element { tag } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("id", &node.id)
                .field("classes", &node.classes)
                .field("children", &node.children.len())
                .finish(),
            NodeKind::Text(text) => f.debug_tuple("Text").field(text).finish(),
        }
    }
}

impl Element {
    /// Creates a detached element with the given tag.
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(Node::new(NodeKind::Element {
            tag: tag.to_ascii_lowercase(),
        }))))
    }

    /// Creates a detached text node. The text is never parsed as markup.
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self(Rc::new(RefCell::new(Node::new(NodeKind::Text(
            text.to_string(),
        )))))
    }

    pub fn downgrade(&self) -> WeakElement {
        WeakElement(Rc::downgrade(&self.0))
    }

    /// Returns the lowercased tag name, or `#text` for text nodes.
    pub fn tag(&self) -> String {
        match &self.0.borrow().kind {
            NodeKind::Element { tag } => tag.clone(),
            NodeKind::Text(_) => "#text".to_string(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self.0.borrow().kind, NodeKind::Text(_))
    }

    pub fn id(&self) -> String {
        self.0.borrow().id.clone()
    }

    pub fn set_id(&self, id: &str) {
        self.0.borrow_mut().id = id.to_string();
    }

    /// Returns the class list joined by single spaces.
    pub fn class_name(&self) -> String {
        self.0.borrow().classes.join(" ")
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    /// Replaces the class list with the whitespace-separated tokens of `value`.
    pub fn set_class_name(&self, value: &str) {
        let mut node = self.0.borrow_mut();
        node.classes.clear();
        for token in value.split_whitespace() {
            if !node.classes.iter().any(|c| c == token) {
                node.classes.push(token.to_string());
            }
        }
    }

    pub fn property(&self, name: &str) -> Option<String> {
        self.0.borrow().properties.get(name).cloned()
    }

    pub fn set_property(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .properties
            .insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn remove_attribute(&self, name: &str) {
        self.0.borrow_mut().attributes.remove(name);
    }

    /// Returns an inline style value, or an empty string when unset.
    pub fn style(&self, property: &str) -> String {
        self.0
            .borrow()
            .style
            .get(property)
            .cloned()
            .unwrap_or_default()
    }

    /// Sets an inline style value. An empty value clears the property.
    pub fn set_style(&self, property: &str, value: &str) {
        let mut node = self.0.borrow_mut();
        if value.is_empty() {
            node.style.remove(property);
        } else {
            node.style.insert(property.to_string(), value.to_string());
        }
    }

    pub fn offset_width(&self) -> f64 {
        self.0.borrow().offset_width
    }

    pub fn offset_height(&self) -> f64 {
        self.0.borrow().offset_height
    }

    /// Records the rendered size reported by the host's layout.
    pub fn set_offset_size(&self, width: f64, height: f64) {
        let mut node = self.0.borrow_mut();
        node.offset_width = width;
        node.offset_height = height;
    }

    pub fn bounding_rect(&self) -> Option<Rect> {
        self.0.borrow().rect
    }

    /// Records the viewport-relative box reported by the host's layout.
    pub fn set_bounding_rect(&self, rect: Rect) {
        self.0.borrow_mut().rect = Some(rect);
    }

    pub fn parent(&self) -> Option<Element> {
        self.0.borrow().parent.upgrade().map(Element)
    }

    /// Returns all child nodes, text nodes included.
    pub fn child_nodes(&self) -> Vec<Element> {
        self.0.borrow().children.clone()
    }

    /// Returns element children only, skipping text nodes.
    pub fn element_children(&self) -> Vec<Element> {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|child| !child.is_text())
            .cloned()
            .collect()
    }

    pub fn first_child(&self) -> Option<Element> {
        self.0.borrow().children.first().cloned()
    }

    pub fn has_child(&self, child: &Element) -> bool {
        self.0.borrow().children.iter().any(|c| c == child)
    }

    /// Returns true if `other` is this element or one of its descendants.
    pub fn contains(&self, other: &Element) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if &node == self {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Appends `child`, detaching it from any previous parent first.
    pub fn append_child(&self, child: &Element) {
        self.insert_before(child, None);
    }

    /// Inserts `child` before `reference`, or appends when `reference` is
    /// `None` or not a child of this element.
    pub fn insert_before(&self, child: &Element, reference: Option<&Element>) {
        if child.contains(self) {
            return;
        }
        child.remove();
        let mut node = self.0.borrow_mut();
        let position = reference.and_then(|r| node.children.iter().position(|c| c == r));
        match position {
            Some(index) => node.children.insert(index, child.clone()),
            None => node.children.push(child.clone()),
        }
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
    }

    /// Removes `child` if it is a direct child. Returns whether it was removed.
    pub fn remove_child(&self, child: &Element) -> bool {
        let removed = {
            let mut node = self.0.borrow_mut();
            match node.children.iter().position(|c| c == child) {
                Some(index) => {
                    node.children.remove(index);
                    true
                }
                None => false,
            }
        };
        if removed {
            child.0.borrow_mut().parent = Weak::new();
        }
        removed
    }

    /// Detaches this element from its parent, if any.
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent.remove_child(self);
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let node = self.0.borrow();
        match &node.kind {
            NodeKind::Text(text) => text.clone(),
            NodeKind::Element { .. } => node
                .children
                .iter()
                .map(Element::text_content)
                .collect::<String>(),
        }
    }

    pub(crate) fn with_data<R>(&self, f: impl FnOnce(&mut Option<ElementData>) -> R) -> R {
        f(&mut self.0.borrow_mut().data)
    }
}

/// Creates an element.
///
/// `properties` are applied as element properties: `className` fills the
/// class list, `id` sets the id and `textContent` appends a text node.
/// `aria-*`, `role` and `type` passed as properties are applied as
/// attributes; callers should pass them in `attributes` instead.
#[must_use]
pub fn create_element(tag: &str, properties: &[(&str, &str)], attributes: &[(&str, &str)]) -> Element {
    let el = Element::new(if tag.is_empty() { "div" } else { tag });
    for (name, value) in properties {
        match *name {
            "className" => el.set_class_name(value),
            "id" => el.set_id(value),
            "textContent" => set_text_content(&el, value),
            name if is_attribute_like(name) => el.set_attribute(name, value),
            name => el.set_property(name, value),
        }
    }
    for (name, value) in attributes {
        el.set_attribute(name, value);
    }
    el
}

/// Property names that belong in the attribute argument of [`create_element`].
pub fn is_attribute_like(name: &str) -> bool {
    name.starts_with("aria-") || name == "role" || name == "type"
}

/// Replaces the children of `el` with a single text node.
pub fn set_text_content(el: &Element, text: &str) {
    empty(el);
    if !text.is_empty() {
        el.append_child(&Element::text(text));
    }
}

/// Inserts `child` as the first child of `parent`.
pub fn insert_first(child: &Element, parent: &Element) {
    let first = parent.first_child();
    parent.insert_before(child, first.as_ref());
}

/// Removes every child node of `el`.
pub fn empty(el: &Element) -> &Element {
    for child in el.child_nodes() {
        el.remove_child(&child);
    }
    el
}

fn check_class_token(class: &str) -> Result<()> {
    if class.chars().any(char::is_whitespace) {
        return Err(Error::InvalidClassName(class.to_string()));
    }
    Ok(())
}

pub fn has_class(el: &Element, class: &str) -> bool {
    el.0.borrow().classes.iter().any(|c| c == class)
}

pub fn add_class(el: &Element, class: &str) -> Result<()> {
    check_class_token(class)?;
    insert_class(el, class);
    Ok(())
}

pub fn remove_class(el: &Element, class: &str) -> Result<()> {
    check_class_token(class)?;
    drop_class(el, class);
    Ok(())
}

/// [`add_class`] for tokens known to be free of whitespace.
pub(crate) fn insert_class(el: &Element, class: &str) {
    if !has_class(el, class) {
        el.0.borrow_mut().classes.push(class.to_string());
    }
}

/// [`remove_class`] for tokens known to be free of whitespace.
pub(crate) fn drop_class(el: &Element, class: &str) {
    el.0.borrow_mut().classes.retain(|c| c != class);
}

/// Adds or removes `class`. Without a predicate the class is flipped.
pub fn toggle_class(el: &Element, class: &str, predicate: Option<bool>) -> Result<()> {
    check_class_token(class)?;
    let has = has_class(el, class);
    let wanted = predicate.unwrap_or(!has);
    if wanted == has {
        return Ok(());
    }
    if wanted {
        add_class(el, class)
    } else {
        remove_class(el, class)
    }
}

/// Value accepted by [`set_attributes`] and returned by [`get_attributes`].
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Flag(value)
    }
}

/// Applies attributes. `None` and `Flag(false)` remove the attribute,
/// `Flag(true)` sets it to the empty string.
pub fn set_attributes<'a, I>(el: &Element, attributes: I)
where
    I: IntoIterator<Item = (&'a str, Option<AttributeValue>)>,
{
    for (name, value) in attributes {
        match value {
            None | Some(AttributeValue::Flag(false)) => el.remove_attribute(name),
            Some(AttributeValue::Flag(true)) => el.set_attribute(name, ""),
            Some(AttributeValue::Text(text)) => el.set_attribute(name, &text),
        }
    }
}

/// Reads all attributes, reporting known boolean attributes as flags.
pub fn get_attributes(el: &Element) -> BTreeMap<String, AttributeValue> {
    el.0.borrow()
        .attributes
        .iter()
        .map(|(name, value)| {
            let value = if KNOWN_BOOLEAN_ATTRIBUTES.contains(&name.as_str()) {
                AttributeValue::Flag(true)
            } else {
                AttributeValue::Text(value.clone())
            };
            (name.clone(), value)
        })
        .collect()
}
