// SPDX-License-Identifier: MPL-2.0
//! Event record passed to listeners.

use std::cell::Cell;

use serde_json::Value;

use crate::dom::Element;

/// A single contact point of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Touch {
    pub page_x: f64,
    pub page_y: f64,
}

impl Touch {
    #[must_use]
    pub fn new(page_x: f64, page_y: f64) -> Self {
        Self { page_x, page_y }
    }
}

/// Normalized event record.
///
/// Events built from a bare type string do not bubble; use
/// [`Event::bubbling`] for events that should reach ancestor elements.
#[derive(Debug, Clone)]
pub struct Event {
    kind: String,
    bubbles: bool,
    detail: Option<Value>,
    target: Option<Element>,
    page_x: f64,
    page_y: f64,
    touches: Vec<Touch>,
    changed_touches: Vec<Touch>,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
    immediate_propagation_stopped: Cell<bool>,
}

impl Event {
    #[must_use]
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            bubbles: false,
            detail: None,
            target: None,
            page_x: 0.0,
            page_y: 0.0,
            touches: Vec::new(),
            changed_touches: Vec::new(),
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
            immediate_propagation_stopped: Cell::new(false),
        }
    }

    /// Builds a touch event with the given active contacts.
    #[must_use]
    pub fn touch(kind: &str, touches: Vec<Touch>) -> Self {
        Self::new(kind).with_touches(touches)
    }

    #[must_use]
    pub fn bubbling(mut self) -> Self {
        self.bubbles = true;
        self
    }

    #[must_use]
    pub fn with_bubbles(mut self, bubbles: bool) -> Self {
        self.bubbles = bubbles;
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    #[must_use]
    pub fn with_page(mut self, page_x: f64, page_y: f64) -> Self {
        self.page_x = page_x;
        self.page_y = page_y;
        self
    }

    #[must_use]
    pub fn with_touches(mut self, touches: Vec<Touch>) -> Self {
        self.touches = touches;
        self
    }

    #[must_use]
    pub fn with_changed_touches(mut self, touches: Vec<Touch>) -> Self {
        self.changed_touches = touches;
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn bubbles(&self) -> bool {
        self.bubbles
    }

    pub fn detail(&self) -> Option<&Value> {
        self.detail.as_ref()
    }

    pub(crate) fn set_detail(&mut self, detail: Option<Value>) {
        self.detail = detail;
    }

    /// Element the event was first dispatched on.
    pub fn target(&self) -> Option<&Element> {
        self.target.as_ref()
    }

    pub(crate) fn set_target(&mut self, target: Element) {
        self.target = Some(target);
    }

    pub fn page_x(&self) -> f64 {
        self.page_x
    }

    pub fn page_y(&self) -> f64 {
        self.page_y
    }

    pub fn touches(&self) -> &[Touch] {
        &self.touches
    }

    pub fn changed_touches(&self) -> &[Touch] {
        &self.changed_touches
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub fn stop_immediate_propagation(&self) {
        self.immediate_propagation_stopped.set(true);
        self.stop_propagation();
    }

    pub fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped.get()
    }
}

impl From<&str> for Event {
    fn from(kind: &str) -> Self {
        Event::new(kind)
    }
}

impl From<String> for Event {
    fn from(kind: String) -> Self {
        Event::new(&kind)
    }
}
