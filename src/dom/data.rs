// SPDX-License-Identifier: MPL-2.0
//! Per-element data bag.
//!
//! Each element owns an optional bag of associated data, created lazily and
//! tagged with a [`Guid`] on first access. The bag currently holds the
//! element's listener registrations.

use std::cell::RefMut;
use std::collections::HashMap;

use super::Element;
use crate::events::Listener;
use crate::guid::Guid;

/// Data associated with one element.
#[derive(Default)]
pub struct ElementData {
    guid: Guid,
    pub(crate) handlers: HashMap<String, Vec<Listener>>,
}

impl ElementData {
    fn new() -> Self {
        Self {
            guid: Guid::new(),
            handlers: HashMap::new(),
        }
    }

    /// Identifier the element was tagged with when the bag was created.
    pub fn guid(&self) -> Guid {
        self.guid
    }

    /// Returns true if no data is stored.
    pub fn is_empty(&self) -> bool {
        self.handlers.values().all(Vec::is_empty)
    }

    /// Event types with at least one registration.
    pub fn event_types(&self) -> Vec<String> {
        let mut types: Vec<_> = self
            .handlers
            .iter()
            .filter(|(_, list)| !list.is_empty())
            .map(|(kind, _)| kind.clone())
            .collect();
        types.sort();
        types
    }
}

impl std::fmt::Debug for ElementData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ElementData")
            .field("guid", &self.guid)
            .field("event_types", &self.event_types())
            .finish()
    }
}

/// Returns the element's data bag, creating and tagging it on first access.
pub fn data_for(el: &Element) -> RefMut<'_, ElementData> {
    RefMut::map(el.0.borrow_mut(), |node| {
        node.data.get_or_insert_with(ElementData::new)
    })
}

/// Returns true if the element has a non-empty data bag.
pub fn has_data(el: &Element) -> bool {
    el.with_data(|data| data.as_ref().is_some_and(|bag| !bag.is_empty()))
}

/// Returns the tag assigned when the bag was created, if it still exists.
pub fn data_tag(el: &Element) -> Option<Guid> {
    el.with_data(|data| data.as_ref().map(ElementData::guid))
}

/// Deletes the data bag and its tag. Missing data is a no-op.
pub fn clear_data(el: &Element) {
    el.with_data(|data| {
        data.take();
    });
}
