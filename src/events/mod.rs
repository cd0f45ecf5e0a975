// SPDX-License-Identifier: MPL-2.0
//! Event delegation on elements.
//!
//! Listeners are stored in the element's data bag, grouped by event type and
//! kept in registration order. Every registration carries a [`ListenerId`];
//! removing by id removes exactly the registrations sharing that id, which is
//! how a handler and its synthetic cleanup wrappers are removed together.
//!
//! Dispatch is synchronous. It walks a snapshot of the listener list taken
//! when dispatch starts and skips any entry that has been removed in the
//! meantime, so a handler removing a later handler prevents that one from
//! firing.

mod event;

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::dom::{self, Element};
use crate::guid::Guid;
use crate::scheduler::TimerId;

pub use event::{Event, Touch};

/// Identity of a listener registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerId {
    /// An ordinary handler, or a wrapper sharing the handler's identity.
    Handler(Guid),
    /// Cleanup registered for a pending timeout.
    Timeout(TimerId),
    /// Cleanup registered for a running interval.
    Interval(TimerId),
}

impl ListenerId {
    /// Issues a fresh handler id.
    #[must_use]
    pub fn fresh() -> Self {
        ListenerId::Handler(Guid::new())
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerId::Handler(guid) => write!(f, "{}", guid),
            ListenerId::Timeout(timer) => write!(f, "koment-timeout-{}", timer),
            ListenerId::Interval(timer) => write!(f, "koment-interval-{}", timer),
        }
    }
}

/// A registered callback and its identity.
#[derive(Clone)]
pub struct Listener {
    id: ListenerId,
    callback: Rc<dyn Fn(&Event)>,
}

impl Listener {
    /// Wraps a callback under a fresh id.
    pub fn new(callback: impl Fn(&Event) + 'static) -> Self {
        Self::with_id(ListenerId::fresh(), callback)
    }

    /// Wraps a callback under an existing id.
    pub fn with_id(id: ListenerId, callback: impl Fn(&Event) + 'static) -> Self {
        Self {
            id,
            callback: Rc::new(callback),
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    fn same_registration(&self, other: &Listener) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback)
    }

    fn call(&self, event: &Event) {
        (self.callback)(event);
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener").field("id", &self.id).finish()
    }
}

/// One or more event types sharing a callback.
pub trait EventTypes {
    fn into_types(self) -> Vec<String>;
}

impl EventTypes for &str {
    fn into_types(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl EventTypes for String {
    fn into_types(self) -> Vec<String> {
        vec![self]
    }
}

impl EventTypes for &[&str] {
    fn into_types(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

impl<const N: usize> EventTypes for [&str; N] {
    fn into_types(self) -> Vec<String> {
        self.iter().map(|s| (*s).to_string()).collect()
    }
}

impl EventTypes for Vec<String> {
    fn into_types(self) -> Vec<String> {
        self
    }
}

/// Registers `listener` for each of `types` on `el`. Returns its id.
pub fn on(el: &Element, types: impl EventTypes, listener: Listener) -> ListenerId {
    let id = listener.id();
    let mut data = dom::data_for(el);
    for kind in types.into_types() {
        data.handlers.entry(kind).or_default().push(listener.clone());
    }
    id
}

/// Registers `listener` so that it fires at most once per type.
///
/// The registration removes itself before the callback runs, so an event
/// re-triggered from inside the callback does not reach it again.
pub fn one(el: &Element, types: impl EventTypes, listener: Listener) -> ListenerId {
    let id = listener.id();
    for kind in types.into_types() {
        let target = el.downgrade();
        let inner = listener.clone();
        let kind_for_wrapper = kind.clone();
        let wrapper = Listener::with_id(id, move |event| {
            if let Some(el) = target.upgrade() {
                off(&el, kind_for_wrapper.as_str(), Some(id));
            }
            inner.call(event);
        });
        on(el, kind, wrapper);
    }
    id
}

/// Removes registrations from `el`.
///
/// - no types: every registration on the element
/// - types, no id: every registration for those types
/// - types and id: only registrations carrying that id
pub fn off<T: EventTypes>(el: &Element, types: T, id: Option<ListenerId>) {
    let kinds = types.into_types();
    el.with_data(|data| {
        let Some(bag) = data.as_mut() else {
            return;
        };
        for kind in &kinds {
            match id {
                None => {
                    bag.handlers.remove(kind);
                }
                Some(id) => {
                    if let Some(list) = bag.handlers.get_mut(kind) {
                        list.retain(|listener| listener.id() != id);
                        if list.is_empty() {
                            bag.handlers.remove(kind);
                        }
                    }
                }
            }
        }
        if bag.is_empty() {
            data.take();
        }
    });
}

/// Removes every registration on `el` and releases its data bag.
pub fn off_all(el: &Element) {
    el.with_data(|data| {
        data.take();
    });
}

/// Returns the number of registrations for `kind` on `el`.
pub fn listener_count(el: &Element, kind: &str) -> usize {
    el.with_data(|data| {
        data.as_ref()
            .and_then(|bag| bag.handlers.get(kind))
            .map_or(0, Vec::len)
    })
}

fn snapshot(el: &Element, kind: &str) -> Vec<Listener> {
    el.with_data(|data| {
        data.as_ref()
            .and_then(|bag| bag.handlers.get(kind))
            .cloned()
            .unwrap_or_default()
    })
}

fn still_registered(el: &Element, kind: &str, listener: &Listener) -> bool {
    el.with_data(|data| {
        data.as_ref()
            .and_then(|bag| bag.handlers.get(kind))
            .is_some_and(|list| list.iter().any(|l| l.same_registration(listener)))
    })
}

/// Dispatches an event on `el`.
///
/// `detail` is attached to the event record for handlers to read. Bubbling
/// events continue to the parent element unless propagation is stopped.
/// Returns false if a handler prevented the default action.
pub fn trigger(el: &Element, event: impl Into<Event>, detail: Option<Value>) -> bool {
    let mut event = event.into();
    if detail.is_some() {
        event.set_detail(detail);
    }
    if event.target().is_none() {
        event.set_target(el.clone());
    }
    dispatch(el, &event);
    !event.default_prevented()
}

fn dispatch(el: &Element, event: &Event) {
    let kind = event.kind().to_string();
    for listener in snapshot(el, &kind) {
        if event.immediate_propagation_stopped() {
            break;
        }
        if !still_registered(el, &kind, &listener) {
            continue;
        }
        listener.call(event);
    }

    if event.bubbles() && !event.propagation_stopped() {
        if let Some(parent) = el.parent() {
            dispatch(&parent, event);
        }
    }
}
