// SPDX-License-Identifier: MPL-2.0
//! Event wiring with cleanup tied to disposal.
//!
//! Listening on another component or element registers three entries under
//! one [`ListenerId`]: the handler on the target, a `dispose` listener on
//! this component that unbinds the handler, and a `dispose` listener on the
//! target that drops the first cleanup. Whichever side is disposed first,
//! nothing dangles, and [`Component::off_target`] removes all three at once.

use serde_json::Value;

use crate::dom::Element;
use crate::events::{self, Event, EventTypes, Listener, ListenerId};

use super::Component;

/// Something a component can listen on.
pub trait EventTarget {
    /// Element the listeners go on, `None` once it is gone.
    fn event_el(&self) -> Option<Element>;
}

impl EventTarget for Component {
    fn event_el(&self) -> Option<Element> {
        self.el()
    }
}

impl EventTarget for Element {
    fn event_el(&self) -> Option<Element> {
        Some(self.clone())
    }
}

impl Component {
    /// Wraps `handler` so it runs with this component, for as long as the
    /// component is alive.
    fn bound(&self, handler: impl Fn(&Component, &Event) + 'static) -> impl Fn(&Event) + 'static {
        let component = self.downgrade();
        move |event| {
            if let Some(component) = component.upgrade() {
                handler(&component, event);
            }
        }
    }

    /// Listens on this component's own element.
    pub fn on(
        &self,
        types: impl EventTypes,
        handler: impl Fn(&Component, &Event) + 'static,
    ) -> ListenerId {
        let listener = Listener::new(self.bound(handler));
        match self.el() {
            Some(el) => events::on(&el, types, listener),
            None => listener.id(),
        }
    }

    /// Like [`Component::on`], but each type fires at most once.
    pub fn one(
        &self,
        types: impl EventTypes,
        handler: impl Fn(&Component, &Event) + 'static,
    ) -> ListenerId {
        let listener = Listener::new(self.bound(handler));
        match self.el() {
            Some(el) => events::one(&el, types, listener),
            None => listener.id(),
        }
    }

    /// Removes listeners from this component's own element, either all of
    /// `types` or only those registered as `id`.
    pub fn off(&self, types: impl EventTypes, id: Option<ListenerId>) {
        if let Some(el) = self.el() {
            events::off(&el, types, id);
        }
    }

    /// Removes every listener from this component's own element.
    pub fn off_all(&self) {
        if let Some(el) = self.el() {
            events::off_all(&el);
        }
    }

    /// Dispatches an event on this component's element. Returns false if a
    /// handler prevented the default action.
    pub fn trigger(&self, event: impl Into<Event>, detail: Option<Value>) -> bool {
        match self.el() {
            Some(el) => events::trigger(&el, event, detail),
            None => true,
        }
    }

    /// Listens on another component or element. The binding goes away when
    /// either side is disposed.
    pub fn on_target(
        &self,
        target: &dyn EventTarget,
        types: impl EventTypes,
        handler: impl Fn(&Component, &Event) + 'static,
    ) -> ListenerId {
        let listener = Listener::new(self.bound(handler));
        self.bind_target(target, types.into_types(), listener)
    }

    /// Like [`Component::on_target`], but fires at most once. The whole
    /// binding, cleanups included, is removed before the handler runs.
    pub fn one_target(
        &self,
        target: &dyn EventTarget,
        types: impl EventTypes,
        handler: impl Fn(&Component, &Event) + 'static,
    ) -> ListenerId {
        let id = ListenerId::fresh();
        let types = types.into_types();
        let component = self.downgrade();
        let target_el = target.event_el().map(|el| el.downgrade());
        let unbind_types = types.clone();
        let wrapper = Listener::with_id(id, move |event| {
            let Some(component) = component.upgrade() else {
                return;
            };
            if let Some(target_el) = target_el.as_ref().and_then(|el| el.upgrade()) {
                component.unbind_target(&target_el, &unbind_types, id);
            }
            handler(&component, event);
        });
        self.bind_target(target, types, wrapper)
    }

    /// Removes a binding made with [`Component::on_target`] or
    /// [`Component::one_target`], together with both cleanup listeners.
    pub fn off_target(&self, target: &dyn EventTarget, types: impl EventTypes, id: ListenerId) {
        let types = types.into_types();
        match target.event_el() {
            Some(target_el) => self.unbind_target(&target_el, &types, id),
            None => self.off("dispose", Some(id)),
        }
    }

    fn bind_target(
        &self,
        target: &dyn EventTarget,
        types: Vec<String>,
        listener: Listener,
    ) -> ListenerId {
        let id = listener.id();
        let (Some(own_el), Some(target_el)) = (self.el(), target.event_el()) else {
            return id;
        };

        let component = self.downgrade();
        let weak_target = target_el.downgrade();
        let cleanup_types = types.clone();
        events::on(
            &own_el,
            "dispose",
            Listener::with_id(id, move |_| {
                if let (Some(component), Some(target_el)) =
                    (component.upgrade(), weak_target.upgrade())
                {
                    component.unbind_target(&target_el, &cleanup_types, id);
                }
            }),
        );

        events::on(&target_el, types, listener);

        let weak_own = own_el.downgrade();
        events::on(
            &target_el,
            "dispose",
            Listener::with_id(id, move |_| {
                if let Some(own_el) = weak_own.upgrade() {
                    events::off(&own_el, "dispose", Some(id));
                }
            }),
        );
        id
    }

    fn unbind_target(&self, target_el: &Element, types: &[String], id: ListenerId) {
        self.off("dispose", Some(id));
        events::off(target_el, types.to_vec(), Some(id));
        events::off(target_el, "dispose", Some(id));
    }
}
