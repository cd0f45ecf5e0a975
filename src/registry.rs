// SPDX-License-Identifier: MPL-2.0
//! Name-keyed registry of component classes.
//!
//! Children declared by name are resolved here. Registration is
//! last-write-wins; an unregistered name resolves to `None` and the caller
//! decides whether that is an error. The registry is per thread and starts
//! with the base `Component` class.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::component::{BaseComponent, ComponentClass};

#[derive(Default)]
pub struct ComponentRegistry {
    classes: BTreeMap<String, Rc<dyn ComponentClass>>,
}

impl ComponentRegistry {
    fn with_base() -> Self {
        let mut registry = Self::default();
        registry.register("Component", Rc::new(BaseComponent::new()));
        registry
    }

    pub fn register(&mut self, name: &str, class: Rc<dyn ComponentClass>) {
        self.classes.insert(name.to_string(), class);
    }

    pub fn get(&self, name: &str) -> Option<Rc<dyn ComponentClass>> {
        self.classes.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.classes.keys().cloned().collect()
    }
}

thread_local! {
    static REGISTRY: RefCell<ComponentRegistry> = RefCell::new(ComponentRegistry::with_base());
}

/// Registers `class` under `name`, replacing any earlier registration.
pub fn register_component(name: &str, class: Rc<dyn ComponentClass>) -> Rc<dyn ComponentClass> {
    REGISTRY.with(|registry| registry.borrow_mut().register(name, class.clone()));
    class
}

pub fn get_component(name: &str) -> Option<Rc<dyn ComponentClass>> {
    REGISTRY.with(|registry| registry.borrow().get(name))
}

/// Names of every registered class, sorted.
pub fn registered_names() -> Vec<String> {
    REGISTRY.with(|registry| registry.borrow().names())
}
