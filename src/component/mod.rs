// SPDX-License-Identifier: MPL-2.0
//! The component tree.
//!
//! A [`Component`] owns one element, an ordered list of child components and
//! two lookup indices over them (by id and by name). It wires events with
//! cleanup tied to its own disposal, runs a deferred ready lifecycle and
//! schedules timers that are cancelled when it is disposed.
//!
//! Components are cheap handles: cloning shares the node. Parents own their
//! children; children and listeners only hold weak references back.
//!
//! # Disposal
//!
//! [`Component::dispose`] is idempotent. After it, operations that would
//! create new state ([`Component::add_child`], timers) fail with
//! [`Error::Disposed`]; everything else is a no-op or reports an empty value.

mod children;
mod class;
mod dimension;
mod lifecycle;
mod listeners;
mod touch;

#[cfg(test)]
mod tests;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde_json::Value;

use crate::diagnostics::{DiagnosticsHandle, LifecyclePhase};
use crate::dom::{self, Element};
use crate::error::{Error, Result};
use crate::events;
use crate::guid::Guid;
use crate::host::Host;
use crate::options::{self, merge_options, Options};
use crate::scheduler::Scheduler;

pub use children::ChildSpec;
pub use class::{BaseComponent, ComponentClass};
pub use dimension::{Axis, DimensionValue, Dimensions};
pub use listeners::EventTarget;

/// Class toggled by [`Component::show`] and [`Component::hide`].
pub const HIDDEN_CLASS: &str = "koment-hidden";
/// Class toggled by [`Component::lock_showing`].
pub const LOCK_SHOWING_CLASS: &str = "koment-lock-showing";

type ReadyCallback = Box<dyn FnOnce(&Component)>;

/// Child list and lookup indices. `None` in [`ComponentInner::tree`] marks a
/// disposed component.
#[derive(Default)]
struct Tree {
    el: Option<Element>,
    content_el: Option<Element>,
    children: Vec<Component>,
    child_index: HashMap<String, Option<Component>>,
    child_name_index: HashMap<String, Option<Component>>,
    members: HashMap<String, Component>,
}

struct ComponentInner {
    id: String,
    name: Option<String>,
    class: Rc<dyn ComponentClass>,
    host: Weak<Host>,
    scheduler: Scheduler,
    diagnostics: DiagnosticsHandle,
    options: RefCell<Options>,
    tree: RefCell<Option<Tree>>,
    parent: RefCell<Option<WeakComponent>>,
    is_ready: Cell<bool>,
    ready_queue: RefCell<Vec<ReadyCallback>>,
    disposing: Cell<bool>,
}

/// Handle to a node of the component tree.
#[derive(Clone)]
pub struct Component(Rc<ComponentInner>);

/// Non-owning handle, used by listeners and children.
#[derive(Clone)]
pub struct WeakComponent(Weak<ComponentInner>);

impl WeakComponent {
    pub fn upgrade(&self) -> Option<Component> {
        self.0.upgrade().map(Component)
    }
}

impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Component {}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Component")
            .field("id", &self.0.id)
            .field("name", &self.0.name)
            .field("class", &self.0.class.name())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Builds a [`Component`].
///
/// ```
/// use std::rc::Rc;
/// use koment::component::{BaseComponent, Component};
/// use koment::diagnostics::DiagnosticsHandle;
/// use koment::host::Host;
///
/// let host = Host::new("player", DiagnosticsHandle::disconnected());
/// let component = Component::builder(&host, Rc::new(BaseComponent::new()))
///     .build()
///     .unwrap();
/// assert!(component.id().starts_with("player_component_"));
/// ```
pub struct ComponentBuilder {
    host: Rc<Host>,
    class: Rc<dyn ComponentClass>,
    options: Options,
    el: Option<Element>,
    ready: Option<ReadyCallback>,
}

impl ComponentBuilder {
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Uses `el` verbatim instead of creating an element.
    #[must_use]
    pub fn element(mut self, el: Element) -> Self {
        self.el = Some(el);
        self
    }

    #[must_use]
    pub fn on_ready(mut self, f: impl FnOnce(&Component) + 'static) -> Self {
        self.ready = Some(Box::new(f));
        self
    }

    pub fn build(self) -> Result<Component> {
        let ComponentBuilder {
            host,
            class,
            options,
            el,
            ready,
        } = self;

        let options = merge_options(&class.default_options(), &options);

        let id = options::str_option(&options, "id")
            .map(str::to_string)
            .or_else(|| el.as_ref().map(Element::id).filter(|id| !id.is_empty()))
            .unwrap_or_else(|| format!("{}_component_{}", host.id(), Guid::new()));
        let name = options::str_option(&options, "name").map(str::to_string);
        let create_el = options::bool_option(&options, "createEl", true);
        let init_children = options::bool_option(&options, "initChildren", true);
        let touch_activity = options::bool_option(&options, "reportTouchActivity", true);

        let component = Component(Rc::new(ComponentInner {
            id,
            name,
            class: class.clone(),
            host: Rc::downgrade(&host),
            scheduler: host.scheduler().clone(),
            diagnostics: host.diagnostics().clone(),
            options: RefCell::new(options),
            tree: RefCell::new(Some(Tree {
                el: el.clone(),
                ..Tree::default()
            })),
            parent: RefCell::new(None),
            is_ready: Cell::new(false),
            ready_queue: RefCell::new(Vec::new()),
            disposing: Cell::new(false),
        }));

        if el.is_none() && create_el {
            let created = class.create_el(&component);
            if let Some(tree) = component.0.tree.borrow_mut().as_mut() {
                tree.el = Some(created);
            }
        }

        if init_children {
            component.init_children()?;
        }

        if let Some(f) = ready {
            component.ready(f, false);
        }

        if touch_activity {
            component.enable_touch_activity();
        }

        class.setup(&component)?;

        component
            .0
            .diagnostics
            .log_lifecycle(&component.0.id, LifecyclePhase::Created);
        Ok(component)
    }
}

impl Component {
    pub fn builder(host: &Rc<Host>, class: Rc<dyn ComponentClass>) -> ComponentBuilder {
        ComponentBuilder {
            host: host.clone(),
            class,
            options: Options::new(),
            el: None,
            ready: None,
        }
    }

    pub fn downgrade(&self) -> WeakComponent {
        WeakComponent(Rc::downgrade(&self.0))
    }

    pub fn id(&self) -> &str {
        &self.0.id
    }

    pub fn name(&self) -> Option<&str> {
        self.0.name.as_deref()
    }

    /// Name of the class this component was built from.
    pub fn class_name(&self) -> &str {
        self.0.class.name()
    }

    pub fn build_css_class(&self) -> String {
        self.0.class.build_css_class()
    }

    /// The host, while it is alive.
    pub fn host(&self) -> Option<Rc<Host>> {
        self.0.host.upgrade()
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.0.scheduler
    }

    pub(crate) fn diagnostics(&self) -> &DiagnosticsHandle {
        &self.0.diagnostics
    }

    pub fn is_disposed(&self) -> bool {
        self.0.tree.borrow().is_none()
    }

    fn ensure_live(&self) -> Result<()> {
        if self.is_disposed() {
            Err(Error::Disposed(self.0.id.clone()))
        } else {
            Ok(())
        }
    }

    pub fn el(&self) -> Option<Element> {
        self.0.tree.borrow().as_ref().and_then(|tree| tree.el.clone())
    }

    /// Element children are inserted into. Defaults to [`Component::el`].
    pub fn content_el(&self) -> Option<Element> {
        self.0
            .tree
            .borrow()
            .as_ref()
            .and_then(|tree| tree.content_el.clone().or_else(|| tree.el.clone()))
    }

    pub fn set_content_el(&self, el: Option<Element>) {
        if let Some(tree) = self.0.tree.borrow_mut().as_mut() {
            tree.content_el = el;
        }
    }

    /// The component this one is attached to, if any.
    pub fn parent(&self) -> Option<Component> {
        self.0.parent.borrow().as_ref().and_then(WeakComponent::upgrade)
    }

    pub(crate) fn set_parent(&self, parent: Option<&Component>) {
        *self.0.parent.borrow_mut() = parent.map(Component::downgrade);
    }

    /// Effective value of one option.
    pub fn option(&self, key: &str) -> Option<Value> {
        self.0.options.borrow().get(key).cloned()
    }

    /// Returns the whole option record.
    #[deprecated(note = "read single values with `option` instead")]
    pub fn options(&self) -> Options {
        self.0
            .diagnostics
            .log_deprecation(&self.0.id, "options() is deprecated");
        self.0.options.borrow().clone()
    }

    /// Deep-merges `overrides` into the option record and returns the result.
    #[deprecated(note = "pass options at construction instead")]
    pub fn update_options(&self, overrides: &Options) -> Options {
        self.0
            .diagnostics
            .log_deprecation(&self.0.id, "options(obj) is deprecated");
        let merged = merge_options(&self.0.options.borrow(), overrides);
        *self.0.options.borrow_mut() = merged.clone();
        merged
    }

    /// Creates an element the way [`dom::create_element`] does, flagging
    /// attribute names passed as properties.
    pub fn create_el(
        &self,
        tag: &str,
        properties: &[(&str, &str)],
        attributes: &[(&str, &str)],
    ) -> Element {
        for (name, _) in properties {
            if dom::is_attribute_like(name) {
                self.0.diagnostics.log_deprecation(
                    &self.0.id,
                    format!(
                        "setting attribute {name:?} as a property is deprecated, pass it as an attribute"
                    ),
                );
            }
        }
        dom::create_element(tag, properties, attributes)
    }

    /// Translates `source` using the host's language and translations.
    pub fn localize(&self, source: &str) -> String {
        match self.host() {
            Some(host) => host.localize(source),
            None => source.to_string(),
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.el().is_some_and(|el| dom::has_class(&el, class))
    }

    pub fn add_class(&self, class: &str) -> Result<()> {
        match self.el() {
            Some(el) => dom::add_class(&el, class),
            None => Ok(()),
        }
    }

    pub fn remove_class(&self, class: &str) -> Result<()> {
        match self.el() {
            Some(el) => dom::remove_class(&el, class),
            None => Ok(()),
        }
    }

    pub fn toggle_class(&self, class: &str, predicate: Option<bool>) -> Result<()> {
        match self.el() {
            Some(el) => dom::toggle_class(&el, class, predicate),
            None => Ok(()),
        }
    }

    pub fn show(&self) {
        if let Some(el) = self.el() {
            dom::drop_class(&el, HIDDEN_CLASS);
        }
    }

    pub fn hide(&self) {
        if let Some(el) = self.el() {
            dom::insert_class(&el, HIDDEN_CLASS);
        }
    }

    /// Keeps the component visible regardless of the host's hiding rules.
    pub fn lock_showing(&self) {
        if let Some(el) = self.el() {
            dom::insert_class(&el, LOCK_SHOWING_CLASS);
        }
    }

    pub fn unlock_showing(&self) {
        if let Some(el) = self.el() {
            dom::drop_class(&el, LOCK_SHOWING_CLASS);
        }
    }

    /// Tears the component down.
    ///
    /// Fires a non-bubbling `dispose` event, disposes children last to
    /// first, drops every listener, detaches the element and leaves the
    /// parent's indices. Calling it again does nothing.
    pub fn dispose(&self) {
        if self.is_disposed() || self.0.disposing.replace(true) {
            return;
        }

        self.trigger("dispose", None);

        let (children, members) = match self.0.tree.borrow_mut().as_mut() {
            Some(tree) => {
                tree.child_index.clear();
                tree.child_name_index.clear();
                (
                    std::mem::take(&mut tree.children),
                    std::mem::take(&mut tree.members),
                )
            }
            None => (Vec::new(), HashMap::new()),
        };
        for child in children.iter().rev() {
            child.dispose();
        }
        drop(members);

        let tree = self.0.tree.borrow_mut().take();
        if let Some(el) = tree.and_then(|tree| tree.el) {
            events::off_all(&el);
            el.remove();
            dom::clear_data(&el);
        }
        self.0.ready_queue.borrow_mut().clear();

        self.0
            .diagnostics
            .log_lifecycle(&self.0.id, LifecyclePhase::Disposed);

        let parent = self.parent();
        self.set_parent(None);
        if let Some(parent) = parent {
            parent.remove_child(self);
        }
    }
}
