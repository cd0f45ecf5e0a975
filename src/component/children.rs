// SPDX-License-Identifier: MPL-2.0
//! Child management: attach, detach and option-driven initialization.

use std::collections::HashMap;

use serde_json::Value;

use crate::diagnostics::{ErrorEvent, ErrorType, WarningEvent, WarningType};
use crate::error::{Error, Result};
use crate::options::{self, to_title_case, Options};
use crate::registry;

use super::Component;

/// What [`Component::add_child`] and [`Component::remove_child`] act on.
#[derive(Debug, Clone)]
pub enum ChildSpec {
    /// A child resolved (or looked up) by name.
    Name(String),
    /// An existing component.
    Instance(Component),
}

impl From<&str> for ChildSpec {
    fn from(name: &str) -> Self {
        ChildSpec::Name(name.to_string())
    }
}

impl From<String> for ChildSpec {
    fn from(name: String) -> Self {
        ChildSpec::Name(name)
    }
}

impl From<Component> for ChildSpec {
    fn from(component: Component) -> Self {
        ChildSpec::Instance(component)
    }
}

impl From<&Component> for ChildSpec {
    fn from(component: &Component) -> Self {
        ChildSpec::Instance(component.clone())
    }
}

/// A child declared in options, before the parent-level override applies.
struct Declared {
    name: String,
    opts: Value,
}

impl Component {
    /// Children in order.
    pub fn children(&self) -> Vec<Component> {
        self.0
            .tree
            .borrow()
            .as_ref()
            .map(|tree| tree.children.clone())
            .unwrap_or_default()
    }

    pub fn get_child_by_id(&self, id: &str) -> Option<Component> {
        self.0
            .tree
            .borrow()
            .as_ref()
            .and_then(|tree| tree.child_index.get(id).cloned().flatten())
    }

    pub fn get_child(&self, name: &str) -> Option<Component> {
        self.0
            .tree
            .borrow()
            .as_ref()
            .and_then(|tree| tree.child_name_index.get(name).cloned().flatten())
    }

    /// Child created during initialization under `name`.
    pub fn member(&self, name: &str) -> Option<Component> {
        self.0
            .tree
            .borrow()
            .as_ref()
            .and_then(|tree| tree.members.get(name).cloned())
    }

    /// Converts child options given as a JSON value into a record.
    ///
    /// `null` and `false` give empty options; `true` does too but is
    /// deprecated.
    fn child_options(&self, name: &str, options: Value) -> Options {
        match options {
            Value::Object(map) => map,
            Value::Null | Value::Bool(false) => Options::new(),
            Value::Bool(true) => {
                self.diagnostics().log_deprecation(
                    self.id(),
                    format!(
                        "initializing child {name:?} with `true` is deprecated, use an options record"
                    ),
                );
                Options::new()
            }
            other => {
                self.diagnostics().log_warning(
                    WarningEvent::new(
                        WarningType::Configuration,
                        format!("ignoring non-record options {other} for child {name:?}"),
                    )
                    .with_component(self.id()),
                );
                Options::new()
            }
        }
    }

    /// Attaches a child at `index` (default: the end).
    ///
    /// A name is resolved to a registered class (the title-cased name, or the
    /// `componentClass` option) and instantiated with `options`. Returns
    /// `Ok(None)` if the class is registered but not constructible. An
    /// instance that is already attached, here or elsewhere, is detached
    /// first and re-inserted at `index`.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownComponent`] if no class is registered under the
    /// resolved name, [`Error::DuplicateId`] if another child already has
    /// the same id, [`Error::Disposed`] after disposal.
    pub fn add_child(
        &self,
        child: impl Into<ChildSpec>,
        options: Value,
        index: Option<usize>,
    ) -> Result<Option<Component>> {
        self.ensure_live()?;

        let (component, name) = match child.into() {
            ChildSpec::Name(name) => {
                let mut opts = self.child_options(&name, options);
                let class_name = options::str_option(&opts, "componentClass")
                    .map(str::to_string)
                    .unwrap_or_else(|| to_title_case(&name));
                opts.insert("name".to_string(), Value::String(name.clone()));

                let Some(class) = registry::get_component(&class_name) else {
                    let err = Error::UnknownComponent(class_name);
                    self.diagnostics().log_error(
                        ErrorEvent::new(ErrorType::ComponentLookup, err.to_string())
                            .with_component(self.id()),
                    );
                    return Err(err);
                };
                if !class.is_constructible() {
                    return Ok(None);
                }
                let host = self.host().ok_or_else(|| Error::Disposed(self.id().to_string()))?;
                let component = Component::builder(&host, class).options(opts).build()?;
                if self.get_child_by_id(component.id()).is_some() {
                    let id = component.id().to_string();
                    component.dispose();
                    return Err(Error::DuplicateId(id));
                }
                (component, Some(name))
            }
            ChildSpec::Instance(component) => {
                if self
                    .get_child_by_id(component.id())
                    .is_some_and(|existing| existing != component)
                {
                    return Err(Error::DuplicateId(component.id().to_string()));
                }
                if let Some(previous) = component.parent() {
                    previous.remove_child(&component);
                }
                let name = component.name().map(str::to_string);
                (component, name)
            }
        };

        let el = component.el();
        let position = {
            let mut tree = self.0.tree.borrow_mut();
            let Some(tree) = tree.as_mut() else {
                return Err(Error::Disposed(self.id().to_string()));
            };
            let position = index.unwrap_or(tree.children.len()).min(tree.children.len());
            tree.children.insert(position, component.clone());
            tree.child_index
                .insert(component.id().to_string(), Some(component.clone()));
            if let Some(name) = &name {
                tree.child_name_index
                    .insert(name.clone(), Some(component.clone()));
            }
            position
        };
        component.set_parent(Some(self));

        if let (Some(el), Some(content)) = (el, self.content_el()) {
            let reference = content.element_children().get(position).cloned();
            content.insert_before(&el, reference.as_ref());
        }

        Ok(Some(component))
    }

    /// Detaches a child, by name or instance.
    ///
    /// Silently does nothing if the child is not found or this component is
    /// disposed. The child's element leaves the DOM only if it still sits in
    /// this component's content element.
    pub fn remove_child(&self, child: impl Into<ChildSpec>) {
        let component = match child.into() {
            ChildSpec::Name(name) => match self.get_child(&name) {
                Some(component) => component,
                None => return,
            },
            ChildSpec::Instance(component) => component,
        };

        {
            let mut tree = self.0.tree.borrow_mut();
            let Some(tree) = tree.as_mut() else {
                return;
            };
            let Some(position) = tree.children.iter().rposition(|c| *c == component) else {
                return;
            };
            tree.children.remove(position);
            release(&mut tree.child_index, component.id(), &component);
            if let Some(name) = component.name() {
                release(&mut tree.child_name_index, name, &component);
            }
        }
        if component.parent().as_ref() == Some(self) {
            component.set_parent(None);
        }

        if let (Some(el), Some(content)) = (component.el(), self.content_el()) {
            if el.parent().as_ref() == Some(&content) {
                content.remove_child(&el);
            }
        }
    }

    /// Creates the children declared in the `children` option.
    ///
    /// `children` is either a list of names or `{name, ...options}` records,
    /// or a record of name to options. Top-level options keyed by a child's
    /// name override its declared options; top-level keys naming any other
    /// registered class add that child too. `false` skips a child.
    pub(super) fn init_children(&self) -> Result<()> {
        let parent_options = self.0.options.borrow().clone();
        let Some(children) = parent_options.get("children") else {
            return Ok(());
        };

        let declared: Vec<Declared> = match children {
            Value::Array(entries) => entries
                .iter()
                .filter_map(|entry| match entry {
                    Value::String(name) => Some(Declared {
                        name: name.clone(),
                        opts: parent_options
                            .get(name)
                            .filter(|v| truthy(v))
                            .cloned()
                            .unwrap_or_else(|| Value::Object(Options::new())),
                    }),
                    Value::Object(record) => {
                        let name = options::str_option(record, "name")?.to_string();
                        Some(Declared {
                            name,
                            opts: entry.clone(),
                        })
                    }
                    _ => None,
                })
                .collect(),
            Value::Object(record) => record
                .iter()
                .map(|(name, opts)| Declared {
                    name: name.clone(),
                    opts: if truthy(opts) {
                        opts.clone()
                    } else {
                        parent_options
                            .get(name)
                            .filter(|v| truthy(v))
                            .cloned()
                            .unwrap_or_else(|| Value::Object(Options::new()))
                    },
                })
                .collect(),
            _ => return Ok(()),
        };

        let implicit: Vec<Declared> = parent_options
            .iter()
            .filter(|(key, _)| !declared.iter().any(|d| &d.name == *key))
            .map(|(key, value)| Declared {
                name: key.clone(),
                opts: if truthy(value) {
                    value.clone()
                } else {
                    Value::Object(Options::new())
                },
            })
            .collect();

        let player_options = parent_options.get("playerOptions").cloned();

        for Declared { name, opts } in declared.into_iter().chain(implicit) {
            let class_name = opts
                .get("componentClass")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| to_title_case(&name));
            match registry::get_component(&class_name) {
                Some(class) if !class.is_tech() => {}
                _ => continue,
            }

            let opts = match parent_options.get(&name) {
                Some(value) => value.clone(),
                None => opts,
            };
            let mut opts = match opts {
                Value::Bool(false) => continue,
                other => self.child_options(&name, other),
            };
            if let Some(player_options) = &player_options {
                opts.insert("playerOptions".to_string(), player_options.clone());
            }

            if let Some(child) = self.add_child(name.as_str(), Value::Object(opts), None)? {
                if let Some(tree) = self.0.tree.borrow_mut().as_mut() {
                    tree.members.insert(name, child);
                }
            }
        }
        Ok(())
    }
}

/// Clears `key` only while it still points at `component`; a sibling that
/// took the name over keeps it.
fn release(index: &mut HashMap<String, Option<Component>>, key: &str, component: &Component) {
    if let Some(entry) = index.get_mut(key) {
        if entry.as_ref() == Some(component) {
            *entry = None;
        }
    }
}

/// JavaScript-style truthiness, used where options fall back with `||`.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
