// SPDX-License-Identifier: MPL-2.0
//! Component classes: the hooks a concrete widget implements.

use std::fmt;

use crate::dom::Element;
use crate::error::Result;
use crate::options::Options;

use super::Component;

/// Behaviour shared by every component of one kind.
///
/// A class is registered once under a name and instantiated for every child
/// declared with that name. The base tree, event and timer machinery lives in
/// [`Component`]; a class only supplies defaults and hooks.
pub trait ComponentClass {
    /// Name the class is registered under.
    fn name(&self) -> &str;

    /// Defaults merged under the options passed at construction.
    fn default_options(&self) -> Options {
        Options::new()
    }

    /// CSS class of the default element.
    fn build_css_class(&self) -> String {
        String::new()
    }

    /// Builds the component's element. Not called when the options carry
    /// `el` or `createEl: false`.
    fn create_el(&self, component: &Component) -> Element {
        component.create_el("div", &[("className", &self.build_css_class())], &[])
    }

    /// Runs once the base construction (element, children, ready callback,
    /// touch activity) is done.
    fn setup(&self, _component: &Component) -> Result<()> {
        Ok(())
    }

    /// Playback technologies are registered as components but never created
    /// as ordinary children.
    fn is_tech(&self) -> bool {
        false
    }

    /// Entries that are registered but cannot be instantiated resolve to no
    /// child instead of an error.
    fn is_constructible(&self) -> bool {
        true
    }
}

impl fmt::Debug for dyn ComponentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentClass({})", self.name())
    }
}

/// Plain component class with a fixed name and CSS class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseComponent {
    name: String,
    css_class: String,
}

impl BaseComponent {
    /// The `Component` class itself.
    #[must_use]
    pub fn new() -> Self {
        Self::named("Component", "")
    }

    #[must_use]
    pub fn named(name: &str, css_class: &str) -> Self {
        Self {
            name: name.to_string(),
            css_class: css_class.to_string(),
        }
    }
}

impl Default for BaseComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentClass for BaseComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn build_css_class(&self) -> String {
        self.css_class.clone()
    }
}
