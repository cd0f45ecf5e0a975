// SPDX-License-Identifier: MPL-2.0
//! Host context shared by a component tree.
//!
//! The host plays the part of the player: it names the tree, carries the
//! active language and translation tables, owns the scheduler that runs
//! deferred work, and optionally receives user-activity reports. Components
//! only hold a weak reference to it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::component::Component;
use crate::diagnostics::DiagnosticsHandle;
use crate::error::{Error, Result};
use crate::i18n::Translations;
use crate::options::Options;
use crate::registry;
use crate::scheduler::Scheduler;

type ActivityReporter = Rc<dyn Fn()>;

pub struct Host {
    id: String,
    language: RefCell<Option<String>>,
    translations: RefCell<Translations>,
    scheduler: Scheduler,
    diagnostics: DiagnosticsHandle,
    activity: RefCell<Option<ActivityReporter>>,
    root: RefCell<Option<Component>>,
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("id", &self.id)
            .field("language", &self.language.borrow())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl Host {
    /// Creates a host with its own scheduler and no translations.
    pub fn new(id: &str, diagnostics: DiagnosticsHandle) -> Rc<Self> {
        Self::with_scheduler(id, Scheduler::new(), diagnostics)
    }

    pub fn with_scheduler(id: &str, scheduler: Scheduler, diagnostics: DiagnosticsHandle) -> Rc<Self> {
        Rc::new(Self {
            id: id.to_string(),
            language: RefCell::new(None),
            translations: RefCell::new(Translations::default()),
            scheduler,
            diagnostics,
            activity: RefCell::new(None),
            root: RefCell::new(None),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn diagnostics(&self) -> &DiagnosticsHandle {
        &self.diagnostics
    }

    pub fn language(&self) -> Option<String> {
        self.language.borrow().clone()
    }

    pub fn set_language(&self, code: Option<&str>) {
        *self.language.borrow_mut() = code.map(str::to_string);
    }

    pub fn set_translations(&self, translations: Translations) {
        *self.translations.borrow_mut() = translations;
    }

    /// Translates `source` into the current language, falling back to its
    /// primary subtag, then to `source` itself.
    pub fn localize(&self, source: &str) -> String {
        let language = self.language.borrow();
        self.translations
            .borrow()
            .localize(language.as_deref(), source)
    }

    /// Installs the callback that receives user-activity reports.
    pub fn set_activity_reporter(&self, report: impl Fn() + 'static) {
        *self.activity.borrow_mut() = Some(Rc::new(report));
    }

    pub fn reports_activity(&self) -> bool {
        self.activity.borrow().is_some()
    }

    /// Signals user activity. Returns false if no reporter is installed.
    pub fn report_user_activity(&self) -> bool {
        let reporter = self.activity.borrow().clone();
        match reporter {
            Some(report) => {
                self.diagnostics.log_activity("touch");
                report();
                true
            }
            None => false,
        }
    }

    /// Builds the root component from the class registered as `class_name`.
    ///
    /// The root id defaults to the host id, and a copy of `options` is made
    /// available to every descendant as `playerOptions`. A previously mounted
    /// root is disposed first.
    pub fn mount(self: &Rc<Self>, class_name: &str, options: Options) -> Result<Component> {
        let class = registry::get_component(class_name)
            .ok_or_else(|| Error::UnknownComponent(class_name.to_string()))?;

        self.unmount();

        let mut root_options = options.clone();
        root_options
            .entry("id")
            .or_insert_with(|| Value::String(self.id.clone()));
        root_options.insert("playerOptions".to_string(), Value::Object(options));

        let root = Component::builder(self, class)
            .options(root_options)
            .build()?;
        *self.root.borrow_mut() = Some(root.clone());
        Ok(root)
    }

    pub fn root(&self) -> Option<Component> {
        self.root.borrow().clone()
    }

    /// Disposes the mounted root, if any.
    pub fn unmount(&self) {
        let root = self.root.borrow_mut().take();
        if let Some(root) = root {
            root.dispose();
        }
    }
}
