// SPDX-License-Identifier: MPL-2.0
//! Ready lifecycle and disposal-scoped timers.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use crate::config::READY_FLUSH_DELAY_MS;
use crate::diagnostics::LifecyclePhase;
use crate::error::Result;
use crate::events::{self, Listener, ListenerId};
use crate::scheduler::TimerId;

use super::Component;

impl Component {
    pub fn is_ready(&self) -> bool {
        self.0.is_ready.get()
    }

    /// Runs `f` once the component is ready.
    ///
    /// Before [`Component::trigger_ready`], `f` is queued. Afterwards it runs
    /// right away if `sync` is set, otherwise on the next scheduler tick.
    pub fn ready(&self, f: impl FnOnce(&Component) + 'static, sync: bool) {
        if self.is_disposed() {
            return;
        }
        if !self.is_ready() {
            self.0.ready_queue.borrow_mut().push(Box::new(f));
        } else if sync {
            f(self);
        } else if let Err(err) = self.set_timeout(f, Duration::ZERO) {
            self.diagnostics().log_error_simple(err.to_string());
        }
    }

    /// Marks the component ready and, on the next tick, flushes the queued
    /// callbacks in order and then fires `ready`.
    ///
    /// The queue is swapped out before the flush; callbacks registered while
    /// it runs never join it.
    ///
    /// Does nothing once the component is disposed.
    pub fn trigger_ready(&self) {
        if self.is_disposed() {
            return;
        }
        self.0.is_ready.set(true);
        let scheduled = self.set_timeout(
            |component| {
                let queue = std::mem::take(&mut *component.0.ready_queue.borrow_mut());
                for f in queue {
                    f(component);
                }
                component.trigger("ready", None);
                component
                    .diagnostics()
                    .log_lifecycle(component.id(), LifecyclePhase::Ready);
            },
            Duration::from_millis(READY_FLUSH_DELAY_MS),
        );
        if let Err(err) = scheduled {
            self.diagnostics().log_error_simple(err.to_string());
        }
    }

    /// Runs `f` after `delay` unless the component is disposed first.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::Disposed`] after disposal.
    pub fn set_timeout(
        &self,
        f: impl FnOnce(&Component) + 'static,
        delay: Duration,
    ) -> Result<TimerId> {
        self.ensure_live()?;

        let component = self.downgrade();
        let slot: Rc<Cell<Option<TimerId>>> = Rc::default();
        let fired = slot.clone();
        let timer = self.scheduler().set_timeout(
            move || {
                let Some(component) = component.upgrade().filter(|c| !c.is_disposed()) else {
                    return;
                };
                if let Some(timer) = fired.get() {
                    component.off("dispose", Some(ListenerId::Timeout(timer)));
                }
                f(&component);
            },
            delay,
        );
        slot.set(Some(timer));

        let scheduler = self.scheduler().clone();
        if let Some(el) = self.el() {
            events::on(
                &el,
                "dispose",
                Listener::with_id(ListenerId::Timeout(timer), move |_| {
                    scheduler.clear(timer);
                }),
            );
        }
        Ok(timer)
    }

    /// Cancels a timeout and its disposal cleanup.
    pub fn clear_timeout(&self, timer: TimerId) {
        self.scheduler().clear(timer);
        self.off("dispose", Some(ListenerId::Timeout(timer)));
    }

    /// Runs `f` every `every` until cleared or the component is disposed.
    ///
    /// # Errors
    ///
    /// [`crate::error::Error::Disposed`] after disposal.
    pub fn set_interval(&self, f: impl Fn(&Component) + 'static, every: Duration) -> Result<TimerId> {
        self.ensure_live()?;

        let component = self.downgrade();
        let timer = self.scheduler().set_interval(
            move || {
                if let Some(component) = component.upgrade().filter(|c| !c.is_disposed()) {
                    f(&component);
                }
            },
            every,
        );

        let scheduler = self.scheduler().clone();
        if let Some(el) = self.el() {
            events::on(
                &el,
                "dispose",
                Listener::with_id(ListenerId::Interval(timer), move |_| {
                    scheduler.clear(timer);
                }),
            );
        }
        Ok(timer)
    }

    /// Stops an interval and drops its disposal cleanup.
    pub fn clear_interval(&self, timer: TimerId) {
        self.scheduler().clear(timer);
        self.off("dispose", Some(ListenerId::Interval(timer)));
    }
}
