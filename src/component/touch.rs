// SPDX-License-Identifier: MPL-2.0
//! Tap synthesis and touch activity reporting.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use crate::config::{TAP_MOVEMENT_THRESHOLD, TAP_TIME_THRESHOLD_MS, TOUCH_ACTIVITY_INTERVAL_MS};
use crate::events::{Event, Touch};
use crate::scheduler::TimerId;

use super::Component;

#[derive(Debug, Default)]
struct TapState {
    started_at: u64,
    first_touch: Option<Touch>,
    could_be_tap: bool,
}

impl Component {
    /// Emits `tap` for short, still, single-finger touches.
    ///
    /// A touch stops being a tap if a second finger lands, if it travels
    /// further than the movement threshold, if it is cancelled or leaves the
    /// element, or if it lasts longer than the time threshold. A tap prevents
    /// the default action of its `touchend`.
    pub fn emit_tap_events(&self) {
        let state = Rc::new(RefCell::new(TapState::default()));

        let start = state.clone();
        self.on("touchstart", move |component, event| {
            let mut state = start.borrow_mut();
            if let [touch] = event.touches() {
                state.first_touch = Some(*touch);
                state.started_at = component.scheduler().now();
                state.could_be_tap = true;
            } else {
                state.could_be_tap = false;
            }
        });

        let moved = state.clone();
        self.on("touchmove", move |_, event| {
            let mut state = moved.borrow_mut();
            if event.touches().len() > 1 {
                state.could_be_tap = false;
            } else if let (Some(first), Some(touch)) = (state.first_touch, event.touches().first()) {
                let distance = (touch.page_x - first.page_x).hypot(touch.page_y - first.page_y);
                if distance > TAP_MOVEMENT_THRESHOLD {
                    state.could_be_tap = false;
                }
            }
        });

        let cancelled = state.clone();
        self.on(["touchleave", "touchcancel"], move |_, _| {
            cancelled.borrow_mut().could_be_tap = false;
        });

        self.on("touchend", move |component, event: &Event| {
            let is_tap = {
                let mut state = state.borrow_mut();
                state.first_touch = None;
                state.could_be_tap
                    && component.scheduler().now().saturating_sub(state.started_at)
                        < TAP_TIME_THRESHOLD_MS
            };
            if is_tap {
                event.prevent_default();
                component.trigger("tap", None);
            }
        });
    }

    /// Forwards touches to the host as user activity.
    ///
    /// A held touch keeps reporting on an interval until it ends. Does
    /// nothing if the host has no activity reporter.
    pub fn enable_touch_activity(&self) {
        if !self.host().is_some_and(|host| host.reports_activity()) {
            return;
        }

        let report = |component: &Component| {
            if let Some(host) = component.host() {
                host.report_user_activity();
            }
        };

        let holding: Rc<Cell<Option<TimerId>>> = Rc::default();

        let start_holding = holding.clone();
        self.on("touchstart", move |component, _| {
            report(component);
            if let Some(timer) = start_holding.take() {
                component.clear_interval(timer);
            }
            let timer = component
                .set_interval(report, Duration::from_millis(TOUCH_ACTIVITY_INTERVAL_MS))
                .ok();
            start_holding.set(timer);
        });

        self.on("touchmove", move |component, _| report(component));

        self.on(["touchend", "touchcancel"], move |component, _| {
            report(component);
            if let Some(timer) = holding.take() {
                component.clear_interval(timer);
            }
        });
    }
}
