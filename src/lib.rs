// SPDX-License-Identifier: MPL-2.0
//! `koment` is a component tree for building overlay widgets on top of a
//! video player host.
//!
//! A [`component::Component`] owns an element, a list of child components and
//! the event bindings it made, and tears all of it down on disposal. Children
//! are declared in options and resolved by name through the
//! [`registry`]. Deferred work (ready callbacks, timers) runs on an explicit
//! [`scheduler::Scheduler`] owned by the [`host::Host`].

#![doc(html_root_url = "https://docs.rs/koment/0.3.0")]

pub mod component;
pub mod config;
pub mod diagnostics;
pub mod dom;
pub mod error;
pub mod events;
pub mod guid;
pub mod host;
pub mod i18n;
pub mod options;
pub mod registry;
pub mod scheduler;

pub use component::{Component, ComponentClass};
pub use error::{Error, Result};
pub use host::Host;
