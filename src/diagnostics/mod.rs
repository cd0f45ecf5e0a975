// SPDX-License-Identifier: MPL-2.0
//! Diagnostics side channel.
//!
//! Deprecation signals, failed lookups and lifecycle transitions are sent as
//! [`DiagnosticEvent`]s through a non-blocking [`DiagnosticsHandle`] and kept
//! by a [`DiagnosticsCollector`] in a memory-bounded [`CircularBuffer`].
//!
//! # Architecture
//!
//! - [`CircularBuffer`]: Generic ring buffer with configurable capacity
//! - [`DiagnosticEvent`]: Timestamped event record
//! - [`BufferCapacity`]: Newtype for validated buffer capacity bounds

mod buffer;
mod collector;
mod events;

pub use buffer::{BufferCapacity, CircularBuffer};
pub use collector::{DiagnosticsCollector, DiagnosticsHandle};
pub use events::{
    DiagnosticEvent, DiagnosticEventKind, ErrorEvent, ErrorType, LifecyclePhase, WarningEvent,
    WarningType,
};
