// SPDX-License-Identifier: MPL-2.0
//! Diagnostic event types.
//!
//! Events are produced by the component tree and its host: deprecation and
//! configuration warnings, failed child lookups, lifecycle transitions, and
//! forwarded user activity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categories of warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningType {
    /// A legacy option shape or accessor was used.
    Deprecation,
    /// An option value was ignored or corrected.
    Configuration,
    Other,
}

/// Categories of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// A named child resolved to an unregistered class.
    ComponentLookup,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningEvent {
    pub warning_type: WarningType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl WarningEvent {
    #[must_use]
    pub fn new(warning_type: WarningType, message: impl Into<String>) -> Self {
        Self {
            warning_type,
            message: message.into(),
            component_id: None,
        }
    }

    #[must_use]
    pub fn with_component(mut self, id: impl Into<String>) -> Self {
        self.component_id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEvent {
    pub error_type: ErrorType,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<String>,
}

impl ErrorEvent {
    #[must_use]
    pub fn new(error_type: ErrorType, message: impl Into<String>) -> Self {
        Self {
            error_type,
            message: message.into(),
            component_id: None,
        }
    }

    #[must_use]
    pub fn with_component(mut self, id: impl Into<String>) -> Self {
        self.component_id = Some(id.into());
        self
    }
}

/// Lifecycle transitions of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    Created,
    Ready,
    Disposed,
}

/// A diagnostic event with timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticEvent {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: DiagnosticEventKind,
}

impl DiagnosticEvent {
    /// Creates a new diagnostic event stamped with the current time.
    #[must_use]
    pub fn new(kind: DiagnosticEventKind) -> Self {
        Self::with_timestamp(kind, Utc::now())
    }

    #[must_use]
    pub fn with_timestamp(kind: DiagnosticEventKind, timestamp: DateTime<Utc>) -> Self {
        Self { timestamp, kind }
    }
}

/// The type and associated data for a diagnostic event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEventKind {
    Warning {
        event: WarningEvent,
    },
    Error {
        event: ErrorEvent,
    },
    Lifecycle {
        component_id: String,
        phase: LifecyclePhase,
    },
    /// User activity forwarded to the host.
    UserActivity {
        source: String,
    },
}
