// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the crate. Constants are organized by category.
//!
//! # Categories
//!
//! - **Touch**: Tap synthesis thresholds and activity reporting cadence
//! - **Lifecycle**: Ready flush delay
//! - **Diagnostics**: Event buffer bounds

// ==========================================================================
// Touch Defaults
// ==========================================================================

/// Maximum finger travel (in pixels) for a touch to still count as a tap.
pub const TAP_MOVEMENT_THRESHOLD: f64 = 10.0;

/// Maximum duration of a touch (in milliseconds) for it to count as a tap.
pub const TAP_TIME_THRESHOLD_MS: u64 = 200;

/// Interval between user-activity reports while a touch is held.
pub const TOUCH_ACTIVITY_INTERVAL_MS: u64 = 250;

// ==========================================================================
// Lifecycle Defaults
// ==========================================================================

/// Delay before queued ready callbacks are flushed. Zero means next tick.
pub const READY_FLUSH_DELAY_MS: u64 = 0;

// ==========================================================================
// Diagnostics Defaults
// ==========================================================================

/// Default number of diagnostic events kept in memory.
pub const DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY: usize = 1000;

/// Minimum diagnostics buffer capacity.
pub const MIN_DIAGNOSTICS_BUFFER_CAPACITY: usize = 100;

/// Maximum diagnostics buffer capacity.
pub const MAX_DIAGNOSTICS_BUFFER_CAPACITY: usize = 10000;

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(TAP_MOVEMENT_THRESHOLD > 0.0);
    assert!(TAP_TIME_THRESHOLD_MS > 0);
    assert!(TOUCH_ACTIVITY_INTERVAL_MS > 0);

    assert!(MIN_DIAGNOSTICS_BUFFER_CAPACITY > 0);
    assert!(MAX_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY >= MIN_DIAGNOSTICS_BUFFER_CAPACITY);
    assert!(DEFAULT_DIAGNOSTICS_BUFFER_CAPACITY <= MAX_DIAGNOSTICS_BUFFER_CAPACITY);
};
