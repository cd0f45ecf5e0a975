// SPDX-License-Identifier: MPL-2.0
//! Element and pointer positions.

use super::Element;
use crate::events::Event;

/// Viewport-relative box of an element, as reported by the host's layout.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Page offset of an element, rounded to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub left: i64,
    pub top: i64,
}

/// Pointer location relative to an element, each axis in `0.0..=1.0`.
///
/// `y` grows upwards from the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

/// Returns the element's rounded offset. Detached elements and elements
/// without a layout box report the origin.
pub fn find_position(el: &Element) -> Position {
    let rect = match (el.bounding_rect(), el.parent()) {
        (Some(rect), Some(_)) => rect,
        _ => return Position::default(),
    };
    Position {
        left: rect.left.round() as i64,
        top: rect.top.round() as i64,
    }
}

/// Returns where `event` happened inside `el`, clamped to the element box.
///
/// The first changed touch wins over the event's own page coordinates.
pub fn pointer_position(el: &Element, event: &Event) -> PointerPosition {
    let position = find_position(el);
    let width = el.offset_width();
    let height = el.offset_height();

    let (page_x, page_y) = match event.changed_touches().first() {
        Some(touch) => (touch.page_x, touch.page_y),
        None => (event.page_x(), event.page_y()),
    };

    let ratio = |value: f64, extent: f64| {
        if extent <= 0.0 {
            0.0
        } else {
            (value / extent).clamp(0.0, 1.0)
        }
    };

    PointerPosition {
        x: ratio(page_x - position.left as f64, width),
        y: ratio(position.top as f64 - page_y + height, height),
    }
}
