// SPDX-License-Identifier: MPL-2.0
//! Width and height accessors.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

use super::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::Width => "width",
            Axis::Height => "height",
        }
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "width" => Ok(Axis::Width),
            "height" => Ok(Axis::Height),
            other => Err(Error::InvalidDimension(other.to_string())),
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A size to apply to an element.
///
/// Numbers become pixel values; `None` and NaN become `0px`. Strings
/// containing `%` or `px` are applied as given and `"auto"` clears the size.
/// Any other string is taken as a number of pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum DimensionValue {
    Number(f64),
    Css(String),
    Missing,
}

impl DimensionValue {
    fn to_style(&self) -> String {
        match self {
            DimensionValue::Missing => "0px".to_string(),
            DimensionValue::Number(n) if n.is_nan() => "0px".to_string(),
            DimensionValue::Number(n) => format!("{n}px"),
            DimensionValue::Css(s) if s.contains('%') || s.contains("px") => s.clone(),
            DimensionValue::Css(s) if s == "auto" => String::new(),
            DimensionValue::Css(s) => format!("{s}px"),
        }
    }
}

impl From<f64> for DimensionValue {
    fn from(value: f64) -> Self {
        DimensionValue::Number(value)
    }
}

impl From<i32> for DimensionValue {
    fn from(value: i32) -> Self {
        DimensionValue::Number(f64::from(value))
    }
}

impl From<&str> for DimensionValue {
    fn from(value: &str) -> Self {
        DimensionValue::Css(value.to_string())
    }
}

impl From<String> for DimensionValue {
    fn from(value: String) -> Self {
        DimensionValue::Css(value)
    }
}

impl From<Option<f64>> for DimensionValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(DimensionValue::Missing, DimensionValue::Number)
    }
}

/// Computed size of a component.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
}

/// Leading integer of `text`, the way `parseInt` reads it.
fn leading_int(text: &str) -> i64 {
    let text = text.trim_start();
    let end = text
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().unwrap_or(0)
}

/// Leading decimal of `text`, the way `parseFloat` reads it.
fn leading_float(text: &str) -> f64 {
    let text = text.trim_start();
    let mut seen_dot = false;
    let end = text
        .char_indices()
        .find(|&(i, c)| {
            let ok = c.is_ascii_digit()
                || (i == 0 && (c == '-' || c == '+'))
                || (c == '.' && !std::mem::replace(&mut seen_dot, true));
            !ok
        })
        .map_or(text.len(), |(i, _)| i);
    text[..end].parse().unwrap_or(0.0)
}

impl Component {
    /// Sets `axis` on the element's inline style. Fires `resize` unless
    /// `skip_listeners` is set.
    pub fn set_dimension(&self, axis: Axis, value: impl Into<DimensionValue>, skip_listeners: bool) {
        let Some(el) = self.el() else {
            return;
        };
        el.set_style(axis.as_str(), &value.into().to_style());
        if !skip_listeners {
            self.trigger("resize", None);
        }
    }

    /// Size along `axis`: the inline pixel value if there is one, else the
    /// rendered size, truncated. Zero without an element.
    pub fn dimension(&self, axis: Axis) -> i64 {
        let Some(el) = self.el() else {
            return 0;
        };
        let style = el.style(axis.as_str());
        if let Some(px) = style.find("px") {
            return leading_int(&style[..px]);
        }
        let offset = match axis {
            Axis::Width => el.offset_width(),
            Axis::Height => el.offset_height(),
        };
        offset.trunc() as i64
    }

    pub fn width(&self) -> i64 {
        self.dimension(Axis::Width)
    }

    pub fn height(&self) -> i64 {
        self.dimension(Axis::Height)
    }

    pub fn set_width(&self, value: impl Into<DimensionValue>) {
        self.set_dimension(Axis::Width, value, false);
    }

    pub fn set_height(&self, value: impl Into<DimensionValue>) {
        self.set_dimension(Axis::Height, value, false);
    }

    /// Sets both sizes, firing a single `resize`.
    pub fn set_dimensions(&self, width: impl Into<DimensionValue>, height: impl Into<DimensionValue>) {
        self.set_dimension(Axis::Width, width, true);
        self.set_dimension(Axis::Height, height, false);
    }

    /// Computed size along `axis`, which must be `"width"` or `"height"`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimension`] for any other axis name.
    pub fn current_dimension(&self, axis: &str) -> Result<f64> {
        let axis: Axis = axis.parse()?;
        let Some(el) = self.el() else {
            return Ok(0.0);
        };
        let style = el.style(axis.as_str());
        if style.contains("px") {
            return Ok(leading_float(&style));
        }
        Ok(match axis {
            Axis::Width => el.offset_width(),
            Axis::Height => el.offset_height(),
        })
    }

    pub fn current_dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.current_width(),
            height: self.current_height(),
        }
    }

    pub fn current_width(&self) -> f64 {
        self.current_dimension("width").unwrap_or(0.0)
    }

    pub fn current_height(&self) -> f64 {
        self.current_dimension("height").unwrap_or(0.0)
    }
}
