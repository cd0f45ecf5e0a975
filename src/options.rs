// SPDX-License-Identifier: MPL-2.0
//! Component option records and their deep merge.

use serde_json::{Map, Value};

/// Option record of a component.
pub type Options = Map<String, Value>;

/// Merges `overrides` into a copy of `base`.
///
/// Records present on both sides merge recursively. Any other override value
/// replaces the base value outright, including arrays, `false` and `null`.
/// Neither input is modified.
#[must_use]
pub fn merge_options(base: &Options, overrides: &Options) -> Options {
    let mut merged = base.clone();
    for (key, value) in overrides {
        let replacement = match (merged.get(key), value) {
            (Some(Value::Object(left)), Value::Object(right)) => {
                Value::Object(merge_options(left, right))
            }
            _ => value.clone(),
        };
        merged.insert(key.clone(), replacement);
    }
    merged
}

/// Uppercases the first character, used to map child names to class names.
pub fn to_title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Reads `key` as a bool, treating anything else as `default`.
pub fn bool_option(options: &Options, key: &str, default: bool) -> bool {
    options.get(key).and_then(Value::as_bool).unwrap_or(default)
}

pub fn str_option<'a>(options: &'a Options, key: &str) -> Option<&'a str> {
    options.get(key).and_then(Value::as_str)
}

/// Converts a JSON value into a record; non-records give an empty one.
pub fn as_options(value: &Value) -> Options {
    value.as_object().cloned().unwrap_or_default()
}
