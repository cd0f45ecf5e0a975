// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// A named child resolved to a class that is not registered.
    UnknownComponent(String),
    /// `current_dimension` was asked for something other than width or height.
    InvalidDimension(String),
    /// A class token contained whitespace.
    InvalidClassName(String),
    /// Another child of the same parent already uses this id.
    DuplicateId(String),
    /// The component with this id has already been disposed.
    Disposed(String),
}

impl Error {
    /// Returns true for errors raised by lookups against the component registry.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Error::UnknownComponent(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::UnknownComponent(name) => write!(f, "Component {} does not exist", name),
            Error::InvalidDimension(axis) => write!(
                f,
                "currentDimension only accepts width or height value, got {}",
                axis
            ),
            Error::InvalidClassName(class) => {
                write!(f, "class has illegal whitespace characters: {:?}", class)
            }
            Error::DuplicateId(id) => write!(f, "Component id {} is already in use", id),
            Error::Disposed(id) => write!(f, "Component {} has been disposed", id),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk full".into());
        assert_eq!(format!("{}", err), "I/O Error: disk full");
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn unknown_component_names_the_class() {
        let err = Error::UnknownComponent("CommentList".into());
        assert_eq!(err.to_string(), "Component CommentList does not exist");
        assert!(err.is_lookup());
    }

    #[test]
    fn disposed_error_is_not_a_lookup_error() {
        let err = Error::Disposed("player_component_3".into());
        assert!(!err.is_lookup());
        assert!(err.to_string().contains("player_component_3"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(msg) if msg.contains("missing")));
    }

    #[test]
    fn toml_error_converts_to_config() {
        let parsed: std::result::Result<toml::Table, _> = toml::from_str("a = = b");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::Config(_)));
    }
}
