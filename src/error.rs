//! Error types for data view operations and persistence codecs.
//!
//! Absence of a value is never an error: typed accessors return `Option`.
//! This module covers the two failure classes that do propagate to callers,
//! invalid operations and delegate deserialization failures, plus the errors
//! raised by the NBT and serde codecs.
//!
//! # Example
//!
//! ```
//! use dataview::{DataContainer, Error};
//!
//! let container = DataContainer::new();
//! match container.remove("") {
//!     Err(Error::EmptyPath(op)) => assert_eq!(op, "remove"),
//!     _ => unreachable!(),
//! }
//! ```

use std::fmt::{self, Display};

/// Boxed error produced by builders and translators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Alias for a `Result` with the error type [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// This type represents all possible errors raised by the crate.
///
/// # Variants
///
/// - [`EmptyPath`](Error::EmptyPath) - A structural operation was given an empty path
/// - [`Deserialize`](Error::Deserialize) - A builder or translator recognized the data but failed
/// - [`InvalidResourceKey`](Error::InvalidResourceKey) - A string is not a valid resource key
/// - the remaining variants are raised by the NBT codec
#[derive(Debug)]
pub enum Error {
    Message(String),

    /// A structurally illegal call, e.g. `remove` with an empty path.
    ///
    /// Carries the name of the rejected operation.
    EmptyPath(&'static str),

    /// A delegate could not construct the requested type.
    ///
    /// `target` is the requested type name, `source` the delegate's own error.
    Deserialize {
        target: &'static str,
        source: BoxError,
    },

    InvalidResourceKey(String),

    /// The value cannot be represented by the target format.
    ///
    /// Opaque objects have no persisted form; the payload names the stored type.
    UnsupportedValue(&'static str),

    /// An I/O error occurred.
    IO(std::io::Error),

    /// The input ended unexpectedly.
    EndOfFile,

    /// Extra bytes remain after the root compound.
    TrailingData(usize),

    /// NBT defines tag types 0-12; anything else is rejected.
    InvalidTagType(u8),

    ListTooLong(usize),

    StringTooLong(usize),

    /// List elements must share a single tag: expected, actual.
    TagMismatch(u8, u8),

    NestingTooDeep(usize),
}

impl Error {
    pub(crate) fn deserialize<T>(source: BoxError) -> Self {
        Error::Deserialize {
            target: std::any::type_name::<T>(),
            source,
        }
    }
}

#[cfg(feature = "serde")]
impl serde::ser::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

#[cfg(feature = "serde")]
impl serde::de::Error for Error {
    fn custom<T: Display>(msg: T) -> Self {
        Error::Message(msg.to_string())
    }
}

impl Display for Error {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Message(message) => formatter.write_str(message),
            Error::EmptyPath(op) => write!(formatter, "{op} requires a non-empty path"),
            Error::Deserialize { target, source } => {
                write!(formatter, "could not deserialize {target}: {source}")
            }
            Error::InvalidResourceKey(key) => write!(formatter, "invalid resource key: {key:?}"),
            Error::UnsupportedValue(type_name) => {
                write!(formatter, "value of type {type_name} cannot be persisted")
            }
            Error::IO(error) => formatter.write_str(&error.to_string()),
            Error::EndOfFile => formatter.write_str("unexpected end of input"),
            Error::TrailingData(remaining_bytes) => write!(
                formatter,
                "trailing data after end of input: {remaining_bytes} bytes remaining"
            ),
            Error::InvalidTagType(tag) => write!(formatter, "invalid NBT tag type: {tag:#04x}"),
            Error::ListTooLong(len) => write!(formatter, "list length too long: {len}"),
            Error::StringTooLong(len) => write!(formatter, "string length too long: {len}"),
            Error::TagMismatch(expected, actual) => write!(
                formatter,
                "tag in list mismatch: expected {expected:#04x}, got {actual:#04x}"
            ),
            Error::NestingTooDeep(depth) => {
                write!(formatter, "nesting exceeds maximum depth of {depth}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::IO(error) => Some(error),
            Error::Deserialize { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}
