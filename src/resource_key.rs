use std::{fmt, str::FromStr};

use crate::{Error, Result};

/// A namespaced identifier such as `minecraft:stone`.
///
/// The namespace may contain `[a-z0-9_.-]`, the value additionally `/`.
/// Neither part may be empty.
///
/// # Example
///
/// ```
/// use dataview::ResourceKey;
///
/// let key = ResourceKey::resolve("sponge:game/scoreboard")?;
/// assert_eq!(key.namespace(), "sponge");
/// assert_eq!(key.value(), "game/scoreboard");
///
/// // A bare value lands in the minecraft namespace.
/// assert_eq!(ResourceKey::resolve("stone")?.to_string(), "minecraft:stone");
/// assert!(ResourceKey::resolve("not a key!").is_err());
/// # Ok::<(), dataview::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceKey {
    namespace: String,
    value: String,
}

impl ResourceKey {
    pub const MINECRAFT_NAMESPACE: &'static str = "minecraft";
    pub const SPONGE_NAMESPACE: &'static str = "sponge";

    /// Builds a key from its two parts, validating both.
    pub fn of(namespace: impl Into<String>, value: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        let value = value.into();
        if !is_valid_namespace(&namespace) || !is_valid_value(&value) {
            return Err(Error::InvalidResourceKey(format!("{namespace}:{value}")));
        }
        Ok(Self { namespace, value })
    }

    #[inline]
    pub fn minecraft(value: impl Into<String>) -> Result<Self> {
        Self::of(Self::MINECRAFT_NAMESPACE, value)
    }

    #[inline]
    pub fn sponge(value: impl Into<String>) -> Result<Self> {
        Self::of(Self::SPONGE_NAMESPACE, value)
    }

    /// Parses `namespace:value`, or a bare `value` in the minecraft namespace.
    pub fn resolve(formatted: &str) -> Result<Self> {
        let key = match formatted.split_once(':') {
            Some((namespace, value)) => Self::of(namespace, value),
            None => Self::minecraft(formatted),
        };
        key.map_err(|_| Error::InvalidResourceKey(formatted.to_owned()))
    }

    /// For keys known to be valid at compile time.
    pub(crate) fn new_unchecked(namespace: &str, value: &str) -> Self {
        debug_assert!(is_valid_namespace(namespace) && is_valid_value(value));
        Self {
            namespace: namespace.to_owned(),
            value: value.to_owned(),
        }
    }

    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.is_empty()
        && namespace
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.'))
}

fn is_valid_value(value: &str) -> bool {
    !value.is_empty()
        && value
            .bytes()
            .all(|b| matches!(b, b'a'..=b'z' | b'0'..=b'9' | b'_' | b'-' | b'.' | b'/'))
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.value)
    }
}

impl fmt::Debug for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ResourceKey({self})")
    }
}

impl FromStr for ResourceKey {
    type Err = Error;

    #[inline]
    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}
