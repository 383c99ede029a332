//! Paths into a data view.

use std::fmt;

/// An immutable, ordered sequence of path segments.
///
/// Queries are written `'.'`-joined by convention: `DataQuery::of("a.b")` has the
/// two segments `a` and `b`. Two queries are equal iff their segments are equal.
///
/// # Example
///
/// ```
/// use dataview::DataQuery;
///
/// let query = DataQuery::of("player.inventory.slot");
/// assert_eq!(query.len(), 3);
/// assert_eq!(query.last().to_string(), "slot");
/// assert_eq!(query.pop(), DataQuery::of("player.inventory"));
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DataQuery {
    parts: Vec<String>,
}

impl DataQuery {
    /// The query with no segments. It addresses the view it is applied to.
    #[inline]
    pub const fn empty() -> Self {
        Self { parts: Vec::new() }
    }

    /// Splits `path` on `'.'`.
    #[inline]
    pub fn of(path: &str) -> Self {
        Self::of_with('.', path)
    }

    /// Splits `path` on `separator`. An empty string yields the empty query.
    pub fn of_with(separator: char, path: &str) -> Self {
        if path.is_empty() {
            return Self::empty();
        }
        Self {
            parts: path.split(separator).map(str::to_owned).collect(),
        }
    }

    /// Builds a query from segments taken verbatim, so a segment may contain `'.'`.
    pub fn from_parts<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    #[inline]
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Appends every segment of `other`.
    pub fn then(&self, other: &DataQuery) -> Self {
        let mut parts = Vec::with_capacity(self.parts.len() + other.parts.len());
        parts.extend_from_slice(&self.parts);
        parts.extend_from_slice(&other.parts);
        Self { parts }
    }

    /// Appends a single segment.
    pub fn then_key(&self, key: impl Into<String>) -> Self {
        let mut parts = self.parts.clone();
        parts.push(key.into());
        Self { parts }
    }

    /// The query without its last segment.
    pub fn pop(&self) -> Self {
        let end = self.parts.len().saturating_sub(1);
        Self {
            parts: self.parts[..end].to_vec(),
        }
    }

    /// The query without its first segment.
    pub fn pop_first(&self) -> Self {
        Self {
            parts: self.parts.iter().skip(1).cloned().collect(),
        }
    }

    /// The last segment, or the empty query.
    pub fn last(&self) -> Self {
        Self {
            parts: self.parts.last().cloned().into_iter().collect(),
        }
    }

    /// The first segment, or the empty query.
    pub fn first(&self) -> Self {
        Self {
            parts: self.parts.first().cloned().into_iter().collect(),
        }
    }

    pub fn as_string(&self, separator: char) -> String {
        let mut out = String::new();
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.push_str(part);
        }
        out
    }
}

impl fmt::Display for DataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_string('.'))
    }
}

impl fmt::Debug for DataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataQuery({:?})", self.parts)
    }
}

impl From<&str> for DataQuery {
    #[inline]
    fn from(path: &str) -> Self {
        Self::of(path)
    }
}

impl From<String> for DataQuery {
    #[inline]
    fn from(path: String) -> Self {
        Self::of(&path)
    }
}

impl From<&[&str]> for DataQuery {
    #[inline]
    fn from(parts: &[&str]) -> Self {
        Self::from_parts(parts.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for DataQuery {
    #[inline]
    fn from(parts: [&str; N]) -> Self {
        Self::from_parts(parts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn of_splits_on_dots() {
        let query = DataQuery::of("a.b.c");
        assert_eq!(query.parts(), &["a", "b", "c"]);
        assert_eq!(query.to_string(), "a.b.c");
    }

    #[test]
    fn empty_string_is_empty_query() {
        assert!(DataQuery::of("").is_empty());
        assert_eq!(DataQuery::of(""), DataQuery::empty());
    }

    #[test]
    fn custom_separator() {
        let query = DataQuery::of_with('/', "minecraft/stone");
        assert_eq!(query.parts(), &["minecraft", "stone"]);
        assert_eq!(query.as_string('/'), "minecraft/stone");
    }

    #[test]
    fn pop_and_last_on_empty() {
        let empty = DataQuery::empty();
        assert!(empty.pop().is_empty());
        assert!(empty.last().is_empty());
        assert!(empty.first().is_empty());
        assert!(empty.pop_first().is_empty());
    }

    #[test]
    fn then_appends() {
        let query = DataQuery::of("a").then(&DataQuery::of("b.c")).then_key("d");
        assert_eq!(query, DataQuery::of("a.b.c.d"));
        assert_eq!(query.first(), DataQuery::of("a"));
        assert_eq!(query.pop_first(), DataQuery::of("b.c.d"));
    }

    #[test]
    fn parts_are_verbatim() {
        let query = DataQuery::from_parts(["a.b", "c"]);
        assert_eq!(query.len(), 2);
        assert_ne!(query, DataQuery::of("a.b.c"));
    }
}
