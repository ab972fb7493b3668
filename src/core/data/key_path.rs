//! Dotted translation key paths and key sets.

use std::{
    borrow::Borrow,
    collections::{BTreeSet, btree_set},
    fmt,
};

/// Separator between the segments of a key path.
pub const KEY_DELIMITER: char = '.';

/// The dot-joined sequence of node names from the root of a message
/// document to a node (e.g., `common.search`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct KeyPath(String);

impl KeyPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Join an optional parent path with a child segment.
    ///
    /// ```
    /// use intlkeys::core::KeyPath;
    ///
    /// assert_eq!(KeyPath::join(None, "common").as_str(), "common");
    /// let parent = KeyPath::new("common");
    /// assert_eq!(KeyPath::join(Some(&parent), "search").as_str(), "common.search");
    /// ```
    pub fn join(parent: Option<&KeyPath>, segment: &str) -> Self {
        match parent {
            Some(parent) => parent.child(segment),
            None => Self(segment.to_string()),
        }
    }

    pub fn child(&self, segment: &str) -> Self {
        Self(format!("{}{}{}", self.0, KEY_DELIMITER, segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(KEY_DELIMITER)
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments().count()
    }

    /// The first segment, i.e. the top-level namespace the key belongs to.
    pub fn namespace(&self) -> &str {
        self.segments().next().unwrap_or_default()
    }

    /// The path relative to its top-level namespace, if it has more than one segment.
    pub fn strip_namespace(&self) -> Option<&str> {
        self.0.split_once(KEY_DELIMITER).map(|(_, rest)| rest)
    }

    /// The first `depth` segments of this path.
    pub fn truncate(&self, depth: usize) -> KeyPath {
        let segments: Vec<&str> = self.segments().take(depth).collect();
        Self(segments.join(&KEY_DELIMITER.to_string()))
    }

    /// True if `self` equals `prefix` or lies underneath it.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.0 == prefix
            || (self.0.starts_with(prefix)
                && self.0[prefix.len()..].starts_with(KEY_DELIMITER))
    }

    /// The remainder of this path below `prefix`, if it lies strictly underneath it.
    pub fn strip_prefix(&self, prefix: &str) -> Option<&str> {
        self.0
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix(KEY_DELIMITER))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for KeyPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self(path.to_string())
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        Self(path)
    }
}

/// Sorted, duplicate-free set of key paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySet(BTreeSet<KeyPath>);

impl KeySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key; returns false if it was already present.
    pub fn insert(&mut self, key: KeyPath) -> bool {
        self.0.insert(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, KeyPath> {
        self.0.iter()
    }

    /// Distinct first segments of all keys.
    pub fn namespaces(&self) -> BTreeSet<&str> {
        self.0.iter().map(KeyPath::namespace).collect()
    }

    /// The keys lying underneath `prefix` (full paths are kept).
    pub fn within(&self, prefix: &str) -> KeySet {
        self.0
            .iter()
            .filter(|key| key.strip_prefix(prefix).is_some())
            .cloned()
            .collect()
    }
}

impl FromIterator<KeyPath> for KeySet {
    fn from_iter<I: IntoIterator<Item = KeyPath>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeySet {
    type Item = &'a KeyPath;
    type IntoIter = btree_set::Iter<'a, KeyPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for KeySet {
    type Item = KeyPath;
    type IntoIter = btree_set::IntoIter<KeyPath>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
