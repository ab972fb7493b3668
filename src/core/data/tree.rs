//! In-memory message tree of one locale.
//!
//! A message document is a tree whose internal nodes are namespaces and whose
//! leaves are translatable strings. Values of any other JSON type are kept as
//! `Invalid` nodes so they can be diagnosed rather than silently dropped.

use std::collections::{BTreeMap, btree_map};

use super::{KeyPath, KeySet, MessageContext, MessageLocation, ValueType};

/// A translatable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    pub value: String,
    pub location: MessageLocation,
    pub source_line: String,
}

/// A JSON value that is neither a string nor an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidValue {
    pub value_type: ValueType,
    /// The value serialized back to JSON, for display.
    pub raw: String,
    pub location: MessageLocation,
    pub source_line: String,
}

/// A named group of child nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    children: BTreeMap<String, MessageNode>,
    pub location: MessageLocation,
    pub source_line: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageNode {
    Leaf(Leaf),
    Namespace(Namespace),
    Invalid(InvalidValue),
}

impl Leaf {
    pub fn context(&self, key: &str) -> MessageContext {
        MessageContext::new(self.location.clone(), key, self.value.clone())
            .with_source_line(self.source_line.clone())
    }
}

impl MessageNode {
    pub fn value_type(&self) -> ValueType {
        match self {
            MessageNode::Leaf(_) => ValueType::String,
            MessageNode::Namespace(_) => ValueType::Object,
            MessageNode::Invalid(invalid) => invalid.value_type,
        }
    }

    pub fn location(&self) -> &MessageLocation {
        match self {
            MessageNode::Leaf(leaf) => &leaf.location,
            MessageNode::Namespace(ns) => &ns.location,
            MessageNode::Invalid(invalid) => &invalid.location,
        }
    }

    pub fn source_line(&self) -> &str {
        match self {
            MessageNode::Leaf(leaf) => &leaf.source_line,
            MessageNode::Namespace(ns) => &ns.source_line,
            MessageNode::Invalid(invalid) => &invalid.source_line,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            MessageNode::Leaf(leaf) => Some(leaf),
            _ => None,
        }
    }

    pub fn as_namespace(&self) -> Option<&Namespace> {
        match self {
            MessageNode::Namespace(ns) => Some(ns),
            _ => None,
        }
    }

    /// Value shown in diagnostics.
    pub fn display_value(&self) -> String {
        match self {
            MessageNode::Leaf(leaf) => leaf.value.clone(),
            MessageNode::Namespace(ns) if ns.is_empty() => "{}".to_string(),
            MessageNode::Namespace(_) => "{...}".to_string(),
            MessageNode::Invalid(invalid) => invalid.raw.clone(),
        }
    }

    /// Build the diagnostic context for this node at `key`.
    pub fn context(&self, key: &str) -> MessageContext {
        MessageContext::new(self.location().clone(), key, self.display_value())
            .with_source_line(self.source_line())
    }
}

impl Namespace {
    pub fn new(location: MessageLocation, source_line: impl Into<String>) -> Self {
        Self {
            children: BTreeMap::new(),
            location,
            source_line: source_line.into(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, node: MessageNode) -> Option<MessageNode> {
        self.children.insert(key.into(), node)
    }

    pub fn child(&self, key: &str) -> Option<&MessageNode> {
        self.children.get(key)
    }

    /// Iterate children in key order.
    pub fn children(&self) -> btree_map::Iter<'_, String, MessageNode> {
        self.children.iter()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up a node by dotted path relative to this namespace.
    pub fn get(&self, path: &str) -> Option<&MessageNode> {
        let mut segments = path.split(super::KEY_DELIMITER);
        let mut node = self.children.get(segments.next()?)?;
        for segment in segments {
            node = node.as_namespace()?.children.get(segment)?;
        }
        Some(node)
    }

    /// Look up a nested namespace by dotted path.
    pub fn namespace(&self, path: &str) -> Option<&Namespace> {
        self.get(path).and_then(MessageNode::as_namespace)
    }

    /// True if any descendant is a value (a leaf, or an invalid value).
    pub fn has_values(&self) -> bool {
        self.children.values().any(|node| match node {
            MessageNode::Namespace(ns) => ns.has_values(),
            MessageNode::Leaf(_) | MessageNode::Invalid(_) => true,
        })
    }

    /// Visit every descendant node in pre-order, children sorted by key.
    ///
    /// `prefix` is the path of this namespace (`None` for the document root).
    pub fn walk<'a, F>(&'a self, prefix: Option<&KeyPath>, visit: &mut F)
    where
        F: FnMut(&KeyPath, &'a MessageNode),
    {
        for (key, node) in &self.children {
            let path = KeyPath::join(prefix, key);
            visit(&path, node);
            if let MessageNode::Namespace(ns) = node {
                ns.walk(Some(&path), visit);
            }
        }
    }

    /// All string leaves with their full paths, sorted by path.
    pub fn leaves(&self, prefix: Option<&KeyPath>) -> Vec<(KeyPath, &Leaf)> {
        let mut leaves = Vec::new();
        self.walk(prefix, &mut |path, node| {
            if let MessageNode::Leaf(leaf) = node {
                leaves.push((path.clone(), leaf));
            }
        });
        leaves
    }

    /// Paths of all string leaves.
    pub fn key_set(&self, prefix: Option<&KeyPath>) -> KeySet {
        self.leaves(prefix).into_iter().map(|(path, _)| path).collect()
    }

    /// Find the first path at which merging `other` into `self` would
    /// overwrite an existing definition.
    pub fn conflict_with(&self, other: &Namespace, prefix: Option<&KeyPath>) -> Option<KeyPath> {
        for (key, incoming) in &other.children {
            let Some(existing) = self.children.get(key) else {
                continue;
            };
            let path = KeyPath::join(prefix, key);
            match (existing, incoming) {
                (MessageNode::Namespace(a), MessageNode::Namespace(b)) => {
                    if let Some(conflict) = a.conflict_with(b, Some(&path)) {
                        return Some(conflict);
                    }
                }
                _ => return Some(path),
            }
        }
        None
    }

    /// Merge `other` into `self`. Callers check `conflict_with` first;
    /// on a conflict the incoming node wins.
    pub fn merge(&mut self, other: Namespace) {
        for (key, incoming) in other.children {
            match incoming {
                MessageNode::Namespace(incoming) => {
                    if let Some(MessageNode::Namespace(existing)) = self.children.get_mut(&key) {
                        existing.merge(incoming);
                    } else {
                        self.children.insert(key, MessageNode::Namespace(incoming));
                    }
                }
                other => {
                    self.children.insert(key, other);
                }
            }
        }
    }
}

/// All messages for a single locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleBundle {
    /// Locale code (e.g., "es", "en").
    pub locale: String,
    /// Files the bundle was read from, sorted.
    pub files: Vec<String>,
    pub root: Namespace,
}

/// Bundles for every locale, keyed by locale code.
pub type AllLocaleMessages = BTreeMap<String, LocaleBundle>;

impl LocaleBundle {
    pub fn new(locale: impl Into<String>, root: Namespace) -> Self {
        let file = root.location.file_path.clone();
        Self {
            locale: locale.into(),
            files: vec![file],
            root,
        }
    }

    pub fn get(&self, key: &str) -> Option<&MessageNode> {
        self.root.get(key)
    }

    pub fn leaf(&self, key: &str) -> Option<&Leaf> {
        self.get(key).and_then(MessageNode::as_leaf)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.leaf(key).is_some()
    }

    /// Paths of every string leaf in the bundle.
    pub fn key_set(&self) -> KeySet {
        self.root.key_set(None)
    }

    /// Display name for the bundle's origin: the single file, or the list.
    pub fn source_name(&self) -> String {
        self.files.join(", ")
    }
}
