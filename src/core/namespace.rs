//! Namespace extraction.
//!
//! A namespace is a named sub-tree of the schema. Extracting it yields the
//! sub-tree and the keys underneath it, which is what a namespace-scoped
//! translator accepts.

use super::{KEY_DELIMITER, KeyPath, KeySet, MessageNode, Namespace, schema::MessageSchema};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NamespaceError {
    #[error("unknown namespace '{name}' (available: {})", .available.join(", "))]
    UnknownNamespace {
        name: String,
        available: Vec<String>,
    },
}

/// A namespace of the schema together with its keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceSchema<'a> {
    name: String,
    node: &'a Namespace,
    keys: KeySet,
}

impl<'a> NamespaceSchema<'a> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> &'a Namespace {
        self.node
    }

    /// Full key paths of every leaf in the namespace.
    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// Key paths relative to the namespace (`common.search` -> `search`).
    pub fn relative_keys(&self) -> Vec<&str> {
        self.keys
            .iter()
            .filter_map(|key| key.strip_prefix(&self.name))
            .collect()
    }

    pub fn get(&self, relative_key: &str) -> Option<&'a MessageNode> {
        self.node.get(relative_key)
    }
}

/// Extract a namespace from the schema.
///
/// `name` is a top-level namespace (`common`) or a dotted path to a nested
/// one (`home.hero`). Leaves are not namespaces. On failure the error lists
/// the namespaces under the deepest existing parent of `name`.
pub fn extract_namespace<'a>(
    schema: &'a MessageSchema,
    name: &str,
) -> Result<NamespaceSchema<'a>, NamespaceError> {
    let node = schema
        .root()
        .namespace(name)
        .ok_or_else(|| NamespaceError::UnknownNamespace {
            name: name.to_string(),
            available: available_near(schema.root(), name),
        })?;

    let keys = node.key_set(Some(&KeyPath::new(name)));
    Ok(NamespaceSchema {
        name: name.to_string(),
        node,
        keys,
    })
}

/// Full paths of the namespaces under the deepest existing parent of `name`.
fn available_near(root: &Namespace, name: &str) -> Vec<String> {
    let mut parent = root;
    let mut prefix: Option<KeyPath> = None;

    let segments: Vec<&str> = name.split(KEY_DELIMITER).collect();
    for segment in &segments[..segments.len().saturating_sub(1)] {
        match parent.child(segment) {
            Some(MessageNode::Namespace(ns)) => {
                parent = ns;
                prefix = Some(KeyPath::join(prefix.as_ref(), segment));
            }
            _ => break,
        }
    }

    parent
        .children()
        .filter(|(_, node)| node.as_namespace().is_some())
        .map(|(key, _)| KeyPath::join(prefix.as_ref(), key).to_string())
        .collect()
}
