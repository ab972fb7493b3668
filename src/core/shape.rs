//! Shape comparison between a locale tree and the canonical tree.
//!
//! Two trees have the same shape when they have the same set of paths and
//! every path has the same kind of node on both sides. Leaf values are not
//! compared.

use std::fmt;

use super::{KeyPath, MessageContext, MessageNode, Namespace, ValueType};

/// One way a locale tree deviates from the canonical tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeMismatch {
    /// Present in the canonical tree, absent from the locale.
    MissingKey { expected: MessageContext },
    /// Present in the locale, absent from the canonical tree.
    ExtraKey { found: MessageContext },
    /// Present on both sides with different node kinds.
    WrongType {
        expected: MessageContext,
        expected_type: ValueType,
        found: MessageContext,
        found_type: ValueType,
    },
}

impl ShapeMismatch {
    pub fn key(&self) -> &str {
        match self {
            ShapeMismatch::MissingKey { expected } => &expected.key,
            ShapeMismatch::ExtraKey { found } => &found.key,
            ShapeMismatch::WrongType { found, .. } => &found.key,
        }
    }
}

impl fmt::Display for ShapeMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeMismatch::MissingKey { expected } => write!(f, "missing key '{}'", expected.key),
            ShapeMismatch::ExtraKey { found } => write!(f, "unexpected key '{}'", found.key),
            ShapeMismatch::WrongType {
                found,
                expected_type,
                found_type,
                ..
            } => write!(
                f,
                "key '{}' should be {}, found {}",
                found.key, expected_type, found_type
            ),
        }
    }
}

/// Compare `other` against `reference`.
///
/// A subtree that exists on one side only is expanded to its values (and any
/// empty namespaces inside it), so every reported key can be looked up
/// directly. Results are sorted by key.
pub fn compare(reference: &Namespace, other: &Namespace) -> Vec<ShapeMismatch> {
    let mut mismatches = Vec::new();
    compare_namespace(reference, other, None, &mut mismatches);
    mismatches.sort_by(|a, b| a.key().cmp(b.key()));
    mismatches
}

fn compare_namespace(
    reference: &Namespace,
    other: &Namespace,
    prefix: Option<&KeyPath>,
    out: &mut Vec<ShapeMismatch>,
) {
    for (key, expected) in reference.children() {
        let path = KeyPath::join(prefix, key);
        let Some(found) = other.child(key) else {
            expand(expected, &path, out, |expected| ShapeMismatch::MissingKey {
                expected,
            });
            continue;
        };

        match (expected, found) {
            (MessageNode::Namespace(a), MessageNode::Namespace(b)) => {
                compare_namespace(a, b, Some(&path), out);
            }
            (expected, found) if expected.value_type() == found.value_type() => {}
            (expected, found) => out.push(ShapeMismatch::WrongType {
                expected: expected.context(path.as_str()),
                expected_type: expected.value_type(),
                found: found.context(path.as_str()),
                found_type: found.value_type(),
            }),
        }
    }

    for (key, found) in other.children() {
        if reference.child(key).is_none() {
            let path = KeyPath::join(prefix, key);
            expand(found, &path, out, |found| ShapeMismatch::ExtraKey { found });
        }
    }
}

/// Report `node` (or the values underneath it) as one-sided.
fn expand<F>(node: &MessageNode, path: &KeyPath, out: &mut Vec<ShapeMismatch>, make: F)
where
    F: Fn(MessageContext) -> ShapeMismatch + Copy,
{
    match node {
        MessageNode::Namespace(ns) if !ns.is_empty() => {
            for (key, child) in ns.children() {
                expand(child, &path.child(key), out, make);
            }
        }
        node => out.push(make(node.context(path.as_str()))),
    }
}
