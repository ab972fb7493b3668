//! Message schema derived from the canonical locale.
//!
//! The schema is the canonical locale's tree, checked to contain only
//! namespaces and string leaves, together with the enumerated set of every
//! valid key path. It is derived once and never mutated; other locales are
//! checked against it.

use std::fmt;

use super::{
    KEY_DELIMITER, KeyPath, KeySet, Leaf, LocaleBundle, MessageContext, MessageNode, Namespace,
    ValueType,
    shape::{self, ShapeMismatch},
};

/// A structural problem that prevents a tree from being used as a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaViolation {
    /// A namespace with no values anywhere underneath it.
    EmptyNamespace(MessageContext),
    /// A value that is neither a string nor a namespace.
    InvalidLeaf {
        context: MessageContext,
        found: ValueType,
    },
    /// A key segment that is empty or contains the key delimiter.
    InvalidKey {
        context: MessageContext,
        segment: String,
    },
}

impl SchemaViolation {
    pub fn context(&self) -> &MessageContext {
        match self {
            SchemaViolation::EmptyNamespace(context) => context,
            SchemaViolation::InvalidLeaf { context, .. } => context,
            SchemaViolation::InvalidKey { context, .. } => context,
        }
    }
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaViolation::EmptyNamespace(context) => {
                write!(f, "namespace '{}' has no messages", context.display_key())
            }
            SchemaViolation::InvalidLeaf { context, found } => write!(
                f,
                "'{}' must be a string or an object, found {}",
                context.key, found
            ),
            SchemaViolation::InvalidKey { context, segment } if segment.is_empty() => {
                write!(f, "'{}' contains an empty key", context.key)
            }
            SchemaViolation::InvalidKey { segment, .. } => write!(
                f,
                "key \"{}\" must not contain '{}'",
                segment, KEY_DELIMITER
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error(
        "messages for '{locale}' are not a valid schema: {}",
        join(.violations)
    )]
    Invalid {
        locale: String,
        violations: Vec<SchemaViolation>,
    },
    #[error(
        "messages for '{locale}' do not match the canonical shape: {}",
        join(.mismatches)
    )]
    ShapeMismatch {
        locale: String,
        mismatches: Vec<ShapeMismatch>,
    },
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Collect every structural violation in a tree.
///
/// A tree with no values at all reports only the root as an empty namespace;
/// below that, only the outermost empty namespace of a branch is reported.
pub fn find_violations(root: &Namespace) -> Vec<SchemaViolation> {
    let mut violations = Vec::new();
    if !root.has_values() {
        let context = MessageContext::new(root.location.clone(), "", "{}")
            .with_source_line(root.source_line.clone());
        violations.push(SchemaViolation::EmptyNamespace(context));
        return violations;
    }
    collect_violations(root, None, &mut violations);
    violations
}

fn collect_violations(
    namespace: &Namespace,
    prefix: Option<&KeyPath>,
    out: &mut Vec<SchemaViolation>,
) {
    for (key, node) in namespace.children() {
        let path = KeyPath::join(prefix, key);
        if key.is_empty() || key.contains(KEY_DELIMITER) {
            out.push(SchemaViolation::InvalidKey {
                context: node.context(path.as_str()),
                segment: key.clone(),
            });
        }

        match node {
            MessageNode::Leaf(_) => {}
            MessageNode::Namespace(ns) if !ns.has_values() => {
                out.push(SchemaViolation::EmptyNamespace(node.context(path.as_str())));
            }
            MessageNode::Namespace(ns) => collect_violations(ns, Some(&path), out),
            MessageNode::Invalid(invalid) => out.push(SchemaViolation::InvalidLeaf {
                context: node.context(path.as_str()),
                found: invalid.value_type,
            }),
        }
    }
}

/// The canonical tree and its enumerated key set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSchema {
    canonical: LocaleBundle,
    keys: KeySet,
}

impl MessageSchema {
    /// Derive the schema from the canonical locale's bundle.
    ///
    /// Fails with every structural violation found, not just the first.
    pub fn derive(canonical: LocaleBundle) -> Result<Self, SchemaError> {
        let violations = find_violations(&canonical.root);
        if !violations.is_empty() {
            return Err(SchemaError::Invalid {
                locale: canonical.locale.clone(),
                violations,
            });
        }

        let keys = canonical.key_set();
        tracing::debug!(
            locale = %canonical.locale,
            keys = keys.len(),
            "Derived message schema"
        );
        Ok(Self { canonical, keys })
    }

    pub fn canonical_locale(&self) -> &str {
        &self.canonical.locale
    }

    pub fn canonical(&self) -> &LocaleBundle {
        &self.canonical
    }

    pub fn root(&self) -> &Namespace {
        &self.canonical.root
    }

    /// Every valid key path, sorted.
    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn leaf(&self, key: &str) -> Option<&Leaf> {
        self.canonical.leaf(key)
    }

    /// Top-level namespaces (top-level leaves are not namespaces).
    pub fn namespaces(&self) -> Vec<&str> {
        self.root()
            .children()
            .filter(|(_, node)| node.as_namespace().is_some())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Compare a bundle's shape against the schema.
    pub fn check(&self, bundle: &LocaleBundle) -> Vec<ShapeMismatch> {
        shape::compare(&self.canonical.root, &bundle.root)
    }

    pub fn validate(&self, bundle: &LocaleBundle) -> Result<(), SchemaError> {
        let mismatches = self.check(bundle);
        if mismatches.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ShapeMismatch {
                locale: bundle.locale.clone(),
                mismatches,
            })
        }
    }
}
