//! Generated artifacts describing the key set.
//!
//! Output depends only on the schema and the options, so regenerating from
//! unchanged messages is byte-identical.
//!
//! - `typescript`: a `.d.ts` declaration with the key union and namespace types
//! - `rust`: constant tables of keys and namespaces

pub mod rust;
pub mod typescript;

use std::{collections::BTreeSet, fmt};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::{KeyPath, schema::MessageSchema};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    #[default]
    Typescript,
    Rust,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Typescript => write!(f, "typescript"),
            Target::Rust => write!(f, "rust"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub target: Target,
    /// Deepest key enumerated literally; deeper keys collapse into a prefix
    /// pattern. `None` enumerates every key.
    pub max_depth: Option<usize>,
    /// Where the messages came from, for the header comment.
    pub source: String,
}

/// Render the artifact for `schema`.
pub fn generate(schema: &MessageSchema, options: &GenerateOptions) -> String {
    match options.target {
        Target::Typescript => typescript::render(schema, options),
        Target::Rust => rust::render(schema, options),
    }
}

pub(crate) fn header(comment: &str, options: &GenerateOptions, schema: &MessageSchema) -> String {
    format!(
        "{} Generated by intlkeys from the '{}' messages in {}. Do not edit.\n",
        comment,
        schema.canonical_locale(),
        options.source
    )
}

/// A key as it appears in the generated union.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum KeyPattern {
    /// A key enumerated literally.
    Exact(String),
    /// Every key under this prefix. An empty prefix matches any key.
    Prefix(String),
}

/// Collapse keys deeper than `max_depth` into prefix patterns.
///
/// When `relative_to` is given, patterns are relative to that namespace.
pub fn key_patterns<'a>(
    keys: impl IntoIterator<Item = &'a KeyPath>,
    max_depth: Option<usize>,
    relative_to: Option<&str>,
) -> BTreeSet<KeyPattern> {
    let relative = |path: &str| -> String {
        match relative_to {
            Some(ns) if path == ns => String::new(),
            Some(ns) => KeyPath::new(path)
                .strip_prefix(ns)
                .unwrap_or(path)
                .to_string(),
            None => path.to_string(),
        }
    };

    keys.into_iter()
        .map(|key| match max_depth {
            Some(depth) if key.depth() > depth => {
                KeyPattern::Prefix(relative(key.truncate(depth).as_str()))
            }
            _ => KeyPattern::Exact(relative(key.as_str())),
        })
        .collect()
}
