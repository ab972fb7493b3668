//! Placeholder parsing and substitution.
//!
//! A placeholder is `{name}` with optional inner spaces, where `name` is an
//! identifier. Braced groups that are not simple placeholders (ICU plural or
//! select expressions such as `{count, plural, one {# item} other {# items}}`)
//! are left untouched, including anything nested inside them.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    ops::Range,
    sync::LazyLock,
};

use clap::ValueEnum;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*)\s*$").unwrap());

/// What to do with a placeholder that has no substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SubstitutionPolicy {
    /// Fail the lookup.
    #[serde(rename = "fail")]
    Fail,
    /// Leave the `{name}` token in the output.
    #[serde(rename = "keep")]
    #[value(name = "keep")]
    KeepToken,
    /// Replace the token with nothing.
    #[serde(rename = "empty")]
    Empty,
}

impl Default for SubstitutionPolicy {
    /// Strict in debug builds, lenient in release builds.
    fn default() -> Self {
        if cfg!(debug_assertions) {
            SubstitutionPolicy::Fail
        } else {
            SubstitutionPolicy::KeepToken
        }
    }
}

impl fmt::Display for SubstitutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionPolicy::Fail => write!(f, "fail"),
            SubstitutionPolicy::KeepToken => write!(f, "keep"),
            SubstitutionPolicy::Empty => write!(f, "empty"),
        }
    }
}

/// A value substituted for a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SubstitutionValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl fmt::Display for SubstitutionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionValue::Str(s) => f.write_str(s),
            SubstitutionValue::Int(n) => write!(f, "{}", n),
            SubstitutionValue::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for SubstitutionValue {
    fn from(value: &str) -> Self {
        SubstitutionValue::Str(value.to_string())
    }
}

impl From<String> for SubstitutionValue {
    fn from(value: String) -> Self {
        SubstitutionValue::Str(value)
    }
}

impl From<i64> for SubstitutionValue {
    fn from(value: i64) -> Self {
        SubstitutionValue::Int(value)
    }
}

impl From<i32> for SubstitutionValue {
    fn from(value: i32) -> Self {
        SubstitutionValue::Int(value.into())
    }
}

impl From<u32> for SubstitutionValue {
    fn from(value: u32) -> Self {
        SubstitutionValue::Int(value.into())
    }
}

impl From<f64> for SubstitutionValue {
    fn from(value: f64) -> Self {
        SubstitutionValue::Float(value)
    }
}

/// Placeholder name to value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitutions(BTreeMap<String, SubstitutionValue>);

impl Substitutions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    ///
    /// ```
    /// use intlkeys::core::Substitutions;
    ///
    /// let subs = Substitutions::new().with("name", "Ana").with("count", 3);
    /// assert_eq!(subs.get("count").map(ToString::to_string).as_deref(), Some("3"));
    /// ```
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SubstitutionValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SubstitutionValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&SubstitutionValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Substitutions
where
    K: Into<String>,
    V: Into<SubstitutionValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut subs = Substitutions::new();
        for (name, value) in iter {
            subs.insert(name, value);
        }
        subs
    }
}

/// A placeholder with no substitution under [`SubstitutionPolicy::Fail`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no value for placeholder '{{{placeholder}}}'")]
pub struct MissingPlaceholder {
    pub placeholder: String,
}

/// A placeholder occurrence in a template.
struct Token<'a> {
    /// Byte range of the whole `{...}` group.
    range: Range<usize>,
    name: &'a str,
}

fn tokens(template: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(offset) = template[pos..].find('{') {
        let start = pos + offset;
        let Some(end) = group_end(template, start) else {
            // Unbalanced `{` is literal text; later groups are still scanned.
            pos = start + 1;
            continue;
        };
        if let Some(name) = PLACEHOLDER_RE
            .captures(&template[start + 1..end])
            .and_then(|caps| caps.get(1))
        {
            tokens.push(Token {
                range: start..end + 1,
                name: name.as_str(),
            });
        }
        pos = end + 1;
    }
    tokens
}

/// Byte index of the `}` closing the group opened at `start`.
fn group_end(template: &str, start: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in template[start..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Names of the simple placeholders a template references.
///
/// ```
/// use intlkeys::core::interpolate::placeholders;
///
/// let names = placeholders("Hola {name}, tienes { count } mensajes");
/// assert_eq!(names.into_iter().collect::<Vec<_>>(), vec!["count", "name"]);
/// ```
pub fn placeholders(template: &str) -> BTreeSet<&str> {
    tokens(template).into_iter().map(|token| token.name).collect()
}

/// Replace every placeholder in `template`.
///
/// Values are inserted literally. Unused substitutions are ignored; a
/// placeholder without a value is handled according to `policy`.
pub fn interpolate(
    template: &str,
    substitutions: &Substitutions,
    policy: SubstitutionPolicy,
) -> Result<String, MissingPlaceholder> {
    let mut output = String::with_capacity(template.len());
    let mut last = 0;

    for token in tokens(template) {
        output.push_str(&template[last..token.range.start]);
        match substitutions.get(token.name) {
            Some(value) => output.push_str(&value.to_string()),
            None => match policy {
                SubstitutionPolicy::Fail => {
                    return Err(MissingPlaceholder {
                        placeholder: token.name.to_string(),
                    });
                }
                SubstitutionPolicy::KeepToken => output.push_str(&template[token.range.clone()]),
                SubstitutionPolicy::Empty => {}
            },
        }
        last = token.range.end;
    }

    output.push_str(&template[last..]);
    Ok(output)
}
