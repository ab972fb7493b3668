//! Key lookup with placeholder substitution.

use super::{
    KeySet, LocaleBundle,
    interpolate::{SubstitutionPolicy, Substitutions, interpolate},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// The key does not name a string in the bundle.
    #[error("key '{key}' not found in locale '{locale}'")]
    KeyNotFound { locale: String, key: String },
    /// The key is not in the schema's key set.
    #[error("unknown key '{key}'")]
    UnknownKey { key: String },
    #[error("missing substitution for placeholder '{{{placeholder}}}' in '{key}'")]
    MissingSubstitution { key: String, placeholder: String },
}

/// Reject keys that are not part of the key set.
pub fn check_key(keys: &KeySet, key: &str) -> Result<(), ResolveError> {
    if keys.contains(key) {
        Ok(())
    } else {
        Err(ResolveError::UnknownKey {
            key: key.to_string(),
        })
    }
}

/// Look up `key` in `bundle` and apply substitutions.
///
/// Without substitutions the stored string is returned verbatim.
pub fn resolve(
    bundle: &LocaleBundle,
    key: &str,
    substitutions: Option<&Substitutions>,
    policy: SubstitutionPolicy,
) -> Result<String, ResolveError> {
    let leaf = bundle.leaf(key).ok_or_else(|| ResolveError::KeyNotFound {
        locale: bundle.locale.clone(),
        key: key.to_string(),
    })?;

    let Some(substitutions) = substitutions else {
        return Ok(leaf.value.clone());
    };

    interpolate(&leaf.value, substitutions, policy).map_err(|missing| {
        ResolveError::MissingSubstitution {
            key: key.to_string(),
            placeholder: missing.placeholder,
        }
    })
}
