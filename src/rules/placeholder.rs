//! Placeholder consistency between translations.
//!
//! A translation that uses a placeholder the canonical string does not define
//! will fail substitution at runtime, since callers only pass the canonical
//! placeholders. A translation that drops one silently loses information.

use rayon::prelude::*;

use crate::{
    core::{LocaleBundle, context::ProjectContext, interpolate::placeholders},
    issues::{Issue, PlaceholderMismatchIssue},
};

pub fn check_placeholder_issues(ctx: &ProjectContext) -> Vec<Issue> {
    let messages = ctx.messages();
    let others: Vec<&LocaleBundle> = messages.others().collect();
    check_placeholders(&messages.canonical, &others)
}

/// Compare the placeholders of every translated string with the canonical one.
///
/// Keys missing from a locale, or of a different type, are left to the shape
/// rule.
pub fn check_placeholders(canonical: &LocaleBundle, others: &[&LocaleBundle]) -> Vec<Issue> {
    let leaves = canonical.root.leaves(None);

    let mut issues: Vec<Issue> = others
        .par_iter()
        .flat_map_iter(|bundle| {
            leaves.iter().filter_map(move |(key, leaf)| {
                let translated = bundle.leaf(key.as_str())?;
                let expected = placeholders(&leaf.value);
                let found = placeholders(&translated.value);
                if expected == found {
                    return None;
                }

                Some(Issue::PlaceholderMismatch(PlaceholderMismatchIssue {
                    context: translated.context(key.as_str()),
                    locale: bundle.locale.clone(),
                    canonical_locale: canonical.locale.clone(),
                    missing: expected.difference(&found).map(|s| s.to_string()).collect(),
                    unexpected: found.difference(&expected).map(|s| s.to_string()).collect(),
                }))
            })
        })
        .collect();

    issues.sort();
    issues
}
