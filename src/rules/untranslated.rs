//! Untranslated value detection rule.
//!
//! Detects translation values that are identical to the canonical locale,
//! which may indicate that the text was not translated.
//!
//! The issue points to the canonical file and lists the locales with
//! identical values.

use std::collections::BTreeMap;

use crate::{
    core::{
        LocaleBundle, Substitutions, context::ProjectContext,
        interpolate::{SubstitutionPolicy, interpolate},
    },
    issues::{Issue, UntranslatedIssue},
    utils::contains_alphabetic,
};

pub fn check_untranslated_issues(ctx: &ProjectContext) -> Vec<Issue> {
    let messages = ctx.messages();
    let others: Vec<&LocaleBundle> = messages.others().collect();
    check_untranslated(&messages.canonical, &others)
}

/// Check for values identical to the canonical value.
///
/// Values with no alphabetic text outside their placeholders (numbers,
/// symbols, a bare `{name}`) are skipped since they need no translation.
pub fn check_untranslated(canonical: &LocaleBundle, others: &[&LocaleBundle]) -> Vec<Issue> {
    let mut identical: BTreeMap<String, UntranslatedIssue> = BTreeMap::new();

    for (key, leaf) in canonical.root.leaves(None) {
        if !has_translatable_text(&leaf.value) {
            continue;
        }

        let identical_in: Vec<String> = others
            .iter()
            .filter(|bundle| {
                bundle
                    .leaf(key.as_str())
                    .is_some_and(|translated| translated.value == leaf.value)
            })
            .map(|bundle| bundle.locale.clone())
            .collect();

        if !identical_in.is_empty() {
            identical.insert(
                key.to_string(),
                UntranslatedIssue {
                    context: leaf.context(key.as_str()),
                    canonical_locale: canonical.locale.clone(),
                    identical_in,
                },
            );
        }
    }

    let mut issues: Vec<Issue> = identical.into_values().map(Issue::Untranslated).collect();
    issues.sort();
    issues
}

fn has_translatable_text(value: &str) -> bool {
    interpolate(value, &Substitutions::new(), SubstitutionPolicy::Empty)
        .map(|text| contains_alphabetic(&text))
        .unwrap_or(true)
}
