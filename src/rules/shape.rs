//! Shape consistency across locales.
//!
//! Every locale must have the same paths as the canonical locale, with the
//! same node kind at each path. Missing keys and type mismatches point at the
//! canonical file and list the locales affected; extra keys point at the
//! locale file that defines them.

use std::collections::BTreeMap;

use rayon::prelude::*;

use crate::{
    core::{
        LocaleBundle, LocaleTypeMismatch, ShapeMismatch, context::ProjectContext, shape::compare,
    },
    issues::{ExtraKeyIssue, Issue, MissingKeyIssue, TypeMismatchIssue},
};

pub fn check_shape_issues(ctx: &ProjectContext) -> Vec<Issue> {
    let messages = ctx.messages();
    let others: Vec<&LocaleBundle> = messages.others().collect();
    check_shape(&messages.canonical, &others)
}

/// Compare each bundle in `others` against the canonical bundle.
pub fn check_shape(canonical: &LocaleBundle, others: &[&LocaleBundle]) -> Vec<Issue> {
    let per_locale: Vec<(&str, Vec<ShapeMismatch>)> = others
        .par_iter()
        .map(|bundle| (bundle.locale.as_str(), compare(&canonical.root, &bundle.root)))
        .collect();

    let canonical_locale = &canonical.locale;
    let mut missing: BTreeMap<String, MissingKeyIssue> = BTreeMap::new();
    let mut mismatched: BTreeMap<String, TypeMismatchIssue> = BTreeMap::new();
    let mut issues = Vec::new();

    for (locale, mismatches) in per_locale {
        for mismatch in mismatches {
            match mismatch {
                ShapeMismatch::MissingKey { expected } => {
                    missing
                        .entry(expected.key.clone())
                        .or_insert_with(|| MissingKeyIssue {
                            context: expected,
                            canonical_locale: canonical_locale.clone(),
                            missing_in: Vec::new(),
                        })
                        .missing_in
                        .push(locale.to_string());
                }
                ShapeMismatch::ExtraKey { found } => {
                    issues.push(Issue::ExtraKey(ExtraKeyIssue {
                        context: found,
                        locale: locale.to_string(),
                        canonical_locale: canonical_locale.clone(),
                    }));
                }
                ShapeMismatch::WrongType {
                    expected,
                    expected_type,
                    found,
                    found_type,
                } => {
                    mismatched
                        .entry(found.key.clone())
                        .or_insert_with(|| TypeMismatchIssue {
                            context: expected,
                            expected_type,
                            canonical_locale: canonical_locale.clone(),
                            mismatched_in: Vec::new(),
                        })
                        .mismatched_in
                        .push(LocaleTypeMismatch::new(locale, found_type, found.location));
                }
            }
        }
    }

    issues.extend(missing.into_values().map(Issue::MissingKey));
    issues.extend(mismatched.into_values().map(Issue::TypeMismatch));
    issues.sort();
    issues
}
