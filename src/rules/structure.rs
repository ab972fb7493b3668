//! Structural validation of the canonical locale.
//!
//! The canonical locale is the schema source, so it must contain only
//! namespaces and string leaves, no empty namespaces, and key segments that
//! map to exactly one path. Other locales are covered by the shape rule.

use crate::{
    core::{LocaleBundle, SchemaViolation, context::ProjectContext, schema::find_violations},
    issues::{EmptyNamespaceIssue, InvalidKeyIssue, InvalidLeafIssue, Issue},
};

pub fn check_structure_issues(ctx: &ProjectContext) -> Vec<Issue> {
    check_structure(&ctx.messages().canonical)
}

/// Report every structural violation in the canonical bundle.
pub fn check_structure(canonical: &LocaleBundle) -> Vec<Issue> {
    let locale = &canonical.locale;
    let mut issues: Vec<Issue> = find_violations(&canonical.root)
        .into_iter()
        .map(|violation| match violation {
            SchemaViolation::EmptyNamespace(context) => {
                Issue::EmptyNamespace(EmptyNamespaceIssue {
                    context,
                    locale: locale.clone(),
                })
            }
            SchemaViolation::InvalidLeaf { context, found } => {
                Issue::InvalidLeaf(InvalidLeafIssue {
                    context,
                    locale: locale.clone(),
                    found,
                })
            }
            SchemaViolation::InvalidKey { context, segment } => {
                Issue::InvalidKey(InvalidKeyIssue {
                    context,
                    locale: locale.clone(),
                    segment,
                })
            }
        })
        .collect();

    issues.sort();
    issues
}
