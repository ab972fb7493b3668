use anyhow::Result;
use clap::ValueEnum;

use super::super::args::CheckCommand;
use super::{
    helper::{finish, locale_file_count, parse_error_issues},
    {CommandResult, CommandSummary},
};

use crate::{
    core::context::ProjectContext,
    issues::Issue,
    rules::{
        check_placeholder_issues, check_shape_issues, check_structure_issues,
        check_untranslated_issues,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum CheckRule {
    /// Empty namespaces, non-string values and malformed keys in the canonical locale
    Structure,
    /// Missing keys, extra keys and type mismatches in other locales
    Shape,
    /// Placeholders that differ from the canonical string
    Placeholders,
    /// Values identical to the canonical locale
    Untranslated,
}

impl CheckRule {
    pub fn all() -> Vec<CheckRule> {
        vec![
            CheckRule::Structure,
            CheckRule::Shape,
            CheckRule::Placeholders,
            CheckRule::Untranslated,
        ]
    }
}

pub fn check(cmd: CheckCommand) -> Result<CommandResult> {
    let ctx = ProjectContext::new(&cmd.args.common)?;

    let checks = if cmd.checks.is_empty() {
        CheckRule::all()
    } else {
        cmd.checks
    };

    Ok(finish(
        CommandSummary::Check,
        run_checks(&ctx, &checks),
        locale_file_count(&ctx),
        true,
    ))
}

/// Run the given checks plus message load errors.
pub fn run_checks(ctx: &ProjectContext, checks: &[CheckRule]) -> Vec<Issue> {
    let mut all_issues: Vec<Issue> = Vec::new();

    for check in checks {
        let issues = match check {
            CheckRule::Structure => check_structure_issues(ctx),
            CheckRule::Shape => check_shape_issues(ctx),
            CheckRule::Placeholders => check_placeholder_issues(ctx),
            CheckRule::Untranslated => check_untranslated_issues(ctx),
        };
        tracing::debug!("{:?}: {} issue(s)", check, issues.len());
        all_issues.extend(issues);
    }

    all_issues.extend(parse_error_issues(ctx));
    all_issues
}
