use super::{CommandResult, CommandSummary};
use crate::{
    core::context::ProjectContext,
    issues::{Issue, Severity},
    rules::check_structure_issues,
};

pub fn finish(
    summary: CommandSummary,
    mut issues: Vec<Issue>,
    locale_files_checked: usize,
    exit_on_errors: bool,
) -> CommandResult {
    issues.sort();

    let parse_error_count = issues
        .iter()
        .filter(|i| matches!(i, Issue::ParseError(_)))
        .count();

    let mut error_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Error)
        .count();

    let warning_count = issues
        .iter()
        .filter(|i| i.severity() == Severity::Warning)
        .count();

    match &summary {
        CommandSummary::Init(summary) if summary.error.is_some() => error_count += 1,
        CommandSummary::Resolve(summary) if summary.result.is_err() => error_count += 1,
        CommandSummary::Generate(summary) if summary.is_failure() => error_count += 1,
        _ => {}
    }

    CommandResult {
        summary,
        error_count,
        warning_count,
        exit_on_errors,
        issues,
        parse_error_count,
        locale_files_checked,
    }
}

/// Number of message files the context loaded.
pub fn locale_file_count(ctx: &ProjectContext) -> usize {
    let loaded: usize = ctx
        .messages()
        .all_messages
        .values()
        .map(|bundle| bundle.files.len())
        .sum();
    loaded + ctx.message_parse_errors().len()
}

/// Load errors plus the canonical locale's structural issues.
///
/// Commands that need a derived schema report these instead when the
/// schema cannot be derived.
pub fn schema_issues(ctx: &ProjectContext) -> Vec<Issue> {
    let mut issues = check_structure_issues(ctx);
    issues.extend(parse_error_issues(ctx));
    issues
}

pub fn parse_error_issues(ctx: &ProjectContext) -> impl Iterator<Item = Issue> + '_ {
    ctx.message_parse_errors()
        .iter()
        .map(|issue| Issue::ParseError(issue.clone()))
}
