use std::{fs, path::Path};

use anyhow::{Context, Result};

use super::super::args::GenerateCommand;
use super::{
    CommandResult, CommandSummary, GenerateOutcome, GenerateSummary,
    check::{CheckRule, run_checks},
    helper::{finish, locale_file_count},
};
use crate::{
    core::{GenerateOptions, context::ProjectContext, generate as render},
    issues::Severity,
};

pub fn generate(cmd: GenerateCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let ctx = ProjectContext::new(&args.common)?;

    let target = args.target.unwrap_or(ctx.config.target);
    let output = match args.output {
        Some(path) => path,
        None => ctx.resolved_output_path(&ctx.config.output),
    };

    let issues = run_checks(&ctx, &[CheckRule::Structure, CheckRule::Shape]);
    let has_errors = issues.iter().any(|i| i.severity() == Severity::Error);

    let summary = |key_count: usize, outcome: GenerateOutcome| {
        CommandSummary::Generate(GenerateSummary {
            output: output.clone(),
            target,
            key_count,
            outcome,
        })
    };

    if has_errors {
        tracing::debug!("Not writing {}: messages have errors", output.display());
        return Ok(finish(
            summary(0, GenerateOutcome::Aborted),
            issues,
            locale_file_count(&ctx),
            true,
        ));
    }

    let schema = ctx.schema().map_err(|err| anyhow::anyhow!("{}", err))?;
    let options = GenerateOptions {
        target,
        max_depth: ctx.config.max_depth,
        source: ctx.config.messages_root.clone(),
    };
    let content = render(schema, &options);
    let existing = fs::read_to_string(&output).ok();

    let outcome = if args.check {
        match existing {
            Some(existing) if existing == content => GenerateOutcome::Unchanged,
            Some(_) => GenerateOutcome::Stale,
            None => GenerateOutcome::Missing,
        }
    } else if existing.as_deref() == Some(content.as_str()) {
        GenerateOutcome::Unchanged
    } else {
        write_output(&output, &content)?;
        GenerateOutcome::Written
    };

    Ok(finish(
        summary(schema.keys().len(), outcome),
        issues,
        locale_file_count(&ctx),
        true,
    ))
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_write_output_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("src").join("types").join("messages.d.ts");
        write_output(&path, "export {};\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "export {};\n");
    }
}
