use anyhow::{Result, anyhow};

use super::super::args::KeysCommand;
use super::{
    CommandResult, CommandSummary, KeysSummary,
    helper::{finish, locale_file_count, schema_issues},
};
use crate::core::{KeyPath, KeySet, context::ProjectContext, extract_namespace};

/// List key paths, from the schema or from one locale.
///
/// With `--locale` the keys that locale actually defines are listed, which
/// may differ from the schema when the locale has drifted.
pub fn keys(cmd: KeysCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let ctx = ProjectContext::new(&args.common)?;

    let schema = match ctx.schema() {
        Ok(schema) => schema,
        Err(err) => {
            tracing::debug!("{}", err);
            return Ok(finish(
                CommandSummary::Keys(KeysSummary { keys: Vec::new() }),
                schema_issues(&ctx),
                locale_file_count(&ctx),
                true,
            ));
        }
    };

    if let Some(namespace) = &args.namespace {
        extract_namespace(schema, namespace)?;
    }

    let defined: KeySet = match &args.locale {
        Some(locale) => {
            let all_messages = &ctx.messages().all_messages;
            let bundle = all_messages.get(locale).ok_or_else(|| {
                let available: Vec<&str> = all_messages.keys().map(String::as_str).collect();
                anyhow!(
                    "Locale '{}' not found (available: {})",
                    locale,
                    available.join(", ")
                )
            })?;
            bundle.key_set()
        }
        None => schema.keys().clone(),
    };

    let keys: Vec<String> = match &args.namespace {
        Some(namespace) => defined.within(namespace),
        None => defined,
    }
    .iter()
    .map(KeyPath::to_string)
    .collect();

    Ok(finish(
        CommandSummary::Keys(KeysSummary { keys }),
        Vec::new(),
        locale_file_count(&ctx),
        true,
    ))
}
