use anyhow::Result;

use super::super::args::ResolveCommand;
use super::{
    CommandResult, CommandSummary, ResolveSummary,
    helper::{finish, locale_file_count, schema_issues},
};
use crate::core::{Catalog, CatalogOptions, Substitutions, context::ProjectContext};

/// Resolve one key the way the runtime catalog does.
///
/// Strict by default: an unknown key, a key missing from the locale or a
/// placeholder the policy rejects fails the command. Placeholders are always
/// interpolated, with `--arg` values or according to the policy. With `--fallback` the lookup
/// degrades like `Translator::t_with` and always prints something.
pub fn resolve(cmd: ResolveCommand) -> Result<CommandResult> {
    let args = cmd.args;
    let ctx = ProjectContext::new(&args.common)?;

    let schema = match ctx.schema() {
        Ok(schema) => schema.clone(),
        Err(err) => {
            return Ok(finish(
                CommandSummary::Resolve(ResolveSummary {
                    key: args.key,
                    locale: ctx.canonical_locale().to_string(),
                    result: Err(err.to_string()),
                }),
                schema_issues(&ctx),
                locale_file_count(&ctx),
                true,
            ));
        }
    };

    let options = CatalogOptions {
        fallback_locale: ctx.config.fallback_locale.clone(),
        policy: args.policy.unwrap_or_else(|| ctx.substitution_policy()),
        ignores: Vec::new(),
    };
    let catalog = Catalog::new(schema, ctx.messages().others().cloned(), options);

    let requested = args
        .locale
        .as_deref()
        .unwrap_or_else(|| ctx.canonical_locale());
    let translator = catalog.translator(requested);

    // Placeholders without an `--arg` go through the policy.
    let substitutions: Substitutions = args.substitutions.into_iter().collect();

    let result = if args.fallback {
        Ok(translator.t_with(&args.key, &substitutions))
    } else {
        translator
            .try_t(&args.key, Some(&substitutions))
            .map_err(|err| err.to_string())
    };

    Ok(finish(
        CommandSummary::Resolve(ResolveSummary {
            key: args.key,
            locale: translator.locale().to_string(),
            result,
        }),
        Vec::new(),
        locale_file_count(&ctx),
        true,
    ))
}
