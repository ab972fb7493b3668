//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `check`: Validate the canonical schema and every locale against it
//! - `generate`: Write the key declaration file
//! - `keys`: List key paths
//! - `resolve`: Look up one key
//! - `init`: Initialize the configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use super::commands::check::CheckRule;
use crate::{
    core::{codegen::Target, interpolate::SubstitutionPolicy},
    utils::parse_assignment,
};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Check(cmd)) => cmd.args.common.verbose,
            Some(Command::Generate(cmd)) => cmd.args.common.verbose,
            Some(Command::Keys(cmd)) => cmd.args.common.verbose,
            Some(Command::Resolve(cmd)) => cmd.args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Locale the key schema is derived from (overrides config file)
    #[arg(long, alias = "primary-locale")]
    pub canonical_locale: Option<String>,

    /// Project root where .intlkeysrc.json is searched from (default: current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Messages directory path (overrides config file)
    #[arg(long)]
    pub messages_root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct CheckArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Checks to run (default: all)
    #[arg(value_enum)]
    pub checks: Vec<CheckRule>,
    #[command(flatten)]
    pub args: CheckArgs,
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output language (overrides config file)
    #[arg(long, value_enum)]
    pub target: Option<Target>,

    /// File to write (overrides config file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail if the file on disk is stale instead of writing it
    #[arg(long)]
    pub check: bool,
}

#[derive(Debug, Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub args: GenerateArgs,
}

#[derive(Debug, Parser)]
pub struct KeysArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only list keys under this namespace
    #[arg(short, long)]
    pub namespace: Option<String>,

    /// List the keys a locale defines instead of the schema's keys
    #[arg(short, long)]
    pub locale: Option<String>,
}

#[derive(Debug, Args)]
pub struct KeysCommand {
    #[command(flatten)]
    pub args: KeysArgs,
}

#[derive(Debug, Parser)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Dotted key path (e.g. common.search)
    pub key: String,

    /// Locale to resolve in (default: canonical locale)
    #[arg(short, long)]
    pub locale: Option<String>,

    /// Placeholder value, repeatable: --arg name=Ana --arg count=3
    #[arg(short = 'a', long = "arg", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub substitutions: Vec<(String, String)>,

    /// Handling of placeholders without a value (overrides config file)
    #[arg(long, value_enum)]
    pub policy: Option<SubstitutionPolicy>,

    /// Fall back to the fallback locale, then the key itself, instead of failing
    #[arg(long)]
    pub fallback: bool,
}

#[derive(Debug, Args)]
pub struct ResolveCommand {
    #[command(flatten)]
    pub args: ResolveArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check message files (schema structure, shape drift, placeholders, untranslated values)
    Check(CheckCommand),
    /// Generate the key declaration file from the canonical locale
    Generate(GenerateCommand),
    /// List valid key paths
    Keys(KeysCommand),
    /// Resolve a key to its message
    Resolve(ResolveCommand),
    /// Initialize a new .intlkeysrc.json configuration file
    Init,
}
