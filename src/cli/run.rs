//! Dispatch to the command handler for the parsed arguments.

use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{
        CommandResult, check::check, generate::generate, init::init, keys::keys,
        resolve::resolve,
    },
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Check(cmd)) => check(cmd),
        Some(Command::Generate(cmd)) => generate(cmd),
        Some(Command::Keys(cmd)) => keys(cmd),
        Some(Command::Resolve(cmd)) => resolve(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
