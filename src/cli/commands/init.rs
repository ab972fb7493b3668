use std::{fs, path::Path};

use anyhow::Result;

use super::{CommandResult, CommandSummary, InitSummary, helper::finish};
use crate::config::{CONFIG_FILE_NAME, default_config_json};

/// Write the default configuration to the current directory.
///
/// An existing configuration file is never overwritten.
pub fn init() -> Result<CommandResult> {
    Ok(finish(
        CommandSummary::Init(write_default_config(Path::new(CONFIG_FILE_NAME))?),
        Vec::new(),
        0,
        true,
    ))
}

fn write_default_config(config_path: &Path) -> Result<InitSummary> {
    if config_path.exists() {
        return Ok(InitSummary {
            created: false,
            error: Some(format!("{} already exists", CONFIG_FILE_NAME)),
        });
    }

    fs::write(config_path, default_config_json()?)?;
    Ok(InitSummary {
        created: true,
        error: None,
    })
}
