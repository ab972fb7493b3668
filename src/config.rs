use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::{codegen::Target, interpolate::SubstitutionPolicy};

pub const CONFIG_FILE_NAME: &str = ".intlkeysrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_messages_root", alias = "messagesDir")]
    pub messages_root: String,
    #[serde(default = "default_canonical_locale", alias = "primaryLocale")]
    pub canonical_locale: String,
    /// Locale used for runtime fallback; the canonical locale when unset.
    #[serde(default)]
    pub fallback_locale: Option<String>,
    /// Message files to skip, relative to `messagesRoot`.
    #[serde(default)]
    pub ignores: Vec<String>,
    /// Deepest key enumerated literally in generated output; `null` for no limit.
    #[serde(default = "default_max_depth")]
    pub max_depth: Option<usize>,
    #[serde(default = "default_output")]
    pub output: String,
    #[serde(default)]
    pub target: Target,
    /// Unset means strict in debug builds and lenient in release builds.
    #[serde(default)]
    pub missing_substitution: Option<SubstitutionPolicy>,
}

fn default_messages_root() -> String {
    "./messages".to_string()
}

fn default_canonical_locale() -> String {
    "es".to_string()
}

fn default_max_depth() -> Option<usize> {
    Some(4)
}

fn default_output() -> String {
    "./src/types/messages.d.ts".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            messages_root: default_messages_root(),
            canonical_locale: default_canonical_locale(),
            fallback_locale: None,
            ignores: Vec::new(),
            max_depth: default_max_depth(),
            output: default_output(),
            target: Target::default(),
            missing_substitution: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` is invalid, or if
    /// `maxDepth` is zero.
    pub fn validate(&self) -> Result<()> {
        self.ignore_patterns()?;

        if self.max_depth == Some(0) {
            bail!("'maxDepth' must be at least 1 (use null for no limit)");
        }

        if self.canonical_locale.trim().is_empty() {
            bail!("'canonicalLocale' must not be empty");
        }

        Ok(())
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|pattern| {
                Pattern::new(pattern)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))
            })
            .collect()
    }

    pub fn substitution_policy(&self) -> SubstitutionPolicy {
        self.missing_substitution.unwrap_or_default()
    }

    pub fn fallback_locale(&self) -> &str {
        self.fallback_locale
            .as_deref()
            .unwrap_or(&self.canonical_locale)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config
                .validate()
                .with_context(|| format!("Invalid config file: {:?}", path))?;
            tracing::debug!("Loaded configuration from {}", path.display());
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
