use std::{
    cell::OnceCell,
    path::{Component, Path, PathBuf},
};

use anyhow::{Context as _, Result, anyhow};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    core::{
        AllLocaleMessages, LocaleBundle,
        interpolate::SubstitutionPolicy,
        parsers::json::scan_message_files,
        schema::{MessageSchema, SchemaError},
    },
    issues::ParseErrorIssue,
};

/// Messages of every locale found under the messages root.
pub struct MessageData {
    /// Every locale that loaded, including the canonical one.
    pub all_messages: AllLocaleMessages,

    /// The canonical locale's bundle, the source of the schema.
    pub canonical: LocaleBundle,
}

impl MessageData {
    /// Bundles of every locale except the canonical one, sorted by locale.
    pub fn others(&self) -> impl Iterator<Item = &LocaleBundle> {
        self.all_messages
            .values()
            .filter(|bundle| bundle.locale != self.canonical.locale)
    }
}

/// Merged configuration and loaded messages for one project.
///
/// Messages are loaded eagerly so that a missing messages directory or a
/// missing canonical locale fails before any command runs. The schema is
/// derived on first use.
///
/// # Configuration Priority
///
/// 1. CLI arguments (e.g., `--canonical-locale en`)
/// 2. `.intlkeysrc.json` config file
/// 3. Built-in defaults
pub struct ProjectContext {
    /// Merged configuration (CLI args > config file > defaults).
    pub config: Config,

    /// Project root directory (for resolving relative paths).
    pub root_dir: PathBuf,

    pub verbose: bool,

    messages: MessageData,

    schema: OnceCell<Result<MessageSchema, SchemaError>>,

    /// Message files that failed to load.
    message_parse_errors: Vec<ParseErrorIssue>,
}

impl ProjectContext {
    /// Create a new `ProjectContext` from command line arguments.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Config file is invalid
    /// - Messages directory doesn't exist
    /// - Canonical locale messages are not found
    pub fn new(common_args: &CommonArgs) -> Result<Self> {
        let root_dir = common_args
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));

        let config_result = load_config(&root_dir)?;
        if !config_result.from_file {
            tracing::debug!("No .intlkeysrc.json found, using default configuration");
        }
        let mut config = config_result.config;

        if let Some(ref canonical_locale) = common_args.canonical_locale {
            config.canonical_locale = canonical_locale.clone();
        }

        if let Some(ref messages_root) = common_args.messages_root {
            config.messages_root = messages_root.to_string_lossy().to_string();
        }

        config
            .validate()
            .context("Invalid configuration after applying command line overrides")?;

        let message_dir = resolve_messages_dir(&root_dir, &config.messages_root);
        let ignores = config.ignore_patterns()?;
        let scan = scan_message_files(&message_dir, &ignores)?;

        let message_parse_errors: Vec<ParseErrorIssue> = scan
            .warnings
            .iter()
            .map(|warning| ParseErrorIssue {
                file_path: warning.file_path.clone(),
                error: warning.error.clone(),
            })
            .collect();

        let canonical = scan
            .messages
            .get(&config.canonical_locale)
            .ok_or_else(|| {
                anyhow!(
                    "Canonical locale '{}' messages not found in '{}'",
                    config.canonical_locale,
                    message_dir.display()
                )
            })?
            .clone();

        tracing::debug!(
            locales = scan.messages.len(),
            skipped = message_parse_errors.len(),
            "Loaded messages from {}",
            message_dir.display()
        );

        Ok(Self {
            config,
            root_dir,
            verbose: common_args.verbose,
            messages: MessageData {
                all_messages: scan.messages,
                canonical,
            },
            schema: OnceCell::new(),
            message_parse_errors,
        })
    }

    pub fn messages(&self) -> &MessageData {
        &self.messages
    }

    pub fn canonical_locale(&self) -> &str {
        &self.config.canonical_locale
    }

    /// Parse errors from message files (collected during context creation).
    pub fn message_parse_errors(&self) -> &[ParseErrorIssue] {
        &self.message_parse_errors
    }

    /// The schema derived from the canonical locale (lazy initialization).
    pub fn schema(&self) -> Result<&MessageSchema, &SchemaError> {
        self.schema
            .get_or_init(|| MessageSchema::derive(self.messages.canonical.clone()))
            .as_ref()
    }

    pub fn substitution_policy(&self) -> SubstitutionPolicy {
        self.config.substitution_policy()
    }

    /// Resolve the messages directory path relative to root_dir.
    pub fn resolved_messages_dir(&self) -> PathBuf {
        resolve_messages_dir(&self.root_dir, &self.config.messages_root)
    }

    /// Resolve the generated artifact path relative to root_dir.
    pub fn resolved_output_path(&self, output: &str) -> PathBuf {
        resolve_messages_dir(&self.root_dir, output)
    }
}

/// Resolve a configured path against the project root.
///
/// Absolute paths are kept. With the root at `.` the configured path is kept
/// as written (e.g. `./messages`) so reported paths stay short.
fn resolve_messages_dir(root_dir: &Path, configured: &str) -> PathBuf {
    let p = Path::new(configured);
    if p.is_absolute() {
        return p.to_path_buf();
    }
    let is_cur_dir = root_dir
        .components()
        .all(|c| matches!(c, Component::CurDir));
    if is_cur_dir {
        p.to_path_buf()
    } else {
        let rel = p.strip_prefix(Path::new(".")).unwrap_or(p);
        root_dir.join(rel)
    }
}
