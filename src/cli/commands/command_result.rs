use std::path::PathBuf;

use crate::{core::codegen::Target, issues::Issue};

#[derive(Debug)]
pub enum CommandSummary {
    Check,
    Generate(GenerateSummary),
    Keys(KeysSummary),
    Resolve(ResolveSummary),
    Init(InitSummary),
}

/// What `generate` did with the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerateOutcome {
    /// The file was created or updated.
    Written,
    /// The file already had the generated content.
    Unchanged,
    /// `--check`: the file on disk differs from the generated content.
    Stale,
    /// `--check`: the file does not exist.
    Missing,
    /// Error-level issues were found; nothing was written.
    Aborted,
}

#[derive(Debug)]
pub struct GenerateSummary {
    pub output: PathBuf,
    pub target: Target,
    pub key_count: usize,
    pub outcome: GenerateOutcome,
}

impl GenerateSummary {
    pub fn is_failure(&self) -> bool {
        matches!(
            self.outcome,
            GenerateOutcome::Stale | GenerateOutcome::Missing
        )
    }
}

#[derive(Debug)]
pub struct KeysSummary {
    pub keys: Vec<String>,
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub key: String,
    /// The locale the key was resolved in, after negotiation.
    pub locale: String,
    pub result: Result<String, String>,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running intlkeys commands
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
    /// Issues found while loading and checking messages.
    pub issues: Vec<Issue>,
    /// Number of message files that failed to load.
    pub parse_error_count: usize,
    /// Number of locale message files (JSON) that were checked.
    pub locale_files_checked: usize,
}
