//! Issue types for message catalog checks.
//!
//! Each issue is self-contained with everything the reporter needs to
//! display it: the location in a message file, the key, and details.

use enum_dispatch::enum_dispatch;

use crate::core::{LocaleTypeMismatch, MessageContext, ValueType};

// ============================================================
// Severity and Rule
// ============================================================

/// Severity level of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Rule identifier for each issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Rule {
    MissingKey,
    ExtraKey,
    TypeMismatch,
    EmptyNamespace,
    InvalidLeaf,
    InvalidKey,
    PlaceholderMismatch,
    Untranslated,
    ParseError,
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rule::MissingKey => write!(f, "missing-key"),
            Rule::ExtraKey => write!(f, "extra-key"),
            Rule::TypeMismatch => write!(f, "type-mismatch"),
            Rule::EmptyNamespace => write!(f, "empty-namespace"),
            Rule::InvalidLeaf => write!(f, "invalid-leaf"),
            Rule::InvalidKey => write!(f, "invalid-key"),
            Rule::PlaceholderMismatch => write!(f, "placeholder-mismatch"),
            Rule::Untranslated => write!(f, "untranslated"),
            Rule::ParseError => write!(f, "parse-error"),
        }
    }
}

// ============================================================
// Issue Types - Shape
// ============================================================

/// Key exists in the canonical locale but is missing from other locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKeyIssue {
    /// Where the key is defined in the canonical locale.
    pub context: MessageContext,
    /// The canonical locale code (e.g., "es").
    pub canonical_locale: String,
    /// Locales where this key is missing.
    pub missing_in: Vec<String>,
}

impl MissingKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::MissingKey
    }
}

/// Key exists in a locale but not in the canonical locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraKeyIssue {
    pub context: MessageContext,
    /// The locale where this key exists.
    pub locale: String,
    pub canonical_locale: String,
}

impl ExtraKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ExtraKey
    }
}

/// Node kind differs between the canonical locale and other locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatchIssue {
    /// Where the key is defined in the canonical locale.
    pub context: MessageContext,
    /// Expected type from the canonical locale.
    pub expected_type: ValueType,
    pub canonical_locale: String,
    /// Locales with mismatched types.
    pub mismatched_in: Vec<LocaleTypeMismatch>,
}

impl TypeMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::TypeMismatch
    }
}

// ============================================================
// Issue Types - Structure
// ============================================================

/// Namespace without any messages underneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyNamespaceIssue {
    pub context: MessageContext,
    pub locale: String,
}

impl EmptyNamespaceIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::EmptyNamespace
    }
}

/// Value that is neither a string nor an object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLeafIssue {
    pub context: MessageContext,
    pub locale: String,
    pub found: ValueType,
}

impl InvalidLeafIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidLeaf
    }
}

/// Key segment that is empty or contains the key delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidKeyIssue {
    pub context: MessageContext,
    pub locale: String,
    /// The offending segment.
    pub segment: String,
}

impl InvalidKeyIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::InvalidKey
    }
}

// ============================================================
// Issue Types - Values
// ============================================================

/// Placeholders of a translation differ from the canonical string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderMismatchIssue {
    /// Where the translation is defined.
    pub context: MessageContext,
    pub locale: String,
    pub canonical_locale: String,
    /// Placeholders of the canonical string the translation does not use.
    pub missing: Vec<String>,
    /// Placeholders the canonical string does not define.
    pub unexpected: Vec<String>,
}

impl PlaceholderMismatchIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::PlaceholderMismatch
    }
}

/// Value is identical to the canonical locale (possibly not translated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntranslatedIssue {
    /// Where the key is defined in the canonical locale.
    pub context: MessageContext,
    pub canonical_locale: String,
    /// Locales where the value is identical to the canonical value.
    pub identical_in: Vec<String>,
}

impl UntranslatedIssue {
    pub fn severity() -> Severity {
        Severity::Warning
    }

    pub fn rule() -> Rule {
        Rule::Untranslated
    }
}

// ============================================================
// Special Issue Types
// ============================================================

/// File could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrorIssue {
    pub file_path: String,
    pub error: String,
}

impl ParseErrorIssue {
    pub fn severity() -> Severity {
        Severity::Error
    }

    pub fn rule() -> Rule {
        Rule::ParseError
    }
}

// ============================================================
// Issue Enum
// ============================================================

/// A problem found while checking message files.
#[enum_dispatch(Report)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    MissingKey(MissingKeyIssue),
    ExtraKey(ExtraKeyIssue),
    TypeMismatch(TypeMismatchIssue),
    EmptyNamespace(EmptyNamespaceIssue),
    InvalidLeaf(InvalidLeafIssue),
    InvalidKey(InvalidKeyIssue),
    PlaceholderMismatch(PlaceholderMismatchIssue),
    Untranslated(UntranslatedIssue),
    ParseError(ParseErrorIssue),
}

impl Issue {
    pub fn severity(&self) -> Severity {
        self.report_severity()
    }

    pub fn rule(&self) -> Rule {
        self.report_rule()
    }
}

// ============================================================
// Report Trait (for CLI output)
// ============================================================

/// Location information for report output.
pub enum ReportLocation<'a> {
    /// Message file location with key, value and source line.
    Message(&'a MessageContext),
    /// File-level only (for ParseError - no line context).
    File { path: &'a str },
}

/// Trait for types that can be reported to CLI.
///
/// Implemented by all issue types to provide a consistent interface for the
/// report functions. Uses `enum_dispatch` for static dispatch on `Issue`.
#[enum_dispatch]
pub trait Report {
    /// Get the location for this issue.
    fn location(&self) -> ReportLocation<'_>;

    /// Primary message to display (key name, error, etc.).
    fn message(&self) -> String;

    /// Severity level.
    fn report_severity(&self) -> Severity;

    /// Rule identifier.
    fn report_rule(&self) -> Rule;

    /// Optional hint for fixing the issue.
    fn hint(&self) -> Option<String> {
        None
    }

    /// Optional details for the "= note:" line.
    fn details(&self) -> Option<String> {
        None
    }
}

// ============================================================
// Report Implementations
// ============================================================

impl Report for MissingKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "(\"{}\") missing in: {}",
            self.context.value,
            self.missing_in.join(", ")
        ))
    }
}

impl Report for ExtraKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "in {} (\"{}\"), not defined in {}",
            self.locale, self.context.value, self.canonical_locale
        ))
    }

    fn hint(&self) -> Option<String> {
        Some(format!(
            "add the key to {} or remove it from {}",
            self.canonical_locale, self.locale
        ))
    }
}

impl Report for TypeMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let mismatches: Vec<String> = self
            .mismatched_in
            .iter()
            .map(|m| format!("{} ({})", m.locale, m.actual_type))
            .collect();
        Some(format!(
            "expected {}, got: {}",
            self.expected_type,
            mismatches.join(", ")
        ))
    }
}

impl Report for EmptyNamespaceIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.display_key().to_string()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!("namespace in {} has no messages", self.locale))
    }
}

impl Report for InvalidLeafIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "expected string or object, found {} ({})",
            self.found, self.context.value
        ))
    }
}

impl Report for InvalidKeyIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        if self.segment.is_empty() {
            Some("key segments must not be empty".to_string())
        } else {
            Some(format!(
                "\"{}\" contains '{}'",
                self.segment,
                crate::core::KEY_DELIMITER
            ))
        }
    }

    fn hint(&self) -> Option<String> {
        Some("nest the message in an object instead".to_string())
    }
}

impl Report for PlaceholderMismatchIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        let braced = |names: &[String]| {
            names
                .iter()
                .map(|n| format!("{{{}}}", n))
                .collect::<Vec<_>>()
                .join(", ")
        };
        let mut parts = Vec::new();
        if !self.unexpected.is_empty() {
            parts.push(format!(
                "not defined in {}: {}",
                self.canonical_locale,
                braced(&self.unexpected)
            ));
        }
        if !self.missing.is_empty() {
            parts.push(format!("not used in {}: {}", self.locale, braced(&self.missing)));
        }
        Some(parts.join("; "))
    }
}

impl Report for UntranslatedIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::Message(&self.context)
    }

    fn message(&self) -> String {
        self.context.key.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }

    fn details(&self) -> Option<String> {
        Some(format!(
            "(\"{}\") identical in: {}",
            self.context.value,
            self.identical_in.join(", ")
        ))
    }
}

impl Report for ParseErrorIssue {
    fn location(&self) -> ReportLocation<'_> {
        ReportLocation::File {
            path: &self.file_path,
        }
    }

    fn message(&self) -> String {
        self.error.clone()
    }

    fn report_severity(&self) -> Severity {
        Self::severity()
    }

    fn report_rule(&self) -> Rule {
        Self::rule()
    }
}

// ============================================================
// Ordering for Issue (for sorting in reports)
// ============================================================

impl Issue {
    fn sort_file_path(&self) -> &str {
        match self.location() {
            ReportLocation::Message(ctx) => &ctx.location.file_path,
            ReportLocation::File { path } => path,
        }
    }

    fn sort_line(&self) -> usize {
        match self.location() {
            ReportLocation::Message(ctx) => ctx.location.line,
            ReportLocation::File { .. } => 0,
        }
    }

    fn sort_col(&self) -> usize {
        match self.location() {
            ReportLocation::Message(ctx) => ctx.location.col,
            ReportLocation::File { .. } => 0,
        }
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Sort by: file_path, line, col, rule, message
        self.sort_file_path()
            .cmp(other.sort_file_path())
            .then_with(|| self.sort_line().cmp(&other.sort_line()))
            .then_with(|| self.sort_col().cmp(&other.sort_col()))
            .then_with(|| self.rule().cmp(&other.rule()))
            .then_with(|| self.message().cmp(&other.message()))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================
// Tests
// ============================================================
