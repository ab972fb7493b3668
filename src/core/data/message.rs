use std::fmt;

/// Position information in message/locale files (JSON).
///
/// Represents a specific location in a locale JSON file, used for error reporting
/// when there are issues with translation keys or values.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MessageLocation {
    /// Path to the locale file (e.g., "./messages/es.json").
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed).
    pub col: usize,
}

impl MessageLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Create with default column (1).
    pub fn with_line(file_path: impl Into<String>, line: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col: 1,
        }
    }

    /// Location of the start of a file.
    pub fn file_start(file_path: impl Into<String>) -> Self {
        Self::with_line(file_path, 1)
    }
}

/// JSON value type of a node in a message document.
///
/// Only `String` (a translatable leaf) and `Object` (a namespace) are part of a
/// well-formed message document. The remaining variants are kept so diagnostics
/// can say what was found instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ValueType {
    /// A translatable string: `"search": "Buscar"`
    String,
    /// A nested namespace: `"common": { ... }`
    Object,
    Array,
    Number,
    Boolean,
    Null,
}

impl ValueType {
    pub fn of(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::String(_) => ValueType::String,
            Value::Object(_) => ValueType::Object,
            Value::Array(_) => ValueType::Array,
            Value::Number(_) => ValueType::Number,
            Value::Bool(_) => ValueType::Boolean,
            Value::Null => ValueType::Null,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::String => write!(f, "string"),
            ValueType::Object => write!(f, "object"),
            ValueType::Array => write!(f, "array"),
            ValueType::Number => write!(f, "number"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Null => write!(f, "null"),
        }
    }
}

/// Information about a locale whose value has a different type than the
/// canonical locale.
///
/// Used in `TypeMismatchIssue` to describe which locales disagree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocaleTypeMismatch {
    pub locale: String,
    pub actual_type: ValueType,
    pub location: MessageLocation,
}

impl LocaleTypeMismatch {
    pub fn new(
        locale: impl Into<String>,
        actual_type: ValueType,
        location: MessageLocation,
    ) -> Self {
        Self {
            locale: locale.into(),
            actual_type,
            location,
        }
    }
}

/// Position with context information in message files.
///
/// Contains the key, the value found there, and the JSON source line
/// so reports can point at the exact spot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContext {
    pub location: MessageLocation,
    /// The translation key (e.g., "common.search").
    pub key: String,
    /// The translation value, or the raw JSON for non-string values.
    pub value: String,
    /// The full line of JSON the key appears on.
    pub source_line: String,
}

impl MessageContext {
    pub fn new(
        location: MessageLocation,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            location,
            key: key.into(),
            value: value.into(),
            source_line: String::new(),
        }
    }

    pub fn with_source_line(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = source_line.into();
        self
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }

    /// Key for display; the document root has an empty key.
    pub fn display_key(&self) -> &str {
        if self.key.is_empty() {
            "(root)"
        } else {
            &self.key
        }
    }
}
