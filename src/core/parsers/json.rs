use std::{
    collections::btree_map::Entry,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use rayon::prelude::*;
use serde_json::{Map, Value};
use walkdir::WalkDir;

use crate::core::{
    AllLocaleMessages, InvalidValue, KeyPath, Leaf, LocaleBundle, MessageLocation, MessageNode,
    Namespace, ValueType,
};

/// A warning from scanning message files.
#[derive(Debug, Clone)]
pub struct MessageScanWarning {
    pub file_path: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct ScanMessagesResult {
    pub messages: AllLocaleMessages,
    pub warnings: Vec<MessageScanWarning>,
}

/// One JSON file contributing to a locale.
#[derive(Debug)]
struct MessageSource {
    locale: String,
    path: PathBuf,
    /// Namespace segments the file is mounted under (split layout), empty for
    /// a whole-locale document.
    mount: Vec<String>,
}

/// Parse a message document into a namespace tree.
///
/// The top-level value must be an object. Every node records the line and
/// column of its key so diagnostics can point into the file.
pub fn parse_json_document(content: &str, file_path: &str) -> Result<Namespace> {
    let json: Value = serde_json::from_str(content)
        .with_context(|| format!("Failed to parse JSON file: {}", file_path))?;

    let Value::Object(map) = &json else {
        bail!(
            "Expected an object at the top level of {}, found {}",
            file_path,
            ValueType::of(&json)
        );
    };

    let document = Document::new(content, file_path);
    let root = Namespace::new(
        MessageLocation::file_start(file_path),
        document.line_text(1),
    );
    Ok(document.build_namespace(map, None, root, 0, &mut 0))
}

pub fn parse_json_file(path: &Path) -> Result<Namespace> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {}", path.display()))?;
    parse_json_document(&content, &path.to_string_lossy())
}

/// A JSON source with a pre-computed line index.
struct Document<'a> {
    content: &'a str,
    file_path: &'a str,
    /// Byte offsets where each line starts.
    line_index: Vec<usize>,
}

impl<'a> Document<'a> {
    fn new(content: &'a str, file_path: &'a str) -> Self {
        Self {
            content,
            file_path,
            line_index: build_line_index(content),
        }
    }

    /// Build the subtree of `map`.
    ///
    /// Object keys come in document order, so each key is searched for after
    /// the previous key (and its descendants). `cursor` tracks that position;
    /// `parent_offset` is used when a key cannot be found in the text.
    fn build_namespace(
        &self,
        map: &Map<String, Value>,
        prefix: Option<&KeyPath>,
        mut namespace: Namespace,
        parent_offset: usize,
        cursor: &mut usize,
    ) -> Namespace {
        for (key, value) in map {
            let path = KeyPath::join(prefix, key);
            let offset = match find_key_offset(self.content, *cursor, key) {
                Some(offset) => {
                    *cursor = offset + 1;
                    offset
                }
                None => parent_offset,
            };
            let location = self.locate(offset);
            let source_line = self.line_text(location.line);

            let node = match value {
                Value::Object(children) => MessageNode::Namespace(self.build_namespace(
                    children,
                    Some(&path),
                    Namespace::new(location, source_line),
                    offset,
                    cursor,
                )),
                Value::String(s) => MessageNode::Leaf(Leaf {
                    value: s.clone(),
                    location,
                    source_line,
                }),
                other => MessageNode::Invalid(InvalidValue {
                    value_type: ValueType::of(other),
                    raw: other.to_string(),
                    location,
                    source_line,
                }),
            };
            namespace.insert(key.clone(), node);
        }
        namespace
    }

    fn locate(&self, offset: usize) -> MessageLocation {
        let line = offset_to_line(&self.line_index, offset);
        let line_start = self.line_index.get(line - 1).copied().unwrap_or(0);
        let col = self.content[line_start..offset].chars().count() + 1;
        MessageLocation::new(self.file_path, line, col)
    }

    fn line_text(&self, line: usize) -> String {
        self.content
            .lines()
            .nth(line.saturating_sub(1))
            .unwrap_or_default()
            .to_string()
    }
}

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// The returned vector contains byte offsets where each line starts.
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0]; // Line 1 starts at offset 0
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find line number for a byte offset using binary search.
///
/// Returns 1-based line number.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1, // Exact match at line start
        Err(line) => line,    // Falls within this line
    }
}

/// Find the byte offset of the opening quote of `key` at or after `from`.
///
/// The match must be a JSON key (followed by `:`), not a string value that
/// happens to contain the same text.
fn find_key_offset(content: &str, from: usize, key: &str) -> Option<usize> {
    let pattern = Value::from(key).to_string();
    let remaining = content.get(from..)?;

    let mut pos = 0;
    while let Some(rel_pos) = remaining[pos..].find(&pattern) {
        let abs_pos = pos + rel_pos;
        let after_pattern = abs_pos + pattern.len();
        if remaining[after_pattern..].trim_start().starts_with(':') {
            return Some(from + abs_pos);
        }
        pos = abs_pos + 1;
    }
    None
}

/// Extracts locale from filename.
///
/// Examples:
/// - "es.json" -> Some("es")
/// - "es-MX.json" -> Some("es-MX")
/// - "/path/to/messages/en.json" -> Some("en")
pub fn extract_locale(path: impl AsRef<Path>) -> Option<String> {
    let path = path.as_ref();
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

fn is_json(path: &Path) -> bool {
    path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("json")
}

fn is_ignored(messages_root: &Path, path: &Path, ignores: &[Pattern]) -> bool {
    let relative = path.strip_prefix(messages_root).unwrap_or(path);
    ignores.iter().any(|pattern| pattern.matches_path(relative))
}

/// Collect message files under the messages root.
///
/// Two layouts are recognised and may be mixed:
/// - `<root>/<locale>.json`: the whole locale in one document
/// - `<root>/<locale>/<namespace>.json`: one document per namespace; nested
///   directories become nested namespaces
///
/// Per locale, the whole-locale document comes first, then split files in
/// path order.
fn collect_sources(messages_root: &Path, ignores: &[Pattern]) -> Result<Vec<MessageSource>> {
    let mut sources = Vec::new();

    for entry in fs::read_dir(messages_root)
        .with_context(|| format!("Failed to read directory: {}", messages_root.display()))?
    {
        let path = entry?.path();

        if path.is_dir() {
            let Some(locale) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            for file in WalkDir::new(&path)
                .sort_by_file_name()
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(err) => {
                        tracing::warn!("Skipping unreadable path: {}", err);
                        None
                    }
                })
            {
                let file_path = file.path();
                if !is_json(file_path) {
                    continue;
                }
                let relative = file_path.strip_prefix(&path).unwrap_or(file_path);
                let mount = relative
                    .with_extension("")
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().to_string())
                    .collect();
                sources.push(MessageSource {
                    locale: locale.to_string(),
                    path: file_path.to_path_buf(),
                    mount,
                });
            }
        } else if is_json(&path)
            && let Some(locale) = extract_locale(&path)
        {
            sources.push(MessageSource {
                locale,
                path,
                mount: Vec::new(),
            });
        }
    }

    sources.retain(|source| !is_ignored(messages_root, &source.path, ignores));
    // Whole-locale documents take precedence over split files.
    sources.sort_by(|a, b| {
        (&a.locale, !a.mount.is_empty(), &a.path).cmp(&(&b.locale, !b.mount.is_empty(), &b.path))
    });
    Ok(sources)
}

/// Wrap a parsed document in the namespaces it is mounted under.
fn mount(content: Namespace, segments: &[String]) -> Namespace {
    let mut node = content;
    for segment in segments.iter().rev() {
        let mut parent = Namespace::new(node.location.clone(), node.source_line.clone());
        parent.insert(segment.clone(), MessageNode::Namespace(node));
        node = parent;
    }
    node
}

/// Load every locale under the messages root.
///
/// Files that cannot be read or parsed, and split files that redefine a key
/// the whole-locale document or an earlier split file (in path order) already
/// defines, are skipped and reported as warnings.
pub fn scan_message_files(
    messages_root: impl AsRef<Path>,
    ignores: &[Pattern],
) -> Result<ScanMessagesResult> {
    let messages_root = messages_root.as_ref();
    let mut result = ScanMessagesResult::default();

    if !messages_root.exists() {
        bail!(
            "Messages directory '{}' does not exist.\n\
             Hint: Check your .intlkeysrc.json 'messagesRoot' setting.",
            messages_root.display()
        );
    }

    if !messages_root.is_dir() {
        bail!("'{}' is not a directory.", messages_root.display());
    }

    let sources = collect_sources(messages_root, ignores)?;
    tracing::debug!(
        root = %messages_root.display(),
        files = sources.len(),
        "Scanning message files"
    );

    let parsed: Vec<(MessageSource, Result<Namespace>)> = sources
        .into_par_iter()
        .map(|source| {
            let parsed = parse_json_file(&source.path);
            (source, parsed)
        })
        .collect();

    for (source, parsed) in parsed {
        let file_path = source.path.to_string_lossy().to_string();
        let namespace = match parsed {
            Ok(namespace) => mount(namespace, &source.mount),
            Err(e) => {
                tracing::debug!("Skipping {}: {:#}", file_path, e);
                result.warnings.push(MessageScanWarning {
                    file_path,
                    error: format!("{:#}", e),
                });
                continue;
            }
        };

        match result.messages.entry(source.locale.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(LocaleBundle {
                    locale: source.locale,
                    files: vec![file_path],
                    root: namespace,
                });
            }
            Entry::Occupied(mut entry) => {
                let bundle = entry.get_mut();
                if let Some(conflict) = bundle.root.conflict_with(&namespace, None) {
                    result.warnings.push(MessageScanWarning {
                        error: format!(
                            "Key '{}' is already defined for locale '{}' in {}",
                            conflict,
                            bundle.locale,
                            bundle.source_name()
                        ),
                        file_path,
                    });
                    continue;
                }
                bundle.root.merge(namespace);
                bundle.files.push(file_path);
            }
        }
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::core::parsers::json::*;
    use tempfile::tempdir;

    fn parse(content: &str) -> LocaleBundle {
        LocaleBundle::new("es", parse_json_document(content, "test.json").unwrap())
    }

    #[test]
    fn test_parse_simple() {
        let bundle = parse(r#"{"common": {"search": "Buscar", "close": "Cerrar"}}"#);

        assert_eq!(
            bundle.leaf("common.search").map(|l| l.value.as_str()),
            Some("Buscar")
        );
        assert_eq!(
            bundle.leaf("common.close").map(|l| l.value.as_str()),
            Some("Cerrar")
        );
    }

    #[test]
    fn test_parse_nested() {
        let bundle = parse(r#"{"events": {"card": {"title": "Eventos", "cta": "Ver más"}}}"#);

        assert_eq!(
            bundle.leaf("events.card.title").map(|l| l.value.as_str()),
            Some("Eventos")
        );
        assert_eq!(
            bundle.leaf("events.card.cta").map(|l| l.value.as_str()),
            Some("Ver más")
        );
    }

    #[test]
    fn test_parse_root_level() {
        let bundle = parse(r#"{"title": "SITIMM", "description": "Sindicato"}"#);

        assert!(bundle.contains_key("title"));
        assert!(bundle.contains_key("description"));
    }

    #[test]
    fn test_non_string_values_are_kept_as_invalid() {
        let bundle = parse(r#"{"faq": {"items": ["a", "b"], "count": 2, "on": true, "none": null}}"#);

        let types: Vec<ValueType> = ["faq.items", "faq.count", "faq.on", "faq.none"]
            .iter()
            .map(|k| bundle.get(k).unwrap().value_type())
            .collect();
        assert_eq!(
            types,
            vec![
                ValueType::Array,
                ValueType::Number,
                ValueType::Boolean,
                ValueType::Null
            ]
        );
        assert!(bundle.key_set().is_empty());
        assert_eq!(bundle.get("faq.items").unwrap().display_value(), r#"["a","b"]"#);
    }

    #[test]
    fn test_top_level_must_be_object() {
        let err = parse_json_document(r#"["first", "second"]"#, "test.json").unwrap_err();
        assert!(err.to_string().contains("found array"));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_json_document(r#"{ invalid json }"#, "broken.json").unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }

    #[test]
    fn test_extract_locale() {
        assert_eq!(extract_locale(Path::new("es.json")), Some("es".to_string()));
        assert_eq!(
            extract_locale(Path::new("es-MX.json")),
            Some("es-MX".to_string())
        );
        assert_eq!(
            extract_locale(Path::new("/path/to/messages/en.json")),
            Some("en".to_string())
        );
    }

    #[test]
    fn test_locations_skip_value_matches() {
        // "common" appears in a value on line 3; the key is on line 5.
        let content = r#"{
  "intro": {
    "text": "see common questions"
  },
  "common": {
    "close": "Cerrar"
  }
}"#;
        let bundle = parse(content);

        let close = bundle.leaf("common.close").unwrap();
        assert_eq!(close.location.line, 6);
        assert_eq!(close.location.col, 5);
        assert_eq!(close.source_line, r#"    "close": "Cerrar""#);

        let common = bundle.get("common").unwrap();
        assert_eq!(common.location().line, 5);
        assert_eq!(common.location().col, 3);
    }

    #[test]
    fn test_locations_duplicate_leaf_names() {
        let content = r#"{
  "modal": { "close": "Cerrar modal" },
  "common": { "close": "Cerrar" }
}"#;
        let bundle = parse(content);
        assert_eq!(bundle.leaf("modal.close").unwrap().location.line, 2);
        assert_eq!(bundle.leaf("common.close").unwrap().location.line, 3);
        assert_eq!(bundle.leaf("common.close").unwrap().location.col, 15);
    }

    #[test]
    fn test_locations_sibling_after_nested_namesake() {
        let content = r#"{
  "nav": { "title": "Menú" },
  "title": "SITIMM",
  "a.b": "punto"
}"#;
        let bundle = parse(content);
        assert_eq!(bundle.leaf("nav.title").unwrap().location.line, 2);
        assert_eq!(bundle.leaf("title").unwrap().location.line, 3);
        let dotted = bundle.root.child("a.b").unwrap();
        assert_eq!(dotted.location().line, 4);
    }

    #[test]
    fn test_column_counts_characters() {
        let content = "{\"título\": {\"año\": \"2024\"}}";
        let bundle = parse(content);
        // `{"título": {` is 12 characters; the key quote is the 13th.
        assert_eq!(bundle.leaf("título.año").unwrap().location.col, 13);
    }

    #[test]
    fn test_build_line_index() {
        let content = "line1\nline2\nline3";
        let index = build_line_index(content);

        // Line 1 starts at 0, line 2 at 6, line 3 at 12
        assert_eq!(index, vec![0, 6, 12]);

        assert_eq!(offset_to_line(&index, 0), 1); // Start of line 1
        assert_eq!(offset_to_line(&index, 3), 1); // Middle of line 1
        assert_eq!(offset_to_line(&index, 6), 2); // Start of line 2
        assert_eq!(offset_to_line(&index, 8), 2); // Middle of line 2
        assert_eq!(offset_to_line(&index, 12), 3); // Start of line 3
    }

    #[test]
    fn test_parse_json_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("es.json");
        fs::write(&file_path, r#"{"common": {"search": "Buscar"}}"#).unwrap();

        let root = parse_json_file(&file_path).unwrap();
        let bundle = LocaleBundle::new("es", root);
        let leaf = bundle.leaf("common.search").unwrap();
        assert_eq!(leaf.value, "Buscar");
        assert!(leaf.location.file_path.ends_with("es.json"));
        assert_eq!(bundle.files.len(), 1);
    }

    #[test]
    fn test_scan_message_files() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("es.json"), r#"{"search": "Buscar"}"#).unwrap();
        fs::write(dir.path().join("en.json"), r#"{"search": "Search"}"#).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a locale").unwrap();

        let result = scan_message_files(dir.path(), &[]).unwrap();

        assert_eq!(result.messages.len(), 2);
        assert!(result.messages.contains_key("es"));
        assert!(result.messages.contains_key("en"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_scan_message_files_with_invalid_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("es.json"), r#"{"search": "Buscar"}"#).unwrap();
        fs::write(dir.path().join("en.json"), r#"{ invalid json }"#).unwrap();

        let result = scan_message_files(dir.path(), &[]).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert!(result.messages.contains_key("es"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].file_path.contains("en.json"));
    }

    #[test]
    fn test_scan_message_files_nonexistent_dir() {
        let result = scan_message_files(Path::new("/nonexistent/path"), &[]);

        let err = result.unwrap_err().to_string();
        assert!(err.contains("does not exist"));
        assert!(err.contains("messagesRoot"));
    }

    #[test]
    fn test_scan_split_layout() {
        let dir = tempdir().unwrap();
        let es = dir.path().join("es");
        fs::create_dir_all(es.join("pages")).unwrap();
        fs::write(es.join("common.json"), r#"{"search": "Buscar"}"#).unwrap();
        fs::write(es.join("pages").join("home.json"), r#"{"title": "Inicio"}"#).unwrap();

        let result = scan_message_files(dir.path(), &[]).unwrap();
        let bundle = &result.messages["es"];

        assert!(bundle.contains_key("common.search"));
        assert!(bundle.contains_key("pages.home.title"));
        assert_eq!(bundle.files.len(), 2);
        // Locations are relative to the file the key lives in.
        assert_eq!(bundle.leaf("common.search").unwrap().location.line, 1);
        assert!(
            bundle
                .leaf("pages.home.title")
                .unwrap()
                .location
                .file_path
                .ends_with("home.json")
        );
    }

    #[test]
    fn test_scan_mixed_layout_conflict() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("es")).unwrap();
        fs::write(
            dir.path().join("es.json"),
            r#"{"common": {"search": "Buscar"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("es").join("common.json"),
            r#"{"search": "Otra", "close": "Cerrar"}"#,
        )
        .unwrap();

        let result = scan_message_files(dir.path(), &[]).unwrap();
        let bundle = &result.messages["es"];

        assert_eq!(bundle.leaf("common.search").unwrap().value, "Buscar");
        assert!(!bundle.contains_key("common.close"));
        assert_eq!(result.warnings.len(), 1);
        assert!(result.warnings[0].error.contains("common.search"));
        assert!(result.warnings[0].file_path.ends_with("common.json"));
    }

    #[test]
    fn test_scan_whole_locale_document_kept_beside_split_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("es")).unwrap();
        fs::write(
            dir.path().join("es.json"),
            r#"{"home": {"title": "Inicio"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("es").join("common.json"),
            r#"{"close": "Cerrar"}"#,
        )
        .unwrap();

        let result = scan_message_files(dir.path(), &[]).unwrap();
        let bundle = &result.messages["es"];

        assert!(result.warnings.is_empty());
        assert!(bundle.contains_key("home.title"));
        assert!(bundle.contains_key("common.close"));
        assert!(bundle.files[0].ends_with("es.json"));
    }

    #[test]
    fn test_scan_respects_ignores() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("es.json"), r#"{"search": "Buscar"}"#).unwrap();
        fs::write(dir.path().join("draft-fr.json"), r#"{"search": "Chercher"}"#).unwrap();

        let ignores = vec![Pattern::new("draft-*.json").unwrap()];
        let result = scan_message_files(dir.path(), &ignores).unwrap();

        assert_eq!(result.messages.len(), 1);
        assert!(result.messages.contains_key("es"));
    }
}
