//! TypeScript declaration output.

use std::sync::LazyLock;

use regex::Regex;

use super::{GenerateOptions, KeyPattern, header, key_patterns};
use crate::core::{MessageNode, Namespace, interpolate::placeholders, schema::MessageSchema};

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

const INDENT: &str = "  ";

pub fn render(schema: &MessageSchema, options: &GenerateOptions) -> String {
    let mut out = header("//", options, schema);

    out.push_str("\nexport interface Messages ");
    out.push_str(&shape(schema.root(), 0));
    out.push('\n');

    let keys = key_patterns(schema.keys(), options.max_depth, None);
    out.push('\n');
    out.push_str(&union("MessageKey", keys.iter().map(pattern)));

    let namespaces = schema.namespaces();
    out.push('\n');
    out.push_str(&union(
        "Namespace",
        namespaces.iter().map(|ns| string_literal(ns)),
    ));

    out.push_str("\nexport interface NamespaceKeyMap {");
    if namespaces.is_empty() {
        out.push_str("}\n");
    } else {
        out.push('\n');
        for &ns in &namespaces {
            let relative = key_patterns(&schema.keys().within(ns), options.max_depth, Some(ns));
            let members: Vec<String> = relative.iter().map(pattern).collect();
            out.push_str(&format!(
                "{}{}: {};\n",
                INDENT,
                property(ns),
                members.join(" | ")
            ));
        }
        out.push_str("}\n");
    }

    out.push_str("\nexport type NamespaceKeys<N extends Namespace> = NamespaceKeyMap[N];\n");
    out.push_str("\nexport type NamespaceMessages<N extends Namespace> = Messages[N];\n");

    out.push_str("\nexport interface MessageParams {");
    let params: Vec<String> = schema
        .root()
        .leaves(None)
        .into_iter()
        .filter_map(|(key, leaf)| {
            let names = placeholders(&leaf.value);
            if names.is_empty() {
                return None;
            }
            let fields: Vec<String> = names
                .iter()
                .map(|name| format!("{}: string | number", property(name)))
                .collect();
            Some(format!(
                "{}{}: {{ {} }};\n",
                INDENT,
                string_literal(key.as_str()),
                fields.join("; ")
            ))
        })
        .collect();
    if params.is_empty() {
        out.push_str("}\n");
    } else {
        out.push('\n');
        for line in params {
            out.push_str(&line);
        }
        out.push_str("}\n");
    }

    out
}

/// The nested object type of a namespace.
fn shape(namespace: &Namespace, depth: usize) -> String {
    let outer = INDENT.repeat(depth);
    let inner = INDENT.repeat(depth + 1);
    let mut out = String::from("{\n");
    for (key, node) in namespace.children() {
        let value = match node {
            MessageNode::Namespace(ns) => shape(ns, depth + 1),
            MessageNode::Leaf(_) | MessageNode::Invalid(_) => "string".to_string(),
        };
        out.push_str(&format!("{}{}: {};\n", inner, property(key), value));
    }
    out.push_str(&outer);
    out.push('}');
    out
}

fn union(name: &str, members: impl Iterator<Item = String>) -> String {
    let members: Vec<String> = members.collect();
    if members.is_empty() {
        return format!("export type {} = never;\n", name);
    }
    let mut out = format!("export type {} =\n", name);
    for member in &members {
        out.push_str(&format!("{}| {}\n", INDENT, member));
    }
    // Terminate the last member.
    out.pop();
    out.push_str(";\n");
    out
}

fn pattern(pattern: &KeyPattern) -> String {
    match pattern {
        KeyPattern::Exact(key) => string_literal(key),
        KeyPattern::Prefix(prefix) if prefix.is_empty() => "string".to_string(),
        KeyPattern::Prefix(prefix) => format!("`{}.${{string}}`", template_text(prefix)),
    }
}

fn property(name: &str) -> String {
    if IDENTIFIER_RE.is_match(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

fn string_literal(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}

/// Escape text for use inside a template literal.
fn template_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' | '`' | '$' => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out
}
