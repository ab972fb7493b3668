//! Rust constant table output.

use super::{GenerateOptions, header};
use crate::core::schema::MessageSchema;

pub fn render(schema: &MessageSchema, options: &GenerateOptions) -> String {
    let mut out = header("//", options, schema);

    out.push_str(&format!(
        "\npub const CANONICAL_LOCALE: &str = {:?};\n",
        schema.canonical_locale()
    ));

    out.push('\n');
    out.push_str(&table("NAMESPACES", schema.namespaces()));

    out.push('\n');
    out.push_str(&table(
        "KEYS",
        schema.keys().iter().map(|key| key.as_str()).collect(),
    ));

    out
}

fn table(name: &str, values: Vec<&str>) -> String {
    if values.is_empty() {
        return format!("pub const {}: &[&str] = &[];\n", name);
    }
    let mut out = format!("pub const {}: &[&str] = &[\n", name);
    for value in values {
        out.push_str(&format!("    {:?},\n", value));
    }
    out.push_str("];\n");
    out
}
