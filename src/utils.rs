//! Common utility functions shared across the codebase.

/// Checks if the text contains at least one Unicode alphabetic character.
///
/// Returns false for empty strings, pure numbers, or pure symbols.
///
/// # Examples
///
/// ```
/// use intlkeys::utils::contains_alphabetic;
///
/// assert!(contains_alphabetic("Buscar"));
/// assert!(contains_alphabetic("你好"));
/// assert!(!contains_alphabetic("2024"));
/// assert!(!contains_alphabetic("$100"));
/// assert!(!contains_alphabetic(""));
/// ```
pub fn contains_alphabetic(text: &str) -> bool {
    text.chars().any(|c| c.is_alphabetic())
}

/// Split a `name=value` command line argument.
///
/// Only the first `=` separates; the value may contain more.
pub fn parse_assignment(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got '{}'", arg)),
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_contains_alphabetic() {
        assert!(contains_alphabetic("Hello"));
        assert!(contains_alphabetic("Únete"));
        assert!(contains_alphabetic("123 abc"));
        assert!(contains_alphabetic("{count} avisos"));

        assert!(!contains_alphabetic("123"));
        assert!(!contains_alphabetic("---"));
        assert!(!contains_alphabetic("   "));
        assert!(!contains_alphabetic("123-456"));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("name=Ana"),
            Ok(("name".to_string(), "Ana".to_string()))
        );
        assert_eq!(
            parse_assignment("query=a=b"),
            Ok(("query".to_string(), "a=b".to_string()))
        );
        assert_eq!(
            parse_assignment("empty="),
            Ok(("empty".to_string(), String::new()))
        );
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
