use anyhow::Result;

use crate::{CliTest, EN, ES};

#[test]
fn test_consistent_messages() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["check"])?;
    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("Checked 2 locale files - no issues found")
    );

    Ok(())
}

#[test]
fn test_missing_and_extra_keys() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(
        "messages/en.json",
        r#"{
  "common": {
    "close": "Close",
    "ok": "Okay",
    "greeting": "Hello, {name}",
    "legacy": "Old"
  }
}
"#,
    )?;

    let output = test.run(&["check", "shape"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("error: \"home.title\"  missing-key"));
    assert!(output.stdout.contains("= note: (\"Inicio\") missing in: en"));
    assert!(output.stdout.contains("error: \"common.legacy\"  extra-key"));
    assert!(output.stdout.contains("en.json:6:5"));
    assert!(output.stdout.contains("2 problems (2 errors, 0 warnings)"));

    Ok(())
}

#[test]
fn test_type_mismatch() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(
        "messages/en.json",
        r#"{
  "common": {
    "close": "Close",
    "ok": "Okay",
    "greeting": "Hello, {name}"
  },
  "home": "Home"
}
"#,
    )?;

    let output = test.run(&["check", "shape"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("type-mismatch"));

    Ok(())
}

#[test]
fn test_placeholder_mismatch_is_a_warning() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/en.json", &EN.replace("Hello, {name}", "Hello, {user}"))?;

    let output = test.run(&["check", "placeholders"])?;
    assert_eq!(output.code, Some(0));
    assert!(
        output
            .stdout
            .contains("warning: \"common.greeting\"  placeholder-mismatch")
    );
    assert!(output.stdout.contains("1 problem (0 errors, 1 warning)"));

    Ok(())
}

#[test]
fn test_untranslated_value() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/en.json", &EN.replace("Okay", "OK"))?;

    let output = test.run(&["check", "untranslated"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("warning: \"common.ok\"  untranslated"));

    Ok(())
}

#[test]
fn test_invalid_canonical_structure() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(
        "messages/es.json",
        r#"{
  "common": {},
  "count": 3
}
"#,
    )?;

    let output = test.run(&["check", "structure"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("empty-namespace"));
    assert!(output.stdout.contains("invalid-leaf"));

    Ok(())
}

#[test]
fn test_parse_error_is_reported() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/fr.json", "{ invalid json }")?;

    let output = test.run(&["check"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stdout.contains("parse-error"));
    assert!(output.stdout.contains("fr.json"));

    Ok(())
}

#[test]
fn test_missing_canonical_locale() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", EN)?;

    let output = test.run(&["check"])?;
    assert_eq!(output.code, Some(2));
    assert!(
        output
            .stderr
            .contains("Canonical locale 'es' messages not found")
    );

    Ok(())
}

#[test]
fn test_canonical_locale_override() -> Result<()> {
    let test = CliTest::with_file("messages/en.json", EN)?;
    test.write_file("messages/es.json", ES)?;

    let output = test.run(&["check", "shape", "--canonical-locale", "en"])?;
    assert_eq!(output.code, Some(0));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["check", "--help"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("--canonical-locale"));
    assert!(output.stdout.contains("untranslated"));

    Ok(())
}
