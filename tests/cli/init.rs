use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, EN, ES};

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    assert_eq!(parsed["messagesRoot"], "./messages");
    assert_eq!(parsed["canonicalLocale"], "es");
    assert_eq!(parsed["maxDepth"], 4);
    assert_eq!(parsed["output"], "./src/types/messages.d.ts");
    assert_eq!(parsed["target"], "typescript");

    // Verify formatting (2-space indentation)
    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"])?;
    assert_eq!(output.code, Some(0));
    assert!(output.stdout.contains("Created .intlkeysrc.json"));

    let content = test.read_file(".intlkeysrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".intlkeysrc.json", "{}")?;

    let output = test.run(&["init"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains(".intlkeysrc.json already exists"));
    assert_eq!(test.read_file(".intlkeysrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"])?;
    test.write_file("messages/es.json", ES)?;
    test.write_file("messages/en.json", EN)?;

    let output = test.run(&["check"])?;
    assert_eq!(
        output.code,
        Some(0),
        "Check command should work with initialized config. stderr: {}",
        output.stderr
    );

    Ok(())
}

#[test]
fn test_config_overrides_defaults() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".intlkeysrc.json",
        r#"{"messagesRoot": "./locales", "canonicalLocale": "en"}"#,
    )?;
    test.write_file("locales/en.json", EN)?;

    let output = test.run(&["keys", "-n", "home"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "home.title\n");

    Ok(())
}
