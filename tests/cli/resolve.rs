use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::CliTest;

#[test]
fn test_resolves_canonical_message() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["resolve", "common.close"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Cerrar\n");

    Ok(())
}

#[test]
fn test_resolves_with_substitution() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["resolve", "common.greeting", "-l", "en", "-a", "name=Ana"])?;
    assert_eq!(output.code, Some(0));
    assert_eq!(output.stdout, "Hello, Ana\n");

    Ok(())
}

#[test]
fn test_missing_substitution_policies() -> Result<()> {
    let test = CliTest::with_messages()?;

    let strict = test.run(&["resolve", "common.greeting", "--policy", "fail"])?;
    assert_eq!(strict.code, Some(1));
    assert!(strict.stderr.contains("missing substitution for placeholder '{name}'"));

    let keep = test.run(&["resolve", "common.greeting", "--policy", "keep"])?;
    assert_eq!(keep.code, Some(0));
    assert_eq!(keep.stdout, "Hola, {name}\n");

    let empty = test.run(&["resolve", "common.greeting", "--policy", "empty"])?;
    assert_eq!(empty.code, Some(0));
    assert_eq!(empty.stdout, "Hola, \n");

    Ok(())
}

#[test]
fn test_config_policy_applies_without_args() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file(".intlkeysrc.json", r#"{"missingSubstitution": "fail"}"#)?;

    let output = test.run(&["resolve", "common.greeting"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("missing substitution"));

    let fallback = test.run(&["resolve", "common.greeting", "--fallback"])?;
    assert_eq!(fallback.code, Some(0));
    assert_eq!(fallback.stdout, "Hola, {name}\n");

    Ok(())
}

#[test]
fn test_unknown_key() -> Result<()> {
    let test = CliTest::with_messages()?;

    let output = test.run(&["resolve", "common.nope"])?;
    assert_eq!(output.code, Some(1));
    assert!(output.stderr.contains("unknown key 'common.nope'"));

    Ok(())
}

#[test]
fn test_fallback_to_canonical_locale() -> Result<()> {
    let test = CliTest::with_messages()?;
    test.write_file("messages/en.json", r#"{"common": {"close": "Close"}}"#)?;

    let strict = test.run(&["resolve", "home.title", "-l", "en"])?;
    assert_eq!(strict.code, Some(1));
    assert!(strict.stderr.contains("not found in locale 'en'"));

    let lenient = test.run(&["resolve", "home.title", "-l", "en", "--fallback"])?;
    assert_eq!(lenient.code, Some(0));
    assert_eq!(lenient.stdout, "Inicio\n");

    Ok(())
}
